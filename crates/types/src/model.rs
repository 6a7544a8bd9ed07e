//! Domain models exchanged with the remote collaboration API.
//!
//! Read models mirror the shape of the GraphQL `data` envelope and are
//! fetched fresh on every call. [`OutboundMessage`] is the JSON body posted
//! to the messages endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named collaboration area visible to the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub title: String,
}

/// A GraphQL connection page. Only `items` is requested; pagination cursors
/// are not followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// A member of a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: String,
}

/// One entry of a conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Annotations are open-ended on the server side and kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Value>>,
}

/// The conversation as embedded in a space query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub messages: Page<Message>,
}

/// The `data.space` projection returned by the members query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Timestamp as sent by the server.
    #[serde(default)]
    pub members_updated: Option<Value>,
    #[serde(default)]
    pub members: Page<Member>,
    #[serde(default)]
    pub conversation: Option<ConversationSummary>,
}

/// An ordered message log fetched by conversation id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub created: Option<Value>,
    #[serde(default)]
    pub updated: Option<Value>,
    #[serde(default)]
    pub messages: Page<Message>,
}

// ── Outbound app messages ─────────────────────────────────────────────────────

const APP_MESSAGE_TYPE: &str = "appMessage";
const GENERIC_ANNOTATION_TYPE: &str = "generic";
const MESSAGE_VERSION: f32 = 1.0;

/// Identity shown next to an app message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub avatar: String,
    pub url: String,
}

/// Presentation settings applied to every outbound app message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppMessageStyle {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_actor")]
    pub actor: Actor,
}

fn default_color() -> String {
    "#6CB7FB".to_string()
}
fn default_title() -> String {
    "Sample Message".to_string()
}
fn default_actor() -> Actor {
    Actor {
        name: "Team 6".to_string(),
        avatar: "https://avatars1.githubusercontent.com/u/22985179".to_string(),
        url: "https://github.com/watsonwork-helloworld".to_string(),
    }
}

impl Default for AppMessageStyle {
    fn default() -> Self {
        Self {
            color: default_color(),
            title: default_title(),
            actor: default_actor(),
        }
    }
}

/// A single rich annotation carried by an app message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: f32,
    pub color: String,
    pub title: String,
    pub text: String,
    pub actor: Actor,
}

/// Body of `POST /v1/spaces/{spaceId}/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: f32,
    pub annotations: Vec<Annotation>,
}

impl OutboundMessage {
    /// Build an app message with `text` as the body of its only annotation.
    ///
    /// Pure: the same inputs always produce the same message.
    #[must_use]
    pub fn app_message(text: impl Into<String>, style: &AppMessageStyle) -> Self {
        Self {
            kind: APP_MESSAGE_TYPE.to_string(),
            version: MESSAGE_VERSION,
            annotations: vec![Annotation {
                kind: GENERIC_ANNOTATION_TYPE.to_string(),
                version: MESSAGE_VERSION,
                color: style.color.clone(),
                title: style.title.clone(),
                text: text.into(),
                actor: style.actor.clone(),
            }],
        }
    }
}
