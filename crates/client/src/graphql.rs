//! GraphQL queries sent to the `/graphql` endpoint and decoding of the
//! `data` envelope.
//!
//! The endpoint takes the raw query text (`application/graphql`), so there
//! is no variables map. Identifiers are embedded as GraphQL string literals
//! built by [`string_literal`], which escapes every character that could
//! terminate the literal.

use serde::de::DeserializeOwned;
use serde_json::Value;
use spacebridge_types::{SpaceError, error::Result};

/// GraphQL endpoint path segment.
pub const GRAPHQL_PATH: &str = "graphql";

/// Content type identifying a raw GraphQL payload.
pub const CONTENT_TYPE: &str = "application/graphql";

/// Every GraphQL call expects this status.
pub const EXPECTED_STATUS: u16 = 200;

/// Maximum number of spaces or messages requested in one page.
pub const PAGE_SIZE: u32 = 50;

/// Spaces visible to the app, first page only.
pub const LIST_SPACES_QUERY: &str = "query { spaces(first: 50) { items { title id } } }";

/// Encodes `value` as a double-quoted GraphQL string literal.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Space metadata plus its conversation id and first messages.
#[must_use]
pub fn space_conversation_query(space_id: &str) -> String {
    format!(
        "query getSpace {{ space(id: {}) {{ title description membersUpdated \
         members {{ items {{ email displayName }} }} \
         conversation {{ id messages {{ items {{ content }} }} }} }} }}",
        string_literal(space_id)
    )
}

/// Space metadata, members, and message contents.
#[must_use]
pub fn space_members_query(space_id: &str) -> String {
    format!(
        "query getSpace {{ space(id: {}) {{ title description membersUpdated \
         members {{ items {{ email displayName }} }} \
         conversation {{ messages {{ items {{ content }} }} }} }} }}",
        string_literal(space_id)
    )
}

/// A conversation and its first page of messages.
#[must_use]
pub fn conversation_query(conversation_id: &str) -> String {
    format!(
        "query getConversation {{ conversation(id: {}) {{ id created updated \
         messages(first: {PAGE_SIZE}) {{ items {{ content contentType annotations }} }} }} }}",
        string_literal(conversation_id)
    )
}

/// Extracts and deserializes the value at `pointer` (a JSON pointer such as
/// `/data/spaces/items`) from a GraphQL response body.
///
/// # Errors
///
/// - [`SpaceError::Graphql`] if the body carries `errors` and no `data`.
/// - [`SpaceError::Decode`] if the pointer is missing or `null`.
/// - [`SpaceError::Serialization`] if the value has the wrong shape.
pub fn extract<T: DeserializeOwned>(mut body: Value, pointer: &str) -> Result<T> {
    let messages = error_messages(&body);
    let has_data = body.get("data").is_some_and(|d| !d.is_null());
    if !has_data && !messages.is_empty() {
        return Err(SpaceError::Graphql(messages.join("; ")));
    }
    if !messages.is_empty() {
        tracing::warn!(errors = %messages.join("; "), "graphql response carried partial errors");
    }

    match body.pointer_mut(pointer).map(Value::take) {
        Some(Value::Null) | None => Err(SpaceError::Decode(format!(
            "response has no value at {pointer}"
        ))),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

fn error_messages(body: &Value) -> Vec<String> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .map_or_else(|| e.to_string(), str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}
