//! The public client: one type with private state and readiness-gated
//! operations.

use crate::{ApiHttp, graphql};
use serde_json::Value;
use spacebridge_auth::CredentialManager;
use spacebridge_config::ClientConfig;
use spacebridge_types::{
    AccessToken, AppMessageStyle, Conversation, OutboundMessage, Space, SpaceDetail, SpaceError,
    TokenSource, error::Result,
};
use std::sync::Arc;

/// Status returned by the messages endpoint when a message is created.
const MESSAGE_CREATED: u16 = 201;

struct Inner {
    auth: CredentialManager,
    /// Read side of the session owned by `auth`.
    tokens: Arc<dyn TokenSource>,
    api: ApiHttp,
    style: AppMessageStyle,
}

/// Client for the collaboration API.
///
/// Cheap to clone; clones share the same session. Operations may run
/// concurrently once the client is ready.
#[derive(Clone)]
pub struct SpaceClient {
    inner: Arc<Inner>,
}

impl SpaceClient {
    /// Validates the configuration and builds the client. No network I/O;
    /// the client is not ready until [`initialize`](Self::initialize)
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] on missing credentials or an invalid
    /// base URL, or if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = rquest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SpaceError::Config(format!("failed to build http client: {e}")))?;
        Self::with_http(config, http)
    }

    /// Like [`new`](Self::new), with a caller-supplied HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] on missing credentials or an invalid
    /// base URL.
    pub fn with_http(config: ClientConfig, http: rquest::Client) -> Result<Self> {
        let auth = CredentialManager::from_config(&config, http.clone())?;
        let api = ApiHttp::new(http, config.base_url()?);
        let tokens: Arc<dyn TokenSource> = auth.session();
        Ok(Self {
            inner: Arc::new(Inner {
                auth,
                tokens,
                api,
                style: config.message,
            }),
        })
    }

    /// Builds the client and performs the token exchange. The returned
    /// future resolves once, when the client is ready or has failed.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] before any network activity if the
    /// configuration is invalid, or [`SpaceError::Auth`] if the exchange fails.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let client = Self::new(config)?;
        client.initialize().await?;
        Ok(client)
    }

    /// Performs the client-credentials exchange. No automatic retry.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Auth`] on transport failure or a non-200 status.
    pub async fn initialize(&self) -> Result<()> {
        self.inner.auth.initialize().await
    }

    /// Whether the token exchange has succeeded. Reads live state.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.tokens.is_ready()
    }

    /// The message that [`send_message`](Self::send_message) would post for `text`.
    #[must_use]
    pub fn message_for(&self, text: &str) -> OutboundMessage {
        OutboundMessage::app_message(text, &self.inner.style)
    }

    /// Lists the spaces visible to the app, in server order (first 50 only).
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NotReady`] before initialization without
    /// touching the network; otherwise a remote-class error.
    pub async fn list_spaces(&self) -> Result<Vec<Space>> {
        let token = self.token()?;
        let body = self
            .inner
            .api
            .post_graphql(&token, graphql::LIST_SPACES_QUERY)
            .await?;
        let spaces: Vec<Space> = graphql::extract(body, "/data/spaces/items")?;
        tracing::debug!(count = spaces.len(), "listed spaces");
        Ok(spaces)
    }

    /// Returns the id of the conversation attached to a space.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NotReady`] before initialization; otherwise a
    /// remote-class error, including [`SpaceError::Decode`] when the space or
    /// its conversation is absent.
    pub async fn get_conversation_by_space(&self, space_id: &str) -> Result<String> {
        let token = self.token()?;
        let query = graphql::space_conversation_query(space_id);
        let body = self.inner.api.post_graphql(&token, &query).await?;
        let id: String = graphql::extract(body, "/data/space/conversation/id")?;
        tracing::debug!(space_id, conversation_id = %id, "resolved conversation");
        Ok(id)
    }

    /// Fetches a space with its members and message contents.
    ///
    /// Returns the `data.space` object of the response rather than the whole
    /// `data` envelope.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NotReady`] before initialization; otherwise a
    /// remote-class error.
    pub async fn get_members_in_space(&self, space_id: &str) -> Result<SpaceDetail> {
        let token = self.token()?;
        let query = graphql::space_members_query(space_id);
        let body = self.inner.api.post_graphql(&token, &query).await?;
        let space: SpaceDetail = graphql::extract(body, "/data/space")?;
        tracing::debug!(space_id, members = space.members.items.len(), "fetched members");
        Ok(space)
    }

    /// Fetches a conversation and its first 50 messages.
    ///
    /// Returns the `data.conversation` object of the response rather than the
    /// whole `data` envelope.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NotReady`] before initialization; otherwise a
    /// remote-class error.
    pub async fn get_conversation_by_id(&self, conversation_id: &str) -> Result<Conversation> {
        let token = self.token()?;
        let query = graphql::conversation_query(conversation_id);
        let body = self.inner.api.post_graphql(&token, &query).await?;
        graphql::extract(body, "/data/conversation")
    }

    /// Posts an app message into a space and returns the server's response
    /// body unchanged. Every call creates a new message.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NotReady`] before initialization; otherwise a
    /// remote-class error ([`SpaceError::Upstream`] keeps the status when the
    /// server answers anything but 201).
    pub async fn send_message(&self, space_id: &str, text: &str) -> Result<Value> {
        let token = self.token()?;
        let url = self
            .inner
            .api
            .endpoint(&["v1", "spaces", space_id, "messages"])?;
        let message = self.message_for(text);
        let body = self
            .inner
            .api
            .post_rest(&url, &token, &message, MESSAGE_CREATED)
            .await?;
        tracing::info!(space_id, "message sent");
        Ok(body)
    }

    fn token(&self) -> Result<AccessToken> {
        self.inner.tokens.current_token()
    }
}
