//! Owner of the app credentials and the session token.
//!
//! Responsibilities:
//! - Perform the client-credentials exchange against the token endpoint.
//! - Store the resulting token in the shared [`Session`].
//! - Serialize token writes behind a single-writer lock; readers never block.
//!
//! There is no automatic retry or refresh. A failed exchange leaves the
//! session not ready.

use crate::{Credentials, Session, exchange};
use spacebridge_config::ClientConfig;
use spacebridge_types::{AccessToken, SpaceError, TokenSource, error::Result};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct CredentialManager {
    credentials: Credentials,
    token_url: String,
    http: rquest::Client,
    session: Arc<Session>,
    refresh_lock: Mutex<()>,
}

impl CredentialManager {
    /// Creates a manager for the given token endpoint. No network I/O.
    pub fn new(credentials: Credentials, token_url: impl Into<String>, http: rquest::Client) -> Self {
        Self {
            credentials,
            token_url: token_url.into(),
            http,
            session: Arc::new(Session::new()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Creates a manager from a client configuration, targeting
    /// `{base_url}/oauth/token`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] if the configuration is invalid.
    pub fn from_config(config: &ClientConfig, http: rquest::Client) -> Result<Self> {
        config.validate()?;
        let credentials = Credentials::from_config(config)?;
        let token_url = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            exchange::TOKEN_PATH
        );
        Ok(Self::new(credentials, token_url, http))
    }

    /// Exchanges the app credentials for a bearer token and marks the session
    /// ready.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Auth`] on a transport failure, a status other
    /// than 200, or a response without `access_token`. The session is left
    /// untouched in that case.
    pub async fn initialize(&self) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        tracing::debug!(
            application_id = self.credentials.application_id(),
            "requesting app token"
        );
        let resp = self
            .http
            .post(&self.token_url)
            .basic_auth(
                self.credentials.application_id(),
                Some(self.credentials.secret()),
            )
            .header("Accept", "application/json")
            .form(&exchange::token_form_params())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "token request failed");
                SpaceError::Auth(format!("token request failed: {e}"))
            })?;

        let status = resp.status();
        if status.as_u16() != exchange::EXPECTED_STATUS {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "token exchange rejected");
            return Err(SpaceError::Auth(format!(
                "token endpoint returned {status}: {text}"
            )));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| SpaceError::Auth(format!("failed to parse token response: {e}")))?;

        let token = exchange::parse_token_response(&json)?;
        self.session.store(token);
        tracing::info!(
            application_id = self.credentials.application_id(),
            "session ready"
        );
        Ok(())
    }

    /// Whether the session currently holds a token.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    /// Returns the current token.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NotReady`] if [`initialize`](Self::initialize)
    /// has not succeeded.
    pub fn current_token(&self) -> Result<AccessToken> {
        self.session.current_token()
    }

    /// Shared handle to the session, for components that only read the token.
    #[must_use]
    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    /// The application id this manager authenticates as.
    #[must_use]
    pub fn application_id(&self) -> &str {
        self.credentials.application_id()
    }
}

impl TokenSource for CredentialManager {
    fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    fn current_token(&self) -> Result<AccessToken> {
        self.session.current_token()
    }
}
