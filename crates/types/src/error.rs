//! Unified error type for the spacebridge workspace.

use thiserror::Error;

/// Enumerates all error kinds that can occur across spacebridge crates.
#[derive(Debug, Error)]
pub enum SpaceError {
    /// Missing or invalid client configuration. Raised before any network I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// The client-credentials token exchange failed.
    #[error("authentication error: {0}")]
    Auth(String),

    /// An operation that requires a token was invoked before the session
    /// became ready.
    #[error("client is not initialized or ready")]
    NotReady,

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// The remote API answered with a status other than the one expected.
    #[error("upstream error: status={status}, body={body}")]
    Upstream { status: u16, body: String },

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response parsed but lacked the expected structure.
    #[error("decode error: {0}")]
    Decode(String),

    /// The GraphQL endpoint reported errors instead of data.
    #[error("graphql error: {0}")]
    Graphql(String),
}

// ── Feature-gated From impls ──────────────────────────────────────────────────

#[cfg(feature = "rquest")]
impl From<rquest::Error> for SpaceError {
    fn from(e: rquest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl SpaceError {
    /// Returns `true` if the error came from a remote call made after
    /// initialization (transport, status, or body decoding).
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Upstream { .. }
                | Self::Serialization(_)
                | Self::Decode(_)
                | Self::Graphql(_)
        )
    }

    /// Returns `true` if the error is likely transient and worth retrying.
    ///
    /// The client never retries on its own; this is a hint for callers.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => matches!(status, 408 | 429 | 500 | 502 | 503 | 504),
            Self::Http(_) => true,
            _ => false,
        }
    }

    /// The HTTP status carried by an [`SpaceError::Upstream`] error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SpaceError>;
