//! In-memory session state: the bearer token and the readiness it implies.

use arc_swap::ArcSwapOption;
use spacebridge_types::{AccessToken, SpaceError, TokenSource, error::Result};
use std::sync::Arc;

/// Holds the token obtained by the last successful exchange.
///
/// The session is ready exactly when a token is present. Reads are
/// lock-free; writes are an atomic swap and are serialized by the
/// [`CredentialManager`](crate::CredentialManager).
#[derive(Default)]
pub struct Session {
    token: ArcSwapOption<AccessToken>,
}

impl Session {
    /// Creates an empty, not-ready session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.token.load().is_some()
    }

    /// Returns the current token.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NotReady`] if no exchange has succeeded yet.
    pub fn token(&self) -> Result<Arc<AccessToken>> {
        self.token.load_full().ok_or(SpaceError::NotReady)
    }

    pub(crate) fn store(&self, token: AccessToken) {
        self.token.store(Some(Arc::new(token)));
    }
}

impl TokenSource for Session {
    fn is_ready(&self) -> bool {
        Session::is_ready(self)
    }

    fn current_token(&self) -> Result<AccessToken> {
        self.token().map(|t| (*t).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_not_ready() {
        let s = Session::new();
        assert!(!s.is_ready());
        assert!(matches!(s.token(), Err(SpaceError::NotReady)));
        assert!(matches!(s.current_token(), Err(SpaceError::NotReady)));
    }

    #[test]
    fn test_store_makes_ready() {
        let s = Session::new();
        s.store(AccessToken::new("tok"));
        assert!(s.is_ready());
        assert_eq!(s.token().unwrap().access_token, "tok");
    }

    #[test]
    fn test_store_replaces_token() {
        let s = Session::new();
        s.store(AccessToken::new("first"));
        s.store(AccessToken::new("second"));
        assert_eq!(s.current_token().unwrap().access_token, "second");
    }

    #[test]
    fn test_shared_handle_sees_updates() {
        let s = Arc::new(Session::new());
        let reader = Arc::clone(&s);
        assert!(!reader.is_ready());
        s.store(AccessToken::new("tok"));
        assert!(reader.is_ready());
    }
}
