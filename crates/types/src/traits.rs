//! Traits shared across spacebridge crates.
//!
//! [`TokenSource`] is implemented by the session and by the credential
//! manager, so read-only consumers of the token need neither concrete type.

use crate::{AccessToken, error::Result};

/// Supplies the current bearer token to the operation dispatcher.
pub trait TokenSource: Send + Sync {
    /// Whether a token has been obtained. Always reflects current state.
    fn is_ready(&self) -> bool;

    /// Return the current token.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NotReady`](crate::SpaceError::NotReady) if no
    /// token has been obtained yet.
    fn current_token(&self) -> Result<AccessToken>;
}
