//! Application credentials for the client-credentials grant.

use secrecy::{ExposeSecret as _, SecretString};
use spacebridge_config::ClientConfig;
use spacebridge_types::{SpaceError, error::Result};

/// Application id and secret. Immutable once constructed.
#[derive(Debug)]
pub struct Credentials {
    application_id: String,
    secret: SecretString,
}

impl Credentials {
    /// Creates credentials, rejecting empty or whitespace-only values.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] if either value is empty.
    pub fn new(application_id: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let application_id = application_id.into();
        let secret = secret.into();
        if application_id.trim().is_empty() {
            return Err(SpaceError::Config("missing application id".into()));
        }
        if secret.trim().is_empty() {
            return Err(SpaceError::Config("missing application secret".into()));
        }
        Ok(Self {
            application_id,
            secret: SecretString::from(secret),
        })
    }

    /// Takes the credentials out of a client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] if either value is empty.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.application_id.clone(), config.secret.clone())
    }

    /// The application id, used as the basic-auth user.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub(crate) fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ok() {
        let c = Credentials::new("app", "secret").unwrap();
        assert_eq!(c.application_id(), "app");
        assert_eq!(c.secret(), "secret");
    }

    #[test]
    fn test_rejects_empty_values() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(SpaceError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("app", ""),
            Err(SpaceError::Config(_))
        ));
        assert!(matches!(
            Credentials::new(" ", "secret"),
            Err(SpaceError::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let c = Credentials::new("app", "hunter2").unwrap();
        assert!(!format!("{c:?}").contains("hunter2"));
    }

    #[test]
    fn test_from_config() {
        let cfg = ClientConfig::new("app", "secret");
        let c = Credentials::from_config(&cfg).unwrap();
        assert_eq!(c.application_id(), "app");
    }
}
