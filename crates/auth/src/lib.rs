//! Credential management for the spacebridge client.
//!
//! [`CredentialManager`] performs the OAuth client-credentials exchange and
//! holds the resulting bearer token in a shared [`Session`]. Every other
//! remote operation is gated on that session being ready.

pub mod credentials;
pub mod exchange;
pub mod manager;
pub mod session;

pub use credentials::Credentials;
pub use manager::CredentialManager;
pub use session::Session;
