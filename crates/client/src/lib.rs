//! Operation dispatcher for the collaboration API.
//!
//! [`SpaceClient`] owns a [`CredentialManager`](spacebridge_auth::CredentialManager)
//! and exposes the remote operations. Every operation is gated on session
//! readiness and shares one response policy, implemented by [`ApiHttp`]:
//! send, compare the status against a single expected value, decode the
//! body, and extract the expected sub-path.

pub mod client;
pub mod graphql;
pub mod http_util;

pub use client::SpaceClient;
pub use http_util::{ApiHttp, AuthHeader};
