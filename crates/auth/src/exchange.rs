//! OAuth client-credentials exchange parameters and response parsing.
//!
//! The request is `POST /oauth/token` with basic auth (application id as
//! user, secret as password) and a form body `grant_type=client_credentials`.

use spacebridge_types::{AccessToken, SpaceError, error::Result};

/// Token endpoint path, relative to the API root.
pub const TOKEN_PATH: &str = "/oauth/token";

/// Grant type sent in the form body.
pub const GRANT_TYPE: &str = "client_credentials";

/// The only status that counts as a successful exchange.
pub const EXPECTED_STATUS: u16 = 200;

/// Build the form-urlencoded parameters for the token exchange request.
#[must_use]
pub fn token_form_params() -> [(&'static str, &'static str); 1] {
    [("grant_type", GRANT_TYPE)]
}

/// Parse the token endpoint JSON response into an [`AccessToken`].
///
/// # Errors
///
/// Returns [`SpaceError::Auth`] if the response is missing a non-empty
/// `access_token` field.
pub fn parse_token_response(json: &serde_json::Value) -> Result<AccessToken> {
    let access_token = json
        .get("access_token")
        .and_then(serde_json::Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SpaceError::Auth("missing access_token in token response".into()))?;

    let mut token = AccessToken::new(access_token);
    if let Some(kind) = json.get("token_type").and_then(serde_json::Value::as_str) {
        token.token_type = Some(kind.to_string());
    }
    if let Some(exp) = json.get("expires_in").and_then(serde_json::Value::as_u64) {
        token = token.with_expiry(exp);
    }
    Ok(token)
}
