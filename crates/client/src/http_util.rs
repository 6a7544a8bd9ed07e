//! Shared HTTP policy for every remote operation.
//!
//! Each operation sends one request, expects exactly one status code, and
//! decodes the body as JSON. Anything else becomes a remote-class
//! [`SpaceError`].

use crate::graphql;
use rquest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use spacebridge_types::{AccessToken, SpaceError, error::Result};
use url::Url;

/// How the token is presented to the remote API.
pub enum AuthHeader<'a> {
    /// Raw token in a `jwt` header (GraphQL endpoint).
    Jwt(&'a AccessToken),
    /// `Authorization: Bearer <token>` (REST endpoints).
    Bearer(&'a AccessToken),
}

impl AuthHeader<'_> {
    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Jwt(token) => builder.header("jwt", token.as_str()),
            Self::Bearer(token) => builder.header("Authorization", token.bearer_header()),
        }
    }
}

/// HTTP helper bound to one API root.
#[derive(Clone)]
pub struct ApiHttp {
    http: Client,
    base: Url,
}

impl ApiHttp {
    /// Creates a helper that resolves endpoint paths against `base`.
    #[must_use]
    pub fn new(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Builds an endpoint URL by appending path segments to the API root.
    ///
    /// Each segment is percent-encoded, so caller-supplied identifiers can
    /// never introduce extra path components or a query string.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] if the API root cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| SpaceError::Config(format!("cannot append a path to {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and checks that the response carries `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Http`] if the request fails to send, or
    /// [`SpaceError::Upstream`] with the body text on any other status.
    pub async fn send_expecting(
        &self,
        builder: RequestBuilder,
        expected: u16,
    ) -> Result<rquest::Response> {
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        if status == expected {
            Ok(resp)
        } else {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(status, expected, "unexpected status from remote API");
            Err(SpaceError::Upstream { status, body: text })
        }
    }

    /// Like [`send_expecting`](Self::send_expecting), then parses the body as JSON.
    ///
    /// # Errors
    ///
    /// As `send_expecting`, plus [`SpaceError::Http`] if the body cannot be
    /// read and [`SpaceError::Serialization`] if it is not valid JSON.
    pub async fn send_json(&self, builder: RequestBuilder, expected: u16) -> Result<Value> {
        let resp = self.send_expecting(builder, expected).await?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Posts a GraphQL query as `application/graphql` with the raw token in
    /// the `jwt` header. Expects 200.
    ///
    /// # Errors
    ///
    /// See [`send_json`](Self::send_json).
    pub async fn post_graphql(&self, token: &AccessToken, query: &str) -> Result<Value> {
        let url = self.endpoint(&[graphql::GRAPHQL_PATH])?;
        tracing::debug!(%url, "posting graphql query");
        let builder = self
            .http
            .post(url.as_str())
            .header("Content-Type", graphql::CONTENT_TYPE)
            .body(query.to_owned());
        let builder = AuthHeader::Jwt(token).apply(builder);
        self.send_json(builder, graphql::EXPECTED_STATUS).await
    }

    /// Posts a JSON body to a REST endpoint with bearer authentication.
    ///
    /// # Errors
    ///
    /// See [`send_json`](Self::send_json).
    pub async fn post_rest<B: Serialize + ?Sized>(
        &self,
        url: &Url,
        token: &AccessToken,
        body: &B,
        expected: u16,
    ) -> Result<Value> {
        tracing::debug!(%url, expected, "posting rest request");
        let builder = self
            .http
            .post(url.as_str())
            .header("Accept", "application/json")
            .json(body);
        let builder = AuthHeader::Bearer(token).apply(builder);
        self.send_json(builder, expected).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    fn api(base: &str) -> ApiHttp {
        ApiHttp::new(Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let url = api("https://api.example.com")
            .endpoint(&["v1", "spaces", "abc", "messages"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/spaces/abc/messages");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = api("https://api.example.com/gateway/")
            .endpoint(&["graphql"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/gateway/graphql");
    }

    #[test]
    fn test_endpoint_encodes_identifiers() {
        let url = api("https://api.example.com")
            .endpoint(&["v1", "spaces", "a/b?c=d", "messages"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/spaces/a%2Fb%3Fc=d/messages"
        );
        assert!(url.query().is_none());
    }

    #[tokio::test]
    async fn test_post_graphql_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("jwt", "tok"))
            .and(header("content-type", "application/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let body = api(&server.uri())
            .post_graphql(&AccessToken::new("tok"), "query { x }")
            .await
            .unwrap();
        assert_eq!(body, json!({"data": {}}));
    }

    #[tokio::test]
    async fn test_post_rest_bearer_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/things"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({"a": 1})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "m1"})))
            .mount(&server)
            .await;

        let api = api(&server.uri());
        let url = api.endpoint(&["v1", "things"]).unwrap();
        let body = api
            .post_rest(&url, &AccessToken::new("tok"), &json!({"a": 1}), 201)
            .await
            .unwrap();
        assert_eq!(body["id"], "m1");
    }

    #[tokio::test]
    async fn test_unexpected_status_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let api = api(&server.uri());
        let url = api.endpoint(&["v1", "things"]).unwrap();
        // 200 is a success code but not the one this call expects.
        let err = api
            .post_rest(&url, &AccessToken::new("tok"), &json!({}), 201)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_invalid_json_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = api(&server.uri())
            .post_graphql(&AccessToken::new("tok"), "query { x }")
            .await
            .unwrap_err();
        assert!(matches!(err, SpaceError::Serialization(_)));
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        let err = api("http://127.0.0.1:1")
            .post_graphql(&AccessToken::new("tok"), "query { x }")
            .await
            .unwrap_err();
        assert!(matches!(err, SpaceError::Http(_)));
    }
}
