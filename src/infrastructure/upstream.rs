//! Reqwest-backed client for the JSONPlaceholder upstream.
//!
//! Owns transport details only: URL construction from the configured base,
//! an explicit per-call timeout, HTTP error mapping, and JSON decoding. Every
//! GraphQL resolver maps onto exactly one of the generic operations here, so
//! the per-entity resolvers stay one-liners instead of repeating the same
//! request plumbing six times.

use anyhow::Context as _;
use reqwest::{Client, Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::config::UpstreamConfig;

/// The six resource collections the upstream exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Posts,
    Comments,
    Albums,
    Photos,
    Todos,
    Users,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Comments => "comments",
            Resource::Albums => "albums",
            Resource::Photos => "photos",
            Resource::Todos => "todos",
            Resource::Users => "users",
        }
    }
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The call did not complete within the configured timeout.
    #[error("upstream request timed out: {0}")]
    Timeout(String),
    /// The call could not complete at the transport level.
    #[error("upstream request failed: {0}")]
    Transport(String),
    /// The upstream body was not valid JSON for the expected shape.
    #[error("upstream response could not be decoded: {0}")]
    Decode(String),
}

/// Stateless handle on the upstream REST service.
///
/// Cloning is cheap; the inner reqwest client is reference-counted.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Builds a client against the configured base URL with an explicit
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL does not parse or the reqwest
    /// client cannot be constructed.
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid upstream base URL: {}", config.base_url))?;
        let client = Client::builder()
            .timeout(config_timeout(config))
            .build()
            .context("failed to construct upstream HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// `GET /{resource}` — the full collection, upstream order preserved.
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, UpstreamError> {
        self.request_json(Method::GET, self.collection_url(resource), None::<&()>)
            .await
    }

    /// `GET /{resource}?{parent_key}={value}` — collection filtered by a
    /// foreign key. The upstream is trusted to filter; no local filtering.
    pub async fn list_filtered<T: DeserializeOwned>(
        &self,
        resource: Resource,
        parent_key: &str,
        value: i64,
    ) -> Result<Vec<T>, UpstreamError> {
        let url = format!("{}?{}={}", self.collection_url(resource), parent_key, value);
        self.request_json(Method::GET, url, None::<&()>).await
    }

    /// `GET /{resource}/{id}` — a single entity.
    pub async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
    ) -> Result<T, UpstreamError> {
        self.request_json(Method::GET, self.entity_url(resource, id), None::<&()>)
            .await
    }

    /// `POST /{resource}` — create; returns the upstream representation,
    /// upstream-assigned id included.
    pub async fn create<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        resource: Resource,
        body: &B,
    ) -> Result<T, UpstreamError> {
        self.request_json(Method::POST, self.collection_url(resource), Some(body))
            .await
    }

    /// `PATCH /{resource}/{id}` — partial update. Callers pass only the
    /// mutable fields; the identifier travels in the URL, never in the body.
    pub async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        resource: Resource,
        id: i64,
        body: &B,
    ) -> Result<T, UpstreamError> {
        self.request_json(Method::PATCH, self.entity_url(resource, id), Some(body))
            .await
    }

    /// `DELETE /{resource}/{id}` — whatever body the upstream returns is
    /// passed through (the reference upstream returns an empty object).
    pub async fn delete<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
    ) -> Result<T, UpstreamError> {
        self.request_json(Method::DELETE, self.entity_url(resource, id), None::<&()>)
            .await
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    fn entity_url(&self, resource: Resource, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, resource.path(), id)
    }

    async fn request_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<T, UpstreamError> {
        debug!(%method, %url, "dispatching upstream request");
        let mut request = self.client.request(method.clone(), url.as_str());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|err| {
            let mapped = map_transport_error(err);
            warn!(%method, %url, error = %mapped, "upstream transport failure");
            mapped
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "upstream returned error status");
            return Err(status_error(status, bytes.as_ref()));
        }

        serde_json::from_slice(&bytes).map_err(|err| UpstreamError::Decode(err.to_string()))
    }
}

fn config_timeout(config: &UpstreamConfig) -> std::time::Duration {
    std::time::Duration::from_secs(config.timeout_seconds.max(1))
}

fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::Timeout(error.to_string())
    } else {
        UpstreamError::Transport(error.to_string())
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> UpstreamError {
    UpstreamError::Status {
        status: status.as_u16(),
        body: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::UpstreamConfig;

    fn client_for(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        })
        .expect("client should build")
    }

    #[test]
    fn builds_collection_and_entity_urls() {
        let client = client_for("http://localhost:3100");

        assert_eq!(
            client.collection_url(Resource::Posts),
            "http://localhost:3100/posts"
        );
        assert_eq!(
            client.entity_url(Resource::Comments, 7),
            "http://localhost:3100/comments/7"
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_normalized() {
        let client = client_for("http://localhost:3100/");

        assert_eq!(
            client.collection_url(Resource::Users),
            "http://localhost:3100/users"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = UpstreamClient::new(&UpstreamConfig {
            base_url: "not a url".to_string(),
            timeout_seconds: 5,
        });

        assert!(result.is_err());
    }

    #[test]
    fn every_resource_maps_to_its_upstream_path() {
        let expected = [
            (Resource::Posts, "posts"),
            (Resource::Comments, "comments"),
            (Resource::Albums, "albums"),
            (Resource::Photos, "photos"),
            (Resource::Todos, "todos"),
            (Resource::Users, "users"),
        ];
        for (resource, path) in expected {
            assert_eq!(resource.path(), path);
        }
    }

    #[test]
    fn status_errors_carry_status_and_body_preview() {
        let error = status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            b"{\n  \"message\": \"boom\"\n}",
        );

        match error {
            UpstreamError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "{ \"message\": \"boom\" }");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let long_body = "x".repeat(500);
        let error = status_error(StatusCode::BAD_GATEWAY, long_body.as_bytes());

        match error {
            UpstreamError::Status { body, .. } => {
                assert_eq!(body.len(), 163);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
