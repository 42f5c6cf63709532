//! HTTP item source
//!
//! Talks to a Firebase-style item API (`GET {base}/maxitem.json`,
//! `GET {base}/item/{id}.json`) with a single attempt per request.

use super::ItemSource;
use crate::config::UpstreamConfig;
use crate::domain::{ItemId, PipelineError, Result, UpstreamError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;

/// reqwest-backed [`ItemSource`]
pub struct HttpItemSource {
    base_url: String,
    client: Client,
    config: UpstreamConfig,
}

impl HttpItemSource {
    /// Create a new HTTP item source from configuration
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Configuration`] if the HTTP client cannot be
    /// built (for example, no TLS backend available).
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)))
            .user_agent(concat!("itemsync/", env!("CARGO_PKG_VERSION")));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification disabled for upstream");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            PipelineError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// URL of the maximum-id endpoint
    pub fn max_item_url(&self) -> String {
        self.join(&self.config.max_item_path)
    }

    /// URL of a single item
    pub fn item_url(&self, id: ItemId) -> String {
        self.join(&self.config.item_path.replace("{id}", &id.to_string()))
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue a GET and return the body of a 2xx response
    async fn get_body(&self, url: &str) -> std::result::Result<String, UpstreamError> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(e.to_string())
            } else {
                UpstreamError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::from_status(status.as_u16(), body));
        }

        resp.text()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ItemSource for HttpItemSource {
    async fn max_item_id(&self) -> std::result::Result<ItemId, UpstreamError> {
        let url = self.max_item_url();
        tracing::debug!(url = %url, "Querying upstream maximum item id");

        let body = self.get_body(&url).await?;
        let max = serde_json::from_str::<u64>(body.trim()).map_err(|e| {
            UpstreamError::InvalidResponse(format!(
                "expected an integer maximum item id, got '{}': {e}",
                body.trim()
            ))
        })?;

        Ok(ItemId::new(max))
    }

    async fn fetch_item(&self, id: ItemId) -> std::result::Result<Value, UpstreamError> {
        let url = self.item_url(id);
        tracing::trace!(item_id = %id, url = %url, "Fetching item");

        let body = self.get_body(&url).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| UpstreamError::InvalidResponse(format!("item {id}: {e}")))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_url_building() {
        let source = HttpItemSource::new(config_for("https://hacker-news.firebaseio.com/v0/")).unwrap();
        assert_eq!(
            source.max_item_url(),
            "https://hacker-news.firebaseio.com/v0/maxitem.json"
        );
        assert_eq!(
            source.item_url(ItemId::new(8863)),
            "https://hacker-news.firebaseio.com/v0/item/8863.json"
        );
        assert_eq!(source.base_url(), "https://hacker-news.firebaseio.com/v0");
    }

    #[tokio::test]
    async fn test_max_item_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/maxitem.json")
            .with_status(200)
            .with_body("41234567")
            .create_async()
            .await;

        let source = HttpItemSource::new(config_for(&server.url())).unwrap();
        assert_eq!(source.max_item_id().await.unwrap(), ItemId::new(41234567));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_max_item_id_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/maxitem.json")
            .with_status(503)
            .with_body("try later")
            .create_async()
            .await;

        let source = HttpItemSource::new(config_for(&server.url())).unwrap();
        let err = source.max_item_id().await.unwrap_err();
        assert!(matches!(err, UpstreamError::ServerError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_max_item_id_not_a_number() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/maxitem.json")
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;

        let source = HttpItemSource::new(config_for(&server.url())).unwrap();
        let err = source.max_item_id().await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_item_variants() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/item/1.json")
            .with_status(200)
            .with_body(r#"{"id":1,"type":"story","by":"pg"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/item/2.json")
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;
        server
            .mock("GET", "/item/3.json")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;
        server
            .mock("GET", "/item/4.json")
            .with_status(404)
            .create_async()
            .await;

        let source = HttpItemSource::new(config_for(&server.url())).unwrap();

        let item = source.fetch_item(ItemId::new(1)).await.unwrap();
        assert_eq!(item["by"], "pg");

        assert_eq!(source.fetch_item(ItemId::new(2)).await.unwrap(), Value::Null);
        assert_eq!(source.fetch_item(ItemId::new(3)).await.unwrap(), Value::Null);

        let err = source.fetch_item(ItemId::new(4)).await.unwrap_err();
        assert!(matches!(err, UpstreamError::ClientError { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Nothing listens on port 9 of localhost in test environments
        let source = HttpItemSource::new(config_for("http://127.0.0.1:9")).unwrap();
        let err = source.max_item_id().await.unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::ConnectionFailed(_) | UpstreamError::Timeout(_)
        ));
    }
}
