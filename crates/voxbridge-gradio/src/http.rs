//! HTTP backend abstraction for the Gradio queue.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest; the event stream is handed back as a raw byte stream so the
//! caller decides how to frame it.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use serde_json::Value;
use url::Url;

use crate::error::{GradioError, GradioResult};

/// Body of an open event stream.
pub type ByteStream = BoxStream<'static, GradioResult<Bytes>>;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can talk to a Gradio server.
///
/// This is an implementation detail - external code should use
/// `GradioTtsClient` or the `SpeechSynthesizerPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// `POST` a JSON body and decode the JSON answer.
    ///
    /// Non-success statuses map to [`GradioError::RequestFailed`].
    async fn post_json(&self, url: &Url, body: &Value) -> GradioResult<Value>;

    /// Open a `text/event-stream` `GET`.
    ///
    /// Non-success statuses map to [`GradioError::StreamRejected`] carrying
    /// the response body.
    async fn open_event_stream(&self, url: &Url) -> GradioResult<ByteStream>;

    /// `GET` a URL and report the status code.
    async fn probe(&self, url: &Url) -> GradioResult<u16>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// The client itself carries no overall timeout because the event stream
/// stays open for as long as the task runs; joins and probes set their own.
pub struct ReqwestBackend {
    client: reqwest::Client,
    join_timeout: Duration,
    health_timeout: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend.
    pub fn new(
        user_agent: &str,
        join_timeout: Duration,
        health_timeout: Duration,
    ) -> GradioResult<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            join_timeout,
            health_timeout,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, url: &Url, body: &Value) -> GradioResult<Value> {
        let response = self
            .client
            .post(url.as_str())
            .timeout(self.join_timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GradioError::RequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn open_event_stream(&self, url: &Url) -> GradioResult<ByteStream> {
        let response = self
            .client
            .get(url.as_str())
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GradioError::StreamRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(GradioError::from))
            .boxed())
    }

    async fn probe(&self, url: &Url) -> GradioResult<u16> {
        let response = self
            .client
            .get(url.as_str())
            .timeout(self.health_timeout)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reqwest_backend_creation() {
        let backend =
            ReqwestBackend::new("test-agent", Duration::from_secs(5), Duration::from_secs(1))
                .unwrap();
        assert_eq!(backend.join_timeout, Duration::from_secs(5));
        assert_eq!(backend.health_timeout, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_fake_backend_join_by_index() {
        let backend = FakeBackend::new()
            .with_join(94, CannedJoin::Accept(json!({"event_id": "e1"})))
            .with_join(93, CannedJoin::Status(422));
        let url = Url::parse("http://fake/gradio_api/queue/join").unwrap();

        let ok = backend
            .post_json(&url, &json!({"fn_index": 94, "session_hash": "s"}))
            .await
            .unwrap();
        assert_eq!(ok["event_id"], "e1");

        let rejected = backend
            .post_json(&url, &json!({"fn_index": 93, "session_hash": "s"}))
            .await;
        assert!(matches!(
            rejected,
            Err(GradioError::RequestFailed { status: 422, .. })
        ));

        assert_eq!(backend.joined_indices(), vec![94, 93]);
    }

    #[tokio::test]
    async fn test_fake_backend_stream_chunks() {
        let backend = FakeBackend::new().with_lines(&["data: a", "data: b"]);
        let url = Url::parse("http://fake/gradio_api/queue/data").unwrap();

        let chunks: Vec<_> = backend.open_event_stream(&url).await.unwrap().collect().await;
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].as_ref().unwrap().as_ref(), b"data: a\n");
    }
}
