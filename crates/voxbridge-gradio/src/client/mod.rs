//! Gradio queue client for running Applio text-to-speech.
//!
//! One synthesis is three steps: join the queue under a fresh session,
//! listen on the session's event stream until the task completes, then copy
//! the produced audio to where the caller asked for it.

mod join;
mod listen;

use std::time::Duration;

use tracing::{debug, info};
use voxbridge_core::{SessionHandle, SynthesisRequest, SynthesizedAudio};

use crate::config::GradioClientConfig;
use crate::endpoints::Endpoints;
use crate::error::{GradioError, GradioResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::materialize::materialize;
use crate::params::ParameterTemplate;

/// Characters of request text shown in log lines.
const LOG_PREVIEW_CHARS: usize = 50;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Gradio client using the reqwest HTTP backend.
pub type DefaultGradioClient = GradioTtsClient<ReqwestBackend>;

// ============================================================================
// Session
// ============================================================================

/// A task accepted by the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSession {
    /// Session to listen on. The server may have replaced the one sent.
    pub handle: SessionHandle,
    /// Function index the queue accepted.
    pub fn_index: u32,
    /// Identifier of the queued task, when the server reported one.
    pub event_id: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for a Gradio server hosting Applio's TTS function.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultGradioClient` for production code.
pub struct GradioTtsClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) endpoints: Endpoints,
    pub(crate) fn_indices: Vec<u32>,
    pub(crate) template: ParameterTemplate,
    pub(crate) audio_extension: String,
    pub(crate) listen_timeout: Option<Duration>,
    pub(crate) trigger_id: Option<u32>,
}

impl DefaultGradioClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails when the base URL does not parse or no function index is
    /// configured.
    pub fn new(config: &GradioClientConfig) -> GradioResult<Self> {
        let backend = ReqwestBackend::new(
            &config.user_agent,
            config.join_timeout,
            config.health_timeout,
        )?;
        Self::from_parts(config, backend)
    }
}

impl<B: HttpBackend> GradioTtsClient<B> {
    fn from_parts(config: &GradioClientConfig, backend: B) -> GradioResult<Self> {
        if config.fn_indices.is_empty() {
            return Err(GradioError::InvalidConfig {
                message: "at least one function index is required".to_string(),
            });
        }

        Ok(Self {
            backend,
            endpoints: Endpoints::new(&config.base_url, &config.api_prefix)?,
            fn_indices: config.fn_indices.clone(),
            template: config.template.clone(),
            audio_extension: config.audio_extension.clone(),
            listen_timeout: config.listen_timeout,
            trigger_id: config.trigger_id,
        })
    }

    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) fn with_backend(config: &GradioClientConfig, backend: B) -> GradioResult<Self> {
        Self::from_parts(config, backend)
    }

    /// Candidate function indices, in the order they are tried.
    pub fn fn_indices(&self) -> &[u32] {
        &self.fn_indices
    }

    /// Run one synthesis under a freshly generated session.
    pub async fn try_synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> GradioResult<SynthesizedAudio> {
        self.try_synthesize_in(request, SessionHandle::generate())
            .await
    }

    /// Run one synthesis under the given session handle.
    pub async fn try_synthesize_in(
        &self,
        request: &SynthesisRequest,
        handle: SessionHandle,
    ) -> GradioResult<SynthesizedAudio> {
        info!(
            target: "voxbridge.gradio",
            session = %handle,
            voice_model = %request.voice_model,
            text = %request.text_preview(LOG_PREVIEW_CHARS),
            "Starting synthesis"
        );

        debug!(target: "voxbridge.gradio", "Submitting");
        let session = self.submit(request, handle).await?;

        debug!(
            target: "voxbridge.gradio",
            session = %session.handle,
            fn_index = session.fn_index,
            "Awaiting completion"
        );
        let source = self.await_completion(&session).await?;

        debug!(target: "voxbridge.gradio", source = %source, "Materializing");
        let audio = materialize(&source, request.output_path.as_deref()).await;

        info!(
            target: "voxbridge.gradio",
            path = %audio.path.display(),
            materialized = audio.materialized,
            "Synthesis finished"
        );
        Ok(audio)
    }

    /// Whether the server root answers with a success status.
    pub async fn check_connection(&self) -> bool {
        match self.backend.probe(&self.endpoints.root).await {
            Ok(status) => (200..300).contains(&status),
            Err(e) => {
                debug!(target: "voxbridge.gradio", error = %e, "Gradio server unreachable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedJoin, FakeBackend};
    use serde_json::json;
    use tempfile::tempdir;
    use voxbridge_core::DEFAULT_VOICE_MODEL;

    fn completion(event_id: &str, outputs: serde_json::Value) -> String {
        format!(
            "data: {}",
            json!({"msg": "process_completed", "event_id": event_id, "success": true, "output": {"data": outputs}})
        )
    }

    #[test]
    fn test_default_client_creation() {
        let client = DefaultGradioClient::new(&GradioClientConfig::new()).unwrap();
        assert_eq!(client.fn_indices()[0], 94);
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let config = GradioClientConfig::new().with_fn_indices(Vec::new());
        assert!(matches!(
            DefaultGradioClient::new(&config),
            Err(GradioError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let config = GradioClientConfig::new().with_base_url("::nope::");
        assert!(matches!(
            DefaultGradioClient::new(&config),
            Err(GradioError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_full_flow_copies_to_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("remote.wav");
        tokio::fs::write(&source, b"RIFF").await.unwrap();
        let destination = dir.path().join("out").join("speech.wav");

        let backend = FakeBackend::new()
            .with_join(94, CannedJoin::Accept(json!({"event_id": "e1"})))
            .with_lines(&[
                "data: {\"msg\": \"estimation\", \"rank\": 0}",
                "data: {\"msg\": \"process_starts\", \"event_id\": \"e1\"}",
                &completion("e1", json!(["done", {"path": source.to_str().unwrap()}])),
            ]);
        let client = GradioTtsClient::with_backend(&GradioClientConfig::new(), backend).unwrap();

        let request = SynthesisRequest::new("hola", DEFAULT_VOICE_MODEL)
            .with_output_path(&destination);
        let audio = client.try_synthesize(&request).await.unwrap();

        assert_eq!(audio, SynthesizedAudio::materialized(&destination));
        assert_eq!(tokio::fs::read(&destination).await.unwrap(), b"RIFF");
    }

    #[tokio::test]
    async fn test_without_destination_returns_source() {
        let backend = FakeBackend::new()
            .with_join(94, CannedJoin::Accept(json!({})))
            .with_lines(&[&completion("x", json!(["/remote/tts_rvc_output.wav"]))]);
        let client = GradioTtsClient::with_backend(&GradioClientConfig::new(), backend).unwrap();

        let audio = client
            .try_synthesize(&SynthesisRequest::new("hola", DEFAULT_VOICE_MODEL))
            .await
            .unwrap();
        assert_eq!(audio, SynthesizedAudio::at_source("/remote/tts_rvc_output.wav"));
    }

    #[tokio::test]
    async fn test_check_connection() {
        let config = GradioClientConfig::new();

        let up = GradioTtsClient::with_backend(&config, FakeBackend::new().with_probe_status(200))
            .unwrap();
        assert!(up.check_connection().await);

        let erroring =
            GradioTtsClient::with_backend(&config, FakeBackend::new().with_probe_status(502))
                .unwrap();
        assert!(!erroring.check_connection().await);

        let down = GradioTtsClient::with_backend(&config, FakeBackend::new()).unwrap();
        assert!(!down.check_connection().await);
    }
}
