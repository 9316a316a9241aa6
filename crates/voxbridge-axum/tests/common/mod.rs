//! Shared fixtures for voxbridge-axum tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use voxbridge_axum::{AxumContext, CorsConfig, ServerConfig, create_router};
use voxbridge_core::{SpeechSynthesizerPort, SynthesisRequest, SynthesizedAudio};

/// Bytes the stub writes as "synthesized" audio.
pub const STUB_AUDIO: &[u8] = b"RIFF\x24\x00\x00\x00WAVEstub";

/// What the stub synthesizer does when asked for audio.
#[derive(Clone, Copy)]
pub enum Behavior {
    /// Write `STUB_AUDIO` to the requested output path.
    Write,
    /// Report no audio.
    Nothing,
    /// Report a path that does not exist.
    DanglingPath,
}

/// Synthesizer stand-in that records requests.
pub struct StubSynthesizer {
    pub reachable: bool,
    pub behavior: Behavior,
    pub requests: Mutex<Vec<SynthesisRequest>>,
}

impl StubSynthesizer {
    pub fn new(reachable: bool, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            reachable,
            behavior,
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SpeechSynthesizerPort for StubSynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> Option<SynthesizedAudio> {
        self.requests.lock().unwrap().push(request.clone());

        match self.behavior {
            Behavior::Write => {
                let path = request.output_path.clone()?;
                tokio::fs::write(&path, STUB_AUDIO).await.ok()?;
                Some(SynthesizedAudio::materialized(path))
            }
            Behavior::Nothing => None,
            Behavior::DanglingPath => Some(SynthesizedAudio::at_source(PathBuf::from(
                "/nonexistent/voxbridge/tts_rvc_output.wav",
            ))),
        }
    }

    async fn check_connection(&self) -> bool {
        self.reachable
    }
}

/// Router over `synth` with the given fallback setting.
pub fn router(synth: Arc<StubSynthesizer>, fallback_silence: bool) -> axum::Router {
    let config = ServerConfig::default()
        .with_voice_model("test-voice")
        .with_fallback_silence(fallback_silence);
    let ctx = AxumContext::new(synth, &config);
    create_router(ctx, &CorsConfig::AllowAll)
}
