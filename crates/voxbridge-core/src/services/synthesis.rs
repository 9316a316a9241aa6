//! Synthesis service - admits one synthesis at a time.
//!
//! Remote engines such as Applio write every task to the same fixed temp
//! files, so two overlapping tasks overwrite each other's audio. This service
//! queues callers behind a single async lock and then delegates to the
//! `SpeechSynthesizerPort`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{SynthesisRequest, SynthesizedAudio};
use crate::ports::SpeechSynthesizerPort;

/// Serializing wrapper around a speech synthesizer.
pub struct SynthesisService {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    turn: Mutex<()>,
}

impl SynthesisService {
    /// Create a new synthesis service.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizerPort>) -> Self {
        Self {
            synthesizer,
            turn: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for SynthesisService {
    async fn synthesize(&self, request: &SynthesisRequest) -> Option<SynthesizedAudio> {
        let _turn = self.turn.lock().await;
        debug!(
            target: "voxbridge.core",
            voice_model = %request.voice_model,
            "synthesis slot acquired"
        );
        self.synthesizer.synthesize(request).await
    }

    async fn check_connection(&self) -> bool {
        // Health probes never touch the engine's output files
        self.synthesizer.check_connection().await
    }
}
