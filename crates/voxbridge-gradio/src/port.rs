//! Port trait implementation for `GradioTtsClient`.
//!
//! The core port reports absence rather than errors, so this adapter logs the
//! failure with its category and returns `None`.

use async_trait::async_trait;
use tracing::warn;
use voxbridge_core::{SpeechSynthesizerPort, SynthesisRequest, SynthesizedAudio};

use crate::client::GradioTtsClient;
use crate::http::HttpBackend;

#[async_trait]
impl<B: HttpBackend> SpeechSynthesizerPort for GradioTtsClient<B> {
    async fn synthesize(&self, request: &SynthesisRequest) -> Option<SynthesizedAudio> {
        self.try_synthesize(request)
            .await
            .map_err(|e| {
                warn!(
                    target: "voxbridge.gradio",
                    category = e.category(),
                    error = %e,
                    "Synthesis failed"
                );
            })
            .ok()
    }

    async fn check_connection(&self) -> bool {
        Self::check_connection(self).await
    }
}
