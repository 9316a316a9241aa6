//! Speech synthesizer port trait.

use async_trait::async_trait;

use crate::domain::{SynthesisRequest, SynthesizedAudio};

/// Port trait for remote text-to-speech engines.
///
/// # Design
///
/// - Expected failures (engine unreachable, no audio produced) return `None`
///   after the implementation has logged the reason. Callers decide how to
///   present absence; nothing is raised across this boundary.
/// - Implementations hold no per-call state, so one instance can be shared.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// Synthesize `request.text` and return where the audio ended up.
    async fn synthesize(&self, request: &SynthesisRequest) -> Option<SynthesizedAudio>;

    /// Whether the remote engine answers at all.
    async fn check_connection(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn SpeechSynthesizerPort>) {}
}
