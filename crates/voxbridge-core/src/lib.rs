#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{DEFAULT_VOICE_MODEL, SessionHandle, SynthesisRequest, SynthesizedAudio};
pub use ports::SpeechSynthesizerPort;
pub use services::SynthesisService;
