//! Port definitions implemented by adapter crates.

mod speech;

pub use speech::SpeechSynthesizerPort;

#[cfg(test)]
pub use speech::MockSpeechSynthesizerPort;
