//! Domain types shared by every adapter.

mod session;
mod synthesis;

pub use session::SessionHandle;
pub use synthesis::{DEFAULT_VOICE_MODEL, SynthesisRequest, SynthesizedAudio};
