//! Application services orchestrating the ports.

mod synthesis;

pub use synthesis::SynthesisService;
