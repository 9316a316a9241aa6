#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultGradioClient is meant to be
// used through its inherent methods, not its internal generic structure
#![allow(private_interfaces, private_bounds)]

mod client;
mod config;
mod endpoints;
mod error;
mod http;
mod materialize;
mod params;
mod port;
mod protocol;
mod stream;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultGradioClient, GradioTtsClient, QueueSession};

// Configuration
pub use config::{DEFAULT_API_PREFIX, DEFAULT_BASE_URL, DEFAULT_FN_INDICES, GradioClientConfig};
pub use params::{DEFAULT_APPLIO_ROOT, DEFAULT_VOICE_PATH, ParameterTemplate, Slot};

// Errors
pub use error::{GradioError, GradioResult};

// Protocol
pub use materialize::materialize;
pub use protocol::{CompletionOutput, OutputRef, QueueMessage, select_audio};

// Silence unused dev-dependency warnings (used by integration tests)
#[cfg(test)]
use wiremock as _;
