//! Error types for Gradio queue operations.
//!
//! These errors stay inside `voxbridge-gradio` for callers that want the
//! failure reason. The `SpeechSynthesizerPort` boundary logs them and returns
//! `None` instead.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for Gradio queue operations.
pub type GradioResult<T> = Result<T, GradioError>;

/// Errors related to driving a Gradio task queue.
#[derive(Debug, Error)]
pub enum GradioError {
    /// A request failed with a non-success HTTP status.
    #[error("Gradio request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The server refused to open the event stream.
    #[error("Event stream rejected with status {status}: {body}")]
    StreamRejected {
        /// HTTP status code
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The server answered with something other than the expected shape.
    #[error("Invalid response from Gradio server: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// No candidate function index was accepted by the queue.
    #[error("Queue join rejected for every function index tried: {attempted:?}")]
    AllCandidatesRejected {
        /// Indices tried, in order
        attempted: Vec<u32>,
    },

    /// The event stream ended before the task completed.
    #[error("Event stream closed without a completion event")]
    StreamClosed,

    /// The task completed but produced no usable audio reference.
    #[error("Completion event had no '{extension}' output among {outputs} entries")]
    NoAudioOutput {
        /// Audio extension that was looked for
        extension: String,
        /// Number of output entries inspected
        outputs: usize,
    },

    /// The remote function reported a failure instead of outputs.
    #[error("Remote task failed: {message}")]
    TaskFailed {
        /// Error text reported by the server
        message: String,
    },

    /// The configured listen timeout expired.
    #[error("No completion event within {after:?}")]
    ListenTimeout {
        /// The timeout that elapsed
        after: Duration,
    },

    /// The client configuration cannot be used.
    #[error("Invalid client configuration: {message}")]
    InvalidConfig {
        /// What's wrong with the configuration
        message: String,
    },

    /// A parameter template could not be loaded.
    #[error("Invalid parameter template: {message}")]
    Template {
        /// What's wrong with the template
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Local IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GradioError {
    /// Coarse failure category used as a structured log field.
    pub fn category(&self) -> &'static str {
        match self {
            Self::RequestFailed { .. }
            | Self::StreamRejected { .. }
            | Self::ListenTimeout { .. }
            | Self::Network(_) => "transport",
            Self::InvalidResponse { .. } | Self::JsonParse(_) => "malformed_payload",
            Self::AllCandidatesRejected { .. }
            | Self::StreamClosed
            | Self::NoAudioOutput { .. }
            | Self::TaskFailed { .. } => "no_output",
            Self::InvalidConfig { .. } | Self::Template { .. } | Self::InvalidUrl(_) => {
                "configuration"
            }
            Self::Io(_) => "filesystem",
        }
    }
}
