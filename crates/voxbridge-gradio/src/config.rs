//! Public configuration for the Gradio queue client.
//!
//! The candidate function indices and the parameter layout both mirror one
//! particular Applio release. They are configuration so a different release
//! only needs different settings.

use std::time::Duration;

use crate::params::ParameterTemplate;

/// Where Applio's web UI listens by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:6969";

/// Path prefix of the Gradio API routes (Gradio 4+).
pub const DEFAULT_API_PREFIX: &str = "/gradio_api";

/// Function indices tried in order when none is pinned.
pub const DEFAULT_FN_INDICES: [u32; 10] = [94, 93, 95, 96, 92, 97, 91, 98, 90, 99];

/// Configuration for the Gradio queue client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use voxbridge_gradio::GradioClientConfig;
/// use std::time::Duration;
///
/// let config = GradioClientConfig::new()
///     .with_base_url("http://192.168.1.20:6969")
///     .with_fn_index(94)
///     .with_listen_timeout(Duration::from_secs(1200));
/// ```
#[derive(Debug, Clone)]
pub struct GradioClientConfig {
    /// Base URL of the Gradio server
    pub(crate) base_url: String,
    /// Prefix in front of the queue routes
    pub(crate) api_prefix: String,
    /// Function indices to try, in priority order
    pub(crate) fn_indices: Vec<u32>,
    /// Parameter vector layout
    pub(crate) template: ParameterTemplate,
    /// Suffix identifying audio outputs
    pub(crate) audio_extension: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Timeout for each queue-join request
    pub(crate) join_timeout: Duration,
    /// Timeout for reachability probes
    pub(crate) health_timeout: Duration,
    /// Upper bound on waiting for the completion event
    pub(crate) listen_timeout: Option<Duration>,
    /// Optional `trigger_id` sent with each join
    pub(crate) trigger_id: Option<u32>,
}

impl Default for GradioClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            fn_indices: DEFAULT_FN_INDICES.to_vec(),
            template: ParameterTemplate::default(),
            audio_extension: ".wav".to_string(),
            user_agent: concat!("voxbridge-gradio/", env!("CARGO_PKG_VERSION")).to_string(),
            join_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(2),
            listen_timeout: None,
            trigger_id: None,
        }
    }
}

impl GradioClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the Gradio server.
    ///
    /// Defaults to `http://127.0.0.1:6969`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the prefix of the queue routes.
    ///
    /// Defaults to `/gradio_api`. Gradio 3 servers expose the queue at the
    /// root, which is an empty prefix.
    #[must_use]
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Replace the candidate function indices.
    #[must_use]
    pub fn with_fn_indices(mut self, indices: impl IntoIterator<Item = u32>) -> Self {
        self.fn_indices = indices.into_iter().collect();
        self
    }

    /// Pin a single known function index, disabling the candidate search.
    #[must_use]
    pub fn with_fn_index(mut self, index: u32) -> Self {
        self.fn_indices = vec![index];
        self
    }

    /// Set the parameter vector layout.
    #[must_use]
    pub fn with_template(mut self, template: ParameterTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set the suffix that identifies audio outputs.
    ///
    /// Defaults to `.wav`. Matching is case-insensitive.
    #[must_use]
    pub fn with_audio_extension(mut self, extension: impl Into<String>) -> Self {
        self.audio_extension = extension.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the timeout for each queue-join request.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_join_timeout(mut self, timeout: Duration) -> Self {
        self.join_timeout = timeout;
        self
    }

    /// Set the timeout for reachability probes.
    ///
    /// Defaults to 2 seconds.
    #[must_use]
    pub const fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Bound the wait for the completion event.
    ///
    /// Unbounded by default: a stalled server stalls the caller.
    #[must_use]
    pub const fn with_listen_timeout(mut self, timeout: Duration) -> Self {
        self.listen_timeout = Some(timeout);
        self
    }

    /// Set an optional listen timeout.
    #[must_use]
    pub const fn with_optional_listen_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.listen_timeout = timeout;
        self
    }

    /// Send a `trigger_id` with every join.
    #[must_use]
    pub const fn with_trigger_id(mut self, trigger_id: u32) -> Self {
        self.trigger_id = Some(trigger_id);
        self
    }
}
