//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the concrete Gradio client is built
//! for the web adapter. Handlers only see the `SpeechSynthesizerPort`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use voxbridge_core::{DEFAULT_VOICE_MODEL, SpeechSynthesizerPort, SynthesisService};
use voxbridge_gradio::{DefaultGradioClient, GradioClientConfig};

/// Port the front-end listens on by default.
pub const DEFAULT_PORT: u16 = 5004;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Voice model sent with every request.
    pub voice_model: String,
    /// Answer with a silent clip instead of an error when synthesis fails.
    pub fallback_silence: bool,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Upstream Gradio client settings.
    pub gradio: GradioClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            voice_model: DEFAULT_VOICE_MODEL.to_string(),
            fallback_silence: false,
            cors: CorsConfig::default(),
            gradio: GradioClientConfig::default(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_voice_model(mut self, voice_model: impl Into<String>) -> Self {
        self.voice_model = voice_model.into();
        self
    }

    #[must_use]
    pub const fn with_fallback_silence(mut self, enabled: bool) -> Self {
        self.fallback_silence = enabled;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    #[must_use]
    pub fn with_gradio(mut self, gradio: GradioClientConfig) -> Self {
        self.gradio = gradio;
        self
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Synthesizer behind the TTS route.
    pub synth: Arc<dyn SpeechSynthesizerPort>,
    /// Voice model sent with every request.
    pub voice_model: String,
    /// Answer with a silent clip instead of an error when synthesis fails.
    pub fallback_silence: bool,
}

impl AxumContext {
    pub fn new(synth: Arc<dyn SpeechSynthesizerPort>, config: &ServerConfig) -> Self {
        Self {
            synth,
            voice_model: config.voice_model.clone(),
            fallback_silence: config.fallback_silence,
        }
    }
}

/// Build the context with the Gradio client behind a serializing service.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let client = DefaultGradioClient::new(&config.gradio)
        .context("failed to build the Gradio client")?;
    let synth: Arc<dyn SpeechSynthesizerPort> =
        Arc::new(SynthesisService::new(Arc::new(client)));

    Ok(AxumContext::new(synth, config))
}

/// Bootstrap and serve until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let addr = config.bind_addr()?;
    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        target: "voxbridge.axum",
        %addr,
        voice_model = %config.voice_model,
        fallback_silence = config.fallback_silence,
        "voxbridge TTS bridge listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
