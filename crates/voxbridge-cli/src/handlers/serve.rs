//! Serve command handler.
//!
//! Starts the HTTP front-end and blocks until it stops.

use voxbridge_axum::{ServerConfig, start_server};

use crate::bootstrap::{CliConfig, ClientOverrides};
use crate::error::CliError;

/// Arguments for the serve command.
#[derive(Debug)]
pub struct ServeArgs {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub fallback_silence: bool,
}

/// Build the front-end configuration.
pub fn server_config(config: &CliConfig, args: ServeArgs) -> Result<ServerConfig, CliError> {
    Ok(ServerConfig::default()
        .with_host(args.host)
        .with_port(args.port)
        .with_voice_model(args.model)
        .with_fallback_silence(args.fallback_silence)
        .with_gradio(config.gradio(&ClientOverrides::default())?))
}

/// Execute the serve command.
pub async fn execute(config: &CliConfig, args: ServeArgs) -> Result<(), CliError> {
    let server = server_config(config, args)?;
    println!(
        "voxbridge TTS bridge on http://{}:{} -> {}",
        server.host, server.port, config.base_url
    );
    start_server(server).await?;
    Ok(())
}
