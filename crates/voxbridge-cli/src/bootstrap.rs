//! CLI bootstrap - the composition root.
//!
//! Global flags become a `CliConfig`; handlers turn it into a Gradio client
//! configuration with their per-command overrides applied.

use std::path::Path;
use std::time::Duration;

use voxbridge_gradio::{DEFAULT_VOICE_PATH, GradioClientConfig, ParameterTemplate};

use crate::error::CliError;
use crate::parser::Cli;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Base URL of the Applio server.
    pub base_url: String,
    /// Prefix of the Gradio queue routes.
    pub api_prefix: String,
    /// Applio install directory on the Applio machine.
    pub applio_root: String,
}

/// Per-invocation overrides for the Gradio client.
#[derive(Debug, Default)]
pub struct ClientOverrides<'a> {
    pub fn_index: Option<u32>,
    pub params: Option<&'a Path>,
    pub listen_timeout: Option<Duration>,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            api_prefix: cli.api_prefix.clone(),
            applio_root: cli.applio_root.clone(),
        }
    }

    /// Gradio client settings with `overrides` applied.
    pub fn gradio(&self, overrides: &ClientOverrides<'_>) -> Result<GradioClientConfig, CliError> {
        let template = match overrides.params {
            Some(path) => ParameterTemplate::from_json_file(path)?,
            None => ParameterTemplate::applio_tts(&self.applio_root, DEFAULT_VOICE_PATH),
        };

        let mut config = GradioClientConfig::new()
            .with_base_url(&self.base_url)
            .with_api_prefix(&self.api_prefix)
            .with_template(template)
            .with_optional_listen_timeout(overrides.listen_timeout);

        if let Some(index) = overrides.fn_index {
            config = config.with_fn_index(index);
        }
        Ok(config)
    }
}
