//! Check command handler.

use voxbridge_gradio::DefaultGradioClient;

use crate::bootstrap::{CliConfig, ClientOverrides};
use crate::error::CliError;

/// Execute the check command.
///
/// Prints the outcome and fails when the server does not answer.
pub async fn execute(config: &CliConfig) -> Result<(), CliError> {
    let client = DefaultGradioClient::new(&config.gradio(&ClientOverrides::default())?)?;

    if client.check_connection().await {
        println!("Applio is reachable at {}", config.base_url);
        Ok(())
    } else {
        Err(CliError::Unreachable(config.base_url.clone()))
    }
}
