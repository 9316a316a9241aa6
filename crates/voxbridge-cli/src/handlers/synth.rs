//! Synth command handler.
//!
//! Runs one synthesis end to end. Useful as a smoke test against a live
//! Applio instance.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use voxbridge_core::{SynthesisRequest, SynthesizedAudio};
use voxbridge_gradio::DefaultGradioClient;

use crate::bootstrap::{CliConfig, ClientOverrides};
use crate::error::CliError;

/// Arguments for the synth command.
#[derive(Debug)]
pub struct SynthArgs {
    pub text: String,
    pub model: String,
    pub output: Option<PathBuf>,
    pub fn_index: Option<u32>,
    pub params: Option<PathBuf>,
    pub listen_timeout: Option<u64>,
    pub voice_path: Option<String>,
    pub pitch: Option<i32>,
    pub speed: Option<i32>,
}

impl SynthArgs {
    fn request(&self) -> SynthesisRequest {
        let mut request = SynthesisRequest::new(self.text.as_str(), self.model.as_str());
        request.output_path.clone_from(&self.output);
        request.voice_path.clone_from(&self.voice_path);
        request.pitch = self.pitch;
        request.speed = self.speed;
        request
    }
}

/// Execute the synth command.
pub async fn execute(config: &CliConfig, args: SynthArgs) -> Result<SynthesizedAudio, CliError> {
    if args.text.trim().is_empty() {
        return Err(CliError::Arguments("text must not be empty".to_string()));
    }

    let overrides = ClientOverrides {
        fn_index: args.fn_index,
        params: args.params.as_deref(),
        listen_timeout: args.listen_timeout.map(Duration::from_secs),
    };
    let client = DefaultGradioClient::new(&config.gradio(&overrides)?)?;

    let request = args.request();

    info!(
        target: "voxbridge.cli",
        base_url = %config.base_url,
        candidates = ?client.fn_indices(),
        "Running synthesis"
    );
    let audio = client.try_synthesize(&request).await?;

    if request.output_path.is_some() && !audio.materialized {
        eprintln!("Could not copy the audio; it is still at the remote path.");
    }
    println!("{}", audio.path.display());
    Ok(audio)
}
