//! Main commands enum.

use std::path::PathBuf;

use clap::Subcommand;
use voxbridge_axum::DEFAULT_PORT;
use voxbridge_core::DEFAULT_VOICE_MODEL;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize one text and print where the audio ended up
    Synth {
        /// Text to speak
        text: String,
        /// Voice model identifier
        #[arg(short, long, env = "VOXBRIDGE_VOICE_MODEL", default_value = DEFAULT_VOICE_MODEL)]
        model: String,
        /// Copy the finished audio here
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Use this Gradio function index instead of searching the candidates
        #[arg(long)]
        fn_index: Option<u32>,
        /// JSON file with the parameter vector layout
        #[arg(long)]
        params: Option<PathBuf>,
        /// Give up waiting for the result after this many seconds
        #[arg(long, value_name = "SECS")]
        listen_timeout: Option<u64>,
        /// RVC voice weights, relative to the Applio root
        #[arg(long)]
        voice_path: Option<String>,
        /// Pitch shift in semitones
        #[arg(long, allow_negative_numbers = true)]
        pitch: Option<i32>,
        /// Speech rate adjustment in percent
        #[arg(long, allow_negative_numbers = true)]
        speed: Option<i32>,
    },

    /// Run the local HTTP front-end
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Voice model identifier
        #[arg(short, long, env = "VOXBRIDGE_VOICE_MODEL", default_value = DEFAULT_VOICE_MODEL)]
        model: String,
        /// Answer with a short silent clip when Applio fails
        #[arg(long)]
        fallback_silence: bool,
    },

    /// Check whether the Applio server is reachable
    Check,
}
