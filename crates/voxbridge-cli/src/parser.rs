//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use voxbridge_gradio::{DEFAULT_API_PREFIX, DEFAULT_APPLIO_ROOT, DEFAULT_BASE_URL};

use crate::commands::Commands;

/// Command-line interface for driving a remote Applio TTS web UI.
#[derive(Parser)]
#[command(name = "voxbridge")]
#[command(about = "Text-to-speech through a remote Applio web UI")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Applio (Gradio) server
    #[arg(long = "base-url", env = "APPLIO_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Path prefix of the Gradio queue routes
    #[arg(long = "api-prefix", env = "APPLIO_API_PREFIX", default_value = DEFAULT_API_PREFIX, global = true)]
    pub api_prefix: String,

    /// Applio install directory on the machine running Applio
    #[arg(long = "applio-root", env = "APPLIO_ROOT", default_value = DEFAULT_APPLIO_ROOT, global = true)]
    pub applio_root: String,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "voxbridge",
            "check",
            "--verbose",
            "--base-url",
            "http://10.0.0.5:6969",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url, "http://10.0.0.5:6969");
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["voxbridge"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }
}
