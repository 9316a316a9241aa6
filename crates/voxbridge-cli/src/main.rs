//! CLI entry point.
//!
//! Parses arguments, installs logging and dispatches to a handler. Handler
//! failures become the process exit code.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use voxbridge_cli::handlers::{self, serve::ServeArgs, synth::SynthArgs};
use voxbridge_cli::{Cli, CliConfig, CliError, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(config: &CliConfig, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Synth {
            text,
            model,
            output,
            fn_index,
            params,
            listen_timeout,
            voice_path,
            pitch,
            speed,
        } => {
            let args = SynthArgs {
                text,
                model,
                output,
                fn_index,
                params,
                listen_timeout,
                voice_path,
                pitch,
                speed,
            };
            handlers::synth::execute(config, args).await.map(|_| ())
        }
        Commands::Serve {
            host,
            port,
            model,
            fallback_silence,
        } => {
            let args = ServeArgs {
                host,
                port,
                model,
                fallback_silence,
            };
            handlers::serve::execute(config, args).await
        }
        Commands::Check => handlers::check::execute(config).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(e) = dispatch(&config, command).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
