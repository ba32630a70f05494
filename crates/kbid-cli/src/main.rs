// crates/kbid-cli/src/main.rs
//
// CLI entrypoint for Keybase identity scoring and authentication.
//
// Options come from an optional TOML file and fall back to the
// KEYBASEID_* environment variables.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::authenticate::AuthenticateCmd;
use commands::score::ScoreCmd;
use commands::verify::VerifyCmd;
use kbid_core::{EnvSnapshot, GateOptions};

/// Keybase identity CLI: trust scores and signed-message authentication.
#[derive(Parser, Debug)]
#[command(
    name = "kbid",
    version,
    about = "Score Keybase identities and authenticate signed messages"
)]
struct Cli {
    /// TOML file with gate options (keybase_path, min_score, twitter_api_key, twitter_api_secret).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the trust score of a Keybase user.
    Score(ScoreCmd),

    /// Verify a signed message against an expected text.
    Verify(VerifyCmd),

    /// Verify a signed message and check the signer's score.
    Authenticate(AuthenticateCmd),
}

fn load_options(path: Option<&PathBuf>) -> GateOptions {
    let Some(path) = path else {
        return GateOptions::default();
    };
    match GateOptions::load(path) {
        Ok(options) => {
            tracing::info!("Loaded configuration from {}", path.display());
            options
        }
        Err(e) => {
            tracing::warn!(
                "Could not load config from {}: {}. Using environment only.",
                path.display(),
                e
            );
            GateOptions::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = load_options(cli.config.as_ref());
    let env = EnvSnapshot::from_env();

    match &cli.command {
        Commands::Score(cmd) => commands::score::run(cmd, &options, &env).await?,
        Commands::Verify(cmd) => commands::verify::run(cmd, &options, &env).await?,
        Commands::Authenticate(cmd) => commands::authenticate::run(cmd, &options, &env).await?,
    }

    Ok(())
}
