// crates/kbid-cli/src/commands/authenticate.rs
//
// `kbid authenticate`: signed-message verification plus minimum score.

use clap::Args;
use kbid_core::{EnvSnapshot, GateOptions};
use kbid_verify::AuthenticationGate;

#[derive(Debug, Args)]
pub struct AuthenticateCmd {
    /// Signed saltpack message.
    #[arg(long)]
    pub message: String,

    /// Text the message must equal exactly.
    #[arg(long)]
    pub text: String,

    /// Keybase user claiming to have signed the message.
    #[arg(long)]
    pub user: String,

    /// Override the minimum score.
    #[arg(long)]
    pub min_score: Option<u32>,
}

pub async fn run(
    cmd: &AuthenticateCmd,
    options: &GateOptions,
    env: &EnvSnapshot,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = options.clone();
    if cmd.min_score.is_some() {
        options.min_score = cmd.min_score;
    }

    let gate = AuthenticationGate::from_options(&options, env)?;
    let accepted = gate.authenticate(&cmd.message, &cmd.text, &cmd.user).await?;

    println!(
        "{} (minimum score {})",
        if accepted { "accepted" } else { "rejected" },
        gate.min_score()
    );
    if !accepted {
        std::process::exit(1);
    }
    Ok(())
}
