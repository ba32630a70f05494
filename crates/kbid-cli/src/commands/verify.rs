// crates/kbid-cli/src/commands/verify.rs
//
// `kbid verify`: check a signed message against an expected text.

use clap::Args;
use kbid_core::{EnvSnapshot, GateOptions};
use kbid_verify::AuthenticationGate;

#[derive(Debug, Args)]
pub struct VerifyCmd {
    /// Signed saltpack message.
    #[arg(long)]
    pub message: String,

    /// Text the message must equal exactly.
    #[arg(long)]
    pub text: String,

    /// Require the message to be signed by this Keybase user.
    #[arg(long)]
    pub user: Option<String>,
}

pub async fn run(
    cmd: &VerifyCmd,
    options: &GateOptions,
    env: &EnvSnapshot,
) -> Result<(), Box<dyn std::error::Error>> {
    let gate = AuthenticationGate::from_options(options, env)?;
    let verified = gate
        .verifier()
        .verify(&cmd.message, &cmd.text, cmd.user.as_deref())
        .await;

    println!("{}", if verified { "verified" } else { "not verified" });
    if !verified {
        std::process::exit(1);
    }
    Ok(())
}
