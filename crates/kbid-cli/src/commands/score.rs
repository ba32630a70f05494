// crates/kbid-cli/src/commands/score.rs
//
// `kbid score <user>`: aggregate trust score of a Keybase user.

use clap::Args;
use kbid_core::{EnvSnapshot, GateOptions};
use kbid_verify::AuthenticationGate;

use crate::output::{format_json, format_table, signal_rows};

#[derive(Debug, Args)]
pub struct ScoreCmd {
    /// Keybase username.
    #[arg()]
    pub username: String,

    /// Print the per-signal breakdown and tier.
    #[arg(long)]
    pub details: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(
    cmd: &ScoreCmd,
    options: &GateOptions,
    env: &EnvSnapshot,
) -> Result<(), Box<dyn std::error::Error>> {
    let gate = AuthenticationGate::from_options(options, env)?;
    let aggregator = gate.aggregator();

    if !cmd.details {
        let total = aggregator.score_user(&cmd.username).await;
        if cmd.json {
            println!("{}", format_json(&total));
        } else {
            println!("{}", total);
        }
        return Ok(());
    }

    let details = aggregator.score_user_details(&cmd.username).await;
    if cmd.json {
        println!("{}", format_json(&details));
    } else {
        println!("{}", format_table(&signal_rows(&details.score)));
        println!();
        println!("  Total:    {}", details.total);
        println!("  Identity: {}", details.identity);
        if !aggregator.has_social_credentials() {
            println!("  (no Twitter credentials; compensation applied)");
        }
    }

    Ok(())
}
