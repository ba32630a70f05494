// crates/kbid-cli/src/commands/mod.rs
//
// Command module declarations for the kbid CLI.

pub mod authenticate;
pub mod score;
pub mod verify;
