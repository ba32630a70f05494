// crates/kbid-platforms/src/lib.rs
//
// kbid-platforms: typed HTTP clients for the three scoring platforms.
//
// Each client implements one of the collaborator traits from kbid-core and
// returns `Result<_, FetchError>`; deciding what a failure is worth is left
// to the scorers in kbid-reputation. Wire decoding lives in plain `parse_*`
// functions so it can be tested without a network.

pub mod github;
pub mod http;
pub mod keybase;
pub mod twitter;

pub use github::GithubClient;
pub use keybase::KeybaseClient;
pub use twitter::TwitterClient;
