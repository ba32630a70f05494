// crates/kbid-reputation/src/lib.rs
//
// kbid-reputation: per-platform scoring rules and score aggregation.
//
// Each platform scorer turns fetched profile data into a fixed-shape
// ScoreRecord and never fails; a failed fetch yields zero points for the
// signals it would have fed. The aggregator merges the records, applies the
// Twitter compensation table when Twitter is not configured, and classifies
// the total into an identity tier.

pub mod aggregator;
pub mod bucket;
pub mod compensation;
pub mod degrade;
pub mod github;
pub mod keybase;
pub mod twitter;

pub use aggregator::{ScoreAggregator, ScoreDetails};
pub use compensation::SOCIAL_ABSENT_COMPENSATION;
pub use github::GithubScorer;
pub use keybase::KeybaseScorer;
pub use twitter::TwitterScorer;
