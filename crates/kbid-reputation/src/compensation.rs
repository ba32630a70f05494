// crates/kbid-reputation/src/compensation.rs
//
// Point redistribution applied when Twitter credentials are not configured.
//
// Without credentials the Twitter signals are not scored and their weight
// moves onto Keybase and GitHub signals.

use kbid_core::{ScoreRecord, Signal};

/// Bonuses added when Twitter is not scored. Applied after the Keybase and
/// GitHub records are merged.
pub const SOCIAL_ABSENT_COMPENSATION: &[(Signal, u32)] = &[
    (Signal::KeybaseAge, 2),
    (Signal::GithubAge, 2),
    (Signal::KeybaseFollowers, 2),
    (Signal::GithubFollowers, 1),
];

/// Add every bonus in [`SOCIAL_ABSENT_COMPENSATION`] onto `record`.
pub fn apply_social_absent_compensation(record: &mut ScoreRecord) {
    for &(signal, bonus) in SOCIAL_ABSENT_COMPENSATION {
        record.add(signal, bonus);
    }
}
