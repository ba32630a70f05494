// crates/kbid-reputation/src/github.rs
//
// GitHub code-host scoring: follower count and account age.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use kbid_core::{CodeHostClient, CodeHostProfile, Platform, ScoreRecord, Signal};

use crate::bucket::{days_between, AgeBands, Bands};
use crate::degrade::or_degrade;

/// GitHub follower bands: <2, <6, <11, <21, then 21+.
pub const FOLLOWER_BANDS: Bands<u64> = Bands {
    cuts: &[(2, 0), (6, 1), (11, 2), (21, 3)],
    top: 4,
};

/// GitHub account age: <31d, <91d, <365d, then <2y, <3y, 3y+.
pub const ACCOUNT_AGE_BANDS: AgeBands = AgeBands {
    year_switch_days: 365.0,
    days: Bands {
        cuts: &[(31.0, 0), (91.0, 1)],
        top: 2,
    },
    years: Bands {
        cuts: &[(2.0, 3), (3.0, 4)],
        top: 5,
    },
};

pub fn score_profile(profile: &CodeHostProfile, now: DateTime<Utc>) -> ScoreRecord {
    let mut score = ScoreRecord::zeroed(Platform::Github);
    score.set(Signal::GithubFollowers, FOLLOWER_BANDS.score(profile.followers));

    let age_days = days_between(profile.created_at, now) as f64;
    score.set(Signal::GithubAge, ACCOUNT_AGE_BANDS.score(age_days));
    score
}

/// Fetches a GitHub profile and scores it. Never fails.
#[derive(Clone)]
pub struct GithubScorer {
    client: Arc<dyn CodeHostClient>,
}

impl GithubScorer {
    pub fn new(client: Arc<dyn CodeHostClient>) -> Self {
        Self { client }
    }

    pub async fn score_user(&self, username: &str) -> ScoreRecord {
        self.score_user_at(username, Utc::now()).await
    }

    pub async fn score_user_at(&self, username: &str, now: DateTime<Utc>) -> ScoreRecord {
        let lookup = self.client.lookup_profile(username).await;
        match or_degrade(Platform::Github, "profile", username, lookup) {
            Some(profile) => score_profile(&profile, now),
            None => ScoreRecord::zeroed(Platform::Github),
        }
    }
}
