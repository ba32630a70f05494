// crates/kbid-reputation/src/twitter.rs
//
// Twitter social-network scoring: follower count and account age.
// Only used when API credentials are configured.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use kbid_core::{
    Platform, ScoreRecord, Signal, SocialCredentials, SocialNetworkClient, SocialProfile,
};

use crate::bucket::{days_between, AgeBands, Bands};
use crate::degrade::or_degrade;

/// Twitter follower bands: <51, <301, <2001, then 2001+.
pub const FOLLOWER_BANDS: Bands<u64> = Bands {
    cuts: &[(51, 0), (301, 1), (2001, 2)],
    top: 3,
};

/// Twitter account age switches to years at two years: <31d, <91d, <730d,
/// then <4y, 4y+.
pub const ACCOUNT_AGE_BANDS: AgeBands = AgeBands {
    year_switch_days: 730.0,
    days: Bands {
        cuts: &[(31.0, 0), (91.0, 1)],
        top: 2,
    },
    years: Bands {
        cuts: &[(4.0, 3)],
        top: 4,
    },
};

pub fn score_profile(profile: &SocialProfile, now: DateTime<Utc>) -> ScoreRecord {
    let mut score = ScoreRecord::zeroed(Platform::Twitter);
    score.set(
        Signal::TwitterFollowers,
        FOLLOWER_BANDS.score(profile.followers_count),
    );

    let age_days = days_between(profile.created_at, now) as f64;
    score.set(Signal::TwitterAge, ACCOUNT_AGE_BANDS.score(age_days));
    score
}

/// Fetches a Twitter profile and scores it. Never fails.
#[derive(Clone)]
pub struct TwitterScorer {
    client: Arc<dyn SocialNetworkClient>,
}

impl TwitterScorer {
    pub fn new(client: Arc<dyn SocialNetworkClient>) -> Self {
        Self { client }
    }

    pub async fn score_user(&self, username: &str, credentials: &SocialCredentials) -> ScoreRecord {
        self.score_user_at(username, credentials, Utc::now()).await
    }

    pub async fn score_user_at(
        &self,
        username: &str,
        credentials: &SocialCredentials,
        now: DateTime<Utc>,
    ) -> ScoreRecord {
        let lookup = self.client.lookup_profile(username, credentials).await;
        match or_degrade(Platform::Twitter, "profile", username, lookup) {
            Some(profile) => score_profile(&profile, now),
            None => ScoreRecord::zeroed(Platform::Twitter),
        }
    }
}
