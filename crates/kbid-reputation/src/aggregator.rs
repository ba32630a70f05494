// crates/kbid-reputation/src/aggregator.rs
//
// ScoreAggregator: combines the per-platform records into one trust score.
//
// Keybase and GitHub are always scored. Twitter is scored only when
// credentials are configured; otherwise the compensation table is applied.
// All fetches run concurrently and every call is independent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use kbid_core::{
    CodeHostClient, IdentityNetworkClient, IdentityTier, ScoreRecord, SocialCredentials,
    SocialNetworkClient,
};

use crate::compensation::apply_social_absent_compensation;
use crate::github::GithubScorer;
use crate::keybase::KeybaseScorer;
use crate::twitter::TwitterScorer;

/// Full score breakdown for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreDetails {
    /// Combined per-signal points.
    pub score: ScoreRecord,
    /// Sum of `score`.
    pub total: u32,
    /// Tier of `total`.
    pub identity: IdentityTier,
}

impl ScoreDetails {
    pub fn from_record(score: ScoreRecord) -> Self {
        let total = score.total();
        Self {
            score,
            total,
            identity: IdentityTier::from_total(total),
        }
    }
}

#[derive(Clone)]
struct SocialScoring {
    scorer: TwitterScorer,
    credentials: SocialCredentials,
}

/// Aggregates Keybase, GitHub, and (optionally) Twitter scores.
#[derive(Clone)]
pub struct ScoreAggregator {
    keybase: KeybaseScorer,
    github: GithubScorer,
    social: Option<SocialScoring>,
}

impl ScoreAggregator {
    /// Aggregator without Twitter. The compensation table is applied to every score.
    pub fn new(keybase: Arc<dyn IdentityNetworkClient>, github: Arc<dyn CodeHostClient>) -> Self {
        Self {
            keybase: KeybaseScorer::new(keybase),
            github: GithubScorer::new(github),
            social: None,
        }
    }

    /// Score Twitter with the given client and credentials.
    pub fn with_social(
        mut self,
        twitter: Arc<dyn SocialNetworkClient>,
        credentials: SocialCredentials,
    ) -> Self {
        self.social = Some(SocialScoring {
            scorer: TwitterScorer::new(twitter),
            credentials,
        });
        self
    }

    pub fn has_social_credentials(&self) -> bool {
        self.social.is_some()
    }

    /// Total score for `username`.
    pub async fn score_user(&self, username: &str) -> u32 {
        self.combined_record_at(username, Utc::now()).await.total()
    }

    /// Combined record, total, and tier for `username`.
    pub async fn score_user_details(&self, username: &str) -> ScoreDetails {
        self.score_user_details_at(username, Utc::now()).await
    }

    pub async fn score_user_details_at(&self, username: &str, now: DateTime<Utc>) -> ScoreDetails {
        ScoreDetails::from_record(self.combined_record_at(username, now).await)
    }

    /// Fetch and merge every platform record as of `now`.
    pub async fn combined_record_at(&self, username: &str, now: DateTime<Utc>) -> ScoreRecord {
        let social = async {
            match &self.social {
                Some(s) => Some(s.scorer.score_user_at(username, &s.credentials, now).await),
                None => None,
            }
        };

        let (keybase, github, twitter) = tokio::join!(
            self.keybase.score_user_at(username, now),
            self.github.score_user_at(username, now),
            social,
        );

        let mut combined = keybase.merged(github);
        match twitter {
            Some(twitter) => combined.merge(twitter),
            None => apply_social_absent_compensation(&mut combined),
        }

        tracing::debug!(
            username,
            total = combined.total(),
            social = self.social.is_some(),
            "aggregated identity score"
        );
        combined
    }
}
