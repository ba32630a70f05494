// crates/kbid-reputation/src/keybase.rs
//
// Keybase identity-network scoring.
//
// Signals: follower count, account age, mean signature age, per-type proof
// points, and a device bonus. The profile lookup gates everything else: if it
// fails the whole record is zero. Follower and signature lookups only zero
// their own signal when they fail.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use kbid_core::{
    IdentityNetworkClient, IdentityProfile, Platform, ProofType, ScoreRecord, Signal,
    SignatureInfo,
};

use crate::bucket::{days_between, AgeBands, Bands};
use crate::degrade::or_degrade;

/// Keybase follower bands: <2, <6, <11, <21, <51, then 51+.
pub const FOLLOWER_BANDS: Bands<u64> = Bands {
    cuts: &[(2, 0), (6, 1), (11, 2), (21, 3), (51, 4)],
    top: 5,
};

/// Keybase account age: <30d, <91d, <181d, <365d, then <2y, <3y, 3y+.
pub const ACCOUNT_AGE_BANDS: AgeBands = AgeBands {
    year_switch_days: 365.0,
    days: Bands {
        cuts: &[(30.0, 0), (91.0, 1), (181.0, 2)],
        top: 3,
    },
    years: Bands {
        cuts: &[(2.0, 4), (3.0, 5)],
        top: 6,
    },
};

/// Mean signature age: <31d, <91d, <365d, then <2y, <3y, 3y+.
pub const SIGNATURE_AGE_BANDS: AgeBands = AgeBands {
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

/// Proof and device point values.
pub mod points {
    /// A proven Twitter account.
    pub const TWITTER_PROOF: u32 = 10;
    /// A proven GitHub account.
    pub const GITHUB_PROOF: u32 = 10;
    /// A proven Reddit account.
    pub const REDDIT_PROOF: u32 = 3;
    /// A proven Hacker News account.
    pub const HACKERNEWS_PROOF: u32 = 3;
    pub const DNS_PER_PROOF: u32 = 10;
    pub const DNS_CAP: u32 = 20;
    pub const GENERIC_WEBSITE_PER_PROOF: u32 = 5;
    pub const GENERIC_WEBSITE_CAP: u32 = 10;
    /// Per desktop or mobile device.
    pub const DEVICE_PER_DEVICE: u32 = 4;
    pub const DEVICE_CAP: u32 = 12;
}

/// Score a Keybase identity from already-fetched data.
///
/// `followers` and `signatures` are `None` when their lookup failed.
/// An empty signature list leaves `avgProofAge` at zero.
pub fn score_identity(
    profile: &IdentityProfile,
    followers: Option<u64>,
    signatures: Option<&[SignatureInfo]>,
    now: DateTime<Utc>,
) -> ScoreRecord {
    let mut score = ScoreRecord::zeroed(Platform::Keybase);

    if let Some(followers) = followers {
        score.set(Signal::KeybaseFollowers, FOLLOWER_BANDS.score(followers));
    }

    if let Some(sigs) = signatures.filter(|s| !s.is_empty()) {
        score.set(
            Signal::AvgProofAge,
            SIGNATURE_AGE_BANDS.score(mean_signature_age_days(sigs, now)),
        );
    }

    for proof in &profile.proofs {
        apply_proof(&mut score, proof);
    }

    let personal_devices = profile.devices.iter().filter(|d| d.is_personal()).count();
    for _ in 0..personal_devices {
        score.add_capped(
            Signal::MobileDesktopDevice,
            points::DEVICE_PER_DEVICE,
            points::DEVICE_CAP,
        );
    }

    if let Some(created_at) = profile.created_at {
        let age_days = days_between(created_at, now) as f64;
        score.set(Signal::KeybaseAge, ACCOUNT_AGE_BANDS.score(age_days));
    }

    score
}

fn apply_proof(score: &mut ScoreRecord, proof: &ProofType) {
    match proof {
        ProofType::Twitter => score.set(Signal::TwitterProof, points::TWITTER_PROOF),
        ProofType::Github => score.set(Signal::GithubProof, points::GITHUB_PROOF),
        ProofType::Reddit => score.set(Signal::RedditProof, points::REDDIT_PROOF),
        ProofType::Hackernews => score.set(Signal::HackernewsProof, points::HACKERNEWS_PROOF),
        ProofType::Dns => {
            score.add_capped(Signal::DnsWebsite, points::DNS_PER_PROOF, points::DNS_CAP)
        }
        ProofType::GenericWebSite => score.add_capped(
            Signal::GenericWebsite,
            points::GENERIC_WEBSITE_PER_PROOF,
            points::GENERIC_WEBSITE_CAP,
        ),
        ProofType::Other(_) => {}
    }
}

/// Mean of the whole-day ages of `sigs`. May be fractional.
fn mean_signature_age_days(sigs: &[SignatureInfo], now: DateTime<Utc>) -> f64 {
    let total_days: i64 = sigs
        .iter()
        .map(|sig| {
            DateTime::<Utc>::from_timestamp(sig.created_at_epoch_seconds, 0)
                .map(|created| days_between(created, now))
                .unwrap_or(0)
        })
        .sum();
    total_days as f64 / sigs.len() as f64
}

/// Fetches Keybase data and scores it. Never fails.
#[derive(Clone)]
pub struct KeybaseScorer {
    client: Arc<dyn IdentityNetworkClient>,
}

impl KeybaseScorer {
    pub fn new(client: Arc<dyn IdentityNetworkClient>) -> Self {
        Self { client }
    }

    pub async fn score_user(&self, username: &str) -> ScoreRecord {
        self.score_user_at(username, Utc::now()).await
    }

    /// Score as of `now`.
    pub async fn score_user_at(&self, username: &str, now: DateTime<Utc>) -> ScoreRecord {
        let lookup = self.client.lookup_profile(username).await;
        let Some(profile) = or_degrade(Platform::Keybase, "profile", username, lookup) else {
            return ScoreRecord::zeroed(Platform::Keybase);
        };

        let signatures_lookup = async {
            match profile.user_id.as_deref() {
                Some(user_id) => Some(self.client.lookup_signatures(user_id).await),
                None => None,
            }
        };
        let (followers, signatures) = tokio::join!(
            self.client.lookup_follow_summary(username),
            signatures_lookup,
        );
        let followers = or_degrade(Platform::Keybase, "follow_summary", username, followers);
        let signatures = match signatures {
            Some(result) => or_degrade(Platform::Keybase, "signatures", username, result),
            None => {
                tracing::debug!(username, "keybase profile has no id; skipping signatures");
                None
            }
        };

        score_identity(&profile, followers, signatures.as_deref(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use kbid_core::{DeviceClass, FetchError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn profile() -> IdentityProfile {
        IdentityProfile {
            user_id: Some("uid".to_string()),
            ..IdentityProfile::default()
        }
    }

    #[test]
    fn test_follower_band_edges() {
        let cases = [
            (0, 0),
            (1, 0),
            (2, 1),
            (5, 1),
            (6, 2),
            (10, 2),
            (11, 3),
            (20, 3),
            (21, 4),
            (50, 4),
            (51, 5),
            (10_000, 5),
        ];
        for (followers, expected) in cases {
            assert_eq!(FOLLOWER_BANDS.score(followers), expected, "followers={}", followers);
        }
    }

    #[test]
    fn test_account_age_band_edges() {
        let cases = [
            (0.0, 0),
            (29.0, 0),
            (30.0, 1),
            (90.0, 1),
            (91.0, 2),
            (180.0, 2),
            (181.0, 3),
            (364.0, 3),
            (365.0, 4),
            (729.0, 4),
            (730.0, 5),
            (1094.0, 5),
            (1095.0, 6),
        ];
        for (days, expected) in cases {
            assert_eq!(ACCOUNT_AGE_BANDS.score(days), expected, "days={}", days);
        }
    }

    #[test]
    fn test_signature_age_band_edges() {
        let cases = [
            (30.0, 0),
            (31.0, 1),
            (91.0, 2),
            (364.5, 2),
            (365.0, 3),
            (730.0, 4),
            (1095.0, 5),
        ];
        for (days, expected) in cases {
            assert_eq!(SIGNATURE_AGE_BANDS.score(days), expected, "days={}", days);
        }
    }

    #[test]
    fn test_single_proofs_set_fixed_points() {
        let mut p = profile();
        p.proofs = vec![
            ProofType::Twitter,
            ProofType::Twitter,
            ProofType::Github,
            ProofType::Reddit,
            ProofType::Hackernews,
            ProofType::Other("mastodon".to_string()),
        ];
        let score = score_identity(&p, None, None, Utc::now());
        assert_eq!(score.get(Signal::TwitterProof), 10);
        assert_eq!(score.get(Signal::GithubProof), 10);
        assert_eq!(score.get(Signal::RedditProof), 3);
        assert_eq!(score.get(Signal::HackernewsProof), 3);
        assert_eq!(score.total(), 26);
    }

    #[test]
    fn test_dns_and_website_accumulate_with_cap() {
        let mut p = profile();
        p.proofs = vec![ProofType::Dns; 3];
        p.proofs.extend(vec![ProofType::GenericWebSite; 3]);
        let score = score_identity(&p, None, None, Utc::now());
        assert_eq!(score.get(Signal::DnsWebsite), 20);
        assert_eq!(score.get(Signal::GenericWebsite), 10);

        let mut p = profile();
        p.proofs = vec![ProofType::Dns, ProofType::GenericWebSite];
        let score = score_identity(&p, None, None, Utc::now());
        assert_eq!(score.get(Signal::DnsWebsite), 10);
        assert_eq!(score.get(Signal::GenericWebsite), 5);
    }

    #[test]
    fn test_device_bonus_counts_personal_devices_with_cap() {
        let mut p = profile();
        p.devices = vec![
            DeviceClass::Desktop,
            DeviceClass::Other("backup".to_string()),
        ];
        assert_eq!(
            score_identity(&p, None, None, Utc::now()).get(Signal::MobileDesktopDevice),
            4
        );

        p.devices = vec![
            DeviceClass::Desktop,
            DeviceClass::Mobile,
            DeviceClass::Mobile,
            DeviceClass::Desktop,
        ];
        assert_eq!(
            score_identity(&p, None, None, Utc::now()).get(Signal::MobileDesktopDevice),
            12
        );
    }

    #[test]
    fn test_mean_signature_age() {
        let now = Utc::now();
        let sigs = [
            SignatureInfo {
                created_at_epoch_seconds: (now - Duration::days(300)).timestamp(),
            },
            SignatureInfo {
                created_at_epoch_seconds: (now - Duration::days(500)).timestamp(),
            },
        ];
        // Mean of 300 and 500 is 400 days: 1.1 years.
        let score = score_identity(&profile(), None, Some(&sigs), now);
        assert_eq!(score.get(Signal::AvgProofAge), 3);
    }

    #[test]
    fn test_no_signatures_leaves_signal_zero() {
        let score = score_identity(&profile(), None, Some(&[]), Utc::now());
        assert!(score.contains(Signal::AvgProofAge));
        assert_eq!(score.get(Signal::AvgProofAge), 0);
    }

    #[test]
    fn test_account_age_from_created_at() {
        let now = Utc::now();
        let mut p = profile();
        p.created_at = Some(now - Duration::days(365));
        assert_eq!(score_identity(&p, None, None, now).get(Signal::KeybaseAge), 4);
        p.created_at = Some(now - Duration::days(364));
        assert_eq!(score_identity(&p, None, None, now).get(Signal::KeybaseAge), 3);
    }

    #[test]
    fn test_record_shape_is_fixed() {
        let score = score_identity(&profile(), None, None, Utc::now());
        assert_eq!(score, ScoreRecord::zeroed(Platform::Keybase));
    }

    /// Returns a fixed profile and counts signature lookups.
    struct FixedKeybase {
        profile: IdentityProfile,
        signature_lookups: AtomicUsize,
    }

    #[async_trait]
    impl IdentityNetworkClient for FixedKeybase {
        async fn lookup_profile(&self, _username: &str) -> Result<IdentityProfile, FetchError> {
            Ok(self.profile.clone())
        }

        async fn lookup_follow_summary(&self, _username: &str) -> Result<u64, FetchError> {
            Ok(6)
        }

        async fn lookup_signatures(&self, _user_id: &str) -> Result<Vec<SignatureInfo>, FetchError> {
            self.signature_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_profile_without_id_still_scores_other_signals() {
        let now = Utc::now();
        let client = Arc::new(FixedKeybase {
            profile: IdentityProfile {
                user_id: None,
                created_at: Some(now - Duration::days(400)),
                proofs: vec![ProofType::Twitter, ProofType::Dns],
                devices: vec![DeviceClass::Desktop],
            },
            signature_lookups: AtomicUsize::new(0),
        });
        let scorer = KeybaseScorer::new(client.clone());

        let score = scorer.score_user_at("noid", now).await;
        assert_eq!(score.get(Signal::TwitterProof), 10);
        assert_eq!(score.get(Signal::DnsWebsite), 10);
        assert_eq!(score.get(Signal::MobileDesktopDevice), 4);
        assert_eq!(score.get(Signal::KeybaseAge), 4);
        assert_eq!(score.get(Signal::KeybaseFollowers), 2);
        assert_eq!(score.get(Signal::AvgProofAge), 0);
        assert_eq!(client.signature_lookups.load(Ordering::SeqCst), 0);
    }
}
