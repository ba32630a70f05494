// crates/kbid-core/src/tier.rs
//
// Identity-confidence tiers derived from an aggregate score total.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bounds of each tier above `Unknown`.
pub mod thresholds {
    /// Weak identity: some presence, little corroboration.
    pub const WEAK_MIN_SCORE: u32 = 26;
    /// Passable identity. Also the default minimum score for authentication.
    pub const PASSABLE_MIN_SCORE: u32 = 51;
    /// Accurate identity.
    pub const ACCURATE_MIN_SCORE: u32 = 75;
    /// Positive identity.
    pub const POSITIVE_MIN_SCORE: u32 = 90;
}

pub use thresholds::*;

/// Qualitative confidence bucket for an identity's total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdentityTier {
    Unknown,
    Weak,
    Passable,
    Accurate,
    Positive,
}

impl IdentityTier {
    /// Classify a total. Pure function of `total`.
    pub fn from_total(total: u32) -> Self {
        if total < WEAK_MIN_SCORE {
            IdentityTier::Unknown
        } else if total < PASSABLE_MIN_SCORE {
            IdentityTier::Weak
        } else if total < ACCURATE_MIN_SCORE {
            IdentityTier::Passable
        } else if total < POSITIVE_MIN_SCORE {
            IdentityTier::Accurate
        } else {
            IdentityTier::Positive
        }
    }

    /// Smallest total that classifies into this tier.
    pub fn min_score(self) -> u32 {
        match self {
            IdentityTier::Unknown => 0,
            IdentityTier::Weak => WEAK_MIN_SCORE,
            IdentityTier::Passable => PASSABLE_MIN_SCORE,
            IdentityTier::Accurate => ACCURATE_MIN_SCORE,
            IdentityTier::Positive => POSITIVE_MIN_SCORE,
        }
    }
}

impl fmt::Display for IdentityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentityTier::Unknown => "Unknown",
            IdentityTier::Weak => "Weak",
            IdentityTier::Passable => "Passable",
            IdentityTier::Accurate => "Accurate",
            IdentityTier::Positive => "Positive",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            (0, IdentityTier::Unknown),
            (25, IdentityTier::Unknown),
            (26, IdentityTier::Weak),
            (50, IdentityTier::Weak),
            (51, IdentityTier::Passable),
            (74, IdentityTier::Passable),
            (75, IdentityTier::Accurate),
            (89, IdentityTier::Accurate),
            (90, IdentityTier::Positive),
            (200, IdentityTier::Positive),
        ];
        for (total, expected) in cases {
            assert_eq!(IdentityTier::from_total(total), expected, "total={}", total);
        }
    }

    #[test]
    fn test_min_score_round_trips_through_classification() {
        for tier in [
            IdentityTier::Unknown,
            IdentityTier::Weak,
            IdentityTier::Passable,
            IdentityTier::Accurate,
            IdentityTier::Positive,
        ] {
            assert_eq!(IdentityTier::from_total(tier.min_score()), tier);
        }
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(IdentityTier::Unknown < IdentityTier::Weak);
        assert!(IdentityTier::Accurate < IdentityTier::Positive);
    }
}
