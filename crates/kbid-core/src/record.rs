// crates/kbid-core/src/record.rs
//
// ScoreRecord: a fixed-shape mapping from signal to integer points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::signal::{Platform, Signal};

/// Points contributed by one or more platforms, keyed by signal.
///
/// A record built with [`ScoreRecord::zeroed`] carries every key of its
/// platform, so unknown or unavailable signals are present as `0` and the
/// total is always a plain sum. Records from different platforms have
/// disjoint keys and are combined with [`ScoreRecord::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreRecord {
    points: BTreeMap<Signal, u32>,
}

impl ScoreRecord {
    /// An empty record with no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record holding every signal of `platform` at zero points.
    pub fn zeroed(platform: Platform) -> Self {
        let points = platform.signals().iter().map(|&s| (s, 0)).collect();
        Self { points }
    }

    /// Points for `signal`, or 0 if the key is absent.
    pub fn get(&self, signal: Signal) -> u32 {
        self.points.get(&signal).copied().unwrap_or(0)
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.points.contains_key(&signal)
    }

    /// Overwrite the points for `signal`.
    pub fn set(&mut self, signal: Signal, points: u32) {
        self.points.insert(signal, points);
    }

    /// Add `points` onto `signal`, inserting the key if needed.
    pub fn add(&mut self, signal: Signal, points: u32) {
        let entry = self.points.entry(signal).or_insert(0);
        *entry = entry.saturating_add(points);
    }

    /// Add `increment` onto `signal` without letting its running value exceed `cap`.
    pub fn add_capped(&mut self, signal: Signal, increment: u32, cap: u32) {
        let entry = self.points.entry(signal).or_insert(0);
        *entry = entry.saturating_add(increment).min(cap);
    }

    /// Disjoint-key union: move every key of `other` into `self`.
    ///
    /// Keys are partitioned by platform, so merging records of different
    /// platforms never overwrites an existing value.
    pub fn merge(&mut self, other: ScoreRecord) {
        for (signal, points) in other.points {
            debug_assert!(
                !self.points.contains_key(&signal),
                "merge collision on {}",
                signal
            );
            self.points.insert(signal, points);
        }
    }

    /// Consume two records and return their union.
    pub fn merged(mut self, other: ScoreRecord) -> Self {
        self.merge(other);
        self
    }

    /// Sum of all points in the record.
    pub fn total(&self) -> u32 {
        self.points.values().fold(0u32, |acc, &p| acc.saturating_add(p))
    }

    /// Iterate over `(signal, points)` pairs in signal order.
    pub fn iter(&self) -> impl Iterator<Item = (Signal, u32)> + '_ {
        self.points.iter().map(|(&s, &p)| (s, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_record_has_every_platform_key() {
        let record = ScoreRecord::zeroed(Platform::Keybase);
        assert_eq!(record.iter().count(), Platform::Keybase.signals().len());
        assert!(record.iter().all(|(_, p)| p == 0));
        assert_eq!(record.total(), 0);
    }

    #[test]
    fn test_add_capped_never_exceeds_cap() {
        let mut record = ScoreRecord::zeroed(Platform::Keybase);
        record.add_capped(Signal::DnsWebsite, 10, 20);
        assert_eq!(record.get(Signal::DnsWebsite), 10);
        record.add_capped(Signal::DnsWebsite, 10, 20);
        record.add_capped(Signal::DnsWebsite, 10, 20);
        assert_eq!(record.get(Signal::DnsWebsite), 20);
    }

    #[test]
    fn test_merge_is_disjoint_union() {
        let mut keybase = ScoreRecord::zeroed(Platform::Keybase);
        keybase.set(Signal::KeybaseAge, 4);
        let mut github = ScoreRecord::zeroed(Platform::Github);
        github.set(Signal::GithubFollowers, 3);

        let merged = keybase.merged(github);
        assert_eq!(
            merged.iter().count(),
            Platform::Keybase.signals().len() + Platform::Github.signals().len()
        );
        assert_eq!(merged.total(), 7);
        assert!(!merged.contains(Signal::TwitterAge));
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut record = ScoreRecord::zeroed(Platform::Github);
        record.set(Signal::GithubAge, 5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["githubAge"], 5);
        assert_eq!(json["githubFollowers"], 0);

        let back: ScoreRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
