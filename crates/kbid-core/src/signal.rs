// crates/kbid-core/src/signal.rs
//
// Named scoring signals and the platform each one belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// External platform contributing signals to an identity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Keybase, the decentralized identity network.
    Keybase,
    /// GitHub, the code host.
    Github,
    /// Twitter, the social network. Only scored when API credentials are supplied.
    Twitter,
}

impl Platform {
    /// Every signal this platform contributes, in a stable order.
    pub fn signals(self) -> &'static [Signal] {
        match self {
            Platform::Keybase => &[
                Signal::GenericWebsite,
                Signal::DnsWebsite,
                Signal::TwitterProof,
                Signal::GithubProof,
                Signal::RedditProof,
                Signal::HackernewsProof,
                Signal::MobileDesktopDevice,
                Signal::KeybaseFollowers,
                Signal::KeybaseAge,
                Signal::AvgProofAge,
            ],
            Platform::Github => &[Signal::GithubFollowers, Signal::GithubAge],
            Platform::Twitter => &[Signal::TwitterFollowers, Signal::TwitterAge],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Keybase => "keybase",
            Platform::Github => "github",
            Platform::Twitter => "twitter",
        };
        f.write_str(name)
    }
}

/// A single named scoring signal.
///
/// Serialized names match the public score-detail format (`keybaseAge`,
/// `githubFollowers`, ...), so a serialized `ScoreRecord` reads as a flat
/// object of signal name to points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Signal {
    /// Verified generic website proofs, +5 each, capped at 10.
    #[serde(rename = "genericWebsite")]
    GenericWebsite,
    /// Verified DNS proofs, +10 each, capped at 20.
    #[serde(rename = "dnsWebsite")]
    DnsWebsite,
    /// A Twitter account proven on Keybase.
    #[serde(rename = "twitter")]
    TwitterProof,
    /// A GitHub account proven on Keybase.
    #[serde(rename = "github")]
    GithubProof,
    /// A Reddit account proven on Keybase.
    #[serde(rename = "reddit")]
    RedditProof,
    /// A Hacker News account proven on Keybase.
    #[serde(rename = "hackernews")]
    HackernewsProof,
    /// Registered desktop or mobile devices, +4 each, capped at 12.
    #[serde(rename = "mobileDesktopDevice")]
    MobileDesktopDevice,
    #[serde(rename = "keybaseFollowers")]
    KeybaseFollowers,
    #[serde(rename = "keybaseAge")]
    KeybaseAge,
    /// Mean age of the identity's signatures.
    #[serde(rename = "avgProofAge")]
    AvgProofAge,
    #[serde(rename = "githubFollowers")]
    GithubFollowers,
    #[serde(rename = "githubAge")]
    GithubAge,
    #[serde(rename = "twitterFollowers")]
    TwitterFollowers,
    #[serde(rename = "twitterAge")]
    TwitterAge,
}

impl Signal {
    /// The platform this signal is sourced from.
    pub fn platform(self) -> Platform {
        match self {
            Signal::GithubFollowers | Signal::GithubAge => Platform::Github,
            Signal::TwitterFollowers | Signal::TwitterAge => Platform::Twitter,
            _ => Platform::Keybase,
        }
    }

    /// The serialized key for this signal.
    pub fn key(self) -> &'static str {
        match self {
            Signal::GenericWebsite => "genericWebsite",
            Signal::DnsWebsite => "dnsWebsite",
            Signal::TwitterProof => "twitter",
            Signal::GithubProof => "github",
            Signal::RedditProof => "reddit",
            Signal::HackernewsProof => "hackernews",
            Signal::MobileDesktopDevice => "mobileDesktopDevice",
            Signal::KeybaseFollowers => "keybaseFollowers",
            Signal::KeybaseAge => "keybaseAge",
            Signal::AvgProofAge => "avgProofAge",
            Signal::GithubFollowers => "githubFollowers",
            Signal::GithubAge => "githubAge",
            Signal::TwitterFollowers => "twitterFollowers",
            Signal::TwitterAge => "twitterAge",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_signal_maps_back_to_its_platform() {
        for platform in [Platform::Keybase, Platform::Github, Platform::Twitter] {
            for signal in platform.signals() {
                assert_eq!(signal.platform(), platform, "{} misattributed", signal);
            }
        }
    }

    #[test]
    fn test_signal_keys_match_serde_names() {
        for signal in Platform::Keybase
            .signals()
            .iter()
            .chain(Platform::Github.signals())
            .chain(Platform::Twitter.signals())
        {
            let json = serde_json::to_string(signal).unwrap();
            assert_eq!(json, format!("\"{}\"", signal.key()));
        }
    }
}
