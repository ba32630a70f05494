// crates/kbid-cli/src/output.rs
//
// Output formatting for the kbid CLI: tables and JSON.

use serde::Serialize;
use tabled::{Table, Tabled};

use kbid_core::ScoreRecord;

/// One row of a score breakdown.
#[derive(Debug, Tabled)]
pub struct SignalRow {
    #[tabled(rename = "Platform")]
    pub platform: String,
    #[tabled(rename = "Signal")]
    pub signal: &'static str,
    #[tabled(rename = "Points")]
    pub points: u32,
}

/// Rows for every signal in `record`, in signal order.
pub fn signal_rows(record: &ScoreRecord) -> Vec<SignalRow> {
    record
        .iter()
        .map(|(signal, points)| SignalRow {
            platform: signal.platform().to_string(),
            signal: signal.key(),
            points,
        })
        .collect()
}

pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbid_core::Signal;

    #[test]
    fn test_rows_follow_record() {
        let mut record = ScoreRecord::new();
        record.set(Signal::GithubAge, 5);
        record.set(Signal::KeybaseFollowers, 2);
        let rows = signal_rows(&record);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.signal == "githubAge" && r.points == 5 && r.platform == "github"));

        let table = format_table(&rows);
        assert!(table.contains("Points"));
        assert!(table.contains("keybaseFollowers"));
    }

    #[test]
    fn test_json_uses_wire_keys() {
        let mut record = ScoreRecord::new();
        record.set(Signal::DnsWebsite, 20);
        let json = format_json(&record);
        assert!(json.contains("\"dnsWebsite\": 20"));
    }
}
