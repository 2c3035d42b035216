use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAP: usize = 10;
/// Largest cap accepted from configuration.
pub const MAX_HISTORY_CAP: usize = 1000;

/// One saved point in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub date: String,
    #[serde(rename = "winrate")]
    pub win_rate: f64,
    pub matches: u64,
    pub wins: u64,
}

impl StatSnapshot {
    /// Records the counters as of `date`, with the rate rounded to 2 decimals.
    pub fn record(date: NaiveDate, matches: u64, wins: u64) -> Self {
        StatSnapshot {
            date: date_label(date),
            win_rate: round2(super::state::win_rate(matches, wins)),
            matches,
            wins,
        }
    }

    pub fn losses(&self) -> u64 {
        self.matches.saturating_sub(self.wins)
    }

    pub fn is_consistent(&self) -> bool {
        self.wins <= self.matches && (0.0..=100.0).contains(&self.win_rate)
    }
}

/// `M/D/YYYY`, no zero padding.
pub fn date_label(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Snapshots in insertion order, keeping only the newest `cap`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    entries: VecDeque<StatSnapshot>,
    cap: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        HistoryLog::with_cap(DEFAULT_HISTORY_CAP)
    }
}

impl HistoryLog {
    pub fn with_cap(cap: usize) -> Self {
        HistoryLog {
            entries: VecDeque::with_capacity(cap.min(DEFAULT_HISTORY_CAP) + 1),
            cap,
        }
    }

    /// Rebuilds a log from stored entries, dropping the oldest ones past `cap`.
    pub fn from_entries(entries: Vec<StatSnapshot>, cap: usize) -> Self {
        let mut log = HistoryLog::with_cap(cap);
        for entry in entries {
            log.append(entry);
        }
        log
    }

    pub fn append(&mut self, snapshot: StatSnapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&StatSnapshot> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatSnapshot> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<StatSnapshot> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn snapshot_rounds_rate() {
        let snap = StatSnapshot::record(day(1), 3, 2);
        assert_eq!(snap.win_rate, 66.67);
        assert_eq!(snap.date, "3/1/2024");
        assert_eq!(snap.losses(), 1);
    }

    #[test]
    fn eleventh_append_evicts_first() {
        let mut log = HistoryLog::default();
        for i in 1..=11u64 {
            log.append(StatSnapshot::record(day(i as u32), i, i));
        }

        assert_eq!(log.len(), 10);
        let kept: Vec<u64> = log.iter().map(|s| s.matches).collect();
        assert_eq!(kept, (2..=11).collect::<Vec<_>>());
        assert_eq!(log.latest().map(|s| s.matches), Some(11));
    }

    #[test]
    fn from_entries_keeps_newest() {
        let entries: Vec<_> = (1..=5u64)
            .map(|i| StatSnapshot::record(day(i as u32), i, 0))
            .collect();
        let log = HistoryLog::from_entries(entries, 3);
        let kept: Vec<u64> = log.iter().map(|s| s.matches).collect();
        assert_eq!(kept, vec![3, 4, 5]);
    }

    #[test]
    fn huge_cap_does_not_preallocate() {
        let mut log = HistoryLog::with_cap(usize::MAX);
        log.append(StatSnapshot::record(day(4), 2, 1));
        assert_eq!(log.len(), 1);
        assert_eq!(log.cap(), usize::MAX);
    }

    #[test]
    fn clear_empties() {
        let mut log = HistoryLog::default();
        log.append(StatSnapshot::record(day(2), 4, 1));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.cap(), 10);
    }

    #[test]
    fn serializes_with_winrate_key() {
        let snap = StatSnapshot::record(day(9), 4, 1);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["winrate"], 25.0);
        assert_eq!(json["date"], "3/9/2024");
    }
}
