use super::history::{HistoryLog, StatSnapshot};
use super::parse::parse_non_negative_int;
use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const INFINITE_RATIO_LABEL: &str = "∞";

/// Win percentage, 0 when no matches were played.
pub fn win_rate(matches: u64, wins: u64) -> f64 {
    if matches == 0 {
        0.0
    } else {
        (wins as f64 / matches as f64) * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WinLossRatio {
    Finite(f64),
    /// No losses recorded.
    Infinite,
}

impl fmt::Display for WinLossRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinLossRatio::Finite(ratio) => write!(f, "{:.2}", ratio),
            WinLossRatio::Infinite => f.write_str(INFINITE_RATIO_LABEL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    High,
    Even,
    Low,
}

impl RateTier {
    pub fn of(rate: f64) -> Self {
        if rate >= 60.0 {
            RateTier::High
        } else if rate >= 50.0 {
            RateTier::Even
        } else {
            RateTier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub wins: u64,
    pub matches: u64,
}

impl Preset {
    pub fn win_rate(&self) -> f64 {
        win_rate(self.matches, self.wins)
    }

    pub fn losses(&self) -> u64 {
        self.matches - self.wins
    }
}

pub const PRESETS: [Preset; 6] = [
    Preset { wins: 1, matches: 1 },
    Preset { wins: 5, matches: 10 },
    Preset { wins: 10, matches: 20 },
    Preset { wins: 25, matches: 50 },
    Preset { wins: 50, matches: 100 },
    Preset { wins: 100, matches: 200 },
];

/// Live counters plus the saved history. `total_wins <= total_matches` holds
/// after every public operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatState {
    total_matches: u64,
    total_wins: u64,
    history: HistoryLog,
}

/// On-disk shape of [`StatState`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatBlob {
    total_matches: u64,
    total_wins: u64,
    #[serde(default)]
    history: Vec<StatSnapshot>,
}

impl StatState {
    pub fn new(history_cap: usize) -> Self {
        StatState {
            total_matches: 0,
            total_wins: 0,
            history: HistoryLog::with_cap(history_cap),
        }
    }

    pub fn total_matches(&self) -> u64 {
        self.total_matches
    }

    pub fn total_wins(&self) -> u64 {
        self.total_wins
    }

    pub fn losses(&self) -> u64 {
        self.total_matches - self.total_wins
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn current_win_rate(&self) -> f64 {
        win_rate(self.total_matches, self.total_wins)
    }

    pub fn win_loss_ratio(&self) -> WinLossRatio {
        match self.losses() {
            0 => WinLossRatio::Infinite,
            losses => WinLossRatio::Finite(self.total_wins as f64 / losses as f64),
        }
    }

    pub fn tier(&self) -> RateTier {
        RateTier::of(self.current_win_rate())
    }

    pub fn adjust_matches(&mut self, delta: i64) {
        self.total_matches = apply_delta(self.total_matches, delta);
        self.clamp_wins_down();
    }

    pub fn adjust_wins(&mut self, delta: i64) {
        self.total_wins = apply_delta(self.total_wins, delta);
        self.raise_matches();
    }

    pub fn set_matches(&mut self, raw: &str) {
        self.total_matches = parse_non_negative_int(raw);
        self.clamp_wins_down();
    }

    pub fn set_wins(&mut self, raw: &str) {
        self.total_wins = parse_non_negative_int(raw);
        self.raise_matches();
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.total_wins = preset.wins;
        self.total_matches = preset.matches;
    }

    /// Appends a snapshot of the current counters. Returns `false` and leaves
    /// the log alone when there is nothing to save.
    pub fn save_snapshot(&mut self, date: NaiveDate) -> bool {
        if self.total_matches == 0 {
            return false;
        }
        self.history.append(StatSnapshot::record(
            date,
            self.total_matches,
            self.total_wins,
        ));
        true
    }

    pub fn reset(&mut self) {
        self.total_matches = 0;
        self.total_wins = 0;
        self.history.clear();
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        let blob = StatBlob {
            total_matches: self.total_matches,
            total_wins: self.total_wins,
            history: self.history.to_vec(),
        };
        serde_json::to_string_pretty(&blob)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize stats: {}", e)))
    }

    /// Parses a stored blob. Anything that breaks the counter invariants is
    /// rejected the same way as unparsable JSON.
    pub fn from_json(raw: &str, history_cap: usize) -> Result<Self, AppError> {
        let blob: StatBlob = serde_json::from_str(raw)
            .map_err(|e| AppError::JsonError(format!("Failed to parse stats: {}", e)))?;

        if blob.total_wins > blob.total_matches {
            return Err(AppError::JsonError(format!(
                "stored wins ({}) exceed matches ({})",
                blob.total_wins, blob.total_matches
            )));
        }
        if let Some(bad) = blob.history.iter().find(|s| !s.is_consistent()) {
            return Err(AppError::JsonError(format!(
                "inconsistent history entry dated {}",
                bad.date
            )));
        }

        Ok(StatState {
            total_matches: blob.total_matches,
            total_wins: blob.total_wins,
            history: HistoryLog::from_entries(blob.history, history_cap),
        })
    }

    fn clamp_wins_down(&mut self) {
        if self.total_matches < self.total_wins {
            self.total_wins = self.total_matches;
        }
    }

    fn raise_matches(&mut self) {
        if self.total_wins > self.total_matches {
            self.total_matches = self.total_wins;
        }
    }
}

fn apply_delta(current: u64, delta: i64) -> u64 {
    if delta >= 0 {
        current.saturating_add(delta as u64)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::history::DEFAULT_HISTORY_CAP;

    fn state(matches: &str, wins: &str) -> StatState {
        let mut s = StatState::default();
        s.set_matches(matches);
        s.set_wins(wins);
        s
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn win_from_zero_adds_a_match() {
        let mut s = StatState::default();
        s.adjust_wins(1);
        assert_eq!((s.total_matches(), s.total_wins()), (1, 1));
        assert_eq!(s.current_win_rate(), 100.0);
    }

    #[test]
    fn dropping_matches_clamps_wins() {
        let mut s = state("10", "4");
        s.adjust_matches(-7);
        assert_eq!((s.total_matches(), s.total_wins()), (3, 3));
        assert_eq!(s.current_win_rate(), 100.0);
    }

    #[test]
    fn counters_never_go_negative() {
        let mut s = state("2", "1");
        s.adjust_wins(-5);
        assert_eq!(s.total_wins(), 0);
        s.adjust_matches(i64::MIN);
        assert_eq!(s.total_matches(), 0);
    }

    #[test]
    fn huge_positive_delta_saturates() {
        let mut s = StatState::default();
        s.adjust_matches(i64::MAX);
        s.adjust_matches(i64::MAX);
        s.adjust_matches(i64::MAX);
        assert_eq!(s.total_matches(), u64::MAX);
    }

    #[test]
    fn direct_entry_is_forgiving() {
        let mut s = state("abc", "-3");
        assert_eq!((s.total_matches(), s.total_wins()), (0, 0));
        s.set_wins("8");
        assert_eq!((s.total_matches(), s.total_wins()), (8, 8));
        s.set_matches("5");
        assert_eq!((s.total_matches(), s.total_wins()), (5, 5));
    }

    #[test]
    fn preset_overwrites_counters() {
        let mut s = state("300", "7");
        s.apply_preset(PRESETS[3]);
        assert_eq!((s.total_matches(), s.total_wins()), (50, 25));
        assert_eq!(s.current_win_rate(), 50.0);
    }

    #[test]
    fn every_preset_is_consistent() {
        for preset in PRESETS {
            assert!(preset.wins <= preset.matches);
        }
        assert_eq!(PRESETS[0].win_rate(), 100.0);
        assert_eq!(PRESETS[5].losses(), 100);
    }

    #[test]
    fn ratio_uses_sentinel_without_losses() {
        assert_eq!(StatState::default().win_loss_ratio(), WinLossRatio::Infinite);
        assert_eq!(state("4", "4").win_loss_ratio().to_string(), "∞");
        assert_eq!(state("10", "6").win_loss_ratio(), WinLossRatio::Finite(1.5));
        assert_eq!(state("3", "1").win_loss_ratio().to_string(), "0.50");
    }

    #[test]
    fn tiers() {
        assert_eq!(RateTier::of(60.0), RateTier::High);
        assert_eq!(RateTier::of(59.99), RateTier::Even);
        assert_eq!(RateTier::of(50.0), RateTier::Even);
        assert_eq!(RateTier::of(49.9), RateTier::Low);
    }

    #[test]
    fn saving_empty_state_is_ignored() {
        let mut s = StatState::default();
        assert!(!s.save_snapshot(today()));
        assert!(s.history().is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = state("10", "5");
        assert!(s.save_snapshot(today()));
        s.reset();
        s.reset();
        assert_eq!(s.current_win_rate(), 0.0);
        assert!(s.history().is_empty());
        assert_eq!(s, StatState::default());
    }

    #[test]
    fn json_round_trip() {
        let mut s = state("7", "3");
        s.save_snapshot(today());
        s.adjust_wins(2);
        s.save_snapshot(today());

        let json = s.to_json().unwrap();
        let back = StatState::from_json(&json, DEFAULT_HISTORY_CAP).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn json_uses_stored_field_names() {
        let json = state("2", "1").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalMatches"], 2);
        assert_eq!(value["totalWins"], 1);
        assert!(value["history"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_history_defaults_to_empty() {
        let s = StatState::from_json(r#"{"totalMatches": 4, "totalWins": 2}"#, 10).unwrap();
        assert_eq!(s.total_matches(), 4);
        assert!(s.history().is_empty());
    }

    #[test]
    fn rejects_bad_shapes() {
        for raw in [
            "",
            "not json",
            "[]",
            r#"{"totalMatches": -1, "totalWins": 0}"#,
            r#"{"totalMatches": "3", "totalWins": 0}"#,
            r#"{"totalMatches": 2, "totalWins": 5}"#,
            r#"{"totalMatches": 2, "totalWins": 1, "history": [{"date": "x", "winrate": 10, "matches": 1, "wins": 3}]}"#,
        ] {
            assert!(StatState::from_json(raw, 10).is_err(), "accepted {:?}", raw);
        }
    }
}
