use crate::error::AppError;
use crate::stats::{Preset, StatState, PRESETS};
use crate::storage::{Store, STATS_KEY};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Live stats bound to the store they persist into. Every mutation writes the
/// whole state back before returning.
pub struct Session<S: Store> {
    state: StatState,
    store: S,
}

impl<S: Store> Session<S> {
    /// Loads the stored blob, falling back to an empty state when it is
    /// missing or unusable.
    pub fn load(store: S, history_cap: usize) -> Self {
        let state = match store.get(STATS_KEY) {
            Some(raw) => match StatState::from_json(&raw, history_cap) {
                Ok(state) => {
                    debug!(
                        "Loaded {} matches, {} wins, {} snapshots",
                        state.total_matches(),
                        state.total_wins(),
                        state.history().len()
                    );
                    state
                }
                Err(e) => {
                    warn!("Ignoring stored stats: {}", e);
                    StatState::new(history_cap)
                }
            },
            None => StatState::new(history_cap),
        };

        Session { state, store }
    }

    pub fn state(&self) -> &StatState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn adjust_matches(&mut self, delta: i64) {
        self.state.adjust_matches(delta);
        self.persist();
    }

    pub fn adjust_wins(&mut self, delta: i64) {
        self.state.adjust_wins(delta);
        self.persist();
    }

    pub fn set_matches(&mut self, raw: &str) {
        self.state.set_matches(raw);
        self.persist();
    }

    pub fn set_wins(&mut self, raw: &str) {
        self.state.set_wins(raw);
        self.persist();
    }

    /// Applies the 1-based preset `number`.
    pub fn apply_preset(&mut self, number: usize) -> Result<Preset, AppError> {
        let preset = number
            .checked_sub(1)
            .and_then(|idx| PRESETS.get(idx))
            .copied()
            .ok_or(AppError::InvalidPreset(number))?;

        self.state.apply_preset(preset);
        self.persist();
        Ok(preset)
    }

    /// Returns `false` when there were no matches to snapshot.
    pub fn save_snapshot(&mut self, date: NaiveDate) -> bool {
        if !self.state.save_snapshot(date) {
            debug!("Nothing to save: no matches recorded");
            return false;
        }
        self.persist();
        true
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.persist();
    }

    // A failed write leaves the in-memory state as is; nothing retries it.
    fn persist(&mut self) {
        let json = match self.state.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(STATS_KEY, json) {
            warn!("Stats not saved: {}", e);
        } else {
            debug!(
                "Saved {}/{} ({} snapshots)",
                self.state.total_wins(),
                self.state.total_matches(),
                self.state.history().len()
            );
        }
    }
}
