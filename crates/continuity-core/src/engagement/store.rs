//! The engagement store: owner of the completion log.
//!
//! The store is the only write surface for engagement data. Consumers hold a
//! reference, read [`Derived`] state and call the mutation methods; every
//! mutation re-derives, persists, and syncs the local peer entry before
//! returning. Derived state is cached and only recomputed by a mutation, by
//! the initial load, or by [`EngagementStore::refresh`] after the day rolls
//! over.
//!
//! ## Load policy
//!
//! Loading never fails. What was stored decides what the session starts
//! with:
//!
//! | stored value                     | log      |
//! |----------------------------------|----------|
//! | nothing                          | seed     |
//! | unreadable (storage error)       | seed     |
//! | not JSON                         | seed     |
//! | JSON, not an array               | empty    |
//! | array with a malformed element   | seed     |
//! | array of records                 | restored |

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::record::{CompletionRecord, EngagementLog};
use super::seed::seed_log;
use super::streak::StreakState;
use super::week::WeekView;
use crate::clock::Clock;
use crate::events::{Event, Snapshot};
use crate::motivation::{motivation_for, MotivationMessage};
use crate::peers::{LeaderboardRow, PeerEntry, Roster};
use crate::storage::{Config, LogStorage};

/// How the initial load settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum LoadOutcome {
    Restored { records: usize },
    Missing,
    Unreadable,
    MalformedJson,
    MalformedRecords,
    NotAnArray,
}

impl LoadOutcome {
    /// Whether the session fell back to the seed dataset.
    pub fn used_seed(&self) -> bool {
        matches!(
            self,
            LoadOutcome::Missing
                | LoadOutcome::Unreadable
                | LoadOutcome::MalformedJson
                | LoadOutcome::MalformedRecords
        )
    }
}

/// Everything computed from one log snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derived {
    pub today: NaiveDate,
    pub streaks: StreakState,
    pub week: WeekView,
}

impl Derived {
    pub fn compute(log: &EngagementLog, today: NaiveDate) -> Self {
        Self {
            today,
            streaks: StreakState::compute(log, today),
            week: WeekView::compute(log, today),
        }
    }

    pub fn current_streak(&self) -> u32 {
        self.streaks.current
    }

    pub fn peak_streak(&self) -> u32 {
        self.streaks.peak
    }
}

pub struct EngagementStore<S = Box<dyn LogStorage>> {
    storage: S,
    clock: Box<dyn Clock>,
    key: String,
    log: EngagementLog,
    roster: Roster,
    derived: Option<Derived>,
    previous_streak: u32,
    last_toggled: Option<NaiveDate>,
    load_outcome: Option<LoadOutcome>,
}

impl<S: LogStorage> EngagementStore<S> {
    /// Create a store that has not loaded yet.
    ///
    /// Until [`load`](Self::load) runs the store reports
    /// [`is_loading`](Self::is_loading) and withholds derived state.
    pub fn new(storage: S, clock: impl Clock + 'static, config: &Config) -> Self {
        Self {
            storage,
            clock: Box::new(clock),
            key: config.storage.key.clone(),
            log: EngagementLog::new(),
            roster: Roster::default_roster(config.peers.local_user_id),
            derived: None,
            previous_streak: 0,
            last_toggled: None,
            load_outcome: None,
        }
    }

    /// Create and load in one step.
    pub fn open(storage: S, clock: impl Clock + 'static, config: &Config) -> Self {
        let mut store = Self::new(storage, clock, config);
        store.load();
        store
    }

    pub fn is_loading(&self) -> bool {
        self.derived.is_none()
    }

    /// Load the log from storage and derive once.
    ///
    /// Settles at most once; later calls return the first outcome without
    /// touching storage.
    pub fn load(&mut self) -> LoadOutcome {
        if let Some(outcome) = self.load_outcome {
            return outcome;
        }
        let (log, outcome) = read_log(&self.storage, &self.key);
        info!(key = %self.key, records = log.len(), ?outcome, "engagement log loaded");
        self.log = log;
        self.load_outcome = Some(outcome);
        self.rederive();
        outcome
    }

    pub fn load_outcome(&self) -> Option<LoadOutcome> {
        self.load_outcome
    }

    /// Flip the record for `date`, or record it as completed.
    ///
    /// Any date is accepted.
    pub fn toggle_day(&mut self, date: NaiveDate) -> Event {
        self.ensure_loaded();
        let previous = self.current_streak();
        self.previous_streak = previous;
        let completed = self.log.toggle(date);
        self.last_toggled = Some(date);
        self.commit();

        let current = self.current_streak();
        info!(%date, completed, previous, current, "day toggled");
        Event::DayToggled {
            date,
            completed,
            previous_streak: previous,
            current_streak: current,
            at: Utc::now(),
        }
    }

    /// Replace the whole log with the seed dataset.
    ///
    /// Irreversible; confirmation is the caller's responsibility.
    pub fn reset_all(&mut self) -> Event {
        self.ensure_loaded();
        self.log = seed_log();
        self.commit();

        let current = self.current_streak();
        info!(records = self.log.len(), current, "engagement log reset to seed");
        Event::LogReset {
            records: self.log.len(),
            current_streak: current,
            at: Utc::now(),
        }
    }

    /// Dump the log and streaks to the diagnostic sink.
    pub fn log_snapshot(&self) -> Snapshot {
        let snapshot = Snapshot {
            records: self.log.to_records(),
            current_streak: self.current_streak(),
            peak_streak: self.peak_streak(),
            taken_at: Utc::now(),
        };
        match serde_json::to_string(&snapshot) {
            Ok(json) => info!(target: "continuity::snapshot", snapshot = %json, "engagement snapshot"),
            Err(e) => warn!(target: "continuity::snapshot", error = %e, "snapshot not serializable"),
        }
        snapshot
    }

    /// Re-derive if the calendar day changed since the last derivation.
    ///
    /// Returns whether anything was recomputed.
    pub fn refresh(&mut self) -> bool {
        let today = self.clock.today();
        match &self.derived {
            Some(derived) if derived.today == today => false,
            Some(_) => {
                debug!(%today, "day rolled over");
                self.rederive();
                true
            }
            None => false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Derived state, `None` while loading.
    pub fn derived(&self) -> Option<&Derived> {
        self.derived.as_ref()
    }

    pub fn current_streak(&self) -> u32 {
        self.derived.as_ref().map_or(0, Derived::current_streak)
    }

    pub fn peak_streak(&self) -> u32 {
        self.derived.as_ref().map_or(0, Derived::peak_streak)
    }

    pub fn week(&self) -> Option<&WeekView> {
        self.derived.as_ref().map(|d| &d.week)
    }

    /// Streak captured immediately before the most recent toggle.
    pub fn previous_streak(&self) -> u32 {
        self.previous_streak
    }

    pub fn last_toggled(&self) -> Option<NaiveDate> {
        self.last_toggled
    }

    pub fn motivation(&self) -> MotivationMessage {
        motivation_for(self.current_streak())
    }

    /// Peers by descending streak.
    pub fn peers(&self) -> Vec<PeerEntry> {
        self.roster.sorted()
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        self.roster.leaderboard()
    }

    pub fn log(&self) -> &EngagementLog {
        &self.log
    }

    pub fn records(&self) -> Vec<CompletionRecord> {
        self.log.to_records()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    // ── Internals ────────────────────────────────────────────────────

    fn ensure_loaded(&mut self) {
        if self.is_loading() {
            self.load();
        }
    }

    fn commit(&mut self) {
        self.rederive();
        self.persist();
    }

    fn rederive(&mut self) {
        let derived = Derived::compute(&self.log, self.clock.today());
        debug!(
            today = %derived.today,
            current = derived.streaks.current,
            peak = derived.streaks.peak,
            "derived state recomputed"
        );
        self.roster.sync_local(derived.streaks.current);
        self.derived = Some(derived);
    }

    fn persist(&mut self) {
        let json = match self.log.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize engagement log");
                return;
            }
        };
        if let Err(e) = self.storage.save(&self.key, &json) {
            warn!(key = %self.key, error = %e, "failed to persist engagement log");
        }
    }
}

fn read_log<S: LogStorage>(storage: &S, key: &str) -> (EngagementLog, LoadOutcome) {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (seed_log(), LoadOutcome::Missing),
        Err(e) => {
            warn!(key, error = %e, "failed to read engagement log, using seed data");
            return (seed_log(), LoadOutcome::Unreadable);
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "stored engagement log is not JSON, using seed data");
            return (seed_log(), LoadOutcome::MalformedJson);
        }
    };

    if !value.is_array() {
        warn!(key, payload = %value, "stored engagement log is not an array, starting empty");
        return (EngagementLog::new(), LoadOutcome::NotAnArray);
    }

    match serde_json::from_value::<Vec<CompletionRecord>>(value) {
        Ok(records) => {
            let outcome = LoadOutcome::Restored {
                records: records.len(),
            };
            (EngagementLog::from_records(records), outcome)
        }
        Err(e) => {
            warn!(key, error = %e, "stored engagement log has malformed records, using seed data");
            (seed_log(), LoadOutcome::MalformedRecords)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::engagement::record::parse_date;
    use crate::storage::{MemoryStorage, DEFAULT_STORAGE_KEY};
    use std::rc::Rc;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn store_with(storage: MemoryStorage, today: &str) -> EngagementStore<MemoryStorage> {
        EngagementStore::open(storage, FixedClock::new(d(today)), &Config::default())
    }

    #[test]
    fn loading_until_load_settles() {
        let mut store = EngagementStore::new(
            MemoryStorage::new(),
            FixedClock::new(d("2025-08-08")),
            &Config::default(),
        );
        assert!(store.is_loading());
        assert!(store.derived().is_none());
        assert_eq!(store.load(), LoadOutcome::Missing);
        assert!(!store.is_loading());
        assert_eq!(store.current_streak(), 1);
    }

    #[test]
    fn missing_key_uses_seed() {
        let store = store_with(MemoryStorage::new(), "2025-08-06");
        assert_eq!(store.log().len(), 8);
        assert_eq!(store.current_streak(), 3);
        assert_eq!(store.peak_streak(), 3);
    }

    #[test]
    fn malformed_json_uses_seed() {
        let store = store_with(
            MemoryStorage::with_value(DEFAULT_STORAGE_KEY, "{not json"),
            "2025-08-06",
        );
        assert_eq!(store.load_outcome(), Some(LoadOutcome::MalformedJson));
        assert_eq!(store.log().len(), 8);
    }

    #[test]
    fn non_array_payload_starts_empty() {
        let store = store_with(
            MemoryStorage::with_value(DEFAULT_STORAGE_KEY, r#"{"date":"2025-08-01"}"#),
            "2025-08-06",
        );
        assert_eq!(store.load_outcome(), Some(LoadOutcome::NotAnArray));
        assert!(store.log().is_empty());
        assert_eq!(store.current_streak(), 0);
        assert_eq!(store.peak_streak(), 0);
    }

    #[test]
    fn malformed_records_use_seed() {
        let store = store_with(
            MemoryStorage::with_value(DEFAULT_STORAGE_KEY, r#"[{"date":"yesterday"}]"#),
            "2025-08-06",
        );
        assert_eq!(store.load_outcome(), Some(LoadOutcome::MalformedRecords));
        assert_eq!(store.log().len(), 8);
    }

    #[test]
    fn unreadable_storage_uses_seed() {
        let store = store_with(MemoryStorage::new().failing_reads(), "2025-08-06");
        assert_eq!(store.load_outcome(), Some(LoadOutcome::Unreadable));
        assert!(store.load_outcome().unwrap().used_seed());
        assert_eq!(store.log().len(), 8);
    }

    #[test]
    fn load_settles_once() {
        let mut store = store_with(MemoryStorage::new(), "2025-08-06");
        store.toggle_day(d("2025-08-07"));
        assert_eq!(store.load(), LoadOutcome::Missing);
        assert_eq!(store.log().get(d("2025-08-07")), Some(true));
    }

    #[test]
    fn toggle_snapshots_previous_streak() {
        let mut store = store_with(MemoryStorage::new(), "2025-08-09");
        assert_eq!(store.current_streak(), 0);
        let event = store.toggle_day(d("2025-08-09"));
        assert_eq!(store.previous_streak(), 0);
        assert_eq!(store.current_streak(), 2);
        assert_eq!(store.last_toggled(), Some(d("2025-08-09")));
        match event {
            Event::DayToggled {
                completed,
                previous_streak,
                current_streak,
                ..
            } => {
                assert!(completed);
                assert_eq!(previous_streak, 0);
                assert_eq!(current_streak, 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn toggle_twice_restores_log() {
        let mut store = store_with(MemoryStorage::new(), "2025-08-06");
        let before = store.log().clone();
        store.toggle_day(d("2025-08-03"));
        store.toggle_day(d("2025-08-03"));
        assert_eq!(store.log(), &before);
    }

    #[test]
    fn toggling_a_past_gap_extends_streak() {
        let mut store = store_with(MemoryStorage::new(), "2025-08-06");
        store.toggle_day(d("2025-08-03"));
        assert_eq!(store.current_streak(), 6);
        assert_eq!(store.peak_streak(), 6);
    }

    #[test]
    fn toggle_persists_and_syncs_peer() {
        let mut store = store_with(MemoryStorage::new(), "2025-08-09");
        store.toggle_day(d("2025-08-09"));
        let saved = store.storage().get(DEFAULT_STORAGE_KEY).unwrap();
        assert!(saved.contains(r#"{"date":"2025-08-09","completed":true}"#));
        let me = store.peers().into_iter().find(|p| p.id == 101).unwrap();
        assert_eq!(me.continuity_count, 2);
    }

    #[test]
    fn save_failure_is_swallowed() {
        let mut store = store_with(MemoryStorage::new().failing_writes(), "2025-08-09");
        store.toggle_day(d("2025-08-09"));
        assert_eq!(store.current_streak(), 2);
    }

    #[test]
    fn reset_restores_seed() {
        let mut store = store_with(
            MemoryStorage::with_value(DEFAULT_STORAGE_KEY, "[]"),
            "2025-08-20",
        );
        assert!(store.log().is_empty());
        store.reset_all();
        assert_eq!(store.log().len(), 8);
        assert_eq!(store.current_streak(), 0);
        assert_eq!(store.peak_streak(), 3);
        assert!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap().len() > 2);
    }

    #[test]
    fn snapshot_does_not_mutate() {
        let store = store_with(MemoryStorage::new(), "2025-08-06");
        let snapshot = store.log_snapshot();
        assert_eq!(snapshot.records.len(), 8);
        assert_eq!(snapshot.current_streak, 3);
        assert_eq!(snapshot.peak_streak, 3);
        assert!(store.storage().get(DEFAULT_STORAGE_KEY).is_none());
    }

    #[test]
    fn refresh_recomputes_on_new_day() {
        let clock = Rc::new(FixedClock::new(d("2025-08-06")));
        let mut store =
            EngagementStore::open(MemoryStorage::new(), Rc::clone(&clock), &Config::default());
        assert!(!store.refresh());
        clock.set(d("2025-08-07"));
        assert!(store.refresh());
        assert_eq!(store.current_streak(), 0);
        assert_eq!(store.derived().unwrap().today, d("2025-08-07"));
    }

    #[test]
    fn week_is_withheld_while_loading() {
        let store = EngagementStore::new(
            MemoryStorage::new(),
            FixedClock::new(d("2025-08-06")),
            &Config::default(),
        );
        assert!(store.week().is_none());
        assert_eq!(store.current_streak(), 0);
    }
}
