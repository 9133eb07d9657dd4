//! Streak derivations over an [`EngagementLog`].
//!
//! The current streak walks back by calendar adjacency. The peak streak
//! scans entries in date order and only an incomplete entry breaks a run.
//! Storage order never matters because the log iterates chronologically.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::EngagementLog;

/// Current and peak streak for one log snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub current: u32,
    pub peak: u32,
}

impl StreakState {
    pub fn compute(log: &EngagementLog, today: NaiveDate) -> Self {
        Self {
            current: current_streak(log, today),
            peak: peak_streak(log),
        }
    }
}

/// Consecutive completed days ending at `today`, inclusive.
///
/// Zero when today has no record or is not completed.
pub fn current_streak(log: &EngagementLog, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while log.is_completed(day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive completed entries, in date order.
///
/// Days without a record are skipped; only an incomplete entry resets the run.
pub fn peak_streak(log: &EngagementLog) -> u32 {
    let mut peak = 0;
    let mut run = 0;
    for record in log.records() {
        if record.completed {
            run += 1;
            peak = peak.max(run);
        } else {
            run = 0;
        }
    }
    peak
}
