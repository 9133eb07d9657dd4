use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::engagement::CompletionRecord;

/// Every store mutation or diagnostic dump produces an Event.
/// Consumers render from them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    DayToggled {
        date: NaiveDate,
        completed: bool,
        previous_streak: u32,
        current_streak: u32,
        at: DateTime<Utc>,
    },
    LogReset {
        records: usize,
        current_streak: u32,
        at: DateTime<Utc>,
    },
    Snapshot(Snapshot),
}

/// Full dump of the log plus derived streaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<CompletionRecord>,
    pub current_streak: u32,
    pub peak_streak: u32,
    pub taken_at: DateTime<Utc>,
}
