//! Built-in dataset used on first run, on unreadable data, and on reset.

use chrono::NaiveDate;

use super::record::{CompletionRecord, EngagementLog};

const SEED: [(i32, u32, u32, bool); 8] = [
    (2025, 8, 1, true),
    (2025, 8, 2, true),
    (2025, 8, 3, false),
    (2025, 8, 4, true),
    (2025, 8, 5, true),
    (2025, 8, 6, true),
    (2025, 8, 7, false),
    (2025, 8, 8, true),
];

/// The eight seed records in chronological order.
pub fn seed_records() -> Vec<CompletionRecord> {
    SEED.iter()
        .filter_map(|&(y, m, d, completed)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| CompletionRecord::new(date, completed))
        })
        .collect()
}

pub fn seed_log() -> EngagementLog {
    EngagementLog::from_records(seed_records())
}
