//! Monday-anchored view of the current calendar week.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::EngagementLog;

pub const DAYS_PER_WEEK: usize = 7;

/// Short weekday labels, Monday first.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub completed: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub days: [WeekDay; DAYS_PER_WEEK],
}

impl WeekView {
    /// Build the week containing `today` from the log.
    pub fn compute(log: &EngagementLog, today: NaiveDate) -> Self {
        let week_start = week_start(today);
        let days = std::array::from_fn(|i| {
            let date = week_start + Days::new(i as u64);
            WeekDay {
                date,
                completed: log.is_completed(date),
                is_today: date == today,
            }
        });
        Self { week_start, days }
    }

    /// Grid index of today. Always present for a computed view.
    pub fn today_index(&self) -> Option<usize> {
        self.days.iter().position(|day| day.is_today)
    }

    pub fn day(&self, index: usize) -> Option<&WeekDay> {
        self.days.get(index)
    }

    pub fn completed_count(&self) -> usize {
        self.days.iter().filter(|day| day.completed).count()
    }
}

/// The Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date - Days::new(u64::from(offset))
}
