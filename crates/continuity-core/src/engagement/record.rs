//! Completion records and the engagement log that owns them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Date format used on the wire and in user input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day's completed / not-completed fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub date: NaiveDate,
    #[serde(alias = "isCompleted")]
    pub completed: bool,
}

impl CompletionRecord {
    pub fn new(date: NaiveDate, completed: bool) -> Self {
        Self { date, completed }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
/// Returns [`CoreError::InvalidDate`] if the input is not a valid date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        input: input.to_string(),
    })
}

/// All completion records, keyed by date.
///
/// Iteration is always chronological regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngagementLog {
    days: BTreeMap<NaiveDate, bool>,
}

impl EngagementLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from records. Later records win on duplicate dates.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CompletionRecord>,
    {
        let mut days = BTreeMap::new();
        for record in records {
            if days.insert(record.date, record.completed).is_some() {
                tracing::debug!(date = %record.date, "duplicate record collapsed to last value");
            }
        }
        Self { days }
    }

    /// Completion state for `date`, `None` if never recorded.
    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.days.get(&date).copied()
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.get(date).unwrap_or(false)
    }

    /// Flip an existing record, or insert it as completed.
    ///
    /// Returns the new completion state.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        let entry = self.days.entry(date).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Records in chronological order.
    pub fn records(&self) -> impl Iterator<Item = CompletionRecord> + '_ {
        self.days
            .iter()
            .map(|(&date, &completed)| CompletionRecord { date, completed })
    }

    pub fn to_records(&self) -> Vec<CompletionRecord> {
        self.records().collect()
    }

    /// Serialize as a chronological JSON array of records.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_records())?)
    }
}

impl FromIterator<CompletionRecord> for EngagementLog {
    fn from_iter<T: IntoIterator<Item = CompletionRecord>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn toggle_inserts_then_flips() {
        let mut log = EngagementLog::new();
        assert!(log.toggle(d("2025-08-10")));
        assert_eq!(log.get(d("2025-08-10")), Some(true));
        assert!(!log.toggle(d("2025-08-10")));
        assert_eq!(log.get(d("2025-08-10")), Some(false));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn records_are_chronological() {
        let log = EngagementLog::from_records([
            CompletionRecord::new(d("2025-08-03"), true),
            CompletionRecord::new(d("2025-08-01"), false),
            CompletionRecord::new(d("2025-08-02"), true),
        ]);
        let dates: Vec<_> = log.records().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2025-08-01"), d("2025-08-02"), d("2025-08-03")]);
    }

    #[test]
    fn duplicate_dates_keep_last() {
        let log = EngagementLog::from_records([
            CompletionRecord::new(d("2025-08-01"), true),
            CompletionRecord::new(d("2025-08-01"), false),
        ]);
        assert_eq!(log.len(), 1);
        assert_eq!(log.get(d("2025-08-01")), Some(false));
    }

    #[test]
    fn json_uses_plain_dates() {
        let log = EngagementLog::from_records([CompletionRecord::new(d("2025-08-01"), true)]);
        assert_eq!(log.to_json().unwrap(), r#"[{"date":"2025-08-01","completed":true}]"#);
    }

    #[test]
    fn legacy_field_name_is_accepted() {
        let records: Vec<CompletionRecord> =
            serde_json::from_str(r#"[{"date":"2025-08-01","isCompleted":true}]"#).unwrap();
        assert_eq!(records, vec![CompletionRecord::new(d("2025-08-01"), true)]);
    }

    #[test]
    fn parse_date_rejects_timestamps() {
        assert!(parse_date("2025-08-01T10:00:00Z").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert_eq!(parse_date(" 2025-08-01 ").unwrap(), d("2025-08-01"));
    }
}
