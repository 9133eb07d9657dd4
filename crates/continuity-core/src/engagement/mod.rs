mod record;
mod seed;
mod store;
mod streak;
mod week;

pub use record::{parse_date, CompletionRecord, EngagementLog, DATE_FORMAT};
pub use seed::{seed_log, seed_records};
pub use store::{Derived, EngagementStore, LoadOutcome};
pub use streak::{current_streak, peak_streak, StreakState};
pub use week::{week_start, WeekDay, WeekView, DAYS_PER_WEEK, WEEKDAY_LABELS};
