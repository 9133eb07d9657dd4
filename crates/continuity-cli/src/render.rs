//! Plain-text rendering of the store and dashboard.

use std::fmt::Write;

use continuity_core::engagement::{WeekView, WEEKDAY_LABELS};
use continuity_core::peers::pluralize_days;
use continuity_core::{Dashboard, LeaderboardRow, LoadOutcome, LogStorage, MotivationMessage};
use serde::Serialize;

use crate::session::Store;

pub const HELP_TEXT: &str = "\
Keyboard Shortcuts
  ?            Toggle this help
  esc          Close any open dialogs or this help
  left right   Navigate between days (up/down jump three)
  space enter  Toggle day completion (today only)
  l            Log current progress
  r            Reset all data (requires confirmation)";

/// JSON shape of `status --json`.
#[derive(Serialize)]
pub struct StatusView<'a> {
    pub today: chrono::NaiveDate,
    pub current_streak: u32,
    pub peak_streak: u32,
    pub motivation: MotivationMessage,
    pub week: &'a WeekView,
    pub leaderboard: Vec<LeaderboardRow>,
    /// How this run's load settled; tells a seeded log from a restored one.
    pub load: Option<LoadOutcome>,
}

pub fn status_view<S: LogStorage>(
    store: &continuity_core::EngagementStore<S>,
) -> Option<StatusView<'_>> {
    let derived = store.derived()?;
    Some(StatusView {
        today: derived.today,
        current_streak: derived.current_streak(),
        peak_streak: derived.peak_streak(),
        motivation: store.motivation(),
        week: &derived.week,
        leaderboard: store.leaderboard(),
        load: store.load_outcome(),
    })
}

pub fn panel(current: u32, peak: u32, message: &MotivationMessage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Learning Continuity");
    let _ = writeln!(
        out,
        "  Current Streak: {}   Best Streak: {}",
        pluralize_days(current),
        pluralize_days(peak)
    );
    let _ = writeln!(out, "  {} {}", message.emoji, message.title);
    let _ = writeln!(out, "     {}", message.description);
    out
}

/// The week grid. `focus` draws brackets around a cell, `pulse` marks the
/// day just toggled.
pub fn week_grid(week: &WeekView, focus: Option<usize>, pulse: Option<chrono::NaiveDate>) -> String {
    let mut header = String::new();
    let mut dates = String::new();
    let mut marks = String::new();
    for (i, day) in week.days.iter().enumerate() {
        let label = if day.is_today {
            format!("{}*", WEEKDAY_LABELS[i])
        } else {
            WEEKDAY_LABELS[i].to_string()
        };
        let mark = match (day.completed, pulse == Some(day.date)) {
            (true, true) => "(#)",
            (false, true) => "( )",
            (true, false) => " # ",
            (false, false) => " . ",
        };
        let cell = if focus == Some(i) {
            format!("[{mark}]")
        } else {
            format!(" {mark} ")
        };
        let _ = write!(header, "{label:^6}");
        let _ = write!(dates, "{:^6}", day.date.format("%d").to_string());
        let _ = write!(marks, "{cell:^6}");
    }
    format!("This Week's Engagement\n{header}\n{dates}\n{marks}\n")
}

pub fn leaderboard(rows: &[LeaderboardRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let mut out = String::from("All Learners\n");
    for row in rows {
        let marker = if row.is_current_user { ">" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:>2}. {:<10} {}",
            row.rank,
            row.display_name,
            pluralize_days(row.continuity_count)
        );
    }
    out
}

/// Everything on the page, in display order.
pub fn page(store: &Store, dashboard: Option<&Dashboard>) -> String {
    let Some(derived) = store.derived() else {
        return "Loading your learning data...\n".to_string();
    };

    let mut out = String::new();
    if let Some(dash) = dashboard {
        if let Some(milestone) = dash.celebration() {
            let _ = writeln!(out, "*** {} ***\n", milestone.message());
        }
    }
    out.push_str(&panel(
        derived.current_streak(),
        derived.peak_streak(),
        &store.motivation(),
    ));
    out.push('\n');

    let focus = dashboard.and_then(Dashboard::focus);
    let pulse = dashboard.and_then(Dashboard::pulsing);
    out.push_str(&week_grid(&derived.week, focus, pulse));
    out.push('\n');
    out.push_str(&leaderboard(&store.leaderboard()));

    if let Some(dash) = dashboard {
        if dash.is_confirming_reset() {
            out.push_str("\nAre you sure you want to reset all data? This cannot be undone. [y/n]\n");
        }
        if dash.is_help_open() {
            let _ = writeln!(out, "\n{HELP_TEXT}");
        } else if dash.shows_help_hint() {
            out.push_str("\n(press ? for keyboard shortcuts)\n");
        }
        if let Some(toast) = dash.toast() {
            let _ = writeln!(out, "\n{toast}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use continuity_core::engagement::{parse_date, EngagementLog};
    use continuity_core::motivation::motivation_for;

    #[test]
    fn grid_marks_today_focus_and_completion() {
        let today = parse_date("2025-08-06").unwrap();
        let log = EngagementLog::from_records(continuity_core::engagement::seed_records());
        let week = WeekView::compute(&log, today);
        let grid = week_grid(&week, Some(2), None);
        assert!(grid.contains("Wed*"));
        assert!(grid.contains("[ # ]"));
        assert_eq!(grid.matches(" # ").count(), 4);
    }

    #[test]
    fn panel_pluralizes() {
        let text = panel(1, 3, &motivation_for(1));
        assert!(text.contains("Current Streak: 1 day "));
        assert!(text.contains("Best Streak: 3 days"));
        assert!(text.contains("Keep Going!"));
    }
}
