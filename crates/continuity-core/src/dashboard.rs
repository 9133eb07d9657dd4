//! Interactive dashboard state: keyboard focus, dialogs, transient notices.
//!
//! The dashboard renders nothing. It turns key events into [`Intent`]s,
//! executes them against an [`EngagementStore`], and owns the timers that
//! dismiss its transient notices. Like the store it is driven entirely by
//! the caller: pass the current wall-clock milliseconds in, call
//! [`Dashboard::tick`] periodically.
//!
//! ## Bindings
//!
//! ```text
//! ← → ↑ ↓      move focus (±1, ±3), clamped to the week
//! Space Enter  toggle the focused day, only if it is today
//! L            log a snapshot
//! R            ask to reset (Y confirms, N cancels)
//! ?            toggle the help overlay
//! Esc          clear focus, close dialogs and help
//! ```

use chrono::NaiveDate;

use crate::engagement::{EngagementStore, WeekView, DAYS_PER_WEEK};
use crate::events::Event;
use crate::milestone::{self, Milestone};
use crate::storage::{LogStorage, NoticesConfig};
use crate::timers::TimerSlots;

/// Vertical arrow keys jump this many cells.
const ROW_JUMP: usize = 3;

pub const LOG_TOAST: &str = "✓ Progress logged";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    Char(char),
}

impl Key {
    fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::Left | Key::Right | Key::Up | Key::Down | Key::Space | Key::Enter
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Set when focus is inside a text field; such events are ignored.
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            in_text_input: false,
        }
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// A request for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Toggle(NaiveDate),
    LogSnapshot,
    Reset,
}

/// Transient notices, each dismissed by its own timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Notice {
    Toast,
    Celebration,
    HelpHint,
    Pulse,
}

#[derive(Debug)]
pub struct Dashboard {
    notices: NoticesConfig,
    timers: TimerSlots<Notice>,
    focus: Option<usize>,
    confirm_reset: bool,
    help_open: bool,
    help_hint: bool,
    toast: Option<&'static str>,
    celebration: Option<Milestone>,
    pulse: Option<NaiveDate>,
}

impl Dashboard {
    /// A fresh dashboard; the help-hint inactivity timer starts now.
    pub fn new(notices: NoticesConfig, now_ms: u64) -> Self {
        let mut timers = TimerSlots::new();
        timers.schedule(Notice::HelpHint, now_ms, notices.help_idle_ms);
        Self {
            notices,
            timers,
            focus: None,
            confirm_reset: false,
            help_open: false,
            help_hint: false,
            toast: None,
            celebration: None,
            pulse: None,
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Any user activity (key or pointer) restarts the inactivity timer.
    pub fn activity(&mut self, now_ms: u64) {
        self.help_hint = false;
        self.timers
            .schedule(Notice::HelpHint, now_ms, self.notices.help_idle_ms);
    }

    /// Translate a key press into dashboard state changes and, possibly, an
    /// intent for the store.
    pub fn handle_key(&mut self, event: KeyEvent, week: &WeekView, now_ms: u64) -> Option<Intent> {
        self.activity(now_ms);
        if event.in_text_input {
            return None;
        }

        if self.confirm_reset {
            match event.key {
                Key::Char('y' | 'Y') => return self.confirm_reset(),
                Key::Char('n' | 'N') | Key::Escape => {
                    self.cancel_reset();
                    return None;
                }
                _ => {}
            }
        }

        if event.key.is_navigation() {
            return self.navigate(event.key, week);
        }

        match event.key {
            Key::Char('l' | 'L') => Some(Intent::LogSnapshot),
            Key::Char('r' | 'R') => {
                self.request_reset();
                None
            }
            Key::Char('?') => {
                self.toggle_help();
                None
            }
            Key::Escape => {
                self.focus = None;
                self.confirm_reset = false;
                self.help_open = false;
                None
            }
            _ => None,
        }
    }

    fn navigate(&mut self, key: Key, week: &WeekView) -> Option<Intent> {
        let last = DAYS_PER_WEEK - 1;
        let Some(index) = self.focus else {
            self.focus = Some(week.today_index().unwrap_or(0));
            return None;
        };

        match key {
            Key::Left => self.focus = Some(index.saturating_sub(1)),
            Key::Right => self.focus = Some((index + 1).min(last)),
            Key::Up => self.focus = Some(index.saturating_sub(ROW_JUMP)),
            Key::Down => self.focus = Some((index + ROW_JUMP).min(last)),
            Key::Space | Key::Enter => {
                return week
                    .day(index)
                    .filter(|day| day.is_today)
                    .map(|day| Intent::Toggle(day.date));
            }
            _ => {}
        }
        None
    }

    pub fn request_reset(&mut self) {
        self.confirm_reset = true;
    }

    /// Close the confirmation dialog and emit the reset intent.
    pub fn confirm_reset(&mut self) -> Option<Intent> {
        if !self.confirm_reset {
            return None;
        }
        self.confirm_reset = false;
        Some(Intent::Reset)
    }

    pub fn cancel_reset(&mut self) {
        self.confirm_reset = false;
    }

    pub fn toggle_help(&mut self) {
        self.help_open = !self.help_open;
        self.help_hint = false;
    }

    // ── Store interaction ────────────────────────────────────────────

    /// Execute `intent` against the store and react to the result.
    ///
    /// Only mutations re-check milestones; a snapshot leaves the streak as
    /// it was.
    pub fn apply<S: LogStorage>(
        &mut self,
        intent: Intent,
        store: &mut EngagementStore<S>,
        now_ms: u64,
    ) -> Event {
        match intent {
            Intent::Toggle(date) => {
                let event = store.toggle_day(date);
                self.pulse = Some(date);
                self.timers.schedule(Notice::Pulse, now_ms, self.notices.pulse_ms);
                self.check_milestone(store.current_streak(), store.previous_streak(), now_ms);
                event
            }
            Intent::Reset => {
                let event = store.reset_all();
                self.check_milestone(store.current_streak(), store.previous_streak(), now_ms);
                event
            }
            Intent::LogSnapshot => {
                let snapshot = store.log_snapshot();
                self.toast = Some(LOG_TOAST);
                self.timers.schedule(Notice::Toast, now_ms, self.notices.toast_ms);
                Event::Snapshot(snapshot)
            }
        }
    }

    /// Show a celebration if the streak just crossed a milestone, replacing
    /// any celebration still on screen.
    pub fn check_milestone(&mut self, current: u32, previous: u32, now_ms: u64) -> Option<Milestone> {
        let reached = milestone::crossed(current, previous)?;
        tracing::info!(days = reached.days, "streak milestone reached");
        self.celebration = Some(reached);
        self.timers
            .schedule(Notice::Celebration, now_ms, self.notices.celebration_ms);
        Some(reached)
    }

    // ── Timers ───────────────────────────────────────────────────────

    /// Fire expired timers and return the notices they changed.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Notice> {
        let fired = self.timers.tick(now_ms);
        for notice in &fired {
            match notice {
                Notice::Toast => self.toast = None,
                Notice::Celebration => self.celebration = None,
                Notice::Pulse => self.pulse = None,
                Notice::HelpHint => self.help_hint = !self.help_open,
            }
        }
        fired
    }

    /// Cancel every pending timer and clear transient notices.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.toast = None;
        self.celebration = None;
        self.pulse = None;
        self.help_hint = false;
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn is_confirming_reset(&self) -> bool {
        self.confirm_reset
    }

    pub fn is_help_open(&self) -> bool {
        self.help_open
    }

    pub fn shows_help_hint(&self) -> bool {
        self.help_hint
    }

    pub fn toast(&self) -> Option<&'static str> {
        self.toast
    }

    pub fn celebration(&self) -> Option<Milestone> {
        self.celebration
    }

    /// Day whose completion indicator is pulsing after a toggle.
    pub fn pulsing(&self) -> Option<NaiveDate> {
        self.pulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::engagement::parse_date;
    use crate::storage::{Config, MemoryStorage};

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn store(today: &str) -> EngagementStore<MemoryStorage> {
        EngagementStore::open(
            MemoryStorage::new(),
            FixedClock::new(d(today)),
            &Config::default(),
        )
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(NoticesConfig::default(), 0)
    }

    fn press(dash: &mut Dashboard, key: Key, week: &WeekView) -> Option<Intent> {
        dash.handle_key(KeyEvent::new(key), week, 0)
    }

    #[test]
    fn first_navigation_focuses_today() {
        // Wednesday
        let store = store("2025-08-06");
        let week = store.week().unwrap().clone();
        let mut dash = dashboard();
        assert_eq!(press(&mut dash, Key::Right, &week), None);
        assert_eq!(dash.focus(), Some(2));
    }

    #[test]
    fn focus_is_clamped() {
        let store = store("2025-08-06");
        let week = store.week().unwrap().clone();
        let mut dash = dashboard();
        press(&mut dash, Key::Left, &week);
        press(&mut dash, Key::Up, &week);
        assert_eq!(dash.focus(), Some(0));
        press(&mut dash, Key::Left, &week);
        assert_eq!(dash.focus(), Some(0));
        press(&mut dash, Key::Down, &week);
        press(&mut dash, Key::Down, &week);
        press(&mut dash, Key::Down, &week);
        assert_eq!(dash.focus(), Some(6));
        press(&mut dash, Key::Right, &week);
        assert_eq!(dash.focus(), Some(6));
    }

    #[test]
    fn enter_toggles_only_today() {
        let store = store("2025-08-06");
        let week = store.week().unwrap().clone();
        let mut dash = dashboard();
        press(&mut dash, Key::Enter, &week);
        assert_eq!(
            press(&mut dash, Key::Space, &week),
            Some(Intent::Toggle(d("2025-08-06")))
        );
        press(&mut dash, Key::Left, &week);
        assert_eq!(press(&mut dash, Key::Enter, &week), None);
    }

    #[test]
    fn text_input_events_are_ignored() {
        let store = store("2025-08-06");
        let week = store.week().unwrap().clone();
        let mut dash = dashboard();
        let event = KeyEvent {
            key: Key::Char('r'),
            in_text_input: true,
        };
        assert_eq!(dash.handle_key(event, &week, 0), None);
        assert!(!dash.is_confirming_reset());
    }

    #[test]
    fn reset_requires_confirmation() {
        let mut store = store("2025-08-06");
        let week = store.week().unwrap().clone();
        let mut dash = dashboard();
        store.toggle_day(d("2025-08-06"));

        assert_eq!(press(&mut dash, Key::Char('r'), &week), None);
        assert!(dash.is_confirming_reset());
        assert_eq!(press(&mut dash, Key::Char('n'), &week), None);
        assert!(!dash.is_confirming_reset());
        assert_eq!(store.current_streak(), 0);

        press(&mut dash, Key::Char('R'), &week);
        let intent = press(&mut dash, Key::Char('y'), &week).unwrap();
        assert_eq!(intent, Intent::Reset);
        dash.apply(intent, &mut store, 0);
        assert_eq!(store.current_streak(), 3);
    }

    #[test]
    fn escape_clears_focus_and_overlays() {
        let store = store("2025-08-06");
        let week = store.week().unwrap().clone();
        let mut dash = dashboard();
        press(&mut dash, Key::Right, &week);
        press(&mut dash, Key::Char('?'), &week);
        assert!(dash.is_help_open());
        press(&mut dash, Key::Escape, &week);
        assert_eq!(dash.focus(), None);
        assert!(!dash.is_help_open());
    }

    #[test]
    fn milestone_celebration_fires_and_dismisses() {
        // 08-01 and 08-02 are completed, so completing 08-03 reaches three days.
        let mut store = store("2025-08-03");
        let mut dash = dashboard();
        dash.apply(Intent::Toggle(d("2025-08-03")), &mut store, 1_000);
        assert_eq!(store.current_streak(), 3);
        assert_eq!(dash.celebration(), Some(Milestone { days: 3 }));
        assert_eq!(dash.pulsing(), Some(d("2025-08-03")));

        let fired = dash.tick(1_300);
        assert_eq!(fired, vec![Notice::Pulse]);
        assert_eq!(dash.pulsing(), None);
        assert!(dash.celebration().is_some());

        dash.tick(6_000);
        assert_eq!(dash.celebration(), None);
    }

    #[test]
    fn unchanged_streak_does_not_celebrate() {
        let mut dash = dashboard();
        assert_eq!(dash.check_milestone(3, 3, 0), None);
        assert_eq!(dash.celebration(), None);
        assert_eq!(dash.check_milestone(5, 4, 0), Some(Milestone { days: 5 }));
    }

    #[test]
    fn newer_celebration_supersedes_older_timer() {
        let mut dash = dashboard();
        dash.check_milestone(3, 2, 0);
        dash.check_milestone(5, 4, 4_000);
        dash.tick(5_000);
        assert_eq!(dash.celebration(), Some(Milestone { days: 5 }));
        dash.tick(9_000);
        assert_eq!(dash.celebration(), None);
    }

    #[test]
    fn snapshot_shows_toast_for_three_seconds() {
        let mut store = store("2025-08-06");
        let mut dash = dashboard();
        let event = dash.apply(Intent::LogSnapshot, &mut store, 0);
        assert!(matches!(event, Event::Snapshot(_)));
        assert_eq!(dash.toast(), Some(LOG_TOAST));
        dash.tick(2_999);
        assert!(dash.toast().is_some());
        dash.tick(3_000);
        assert_eq!(dash.toast(), None);
    }

    #[test]
    fn help_hint_appears_after_inactivity() {
        let store = store("2025-08-06");
        let week = store.week().unwrap().clone();
        let mut dash = dashboard();
        dash.tick(4_000);
        assert!(!dash.shows_help_hint());
        dash.handle_key(KeyEvent::new(Key::Char('x')), &week, 4_000);
        dash.tick(8_000);
        assert!(!dash.shows_help_hint());
        dash.tick(9_000);
        assert!(dash.shows_help_hint());
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut store = store("2025-08-06");
        let mut dash = dashboard();
        dash.apply(Intent::LogSnapshot, &mut store, 0);
        assert!(dash.has_pending_timers());
        dash.teardown();
        assert!(!dash.has_pending_timers());
        assert!(dash.tick(u64::MAX).is_empty());
        assert_eq!(dash.toast(), None);
    }
}
