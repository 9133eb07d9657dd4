//! # Continuity Core Library
//!
//! Core logic for the Learning Continuity tracker: a record of whether the
//! daily learning activity was completed, and the streaks and week grid
//! derived from it. Like its CLI, any front end is a thin consumer of this
//! crate.
//!
//! ## Architecture
//!
//! - **Engagement Store**: owns the completion log, persists it on every
//!   mutation, and caches the derived streaks and week view
//! - **Storage**: a key-value persistence trait with SQLite and in-memory
//!   backends, plus TOML configuration
//! - **Dashboard**: a caller-ticked state machine for keyboard focus,
//!   confirmation dialogs and timed notices
//!
//! ## Key Components
//!
//! - [`EngagementStore`]: the single write surface for engagement data
//! - [`WeekView`]: the Monday-anchored current week
//! - [`Dashboard`]: key handling and transient notice timers
//! - [`LogStorage`]: trait for persistence backends

pub mod clock;
pub mod dashboard;
pub mod engagement;
pub mod error;
pub mod events;
pub mod milestone;
pub mod motivation;
pub mod peers;
pub mod storage;
pub mod timers;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::{Dashboard, Intent, Key, KeyEvent, Notice};
pub use engagement::{
    CompletionRecord, Derived, EngagementLog, EngagementStore, LoadOutcome, StreakState, WeekDay,
    WeekView,
};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::{Event, Snapshot};
pub use milestone::{Milestone, MILESTONES};
pub use motivation::{MotivationMessage, MotivationTier};
pub use peers::{LeaderboardRow, PeerEntry, Roster};
pub use storage::{Config, LogStorage, MemoryStorage, SqliteStorage};
