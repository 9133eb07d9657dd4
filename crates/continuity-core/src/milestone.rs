//! Streak milestone detection.
//!
//! Stateless: whether a celebration fires depends only on the streak before
//! and after a change.

use serde::{Deserialize, Serialize};

/// Streak lengths worth celebrating, ascending.
pub const MILESTONES: [u32; 6] = [3, 5, 7, 14, 21, 30];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub days: u32,
}

impl Milestone {
    pub fn message(&self) -> &'static str {
        match self.days {
            3 => "3-day streak! Keep it up! 🎉",
            5 => "5 days in a row! Amazing! ✨",
            7 => "A whole week! You're on fire! 🔥",
            14 => "Two weeks strong! Incredible! 🌟",
            21 => "Three weeks! You're unstoppable! 🚀",
            30 => "A whole month! Legendary! 🏆",
            _ => "",
        }
    }
}

/// The milestone reached by moving from `previous` to `current`, if any.
pub fn crossed(current: u32, previous: u32) -> Option<Milestone> {
    MILESTONES
        .iter()
        .copied()
        .find(|&m| current == m && previous < m)
        .map(|days| Milestone { days })
}
