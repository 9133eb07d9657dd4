//! Motivation panel message selection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MotivationMessage {
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
}

impl MotivationTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            5.. => MotivationTier::High,
            2..=4 => MotivationTier::Medium,
            _ => MotivationTier::Low,
        }
    }

    pub fn message(&self) -> MotivationMessage {
        match self {
            MotivationTier::Low => MotivationMessage {
                title: "Keep Going!",
                description: "Every day is a new opportunity to learn something new!",
                emoji: "💪",
            },
            MotivationTier::Medium => MotivationMessage {
                title: "Great Job!",
                description: "You're building a great learning habit!",
                emoji: "✨",
            },
            MotivationTier::High => MotivationMessage {
                title: "Amazing!",
                description: "You're on fire! Keep up the fantastic work!",
                emoji: "🔥",
            },
        }
    }
}

pub fn motivation_for(streak: u32) -> MotivationMessage {
    MotivationTier::for_streak(streak).message()
}
