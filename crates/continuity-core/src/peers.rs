//! Session-only peer roster and leaderboard ordering.

use serde::{Deserialize, Serialize};

/// Roster id of the local user.
pub const LOCAL_USER_ID: u32 = 101;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEntry {
    pub id: u32,
    pub display_name: String,
    pub continuity_count: u32,
}

impl PeerEntry {
    pub fn new(id: u32, display_name: impl Into<String>, continuity_count: u32) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            continuity_count,
        }
    }
}

/// One rendered leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub id: u32,
    pub display_name: String,
    pub continuity_count: u32,
    pub is_current_user: bool,
}

/// The peer roster. Never persisted; rebuilt every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    local_user_id: u32,
    entries: Vec<PeerEntry>,
}

impl Roster {
    pub fn new(local_user_id: u32, entries: Vec<PeerEntry>) -> Self {
        Self {
            local_user_id,
            entries,
        }
    }

    /// The built-in roster with `local_user_id` marking the local user.
    pub fn default_roster(local_user_id: u32) -> Self {
        Self::new(
            local_user_id,
            vec![
                PeerEntry::new(100, "Shiva", 5),
                PeerEntry::new(101, "You", 3),
                PeerEntry::new(102, "Jagadesh", 2),
                PeerEntry::new(103, "Yogesh", 4),
            ],
        )
    }

    pub fn local_user_id(&self) -> u32 {
        self.local_user_id
    }

    pub fn entries(&self) -> &[PeerEntry] {
        &self.entries
    }

    /// Copy the local user's streak into their roster entry.
    ///
    /// A roster without the local user is left unchanged.
    pub fn sync_local(&mut self, streak: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|p| p.id == self.local_user_id) {
            entry.continuity_count = streak;
        }
    }

    /// Entries ordered by descending streak; ties keep roster order.
    pub fn sorted(&self) -> Vec<PeerEntry> {
        let mut peers = self.entries.clone();
        peers.sort_by(|a, b| b.continuity_count.cmp(&a.continuity_count));
        peers
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        self.sorted()
            .into_iter()
            .enumerate()
            .map(|(i, peer)| {
                let is_current_user = peer.id == self.local_user_id;
                LeaderboardRow {
                    rank: i + 1,
                    id: peer.id,
                    display_name: if is_current_user {
                        "You".to_string()
                    } else {
                        peer.display_name
                    },
                    continuity_count: peer.continuity_count,
                    is_current_user,
                }
            })
            .collect()
    }
}

/// "1 day", "0 days", "3 days".
pub fn pluralize_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}
