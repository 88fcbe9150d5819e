//! Final standings.

use crate::card::Gems;
use crate::player::{PlayerInRound, PlayerKind};
use serde::{Deserialize, Serialize};

/// One line of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub kind: PlayerKind,
    pub chest: Gems,
}

/// Players ordered by banked gems, richest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Rank players by chest. Ties keep roster order.
    pub fn from_players(players: &[PlayerInRound]) -> Self {
        let mut entries: Vec<LeaderboardEntry> = players
            .iter()
            .map(|p| LeaderboardEntry {
                name: p.name.clone(),
                kind: p.kind,
                chest: p.chest_gems(),
            })
            .collect();
        entries.sort_by(|a, b| b.chest.cmp(&a.chest));

        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// First entry, if anyone played
    pub fn winner(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    /// Every entry sharing the top chest
    pub fn winners(&self) -> Vec<&LeaderboardEntry> {
        match self.entries.first() {
            Some(top) => self
                .entries
                .iter()
                .take_while(|e| e.chest == top.chest)
                .collect(),
            None => Vec::new(),
        }
    }
}
