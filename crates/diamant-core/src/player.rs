//! Player state.
//!
//! This module contains:
//! - `PlayerInRound`: the gems a player holds (sack) and has banked (chest)
//! - `Choice`: the continue/withdraw decision taken every turn
//! - `PlayerKind`: whether the decision comes from a human or the CPU

use crate::card::Gems;
use serde::{Deserialize, Serialize};

/// Player identifier, the index of the player in the roster
pub type PlayerId = u8;

/// A player's decision for the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Choice {
    /// Keep exploring the cave
    #[default]
    Stay,
    /// Leave the cave and bank what's in the sack
    Exit,
}

/// Who takes a player's decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Cpu,
}

/// A player taking part in the rounds of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInRound {
    /// Display name, unique within a game
    pub name: String,
    pub kind: PlayerKind,
    /// Gems at risk in the current round
    sack: Gems,
    /// Gems banked across rounds
    chest: Gems,
    choice: Choice,
}

impl PlayerInRound {
    /// Create a player with empty sack and chest
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            sack: 0,
            chest: 0,
            choice: Choice::Stay,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Human)
    }

    pub fn cpu(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Cpu)
    }

    pub fn sack_gems(&self) -> Gems {
        self.sack
    }

    pub fn chest_gems(&self) -> Gems {
        self.chest
    }

    pub fn choice(&self) -> Choice {
        self.choice
    }

    pub fn is_cpu(&self) -> bool {
        self.kind == PlayerKind::Cpu
    }

    /// Whether this player has left the cave this round
    pub fn has_exited(&self) -> bool {
        self.choice == Choice::Exit
    }

    /// Add gems to the sack, stopping at `Gems::MAX`
    pub fn add_sack_gems(&mut self, gems: Gems) {
        self.sack = self.sack.saturating_add(gems);
    }

    /// Remove gems from the sack, stopping at zero
    pub fn sub_sack_gems(&mut self, gems: Gems) {
        self.sack = self.sack.saturating_sub(gems);
    }

    /// Remove gems from the chest, stopping at zero
    pub fn sub_chest_gems(&mut self, gems: Gems) {
        self.chest = self.chest.saturating_sub(gems);
    }

    /// Bank the sack into the chest
    pub fn add_sack_to_chest(&mut self) {
        self.chest = self.chest.saturating_add(self.sack);
        self.sack = 0;
    }

    pub fn choose(&mut self, choice: Choice) {
        self.choice = choice;
    }

    /// Leave the cave. Returns false if the player had already left.
    pub fn exit(&mut self) -> bool {
        if self.has_exited() {
            return false;
        }
        self.choice = Choice::Exit;
        true
    }

    /// Empty the sack and get back in the cave, keeping the chest
    pub fn reset_for_round(&mut self) {
        self.sack = 0;
        self.choice = Choice::Stay;
    }
}
