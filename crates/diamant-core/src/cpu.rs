//! CPU players.
//!
//! A CPU player scores the round state with five normalized signals, weighs
//! them with the profile of its difficulty and leaves the cave when the score
//! reaches a threshold drawn at random for every decision:
//! - Easy: cares mostly about the gems on the path, ignores relics
//! - Normal: balanced
//! - Hard: pushes on, watching traps and relics and ignoring the others

use crate::error::GameError;
use crate::player::Choice;
use crate::state::RoundState;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// CPU difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CpuDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Signal weights and decision threshold range of a difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuProfile {
    pub weight_gems: f64,
    pub weight_traps: f64,
    pub weight_cards: f64,
    pub weight_relics: f64,
    pub weight_players: f64,
    pub min_threshold: f64,
    pub max_threshold: f64,
}

impl CpuProfile {
    pub fn for_difficulty(difficulty: CpuDifficulty) -> Self {
        match difficulty {
            CpuDifficulty::Easy => CpuProfile {
                weight_gems: 0.60,
                weight_traps: 0.05,
                weight_cards: 0.15,
                weight_relics: 0.0,
                weight_players: 0.20,
                min_threshold: 0.4,
                max_threshold: 0.7,
            },
            CpuDifficulty::Normal => CpuProfile {
                weight_gems: 0.25,
                weight_traps: 0.20,
                weight_cards: 0.15,
                weight_relics: 0.20,
                weight_players: 0.20,
                min_threshold: 0.5,
                max_threshold: 0.7,
            },
            CpuDifficulty::Hard => CpuProfile {
                weight_gems: 0.05,
                weight_traps: 0.50,
                weight_cards: 0.15,
                weight_relics: 0.30,
                weight_players: 0.0,
                min_threshold: 0.5,
                max_threshold: 0.7,
            },
        }
    }
}

/// The five normalized signals a CPU decision is based on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuSignals {
    /// Path gems per active player, halved. Reaches 1.0 at two gems each.
    pub gems: f64,
    /// Distinct trap kinds drawn over the trap kinds in the deck
    pub traps: f64,
    /// Fraction of the deck already drawn
    pub cards: f64,
    /// Unclaimed relics on the path over the relics in the deck, doubled
    pub relics: f64,
    /// Fraction of the roster already out of the cave
    pub players: f64,
}

impl CpuSignals {
    /// Read the signals off the round state
    pub fn of(state: &RoundState) -> Result<Self, GameError> {
        let rotation = state.rotation();
        let active = rotation.active_count();
        if active == 0 {
            return Err(GameError::NoActivePlayers);
        }
        let totals = state.deck().totals();

        Ok(Self {
            gems: f64::from(state.path_gems()) / (active as f64 * 2.0),
            traps: ratio(state.distinct_trap_kinds(), totals.trap_kinds),
            cards: ratio(state.drawn_cards().len(), totals.cards),
            relics: 2.0 * ratio(state.redeemable_relics().len(), totals.relics),
            players: ratio(rotation.exited_count(), rotation.players().len()),
        })
    }

    /// Weighted sum of the signals
    pub fn score(&self, profile: &CpuProfile) -> f64 {
        profile.weight_gems * self.gems
            + profile.weight_traps * self.traps
            + profile.weight_cards * self.cards
            + profile.weight_relics * self.relics
            + profile.weight_players * self.players
    }
}

/// `part / whole`, or 0 when `whole` is 0
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Decision logic shared by the CPU players of a game
#[derive(Debug, Clone)]
pub struct CpuLogic {
    pub difficulty: CpuDifficulty,
    profile: CpuProfile,
    rng: StdRng,
}

impl CpuLogic {
    pub fn new(difficulty: CpuDifficulty) -> Self {
        Self {
            difficulty,
            profile: CpuProfile::for_difficulty(difficulty),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(difficulty: CpuDifficulty, seed: u64) -> Self {
        Self {
            difficulty,
            profile: CpuProfile::for_difficulty(difficulty),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn profile(&self) -> &CpuProfile {
        &self.profile
    }

    /// Score of the round state for this difficulty
    pub fn score(&self, state: &RoundState) -> Result<f64, GameError> {
        Ok(CpuSignals::of(state)?.score(&self.profile))
    }

    /// Draw a decision threshold in the profile's range
    pub fn threshold(&mut self) -> f64 {
        self.rng
            .gen_range(self.profile.min_threshold..=self.profile.max_threshold)
    }

    /// Decide whether to leave the cave
    pub fn choose(&mut self, state: &RoundState) -> Result<Choice, GameError> {
        let score = self.score(state)?;
        let threshold = self.threshold();
        let choice = if score >= threshold {
            Choice::Exit
        } else {
            Choice::Stay
        };

        trace!(difficulty = ?self.difficulty, score, threshold, ?choice, "cpu decision");
        Ok(choice)
    }
}
