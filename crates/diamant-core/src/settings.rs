//! Game configuration.
//!
//! `GameSettings` is the bundle the presentation layer fills in before a game
//! starts. It can be checked with [`GameSettings::validate`], which reports
//! every broken rule at once so they can all be shown to the user. The engine
//! itself trusts the bundle it is given.

use crate::cpu::CpuDifficulty;
use crate::deck::DeckKind;
use crate::effect::{EndCondition, GemModifier, RoundEffect};
use crate::player::PlayerInRound;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 8;
pub const MAX_NAME_LENGTH: usize = 12;
pub const MIN_ROUNDS: u32 = 1;
pub const MAX_ROUNDS: u32 = 16;
/// Largest gem multiplier a game can be configured with
pub const MAX_GEM_FACTOR: f64 = 10.0;
/// Largest bonus or penalty per trap kind or exited player
pub const MAX_GEM_BONUS: i32 = 100;

/// Errors raised while loading or checking settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Invalid settings: {}", .0.join(" "))]
    Invalid(Vec<String>),

    #[error("Unreadable settings: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err.to_string())
    }
}

/// Everything needed to start a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Names of the human players, in turn order
    pub player_names: Vec<String>,
    /// CPU players seated after the humans
    pub cpu_players: usize,
    #[serde(default)]
    pub cpu_difficulty: CpuDifficulty,
    #[serde(default)]
    pub deck: DeckKind,
    #[serde(default)]
    pub end_condition: EndCondition,
    #[serde(default)]
    pub gem_modifier: GemModifier,
    pub rounds: u32,
    /// Fixed seed for shuffles and CPU decisions, random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player_names: Vec::new(),
            cpu_players: MIN_PLAYERS,
            cpu_difficulty: CpuDifficulty::default(),
            deck: DeckKind::default(),
            end_condition: EndCondition::default(),
            gem_modifier: GemModifier::default(),
            rounds: 5,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON. The result is not validated.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of players, humans and CPUs
    pub fn player_count(&self) -> usize {
        self.player_names.len() + self.cpu_players
    }

    /// Display name of the `index`-th CPU player
    pub fn cpu_name(index: usize) -> String {
        format!("CPU-{}", index)
    }

    /// Every player name in turn order: humans first, then CPUs
    pub fn all_names(&self) -> Vec<String> {
        self.player_names
            .iter()
            .cloned()
            .chain((0..self.cpu_players).map(Self::cpu_name))
            .collect()
    }

    pub fn round_effect(&self) -> RoundEffect {
        RoundEffect::new(self.end_condition, self.gem_modifier)
    }

    /// Check every rule, collecting one message per broken rule
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut errors = Vec::new();

        let count = self.player_count();
        if count < MIN_PLAYERS {
            errors.push(format!(
                "The number of players is below the minimum of {} players.",
                MIN_PLAYERS
            ));
        }
        if count > MAX_PLAYERS {
            errors.push(format!(
                "The number of players exceeds the maximum of {} players.",
                MAX_PLAYERS
            ));
        }

        if self.player_names.iter().any(|n| n.trim().is_empty()) {
            errors.push("Player names can't be empty.".to_string());
        }
        if self
            .player_names
            .iter()
            .any(|n| n.chars().count() > MAX_NAME_LENGTH)
        {
            errors.push(format!(
                "One or more player names exceed the maximum of {} characters.",
                MAX_NAME_LENGTH
            ));
        }

        let names = self.all_names();
        let mut seen = HashSet::new();
        if let Some(duplicate) = names.iter().find(|n| !seen.insert(n.as_str())) {
            errors.push(format!("Player name {} is used more than once.", duplicate));
        }

        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&self.rounds) {
            errors.push(format!(
                "The number of rounds must be between {} and {}.",
                MIN_ROUNDS, MAX_ROUNDS
            ));
        }

        match self.gem_modifier {
            GemModifier::GemMultiplier { factor }
                if !factor.is_finite() || !(0.0..=MAX_GEM_FACTOR).contains(&factor) =>
            {
                errors.push(format!(
                    "The gem multiplier must be between 0 and {}.",
                    MAX_GEM_FACTOR
                ));
            }
            GemModifier::RiskyReward { bonus } | GemModifier::LeftReward { bonus }
                if bonus.unsigned_abs() > MAX_GEM_BONUS.unsigned_abs() =>
            {
                errors.push(format!(
                    "The gem bonus must be between -{} and {}.",
                    MAX_GEM_BONUS, MAX_GEM_BONUS
                ));
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Invalid(errors))
        }
    }

    /// Build the roster: humans first, then CPUs
    pub fn build_players(&self) -> Vec<PlayerInRound> {
        self.player_names
            .iter()
            .map(PlayerInRound::human)
            .chain((0..self.cpu_players).map(|i| PlayerInRound::cpu(Self::cpu_name(i))))
            .collect()
    }
}
