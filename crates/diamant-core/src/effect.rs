//! Round effects: when a round ends and how gems entering a sack are modified.
//!
//! Both policies are plain values selected at configuration time and
//! evaluated against the round state. A `RoundEffect` pairs one of each and
//! adds the conditions that end every round regardless of the variant: an
//! empty deck or nobody left in the cave.

use crate::card::Gems;
use crate::state::RoundState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Relics to draw before a `ThreeRelicsDrawn` round ends
const RELICS_TO_END: usize = 3;

/// What makes a round stop accepting turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EndCondition {
    /// A trap kind has been drawn twice
    #[default]
    Standard,
    /// Any trap has been drawn
    FirstTrapEnds,
    /// Three relics have been drawn
    ThreeRelicsDrawn,
}

impl EndCondition {
    /// Variants offered to players when configuring a game
    pub fn presets() -> Vec<EndCondition> {
        vec![
            EndCondition::Standard,
            EndCondition::FirstTrapEnds,
            EndCondition::ThreeRelicsDrawn,
        ]
    }

    /// Whether the variant's own condition holds
    pub fn is_met(&self, state: &RoundState) -> bool {
        match self {
            EndCondition::Standard => {
                let mut occurrences = HashMap::new();
                state.drawn_traps().into_iter().any(|kind| {
                    let seen = occurrences.entry(kind).or_insert(0);
                    *seen += 1;
                    *seen >= 2
                })
            }
            EndCondition::FirstTrapEnds => !state.drawn_traps().is_empty(),
            EndCondition::ThreeRelicsDrawn => state.drawn_relics().len() >= RELICS_TO_END,
        }
    }

    pub fn description(&self) -> String {
        let text = match self {
            EndCondition::Standard => "The round ends when two identical trap cards are drawn",
            EndCondition::FirstTrapEnds => "The round ends when a trap card is drawn",
            EndCondition::ThreeRelicsDrawn => "The round ends when three relic cards are drawn",
        };
        text.to_string()
    }
}

/// Adjustment applied to gems entering a player's sack
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GemModifier {
    /// Gems are left as they are
    #[default]
    Standard,
    /// `bonus` gems for each different trap kind drawn so far
    RiskyReward { bonus: i32 },
    /// Gems multiplied by `factor`, rounded down
    GemMultiplier { factor: f64 },
    /// `bonus` gems for each player who already left the round
    LeftReward { bonus: i32 },
}

impl GemModifier {
    /// Variants offered to players when configuring a game
    pub fn presets() -> Vec<GemModifier> {
        vec![
            GemModifier::Standard,
            GemModifier::GemMultiplier { factor: 2.0 },
            GemModifier::GemMultiplier { factor: 3.0 },
            GemModifier::RiskyReward { bonus: 10 },
            GemModifier::LeftReward { bonus: 3 },
        ]
    }

    /// Modified amount for `gems` entering a sack. Never below zero.
    pub fn apply(&self, state: &RoundState, gems: Gems) -> Gems {
        let gems = i64::from(gems);
        let modified = match self {
            GemModifier::Standard => gems,
            GemModifier::RiskyReward { bonus } => {
                gems + i64::from(*bonus) * state.distinct_trap_kinds() as i64
            }
            GemModifier::GemMultiplier { factor } => (gems as f64 * factor).floor() as i64,
            GemModifier::LeftReward { bonus } => {
                gems + i64::from(*bonus) * state.rotation().exited_count() as i64
            }
        };
        Gems::try_from(modified.max(0)).unwrap_or(Gems::MAX)
    }

    pub fn description(&self) -> String {
        match self {
            GemModifier::Standard => "No modifiers applied to gems".to_string(),
            GemModifier::RiskyReward { bonus } => {
                format!("{:+} gems for each trap kind already drawn", bonus)
            }
            GemModifier::GemMultiplier { factor } => {
                format!("Multiplier applied to gems [x{}]", factor)
            }
            GemModifier::LeftReward { bonus } => {
                format!("{:+} gems for each player who left the round", bonus)
            }
        }
    }
}

/// End condition and gem modifier in effect for a round
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundEffect {
    pub end_condition: EndCondition,
    pub gem_modifier: GemModifier,
}

impl RoundEffect {
    pub fn new(end_condition: EndCondition, gem_modifier: GemModifier) -> Self {
        Self {
            end_condition,
            gem_modifier,
        }
    }

    /// Whether the round must stop: the configured condition holds, the deck
    /// is empty or nobody is left in the cave
    pub fn is_end_condition_met(&self, state: &RoundState) -> bool {
        !state.deck().has_next()
            || !state.rotation().has_next()
            || self.end_condition.is_met(state)
    }

    pub fn apply_gem_modifier(&self, state: &RoundState, gems: Gems) -> Gems {
        self.gem_modifier.apply(state, gems)
    }

    /// Both descriptions, one per line
    pub fn description(&self) -> String {
        format!(
            "{}\n{}",
            self.end_condition.description(),
            self.gem_modifier.description()
        )
    }
}
