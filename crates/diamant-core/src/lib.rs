//! Diamant - a push-your-luck cave exploration game engine
//!
//! This crate provides the round engine of Diamant, including:
//! - The card model and the cave deck
//! - Player state and the turn rotation within a round
//! - The turn and round state machines with gem distribution rules
//! - Configurable round effects (end conditions and gem modifiers)
//! - CPU decision logic and a game driver playing several rounds
//!
//! # Architecture
//!
//! The engine is synchronous and performs no I/O. A presentation layer
//! drives it, either turn by turn through [`Round`] and [`Turn`] or a whole
//! round at a time through [`Game::play_round`]. All randomness comes from
//! seedable generators so games can be replayed.
//!
//! # Modules
//!
//! - [`card`]: Cards and gem values
//! - [`deck`]: The deck and a builder for custom decks
//! - [`player`]: Player sacks, chests and choices
//! - [`rotation`]: Turn order over the players still in the cave
//! - [`state`]: Shared state of a round
//! - [`effect`]: End conditions and gem modifiers
//! - [`events`]: Events reported by turns and rounds
//! - [`turn`]: Turn state machine
//! - [`round`]: Round driver
//! - [`cpu`]: CPU decision logic
//! - [`settings`]: Game configuration and validation
//! - [`game`]: Multi-round game driver
//! - [`leaderboard`]: Final standings

pub mod card;
pub mod cpu;
pub mod deck;
pub mod effect;
pub mod error;
pub mod events;
pub mod game;
pub mod leaderboard;
pub mod player;
pub mod rotation;
pub mod round;
pub mod settings;
pub mod state;
pub mod turn;

// Re-export commonly used types
pub use card::{Card, CardKind, Gems, TrapKind};
pub use cpu::{CpuDifficulty, CpuLogic, CpuProfile, CpuSignals};
pub use deck::{Deck, DeckBuilder, DeckKind, DeckTotals};
pub use effect::{EndCondition, GemModifier, RoundEffect};
pub use error::GameError;
pub use events::{GameEvent, RoundOutcome};
pub use game::{Game, RoundSummary};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use player::{Choice, PlayerId, PlayerInRound, PlayerKind};
pub use rotation::RoundRotation;
pub use round::{Round, Traversal};
pub use settings::{GameSettings, SettingsError};
pub use state::{RoundSnapshot, RoundState};
pub use turn::{Turn, TurnPhase};
