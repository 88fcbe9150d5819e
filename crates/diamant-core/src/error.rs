//! Errors raised by the round engine.
//!
//! Every engine failure is either a sequencing error (an operation called in
//! the wrong state) or a contract violation by the caller. Neither is
//! retryable, so callers are expected to propagate them with `?`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while driving a game
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("A card is requested, but the deck has no cards")]
    EmptyDeck,

    #[error("No active players left")]
    NoActivePlayers,

    #[error("Gem amount can't be negative: {0}")]
    NegativeAmount(i64),

    #[error("A card has already been drawn this turn")]
    AlreadyDrawn,

    #[error("A card must be drawn before a turn can end")]
    NotYetDrawn,

    #[error("This turn has already been resolved")]
    TurnAlreadyResolved,

    #[error("Player {0} is still active and can't be in the exit set")]
    InvalidExitSet(String),

    #[error("The round has ended, no more turns can be played")]
    RoundExhausted,

    #[error("The turns of this round have already been consumed")]
    AlreadyConsumed,

    #[error("Gems can be moved to the chest only once the round is over")]
    RoundNotOver,

    #[error("Player {0} has already left the cave")]
    PlayerAlreadyExited(String),

    #[error("A round can seat at most 256 players, got {0}")]
    TooManyPlayers(usize),

    #[error("No player with id {0} in this round")]
    UnknownPlayer(u8),

    #[error("Invalid gem value for a {kind} card: {gems}")]
    InvalidGemValue { kind: String, gems: u32 },

    #[error("Deck variant {0} is not supported")]
    UnsupportedDeck(String),

    #[error("No more rounds to play")]
    GameOver,

    #[error("There are still rounds to play")]
    GameNotOver,
}
