//! Events produced while a round is played.
//!
//! Turns and rounds report what happened as a list of events so the
//! presentation layer can animate or log them without diffing state.

use crate::card::{Card, Gems};
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Events that occur as a result of turn and round operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was drawn and added to the path
    CardDrawn { player: PlayerId, card: Card },

    /// A treasure was split among the players in the cave
    TreasureSplit {
        gems: Gems,
        /// Gems each recipient received, after the gem modifier
        share: Gems,
        recipients: Vec<PlayerId>,
        /// Leftover gems placed on the path
        remainder: Gems,
    },

    /// A player leaving alone claimed every relic on the path
    RelicsRedeemed { player: PlayerId, gems: Gems },

    /// The gems on the path were split among the leaving players
    PathDistributed {
        gems: Gems,
        share: Gems,
        recipients: Vec<PlayerId>,
        remainder: Gems,
    },

    /// Players left the cave
    PlayersExited { players: Vec<PlayerId> },

    /// The round was closed
    RoundEnded(RoundOutcome),
}

/// Result of closing a round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Sacks moved into chests, by player
    pub banked: Vec<(PlayerId, Gems)>,
    /// Sacks left behind by players still in the cave
    pub lost: Vec<(PlayerId, Gems)>,
}
