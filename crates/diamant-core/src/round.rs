//! Round driver.
//!
//! A `Round` hands out one [`Turn`] at a time until the end condition holds
//! or nobody is left in the cave, then banks the sacks of the players who
//! left. The turn sequence can be walked only once: after `end_round` the
//! round is consumed and a fresh `Round` must be built to play again.

use crate::deck::Deck;
use crate::effect::RoundEffect;
use crate::error::GameError;
use crate::events::RoundOutcome;
use crate::player::PlayerInRound;
use crate::state::RoundState;
use crate::turn::Turn;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Progress through the turn sequence of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Traversal {
    /// No turn handed out yet
    NotStarted,
    /// At least one turn handed out
    InProgress,
    /// The round has been closed with `end_round`
    Consumed,
}

/// A single round of the game
#[derive(Debug)]
pub struct Round<'p> {
    state: RoundState<'p>,
    effect: RoundEffect,
    traversal: Traversal,
    /// Turns handed out so far
    turn_number: u32,
}

impl<'p> Round<'p> {
    /// Start a round. Every player's sack and choice are reset first.
    pub fn new(
        players: &'p mut [PlayerInRound],
        deck: Deck,
        effect: RoundEffect,
    ) -> Result<Self, GameError> {
        players.iter_mut().for_each(PlayerInRound::reset_for_round);
        info!(players = players.len(), cards = deck.remaining(), "round started");

        Ok(Self {
            state: RoundState::new(players, deck)?,
            effect,
            traversal: Traversal::NotStarted,
            turn_number: 0,
        })
    }

    pub fn state(&self) -> &RoundState<'p> {
        &self.state
    }

    pub fn effect(&self) -> &RoundEffect {
        &self.effect
    }

    /// Rules in effect for this round, for display
    pub fn description(&self) -> String {
        self.effect.description()
    }

    /// Number of turns handed out so far
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Check if another turn can be played
    pub fn has_next(&self) -> bool {
        self.state.rotation().has_next() && !self.effect.is_end_condition_met(&self.state)
    }

    /// Hand out the turn of the next player in the cave
    pub fn next(&mut self) -> Result<Turn<'_, 'p>, GameError> {
        if self.traversal == Traversal::Consumed {
            return Err(GameError::AlreadyConsumed);
        }
        if !self.has_next() {
            return Err(GameError::RoundExhausted);
        }

        let player = self.state.rotation_mut().next()?;
        self.traversal = Traversal::InProgress;
        self.turn_number += 1;

        Ok(Turn::new(player, &mut self.state, &self.effect))
    }

    /// Close the round: every player who left banks their sack.
    ///
    /// Players still in the cave keep their sack until the next round resets
    /// it, which means they lose it.
    pub fn end_round(&mut self) -> Result<RoundOutcome, GameError> {
        if self.traversal == Traversal::Consumed {
            return Err(GameError::AlreadyConsumed);
        }
        if self.has_next() {
            return Err(GameError::RoundNotOver);
        }
        self.traversal = Traversal::Consumed;

        let rotation = self.state.rotation_mut();
        let mut outcome = RoundOutcome::default();

        for id in rotation.exited_players() {
            let player = rotation.player_mut(id)?;
            outcome.banked.push((id, player.sack_gems()));
            player.add_sack_to_chest();
        }
        for id in rotation.active_players() {
            outcome.lost.push((id, rotation.player(id)?.sack_gems()));
        }

        info!(
            turns = self.turn_number,
            banked = outcome.banked.len(),
            lost = outcome.lost.len(),
            "round ended"
        );
        Ok(outcome)
    }
}
