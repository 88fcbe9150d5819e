//! Turn state machine.
//!
//! A turn is bound to one player and goes through
//! `NotDrawn -> Drawn -> Resolved`:
//! - the draw phase reveals the top card and splits treasures among the
//!   players still in the cave
//! - the decision phase happens outside the engine; callers mark the players
//!   who leave with [`Turn::exit_player`]
//! - `end_turn` hands relics to a player leaving alone and splits the path
//!   among everyone who left this turn

use crate::card::{Card, Gems};
use crate::effect::RoundEffect;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::player::PlayerId;
use crate::state::RoundState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Turn phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No card drawn yet
    NotDrawn,
    /// A card has been drawn, waiting for decisions
    Drawn,
    /// Terminal
    Resolved,
}

/// One player's turn, borrowing the shared round state
#[derive(Debug)]
pub struct Turn<'r, 'p> {
    player: PlayerId,
    state: &'r mut RoundState<'p>,
    effect: &'r RoundEffect,
    phase: TurnPhase,
    /// Position of this turn's card in the path
    drawn: Option<usize>,
}

impl<'r, 'p> Turn<'r, 'p> {
    pub fn new(player: PlayerId, state: &'r mut RoundState<'p>, effect: &'r RoundEffect) -> Self {
        Self {
            player,
            state,
            effect,
            phase: TurnPhase::NotDrawn,
            drawn: None,
        }
    }

    /// Player whose turn it is
    pub fn current_player(&self) -> PlayerId {
        self.player
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Read access to the round state, for decisions and rendering
    pub fn state(&self) -> &RoundState<'p> {
        &*self.state
    }

    /// Card drawn this turn, as it currently lies on the path
    pub fn drawn_card(&self) -> Option<&Card> {
        self.drawn
            .and_then(|index| self.state.drawn_cards().get(index))
    }

    /// Draw the top card and split treasures among the players in the cave
    pub fn execute_draw_phase(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != TurnPhase::NotDrawn {
            return Err(GameError::AlreadyDrawn);
        }

        let card = self.state.deck_mut().draw()?;
        self.state.add_drawn_card(card);
        self.drawn = Some(self.state.drawn_cards().len() - 1);
        self.phase = TurnPhase::Drawn;
        debug!(player = self.player, %card, "card drawn");

        let mut events = vec![GameEvent::CardDrawn {
            player: self.player,
            card,
        }];

        if let Card::Treasure { gems } = card {
            let recipients = self.state.rotation().active_players();
            let (share, remainder) = self.divide_gems(gems, &recipients)?;
            events.push(GameEvent::TreasureSplit {
                gems,
                share,
                recipients,
                remainder,
            });
        }

        Ok(events)
    }

    /// Take a player out of the cave during the decision phase
    pub fn exit_player(&mut self, player: PlayerId) -> Result<(), GameError> {
        match self.phase {
            TurnPhase::NotDrawn => Err(GameError::NotYetDrawn),
            TurnPhase::Resolved => Err(GameError::TurnAlreadyResolved),
            TurnPhase::Drawn => self.state.rotation_mut().exit(player),
        }
    }

    /// Resolve the turn for the players who left during it.
    ///
    /// Every member of `exiting` must already be marked as exited. A player
    /// leaving alone also claims every unredeemed relic on the path.
    pub fn end_turn(&mut self, exiting: &BTreeSet<PlayerId>) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            TurnPhase::NotDrawn => return Err(GameError::NotYetDrawn),
            TurnPhase::Resolved => return Err(GameError::TurnAlreadyResolved),
            TurnPhase::Drawn => {}
        }

        for &id in exiting {
            let player = self.state.player(id)?;
            if !player.has_exited() {
                return Err(GameError::InvalidExitSet(player.name.clone()));
            }
        }

        self.phase = TurnPhase::Resolved;
        if exiting.is_empty() {
            return Ok(Vec::new());
        }

        let recipients: Vec<PlayerId> = exiting.iter().copied().collect();
        let mut events = vec![GameEvent::PlayersExited {
            players: recipients.clone(),
        }];

        if let [alone] = *recipients.as_slice() {
            let gems = self.state.redeem_relics();
            if gems > 0 {
                self.state.rotation_mut().player_mut(alone)?.add_sack_gems(gems);
                info!(player = alone, gems, "relics redeemed");
                events.push(GameEvent::RelicsRedeemed {
                    player: alone,
                    gems,
                });
            }
        }

        let gems = self.state.take_path_gems();
        let (share, remainder) = self.divide_gems(gems, &recipients)?;
        events.push(GameEvent::PathDistributed {
            gems,
            share,
            recipients,
            remainder,
        });

        Ok(events)
    }

    /// Split `gems` evenly among `recipients`. Each share goes through the gem
    /// modifier, the remainder goes back on the path untouched.
    fn divide_gems(
        &mut self,
        gems: Gems,
        recipients: &[PlayerId],
    ) -> Result<(Gems, Gems), GameError> {
        if recipients.is_empty() {
            self.state.add_path_gems(gems);
            return Ok((0, gems));
        }

        let count = recipients.len() as Gems;
        let share = self.effect.apply_gem_modifier(self.state, gems / count);
        let remainder = gems % count;

        for &id in recipients {
            self.state.rotation_mut().player_mut(id)?.add_sack_gems(share);
        }
        self.state.add_path_gems(remainder);
        debug!(gems, share, remainder, recipients = recipients.len(), "gems divided");

        Ok((share, remainder))
    }
}
