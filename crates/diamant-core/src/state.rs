//! Shared context of one round.
//!
//! `RoundState` owns the deck, the player rotation, the log of drawn cards
//! (the path) and the gems left on the path. Turns mutate it through a
//! mutable borrow while CPU logic and the presentation layer only ever get a
//! shared reference.

use crate::card::{Card, Gems, TrapKind};
use crate::deck::Deck;
use crate::error::GameError;
use crate::player::{PlayerId, PlayerInRound};
use crate::rotation::RoundRotation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Mutable context of a round
#[derive(Debug)]
pub struct RoundState<'p> {
    deck: Deck,
    rotation: RoundRotation<'p>,
    /// Cards drawn so far, in draw order
    drawn: Vec<Card>,
    /// Gems not claimed by anyone yet
    path_gems: Gems,
}

impl<'p> RoundState<'p> {
    /// Create the state of a new round. Every player must be in the cave.
    pub fn new(players: &'p mut [PlayerInRound], deck: Deck) -> Result<Self, GameError> {
        Ok(Self {
            deck,
            rotation: RoundRotation::new(players)?,
            drawn: Vec::new(),
            path_gems: 0,
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub(crate) fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub fn rotation(&self) -> &RoundRotation<'p> {
        &self.rotation
    }

    pub(crate) fn rotation_mut(&mut self) -> &mut RoundRotation<'p> {
        &mut self.rotation
    }

    /// Append a card to the path
    pub fn add_drawn_card(&mut self, card: Card) {
        self.drawn.push(card);
    }

    /// Every card drawn this round, in draw order
    pub fn drawn_cards(&self) -> &[Card] {
        &self.drawn
    }

    /// Relics drawn this round, redeemed or not, in draw order
    pub fn drawn_relics(&self) -> Vec<Card> {
        self.drawn
            .iter()
            .filter(|c| matches!(c, Card::Relic { .. }))
            .copied()
            .collect()
    }

    /// Kinds of the traps drawn this round, in draw order
    pub fn drawn_traps(&self) -> Vec<TrapKind> {
        self.drawn.iter().filter_map(Card::trap_kind).collect()
    }

    /// Number of different trap kinds drawn this round
    pub fn distinct_trap_kinds(&self) -> usize {
        self.drawn
            .iter()
            .filter_map(Card::trap_kind)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Relics on the path nobody has claimed yet
    pub fn redeemable_relics(&self) -> Vec<Card> {
        self.drawn
            .iter()
            .filter(|c| c.is_redeemable())
            .copied()
            .collect()
    }

    /// Claim every relic on the path, returning their total value
    pub(crate) fn redeem_relics(&mut self) -> Gems {
        self.drawn.iter_mut().filter_map(Card::redeem).sum()
    }

    pub fn path_gems(&self) -> Gems {
        self.path_gems
    }

    /// Overwrite the gems on the path
    pub fn set_path_gems(&mut self, gems: i32) -> Result<(), GameError> {
        if gems < 0 {
            return Err(GameError::NegativeAmount(i64::from(gems)));
        }
        self.path_gems = gems as Gems;
        Ok(())
    }

    pub(crate) fn add_path_gems(&mut self, gems: Gems) {
        self.path_gems = self.path_gems.saturating_add(gems);
    }

    /// Empty the path, returning what was on it
    pub(crate) fn take_path_gems(&mut self) -> Gems {
        std::mem::take(&mut self.path_gems)
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Result<&PlayerInRound, GameError> {
        self.rotation.player(id)
    }

    /// Owned copy of everything a renderer needs
    pub fn snapshot(&self) -> RoundSnapshot {
        let names = |ids: Vec<PlayerId>| -> Vec<String> {
            ids.into_iter()
                .filter_map(|id| self.rotation.player(id).ok())
                .map(|p| p.name.clone())
                .collect()
        };

        RoundSnapshot {
            drawn_cards: self.drawn.clone(),
            path_gems: self.path_gems,
            remaining_cards: self.deck.remaining(),
            redeemable_relics: self.redeemable_relics().len(),
            active: names(self.rotation.active_players()),
            exited: names(self.rotation.exited_players()),
            players: self.rotation.players().to_vec(),
        }
    }
}

/// Serializable view of a round in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub drawn_cards: Vec<Card>,
    pub path_gems: Gems,
    pub remaining_cards: usize,
    pub redeemable_relics: usize,
    /// Names of the players still in the cave
    pub active: Vec<String>,
    /// Names of the players who left
    pub exited: Vec<String>,
    pub players: Vec<PlayerInRound>,
}

impl RoundSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
