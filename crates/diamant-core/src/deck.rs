//! The cave deck.
//!
//! A `Deck` owns an ordered sequence of cards drawn from the top (the end of
//! the sequence) and remembers the composition it was built with. Heuristics
//! need both the original totals and what is left, so the two are exposed
//! separately.

use crate::card::{Card, CardKind, Gems, TrapKind, RELIC_GEM_VALUES, TREASURE_GEM_VALUES};
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Treasure tiers of the standard deck as (gem value, copies)
const STANDARD_TREASURES: [(Gems, usize); 12] = [
    (1, 1),
    (2, 1),
    (3, 1),
    (4, 1),
    (5, 2),
    (7, 2),
    (9, 1),
    (11, 2),
    (13, 1),
    (14, 1),
    (15, 1),
    (17, 1),
];

/// Trap cards per trap kind in the standard deck
const STANDARD_TRAPS_PER_KIND: usize = 3;

/// Relic cards in the standard deck
const STANDARD_RELICS: usize = 5;

/// Deck variants a game can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeckKind {
    /// 15 treasures, 15 traps (3 per kind) and 5 relics
    #[default]
    Standard,
    /// Reserved for a deck with special cards
    Special,
}

impl DeckKind {
    /// Build a freshly shuffled deck of this kind
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Deck, GameError> {
        match self {
            DeckKind::Standard => Ok(Deck::standard(rng)),
            DeckKind::Special => Err(GameError::UnsupportedDeck("Special".to_string())),
        }
    }
}

/// Composition of a deck at construction time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckTotals {
    pub cards: usize,
    pub treasures: usize,
    pub traps: usize,
    pub relics: usize,
    pub specials: usize,
    /// Number of distinct trap kinds
    pub trap_kinds: usize,
}

impl DeckTotals {
    fn of(cards: &[Card]) -> Self {
        let mut totals = DeckTotals {
            cards: cards.len(),
            ..Default::default()
        };
        let mut kinds = HashSet::new();

        for card in cards {
            match card {
                Card::Treasure { .. } => totals.treasures += 1,
                Card::Trap(kind) => {
                    kinds.insert(*kind);
                    totals.traps += 1;
                }
                Card::Relic { .. } => totals.relics += 1,
                Card::Special => totals.specials += 1,
            }
        }

        totals.trap_kinds = kinds.len();
        totals
    }
}

/// An ordered, shuffled sequence of cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    totals: DeckTotals,
}

impl Deck {
    /// Create a deck from cards in draw order (the last card is drawn first)
    pub fn new(cards: Vec<Card>) -> Self {
        let totals = DeckTotals::of(&cards);
        Self { cards, totals }
    }

    /// Create the standard 35 card deck, shuffled once
    pub fn standard<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut builder = DeckBuilder::new();

        for (gems, copies) in STANDARD_TREASURES {
            builder.push_copies(Card::Treasure { gems }, copies);
        }
        for kind in TrapKind::ALL {
            builder.add_traps(kind, STANDARD_TRAPS_PER_KIND);
        }
        builder.add_random_relics(STANDARD_RELICS, rng);

        builder.shuffle(rng).build()
    }

    /// Draw the top card
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Look at the top card without drawing it
    pub fn peek(&self) -> Result<Card, GameError> {
        self.cards.last().copied().ok_or(GameError::EmptyDeck)
    }

    /// Check if there are still cards to draw
    pub fn has_next(&self) -> bool {
        !self.cards.is_empty()
    }

    /// Number of cards left to draw
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Number of cards of a category left to draw
    pub fn remaining_of(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|c| c.kind() == kind).count()
    }

    /// Number of cards the deck was built with
    pub fn size(&self) -> usize {
        self.totals.cards
    }

    /// Composition the deck was built with
    pub fn totals(&self) -> &DeckTotals {
        &self.totals
    }

    /// A new deck with the remaining cards of this one in random order.
    ///
    /// The copy keeps the composition this deck was built with, so its
    /// `totals` still describe the full deck. This deck is left untouched.
    pub fn shuffled_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> Deck {
        let mut cards = self.cards.clone();
        cards.shuffle(rng);
        Deck {
            cards,
            totals: self.totals,
        }
    }
}

/// Composes a custom deck card by card
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
    cards: Vec<Card>,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add treasure cards of a given gem tier
    pub fn add_treasures(&mut self, gems: Gems, copies: usize) -> Result<&mut Self, GameError> {
        if !TREASURE_GEM_VALUES.contains(&gems) {
            return Err(GameError::InvalidGemValue {
                kind: "treasure".to_string(),
                gems,
            });
        }
        Ok(self.push_copies(Card::Treasure { gems }, copies))
    }

    /// Add trap cards of a given kind
    pub fn add_traps(&mut self, kind: TrapKind, copies: usize) -> &mut Self {
        self.push_copies(Card::Trap(kind), copies)
    }

    /// Add a relic with a fixed gem value
    pub fn add_relic(&mut self, gems: Gems) -> Result<&mut Self, GameError> {
        if !RELIC_GEM_VALUES.contains(&gems) {
            return Err(GameError::InvalidGemValue {
                kind: "relic".to_string(),
                gems,
            });
        }
        Ok(self.push_copies(Card::relic(gems), 1))
    }

    /// Add relics, each with a value picked independently at random
    pub fn add_random_relics<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> &mut Self {
        for _ in 0..count {
            let gems = RELIC_GEM_VALUES[rng.gen_range(0..RELIC_GEM_VALUES.len())];
            self.cards.push(Card::relic(gems));
        }
        self
    }

    /// Shuffle the cards added so far
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        self.cards.shuffle(rng);
        self
    }

    /// Finish the deck
    pub fn build(&mut self) -> Deck {
        Deck::new(std::mem::take(&mut self.cards))
    }

    fn push_copies(&mut self, card: Card, copies: usize) -> &mut Self {
        self.cards.extend(std::iter::repeat(card).take(copies));
        self
    }
}
