//! Card values.
//!
//! This module contains:
//! - The `Card` sum type (treasure, trap, relic and the reserved special card)
//! - Trap kinds
//! - The gem tiers a treasure or relic may carry

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount of gems
pub type Gems = u32;

/// Gem values a treasure card can carry
pub const TREASURE_GEM_VALUES: [Gems; 12] = [1, 2, 3, 4, 5, 7, 9, 11, 13, 14, 15, 17];

/// Candidate gem values for a relic card, one is picked at random per card
pub const RELIC_GEM_VALUES: [Gems; 5] = [5, 7, 8, 10, 12];

/// Trap kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrapKind {
    Snake,
    Lava,
    Spider,
    BatteringRam,
    Boulder,
}

impl TrapKind {
    /// Every trap kind, in declaration order
    pub const ALL: [TrapKind; 5] = [
        TrapKind::Snake,
        TrapKind::Lava,
        TrapKind::Spider,
        TrapKind::BatteringRam,
        TrapKind::Boulder,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            TrapKind::Snake => "Snake",
            TrapKind::Lava => "Lava",
            TrapKind::Spider => "Spider",
            TrapKind::BatteringRam => "Battering ram",
            TrapKind::Boulder => "Boulder",
        }
    }
}

/// Card category, used for deck statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Treasure,
    Trap,
    Relic,
    Special,
}

/// A card of the cave deck
///
/// Cards never change once built, except for the one-shot `redeemed` flag of
/// a relic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    /// Gems split among the active players when drawn
    Treasure { gems: Gems },
    /// A hazard; repeated kinds end the round under the standard rules
    Trap(TrapKind),
    /// Gems claimable only by a player leaving the cave alone
    Relic { gems: Gems, redeemed: bool },
    /// Reserved for the special deck, has no effect when drawn
    Special,
}

impl Card {
    /// Create an unredeemed relic
    pub fn relic(gems: Gems) -> Self {
        Card::Relic {
            gems,
            redeemed: false,
        }
    }

    /// Category of this card
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Treasure { .. } => CardKind::Treasure,
            Card::Trap(_) => CardKind::Trap,
            Card::Relic { .. } => CardKind::Relic,
            Card::Special => CardKind::Special,
        }
    }

    /// Gem value for treasures and relics
    pub fn gem_value(&self) -> Option<Gems> {
        match self {
            Card::Treasure { gems } | Card::Relic { gems, .. } => Some(*gems),
            Card::Trap(_) | Card::Special => None,
        }
    }

    /// Trap kind, if this card is a trap
    pub fn trap_kind(&self) -> Option<TrapKind> {
        match self {
            Card::Trap(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether this card is a relic nobody has claimed yet
    pub fn is_redeemable(&self) -> bool {
        matches!(self, Card::Relic { redeemed: false, .. })
    }

    /// Mark a relic as claimed, returning its value.
    ///
    /// Returns `None` for any other card and for relics already redeemed.
    pub fn redeem(&mut self) -> Option<Gems> {
        match self {
            Card::Relic { gems, redeemed } if !*redeemed => {
                *redeemed = true;
                Some(*gems)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Treasure { gems } => write!(f, "Treasure ({} gems)", gems),
            Card::Trap(kind) => write!(f, "Trap: {}", kind.name()),
            Card::Relic { gems, redeemed } => {
                if *redeemed {
                    write!(f, "Relic ({} gems, redeemed)", gems)
                } else {
                    write!(f, "Relic ({} gems)", gems)
                }
            }
            Card::Special => write!(f, "Special"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_kinds() {
        assert_eq!(Card::Treasure { gems: 5 }.kind(), CardKind::Treasure);
        assert_eq!(Card::Trap(TrapKind::Lava).kind(), CardKind::Trap);
        assert_eq!(Card::relic(7).kind(), CardKind::Relic);
        assert_eq!(Card::Special.kind(), CardKind::Special);
    }

    #[test]
    fn test_gem_value() {
        assert_eq!(Card::Treasure { gems: 11 }.gem_value(), Some(11));
        assert_eq!(Card::relic(8).gem_value(), Some(8));
        assert_eq!(Card::Trap(TrapKind::Snake).gem_value(), None);
        assert_eq!(Card::Special.gem_value(), None);
    }

    #[test]
    fn test_relic_redeems_once() {
        let mut relic = Card::relic(10);
        assert!(relic.is_redeemable());

        assert_eq!(relic.redeem(), Some(10));
        assert!(!relic.is_redeemable());

        // Second claim yields nothing
        assert_eq!(relic.redeem(), None);
    }

    #[test]
    fn test_only_relics_redeem() {
        let mut treasure = Card::Treasure { gems: 3 };
        assert_eq!(treasure.redeem(), None);
        assert_eq!(treasure, Card::Treasure { gems: 3 });
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::Trap(TrapKind::BatteringRam).to_string(), "Trap: Battering ram");
        assert_eq!(Card::Treasure { gems: 2 }.to_string(), "Treasure (2 gems)");
    }
}
