//! Game driver.
//!
//! A `Game` owns the roster for the whole match and plays the configured
//! number of rounds. Every round gets a freshly shuffled copy of the deck the
//! game was set up with. CPU decisions go through [`CpuLogic`], human
//! decisions through a callback provided by the presentation layer.

use crate::card::{Card, Gems};
use crate::cpu::CpuLogic;
use crate::deck::Deck;
use crate::effect::RoundEffect;
use crate::error::GameError;
use crate::events::{GameEvent, RoundOutcome};
use crate::leaderboard::Leaderboard;
use crate::player::{Choice, PlayerId, PlayerInRound};
use crate::round::Round;
use crate::settings::GameSettings;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// What happened during one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 1-based round number
    pub round: u32,
    pub turns: u32,
    pub drawn_cards: Vec<Card>,
    pub outcome: RoundOutcome,
    /// Every event of the round, in order, ending with `RoundEnded`
    pub events: Vec<GameEvent>,
    /// Chest of every player once the round is banked, in roster order
    pub chests: Vec<(String, Gems)>,
}

/// A full game
#[derive(Debug)]
pub struct Game {
    settings: GameSettings,
    players: Vec<PlayerInRound>,
    /// Deck every round is shuffled from
    deck: Deck,
    effect: RoundEffect,
    cpu: CpuLogic,
    rng: StdRng,
    /// Rounds played so far
    current_round: u32,
}

impl Game {
    /// Set up a game. The settings are trusted: call
    /// [`GameSettings::validate`] first when they come from a user.
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        let (mut rng, cpu) = match settings.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                CpuLogic::with_seed(settings.cpu_difficulty, seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), CpuLogic::new(settings.cpu_difficulty)),
        };
        let deck = settings.deck.build(&mut rng)?;

        Ok(Self {
            players: settings.build_players(),
            effect: settings.round_effect(),
            settings,
            deck,
            cpu,
            rng,
            current_round: 0,
        })
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn players(&self) -> &[PlayerInRound] {
        &self.players
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Option<&PlayerInRound> {
        self.players.get(usize::from(id))
    }

    /// Number of rounds played so far
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn rounds(&self) -> u32 {
        self.settings.rounds
    }

    /// Rules every round is played with, for display
    pub fn description(&self) -> String {
        self.effect.description()
    }

    pub fn has_next_round(&self) -> bool {
        self.current_round < self.settings.rounds
    }

    /// Play the next round to the end.
    ///
    /// After each draw that leaves the round open, every player still in the
    /// cave decides against the same state: CPU players through the game's
    /// CPU logic, humans through `human`, which receives the player's name.
    /// Choices are applied together, then the turn is resolved.
    pub fn play_round<F>(&mut self, mut human: F) -> Result<RoundSummary, GameError>
    where
        F: FnMut(&str) -> Choice,
    {
        if !self.has_next_round() {
            return Err(GameError::GameOver);
        }
        // Counted as played only once it has been closed
        let number = self.current_round + 1;
        info!("Starting round {} of {}", number, self.settings.rounds);

        let deck = self.deck.shuffled_copy(&mut self.rng);
        let effect = self.effect;
        let cpu = &mut self.cpu;
        let mut round = Round::new(&mut self.players, deck, effect)?;
        let mut events = Vec::new();

        while round.has_next() {
            let mut turn = round.next()?;
            events.extend(turn.execute_draw_phase()?);

            let mut exiting = BTreeSet::new();
            if !effect.is_end_condition_met(turn.state()) {
                let state = turn.state();
                for id in state.rotation().active_players() {
                    let player = state.player(id)?;
                    let choice = if player.is_cpu() {
                        cpu.choose(state)?
                    } else {
                        human(&player.name)
                    };
                    if choice == Choice::Exit {
                        exiting.insert(id);
                    }
                }
            }

            for &id in &exiting {
                turn.exit_player(id)?;
            }
            events.extend(turn.end_turn(&exiting)?);
        }

        let outcome = round.end_round()?;
        let turns = round.turn_number();
        let drawn_cards = round.state().drawn_cards().to_vec();
        drop(round);
        self.current_round = number;
        events.push(GameEvent::RoundEnded(outcome.clone()));

        let chests = self
            .players
            .iter()
            .map(|p| (p.name.clone(), p.chest_gems()))
            .collect();
        info!("Round {} over after {} turns", number, turns);

        Ok(RoundSummary {
            round: number,
            turns,
            drawn_cards,
            outcome,
            events,
            chests,
        })
    }

    /// Play every remaining round
    pub fn play_to_end<F>(&mut self, mut human: F) -> Result<Vec<RoundSummary>, GameError>
    where
        F: FnMut(&str) -> Choice,
    {
        let mut summaries = Vec::new();
        while self.has_next_round() {
            summaries.push(self.play_round(&mut human)?);
        }
        Ok(summaries)
    }

    /// Final standings, once every round has been played
    pub fn leaderboard(&self) -> Result<Leaderboard, GameError> {
        if self.has_next_round() {
            return Err(GameError::GameNotOver);
        }
        Ok(Leaderboard::from_players(&self.players))
    }
}
