//! Integration tests for the Diamant round engine.
//!
//! These tests drive rounds turn by turn through the public API, and whole
//! games through the game driver.

use diamant_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test output. Set `RUST_LOG=diamant_core=debug`
/// to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn roster(names: &[&str]) -> Vec<PlayerInRound> {
    names.iter().map(|n| PlayerInRound::human(*n)).collect()
}

/// Deck drawing `cards` from first to last
fn path(cards: &[Card]) -> Deck {
    Deck::new(cards.iter().rev().copied().collect())
}

fn exits(ids: &[PlayerId]) -> BTreeSet<PlayerId> {
    ids.iter().copied().collect()
}

/// Play a turn where `leaving` players exit after the draw
fn play_turn(round: &mut Round, leaving: &[PlayerId]) -> (PlayerId, Vec<GameEvent>) {
    let mut turn = round.next().unwrap();
    let player = turn.current_player();
    let mut events = turn.execute_draw_phase().unwrap();
    for &id in leaving {
        turn.exit_player(id).unwrap();
    }
    events.extend(turn.end_turn(&exits(leaving)).unwrap());
    (player, events)
}

#[test]
fn test_lone_exit_claims_relic_and_path() {
    init_tracing();
    let mut players = roster(&["Ada", "Linus", "Grace"]);
    let deck = path(&[
        Card::Treasure { gems: 5 },
        Card::relic(8),
        Card::Treasure { gems: 3 },
        Card::Trap(TrapKind::Snake),
        Card::Trap(TrapKind::Snake),
    ]);
    let mut round = Round::new(&mut players, deck, RoundEffect::default()).unwrap();

    let (first, _) = play_turn(&mut round, &[]);
    assert_eq!(first, 0);
    assert_eq!(round.state().path_gems(), 2);

    let (second, events) = play_turn(&mut round, &[1]);
    assert_eq!(second, 1);
    assert_eq!(
        events[1..].to_vec(),
        vec![
            GameEvent::PlayersExited { players: vec![1] },
            GameEvent::RelicsRedeemed { player: 1, gems: 8 },
            GameEvent::PathDistributed {
                gems: 2,
                share: 2,
                recipients: vec![1],
                remainder: 0,
            },
        ]
    );
    assert_eq!(round.state().player(1).unwrap().sack_gems(), 11);

    // Linus is out: the rotation goes on with Grace, then Ada
    let order: Vec<PlayerId> = (0..3).map(|_| play_turn(&mut round, &[]).0).collect();
    assert_eq!(order, vec![2, 0, 2]);
    assert!(!round.has_next());

    let outcome = round.end_round().unwrap();
    assert_eq!(outcome.banked, vec![(1, 11)]);
    assert_eq!(outcome.lost, vec![(0, 2), (2, 2)]);
    drop(round);

    let chests: Vec<Gems> = players.iter().map(|p| p.chest_gems()).collect();
    assert_eq!(chests, vec![0, 11, 0]);
}

#[test]
fn test_group_exit_leaves_relic_for_later() {
    let mut players = roster(&["Ada", "Linus", "Grace"]);
    let deck = path(&[
        Card::relic(10),
        Card::Treasure { gems: 4 },
        Card::Treasure { gems: 2 },
        Card::Trap(TrapKind::Boulder),
    ]);
    let mut round = Round::new(&mut players, deck, RoundEffect::default()).unwrap();

    // Relic drawn, Ada and Grace leave together: nobody gets it
    play_turn(&mut round, &[0, 2]);
    assert_eq!(round.state().redeemable_relics(), vec![Card::relic(10)]);

    // Linus alone takes the whole treasure, then leaves with the relic
    play_turn(&mut round, &[]);
    assert_eq!(round.state().player(1).unwrap().sack_gems(), 4);
    play_turn(&mut round, &[1]);

    assert_eq!(round.state().player(1).unwrap().sack_gems(), 16);
    assert!(round.state().redeemable_relics().is_empty());
    assert_eq!(round.state().drawn_relics().len(), 1);
    assert!(!round.has_next());

    let outcome = round.end_round().unwrap();
    assert_eq!(outcome.banked, vec![(0, 0), (1, 16), (2, 0)]);
    assert!(outcome.lost.is_empty());
}

#[test]
fn test_gems_are_conserved_while_everyone_stays() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut players = roster(&["A", "B", "C", "D"]);
    let mut round = Round::new(&mut players, Deck::standard(&mut rng), RoundEffect::default())
        .unwrap();

    while round.has_next() {
        play_turn(&mut round, &[]);

        let state = round.state();
        let drawn: Gems = state
            .drawn_cards()
            .iter()
            .filter(|c| c.kind() == CardKind::Treasure)
            .filter_map(Card::gem_value)
            .sum();
        let sacks: Gems = (0..4).map(|id| state.player(id).unwrap().sack_gems()).sum();
        assert_eq!(sacks + state.path_gems(), drawn);
    }

    // 15 traps of 5 kinds: a kind repeats before the deck runs out
    assert!(round.state().deck().has_next());
    assert!(round.turn_number() <= 35);
    let outcome = round.end_round().unwrap();
    assert!(outcome.banked.is_empty());
    assert_eq!(outcome.lost.len(), 4);
}

#[test]
fn test_gems_are_conserved_with_exits() {
    let mut redemptions = 0;
    let mut distributions = 0;

    for seed in 0..40 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut players = roster(&["A", "B", "C", "D"]);
        let deck = Deck::standard(&mut rng);
        let mut round = Round::new(&mut players, deck, RoundEffect::default()).unwrap();
        let mut redeemed: Gems = 0;

        while round.has_next() {
            let mut turn = round.next().unwrap();
            let mut events = turn.execute_draw_phase().unwrap();

            let leaving: Vec<PlayerId> = turn
                .state()
                .rotation()
                .active_players()
                .into_iter()
                .filter(|_| rng.gen_bool(0.25))
                .collect();
            for &id in &leaving {
                turn.exit_player(id).unwrap();
            }
            events.extend(turn.end_turn(&exits(&leaving)).unwrap());

            for event in &events {
                match event {
                    GameEvent::RelicsRedeemed { gems, .. } => {
                        redeemed += gems;
                        redemptions += 1;
                    }
                    GameEvent::PathDistributed { gems, .. } if *gems > 0 => distributions += 1,
                    _ => {}
                }
            }

            let state = round.state();
            let treasure: Gems = state
                .drawn_cards()
                .iter()
                .filter(|c| c.kind() == CardKind::Treasure)
                .filter_map(Card::gem_value)
                .sum();
            let sacks: Gems = (0..4).map(|id| state.player(id).unwrap().sack_gems()).sum();
            assert_eq!(sacks + state.path_gems(), treasure + redeemed, "seed {}", seed);
        }
    }

    assert!(redemptions > 0);
    assert!(distributions > 0);
}

#[test]
fn test_extreme_multiplier_rejected_but_never_panics() {
    let settings = GameSettings {
        player_names: Vec::new(),
        cpu_players: 3,
        gem_modifier: GemModifier::GemMultiplier { factor: 1e12 },
        rounds: 1,
        seed: Some(1),
        ..Default::default()
    };
    assert!(settings.validate().is_err());

    // The engine trusts its input: shares, sacks and chests stop at the maximum
    let mut game = Game::new(settings).unwrap();
    let summary = game.play_round(|_| Choice::Stay).unwrap();

    for event in &summary.events {
        if let GameEvent::TreasureSplit {
            gems,
            share,
            recipients,
            ..
        } = event
        {
            if !recipients.is_empty() && *gems as usize >= recipients.len() {
                assert_eq!(*share, Gems::MAX);
            }
        }
    }
    assert!(summary
        .outcome
        .banked
        .iter()
        .all(|(id, gems)| game.player(*id).map(|p| p.chest_gems()) == Some(*gems)));
}

#[test]
fn test_risky_reward_bonus() {
    let mut players = roster(&["Ada", "Linus", "Grace"]);
    let deck = path(&[
        Card::Trap(TrapKind::Lava),
        Card::Trap(TrapKind::Spider),
        Card::Treasure { gems: 7 },
        Card::Treasure { gems: 1 },
    ]);
    let effect = RoundEffect::new(EndCondition::Standard, GemModifier::RiskyReward { bonus: 10 });
    let mut round = Round::new(&mut players, deck, effect).unwrap();

    play_turn(&mut round, &[]);
    play_turn(&mut round, &[]);
    let (_, events) = play_turn(&mut round, &[]);

    assert_eq!(
        events[1],
        GameEvent::TreasureSplit {
            gems: 7,
            share: 22,
            recipients: vec![0, 1, 2],
            remainder: 1,
        }
    );
    let snapshot = round.state().snapshot();
    assert_eq!(snapshot.path_gems, 1);
    assert!(snapshot.players.iter().all(|p| p.sack_gems() == 22));
}

#[test]
fn test_turn_and_round_misuse() {
    let mut players = roster(&["Ada", "Linus", "Grace"]);
    let deck = path(&[Card::Treasure { gems: 9 }, Card::Trap(TrapKind::Spider)]);
    let effect = RoundEffect::new(EndCondition::FirstTrapEnds, GemModifier::Standard);
    let mut round = Round::new(&mut players, deck, effect).unwrap();

    {
        let mut turn = round.next().unwrap();
        assert_eq!(turn.exit_player(1), Err(GameError::NotYetDrawn));
        turn.execute_draw_phase().unwrap();
        assert_eq!(turn.execute_draw_phase(), Err(GameError::AlreadyDrawn));
        assert_eq!(
            turn.end_turn(&exits(&[2])),
            Err(GameError::InvalidExitSet("Grace".to_string()))
        );
        turn.exit_player(2).unwrap();
        assert_eq!(
            turn.exit_player(2),
            Err(GameError::PlayerAlreadyExited("Grace".to_string()))
        );
        assert_eq!(turn.exit_player(7), Err(GameError::UnknownPlayer(7)));
        turn.end_turn(&exits(&[2])).unwrap();
    }
    assert_eq!(round.end_round(), Err(GameError::RoundNotOver));

    play_turn(&mut round, &[]);
    assert!(matches!(round.next(), Err(GameError::RoundExhausted)));

    round.end_round().unwrap();
    assert!(matches!(round.next(), Err(GameError::AlreadyConsumed)));
    assert_eq!(round.end_round(), Err(GameError::AlreadyConsumed));
}

#[test]
fn test_rotation_rejects_exited_player() {
    let mut players = roster(&["Ada", "Linus", "Grace"]);
    players[1].exit();

    assert_eq!(
        RoundRotation::new(&mut players).unwrap_err(),
        GameError::PlayerAlreadyExited("Linus".to_string())
    );
}

#[test]
fn test_path_gems_setter_rejects_negative() {
    let mut players = roster(&["Ada"]);
    let mut state = RoundState::new(&mut players, Deck::new(Vec::new())).unwrap();

    assert_eq!(state.set_path_gems(-3), Err(GameError::NegativeAmount(-3)));
    state.set_path_gems(3).unwrap();
    assert_eq!(state.path_gems(), 3);
}

#[test]
fn test_custom_deck_validation() {
    assert_eq!(
        DeckBuilder::new().add_treasures(6, 1).err(),
        Some(GameError::InvalidGemValue {
            kind: "treasure".to_string(),
            gems: 6,
        })
    );
    assert!(DeckBuilder::new().add_relic(9).is_err());

    let deck = DeckBuilder::new()
        .add_relic(12)
        .unwrap()
        .add_traps(TrapKind::BatteringRam, 2)
        .build();
    assert_eq!(deck.totals().trap_kinds, 1);
    assert_eq!(deck.peek(), Ok(Card::Trap(TrapKind::BatteringRam)));
}

#[test]
fn test_cpu_game_from_settings() {
    init_tracing();
    let json = r#"{
        "player_names": [],
        "cpu_players": 5,
        "cpu_difficulty": "Hard",
        "end_condition": "ThreeRelicsDrawn",
        "gem_modifier": { "GemMultiplier": { "factor": 2.0 } },
        "rounds": 4,
        "seed": 77
    }"#;
    let settings = GameSettings::from_json(json).unwrap();
    settings.validate().unwrap();

    let mut game = Game::new(settings).unwrap();
    let summaries = game
        .play_to_end(|name| panic!("{} is not a human", name))
        .unwrap();

    assert_eq!(summaries.len(), 4);
    assert_eq!(game.current_round(), 4);

    // Chests only ever grow
    for pair in summaries.windows(2) {
        for (before, after) in pair[0].chests.iter().zip(&pair[1].chests) {
            assert!(after.1 >= before.1);
        }
    }

    let board = game.leaderboard().unwrap();
    let last = summaries.last().unwrap();
    let best = last.chests.iter().map(|(_, g)| *g).max().unwrap();
    assert_eq!(board.winner().map(|e| e.chest), Some(best));
}

#[test]
fn test_mixed_table_human_leaves_first() {
    let settings = GameSettings {
        player_names: vec!["Ada".to_string()],
        cpu_players: 2,
        cpu_difficulty: CpuDifficulty::Easy,
        rounds: 1,
        seed: Some(5),
        ..Default::default()
    };
    let mut game = Game::new(settings).unwrap();

    let summary = game.play_round(|_| Choice::Exit).unwrap();

    // Ada leaves on the first turn that stays open, so she always banks
    assert!(summary.outcome.banked.iter().any(|(id, _)| *id == 0));
    assert!(summary
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::PlayersExited { players } if players.contains(&0))));
}
