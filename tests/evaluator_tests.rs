//! Evaluator integration tests on decks small enough to solve by hand.
//!
//! The synthetic game has three players, empty hands, no Defuses and a
//! ten-card pile holding one bomb, so Draw is the only legal action and
//! every probability below is exact.

use kittens_mc::cards::{Card, CatKind};
use kittens_mc::core::{Action, DeckRecipe, GameConfig, Seat};
use kittens_mc::eval::{EvalConfig, Evaluator};
use kittens_mc::policy::{Baseline, DefaultPolicy, UniformRandom};
use kittens_mc::triggers::{Risk, Trigger};

fn one_bomb_game() -> GameConfig {
    GameConfig::standard(3)
        .with_recipe(DeckRecipe::custom([(Card::Cat(CatKind::Tacocat), 9)]))
        .with_hand_size(0)
        .with_defuses(0, 0)
        .with_bombs(1)
}

fn evaluator() -> Evaluator {
    let config = EvalConfig::default()
        .with_confidence_floor(1_000)
        .with_max_attempts(200_000)
        .with_batches(8);
    Evaluator::new(one_bomb_game(), config).unwrap()
}

/// Risk 1/3 with three alive: first seen when three cards remain.
fn high_risk() -> Trigger {
    Trigger::BombUnknown { risk: Risk::High, escape: false, defuse: false }
}

/// Risk 1/6..1/4: first seen when six cards remain.
fn medium_risk() -> Trigger {
    Trigger::BombUnknown { risk: Risk::Medium, escape: false, defuse: false }
}

// =============================================================================
// Rejection Sampling
// =============================================================================

#[test]
fn test_arrival_rate_matches_bomb_position() {
    // Reached iff the bomb is among the bottom three of ten.
    let arrivals = evaluator().sample_arrivals(high_risk(), 2_000, &Baseline::default(), 11).unwrap();
    assert_eq!(arrivals.states.len(), 2_000);
    let rate = arrivals.arrival_rate();
    assert!((rate - 0.3).abs() < 0.03, "arrival rate {rate}");
}

#[test]
fn test_arrival_states_are_conditioned() {
    let arrivals = evaluator().sample_arrivals(high_risk(), 3_000, &Baseline::default(), 12).unwrap();

    let mut depth_counts = [0usize; 3];
    for state in &arrivals.states {
        // Seven draws in: seats 0, 1, 2, 0, 1, 2, 0, so seat 1 is up.
        assert_eq!(state.active, Seat(1));
        assert_eq!(state.deck.len(), 3);
        assert_eq!(state.alive_count(), 3);
        assert_eq!(state.discard.len(), 0);

        let depths = state.deck.depths_of(Card::Bomb);
        assert_eq!(depths.len(), 1);
        depth_counts[depths[0]] += 1;
    }

    // Nothing is reweighted: the bomb is uniform over what is left.
    for (depth, &count) in depth_counts.iter().enumerate() {
        let share = count as f64 / arrivals.states.len() as f64;
        assert!((share - 1.0 / 3.0).abs() < 0.05, "depth {depth}: {share}");
    }
}

#[test]
fn test_estimate_arrival_rate() {
    let est = evaluator().evaluate(medium_risk(), Action::Draw, &UniformRandom, 3_000, 3).unwrap();
    assert_eq!(est.trials, 3_000);
    assert_eq!(est.attempts, est.trials + est.rejected_unreached + est.rejected_illegal);
    assert!((est.arrival_rate() - 0.6).abs() < 0.04, "arrival rate {}", est.arrival_rate());
}

#[test]
fn test_conditional_win_rate() {
    // At the trigger the drawer is one of three seats to face the bomb
    // next; the other two survive an empty pile together.
    let est = evaluator().evaluate(high_risk(), Action::Draw, &Baseline::default(), 3_000, 4).unwrap();
    assert_eq!(est.trials, 3_000);
    assert!(!est.low_confidence);
    assert!((est.win_rate() - 2.0 / 3.0).abs() < 0.04, "win rate {}", est.win_rate());
}

// =============================================================================
// Confidence
// =============================================================================

#[test]
fn test_interval_tightens_with_trials() {
    let eval = evaluator();
    let small = eval.evaluate(medium_risk(), Action::Draw, &Baseline::default(), 200, 5).unwrap();
    let large = eval.evaluate(medium_risk(), Action::Draw, &Baseline::default(), 3_200, 5).unwrap();

    let width = |(lo, hi): (f64, f64)| hi - lo;
    assert!(width(large.interval(1.96)) < width(small.interval(1.96)) / 2.0);
    assert!(small.low_confidence);
    assert!(!large.low_confidence);
}

#[test]
fn test_attempt_ceiling_stops_rare_trigger() {
    // A critical blind draw with three alive needs the bomb in the bottom
    // two; asking for more trials than the ceiling allows flags the result.
    let config = EvalConfig::default().with_confidence_floor(1_000).with_max_attempts(400).with_batches(4);
    let eval = Evaluator::new(one_bomb_game(), config).unwrap();
    let trigger = Trigger::BombUnknown { risk: Risk::Critical, escape: false, defuse: false };
    let est = eval.evaluate(trigger, Action::Draw, &Baseline::default(), 1_000, 6).unwrap();

    assert_eq!(est.attempts, 400);
    assert!(est.trials < 1_000);
    assert!(est.low_confidence);
}

// =============================================================================
// Reproducibility
// =============================================================================

#[test]
fn test_same_seed_same_estimate() {
    let eval = evaluator();
    let a = eval.evaluate(high_risk(), Action::Draw, &DefaultPolicy::Uniform, 500, 8).unwrap();
    let b = eval.evaluate(high_risk(), Action::Draw, &DefaultPolicy::Uniform, 500, 8).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_candidates_share_deals() {
    // With the attempt ceiling binding, every candidate sees the same games
    // up to arrival. Skip is illegal exactly where Draw gets a trial
    // without a Skip in hand.
    let eval = Evaluator::new(
        GameConfig::standard(3),
        EvalConfig::default().with_confidence_floor(100).with_max_attempts(300).with_batches(4),
    )
    .unwrap();
    let trigger = Trigger::BombUnknown { risk: Risk::Low, escape: true, defuse: true };

    let skip = eval.evaluate(trigger, Action::Skip, &Baseline::default(), 1_000_000, 21).unwrap();
    let draw = eval.evaluate(trigger, Action::Draw, &Baseline::default(), 1_000_000, 21).unwrap();

    assert_eq!(skip.attempts, 300);
    assert_eq!(draw.attempts, 300);
    assert_eq!(skip.rejected_unreached, draw.rejected_unreached);
    assert_eq!(draw.rejected_illegal, 0);
    assert_eq!(skip.trials + skip.rejected_illegal, draw.trials);
    assert!(draw.trials > 0);
}
