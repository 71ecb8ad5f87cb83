//! Classifier integration tests: totality over real play and coverage.

use proptest::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use kittens_mc::core::{Action, GameConfig, GameRng, InteractionRules};
use kittens_mc::policy::{Baseline, Policy, UniformRandom};
use kittens_mc::rules::{Decision, Engine};
use kittens_mc::triggers::{classify, Category, Trigger, TRIGGER_COUNT};

/// Play a game and hand every decision's trigger and legal set to `visit`.
fn walk(config: &GameConfig, policy: &dyn Policy, seed: u64, mut visit: impl FnMut(Trigger, &[Action])) {
    let engine = Engine::from_config(config);
    let mut rng = GameRng::new(seed);
    let mut state = engine.new_game(config, &mut rng).unwrap();

    while !state.is_over() {
        let trigger = match classify(&state, state.active) {
            Ok(trigger) => trigger,
            Err(gap) => panic!("seed {seed}, turn {}: {gap}", state.turn),
        };
        let legal = engine.legal_actions(&state);
        visit(trigger, &legal);

        let decision = Decision { state: &state, seat: state.active, trigger, legal: &legal };
        let action = policy.choose_action(&decision, &mut rng);
        engine.apply(&mut state, action, &mut rng).unwrap();
        state.decisions += 1;
    }
}

// =============================================================================
// Totality
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    // Every decision point in real play classifies to exactly one trigger.
    #[test]
    fn every_decision_classifies(seed in any::<u64>(), players in 2..=5usize, full in any::<bool>()) {
        let rules = if full { InteractionRules::full() } else { InteractionRules::default() };
        let config = GameConfig::standard(players).with_rules(rules);
        let mut decisions = 0usize;
        walk(&config, &UniformRandom, seed, |trigger, _| {
            assert!(trigger.index() < TRIGGER_COUNT);
            assert_eq!(Trigger::from_index(trigger.index()), Some(trigger));
            decisions += 1;
        });
        prop_assert!(decisions > 0);
    }

    // Placement decisions always offer placements and nothing else.
    #[test]
    fn defused_offers_only_placements(seed in any::<u64>(), players in 2..=5usize) {
        let config = GameConfig::standard(players);
        walk(&config, &UniformRandom, seed, |trigger, legal| {
            let placing = trigger.category() == Category::Defused;
            assert_eq!(legal.iter().all(|a| a.is_placement()), placing, "{trigger}: {legal:?}");
            if !placing {
                assert!(legal.contains(&Action::Draw), "{trigger}: {legal:?}");
            }
        });
    }
}

// =============================================================================
// Coverage
// =============================================================================

#[test]
fn test_all_families_reached() {
    let mut seen: FxHashSet<&'static str> = FxHashSet::default();
    for seed in 0..400u64 {
        let players = 2 + (seed % 4) as usize;
        let config = GameConfig::standard(players);
        walk(&config, &UniformRandom, seed, |trigger, _| {
            let family = match trigger {
                Trigger::BombVisible { .. } => "bomb-visible",
                Trigger::BombUnknown { .. } => "bomb-unknown",
                Trigger::SeeFuture { .. } => "see-future",
                Trigger::DoubleAttack { .. } => "double-attack",
                Trigger::HeavyAttack { .. } => "heavy-attack",
                Trigger::Defused { .. } => "defused",
                Trigger::Proactive { .. } => "proactive",
                Trigger::EndgameBlind { .. } => "endgame-blind",
                Trigger::EndgameSafeTop { .. } => "endgame-safe-top",
            };
            seen.insert(family);
        });
    }
    assert_eq!(seen.len(), 9, "families reached: {seen:?}");
}

#[test]
fn test_baseline_trigger_histogram() {
    let mut counts: FxHashMap<Trigger, usize> = FxHashMap::default();
    for seed in 0..200u64 {
        walk(&GameConfig::standard(4), &Baseline::default(), seed, |trigger, _| {
            *counts.entry(trigger).or_default() += 1;
        });
    }
    // Many distinct situations come up, and blind draws dominate.
    assert!(counts.len() >= 20, "only {} triggers seen", counts.len());
    let mut per_category: FxHashMap<Category, usize> = FxHashMap::default();
    for (trigger, n) in &counts {
        *per_category.entry(trigger.category()).or_default() += n;
    }
    let (most, _) = per_category.iter().max_by_key(|(_, &n)| n).unwrap();
    assert_eq!(*most, Category::BombUnknown, "{per_category:?}");
}

#[test]
fn test_category_sizes_cover_index_space() {
    let mut per_category: FxHashMap<Category, usize> = FxHashMap::default();
    for trigger in Trigger::all() {
        *per_category.entry(trigger.category()).or_default() += 1;
    }
    for (category, count) in &per_category {
        assert_eq!(category.size(), *count, "{category:?}");
    }
    assert_eq!(per_category.values().sum::<usize>(), TRIGGER_COUNT);
}
