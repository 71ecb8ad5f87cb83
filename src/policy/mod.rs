//! Decision policies.
//!
//! Policies are trait-based so the continuation can be swapped without
//! touching the engine or the evaluator:
//! - [`Baseline`]: the fixed opponent heuristic
//! - [`UniformRandom`]: uniform over legal actions
//! - [`TablePolicy`]: looks the trigger up in a [`PolicyTable`], falling
//!   back to another policy for unresolved or illegal entries
//!
//! A learned policy only needs to implement [`Policy`].

pub mod baseline;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng};
use crate::rules::Decision;

pub use baseline::Baseline;
pub use table::{Confidence, PolicyEntry, PolicyTable, TablePolicy};

// =============================================================================
// Policy
// =============================================================================

/// Chooses an action at a decision point.
///
/// Implementations must return one of `decision.legal` and must not keep
/// state between calls; all randomness comes from `rng`.
pub trait Policy: Send + Sync {
    fn choose_action(&self, decision: &Decision<'_>, rng: &mut GameRng) -> Action;

    /// Name for logs.
    fn name(&self) -> &'static str {
        "policy"
    }
}

/// Uniform random policy.
///
/// Selects uniformly from legal actions.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformRandom;

impl Policy for UniformRandom {
    fn choose_action(&self, decision: &Decision<'_>, rng: &mut GameRng) -> Action {
        rng.choose(decision.legal).copied().unwrap_or(Action::Draw)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

// =============================================================================
// Default continuation
// =============================================================================

/// Continuation used where no table entry applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultPolicy {
    #[default]
    Baseline,
    Uniform,
}

impl Policy for DefaultPolicy {
    fn choose_action(&self, decision: &Decision<'_>, rng: &mut GameRng) -> Action {
        match self {
            DefaultPolicy::Baseline => Baseline::default().choose_action(decision, rng),
            DefaultPolicy::Uniform => UniformRandom.choose_action(decision, rng),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DefaultPolicy::Baseline => "baseline",
            DefaultPolicy::Uniform => "uniform",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CatKind, Deck, Hand};
    use crate::core::{GameState, Seat};
    use crate::triggers::classify;

    #[test]
    fn test_uniform_picks_legal() {
        let state = GameState::from_parts(
            Deck::from_top([Card::Cat(CatKind::Tacocat); 5]),
            vec![Hand::from_cards([Card::Skip, Card::Attack]), Hand::new()],
        );
        let legal = [Action::Draw, Action::Attack, Action::Skip];
        let decision = Decision {
            state: &state,
            seat: Seat(0),
            trigger: classify(&state, Seat(0)).unwrap(),
            legal: &legal,
        };
        let mut rng = GameRng::new(11);
        for _ in 0..50 {
            assert!(legal.contains(&UniformRandom.choose_action(&decision, &mut rng)));
        }
    }

    #[test]
    fn test_default_policy_names() {
        assert_eq!(DefaultPolicy::default(), DefaultPolicy::Baseline);
        assert_eq!(DefaultPolicy::Uniform.name(), "uniform");
    }
}
