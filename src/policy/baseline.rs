//! Fixed opponent heuristic.

use crate::cards::Card;
use crate::core::{Action, GameRng, Phase};
use crate::rules::Decision;

use super::Policy;

/// The baseline opponent.
///
/// In order:
/// 1. Placing a drawn bomb: defuse with random reinsertion.
/// 2. Bomb known on top: Skip, else Attack, else Shuffle, else Draw.
/// 3. Top known safe: Draw.
/// 4. Bomb risk above `risk_threshold` and no Defuse: a random escape
///    (Attack, Skip or Shuffle) if one is held.
/// 5. Otherwise uniform over the legal actions.
#[derive(Clone, Copy, Debug)]
pub struct Baseline {
    pub risk_threshold: f64,
}

impl Default for Baseline {
    fn default() -> Self {
        Self { risk_threshold: 0.30 }
    }
}

impl Policy for Baseline {
    fn choose_action(&self, decision: &Decision<'_>, rng: &mut GameRng) -> Action {
        let state = decision.state;

        if state.phase == Phase::AwaitingBombResponse && decision.is_legal(Action::UseDefuse) {
            return Action::UseDefuse;
        }

        match state.known_card(decision.seat, 0) {
            Some(Card::Bomb) => {
                return [Action::Skip, Action::Attack, Action::Shuffle]
                    .into_iter()
                    .find(|&a| decision.is_legal(a))
                    .unwrap_or(Action::Draw);
            }
            Some(_) => return Action::Draw,
            None => {}
        }

        if state.bomb_risk() > self.risk_threshold && !decision.hand().has(Card::Defuse) {
            let escapes: Vec<Action> = decision
                .legal
                .iter()
                .copied()
                .filter(|a| matches!(a, Action::Attack | Action::Skip | Action::Shuffle))
                .collect();
            if let Some(&action) = rng.choose(&escapes) {
                return action;
            }
        }

        rng.choose(decision.legal).copied().unwrap_or(Action::Draw)
    }

    fn name(&self) -> &'static str {
        "baseline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CatKind, Deck, Hand};
    use crate::core::{GameState, Seat};
    use crate::rules::Engine;

    fn cat() -> Card {
        Card::Cat(CatKind::HairyPotato)
    }

    fn choose(state: &GameState, seed: u64) -> Action {
        let engine = Engine::default();
        let legal = engine.legal_actions(state);
        let decision = Decision {
            state,
            seat: state.active,
            trigger: engine.classify(state).unwrap(),
            legal: &legal,
        };
        Baseline::default().choose_action(&decision, &mut GameRng::new(seed))
    }

    #[test]
    fn test_defuses_drawn_bomb() {
        let mut state = GameState::from_parts(
            Deck::from_top([cat(), cat()]),
            vec![Hand::from_cards([Card::Defuse]), Hand::new()],
        );
        state.phase = Phase::AwaitingBombResponse;
        state.pending_bomb = true;
        assert_eq!(choose(&state, 0), Action::UseDefuse);
    }

    #[test]
    fn test_known_bomb_prefers_skip() {
        let mut state = GameState::from_parts(
            Deck::from_top([Card::Bomb, cat()]),
            vec![Hand::from_cards([Card::Attack, Card::Skip]), Hand::new()],
        );
        state.players[Seat(0)].reveal(0, Card::Bomb);
        assert_eq!(choose(&state, 0), Action::Skip);
    }

    #[test]
    fn test_known_bomb_without_escape_draws() {
        let mut state = GameState::from_parts(
            Deck::from_top([Card::Bomb, cat()]),
            vec![Hand::from_cards([cat()]), Hand::new()],
        );
        state.players[Seat(0)].reveal(0, Card::Bomb);
        assert_eq!(choose(&state, 0), Action::Draw);
    }

    #[test]
    fn test_known_safe_top_draws() {
        let mut state = GameState::from_parts(
            Deck::from_top([cat(), Card::Bomb]),
            vec![Hand::from_cards([Card::Skip, Card::Attack]), Hand::new()],
        );
        state.players[Seat(0)].reveal(0, cat());
        assert_eq!(choose(&state, 0), Action::Draw);
    }

    #[test]
    fn test_high_risk_without_defuse_escapes() {
        let state = GameState::from_parts(
            Deck::from_top([Card::Bomb, cat()]),
            vec![Hand::from_cards([Card::Attack]), Hand::new(), Hand::new()],
        );
        for seed in 0..20 {
            assert_eq!(choose(&state, seed), Action::Attack);
        }
    }

    #[test]
    fn test_high_risk_with_defuse_is_random() {
        let state = GameState::from_parts(
            Deck::from_top([Card::Bomb, cat()]),
            vec![Hand::from_cards([Card::Attack, Card::Defuse]), Hand::new(), Hand::new()],
        );
        let picks: Vec<_> = (0..40).map(|seed| choose(&state, seed)).collect();
        assert!(picks.contains(&Action::Draw));
        assert!(picks.contains(&Action::Attack));
    }
}
