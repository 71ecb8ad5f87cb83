//! State → trigger classification.
//!
//! Rules are tried in order and the first match wins. Each rule carries
//! guards on phase, owed draws, alive count and what the seat knows about
//! the top of the pile, so that every decision point matches exactly one
//! rule:
//!
//! 1. Bomb known at depth 0 or 1 (turn action)
//! 2. Top unknown, one draw owed, no See the Future, three or more alive
//! 3. Top unknown, one draw owed, See the Future in hand
//! 4. Two or more draws owed
//! 5. Bomb placement
//! 6. Top known safe, three or more alive
//! 7. Two alive
//!
//! Anything else is a [`ClassificationGap`]: a defect, never a default.

use thiserror::Error;

use super::trigger::{
    BombDepth, FutureRisk, GamePhase, HeavyHolding, Holding, Risk, Trigger,
};
use crate::cards::Card;
use crate::core::{GameState, Phase, Seat};

/// A decision point no trigger matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no trigger for {seat}: {reason} (required draws {required_draws}, {alive} alive)")]
pub struct ClassificationGap {
    pub seat: Seat,
    pub reason: &'static str,
    pub required_draws: u32,
    pub alive: usize,
}

/// Classify the situation of `seat`, who must act in `state`.
pub fn classify(state: &GameState, seat: Seat) -> Result<Trigger, ClassificationGap> {
    let gap = |reason| ClassificationGap {
        seat,
        reason,
        required_draws: state.required_draws,
        alive: state.alive_count(),
    };

    if seat.index() >= state.player_count() || !state.is_alive(seat) {
        return Err(gap("seat is not an alive player"));
    }
    if seat != state.active {
        return Err(gap("seat is not the one to act"));
    }

    match state.phase {
        Phase::AwaitingTurnAction => classify_turn(state, seat).ok_or_else(|| gap("turn action matched no rule")),
        Phase::AwaitingBombResponse => {
            let next = state.next_alive(seat);
            Ok(Trigger::Defused {
                heads_up: state.alive_count() == 2,
                next_has_defuse: next != seat && state.hand(next).has(Card::Defuse),
            })
        }
        Phase::AwaitingDrawResolution => Err(gap("draw still resolving")),
        Phase::GameOver(_) => Err(gap("game is over")),
    }
}

fn classify_turn(state: &GameState, seat: Seat) -> Option<Trigger> {
    let hand = state.hand(seat);
    let alive = state.alive_count();
    let required = state.required_draws;
    let top = state.known_card(seat, 0);
    let defuse = hand.has(Card::Defuse);
    let escape = hand.has_escape();

    if alive < 2 || required == 0 {
        return None;
    }

    // 1. Bomb visible
    let depth = if top == Some(Card::Bomb) {
        Some(BombDepth::Top)
    } else if state.known_card(seat, 1) == Some(Card::Bomb) {
        Some(BombDepth::Second)
    } else {
        None
    };
    if let Some(depth) = depth {
        let holding = if hand.has(Card::Skip) {
            Holding::Skip
        } else if hand.has(Card::Attack) || hand.has(Card::Shuffle) {
            Holding::OtherAction
        } else {
            Holding::Nothing
        };
        return Some(Trigger::BombVisible { depth, holding, defuse });
    }

    let risk = state.bomb_risk();

    if top.is_none() && required == 1 {
        // 2. Bomb location unknown
        if !hand.has(Card::SeeFuture) && alive >= 3 {
            return Some(Trigger::BombUnknown { risk: Risk::from_probability(risk), escape, defuse });
        }
        // 3. See the Future decision
        if hand.has(Card::SeeFuture) {
            return Some(Trigger::SeeFuture { risk: FutureRisk::from_probability(risk), escape });
        }
    }

    // 4. Under attack
    if required == 2 {
        return Some(Trigger::DoubleAttack {
            skip: hand.has(Card::Skip),
            attack: hand.has(Card::Attack),
            defuse,
        });
    }
    if required >= 3 {
        let holding = if hand.has(Card::Attack) {
            HeavyHolding::Attack
        } else if hand.has(Card::Skip) {
            HeavyHolding::SkipOnly
        } else {
            HeavyHolding::Nothing
        };
        return Some(Trigger::HeavyAttack { holding });
    }

    // 6. Proactive
    if top.is_some() && alive >= 3 {
        return Some(Trigger::Proactive {
            phase: GamePhase::from_remaining(state.deck_fraction_remaining()),
        });
    }

    // 7. Endgame
    if alive == 2 {
        let opponent = state.next_alive(seat);
        return Some(match top {
            None => Trigger::EndgameBlind {
                defuse,
                opponent_defuse: state.hand(opponent).has(Card::Defuse),
                escape,
            },
            Some(_) => Trigger::EndgameSafeTop { escape },
        });
    }

    None
}
