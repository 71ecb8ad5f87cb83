//! Player actions.
//!
//! Turn actions play a card from hand (or draw); placement actions answer
//! a drawn bomb while holding a Defuse. Legality is decided by
//! [`crate::rules::Engine::legal_actions`], never by the action itself.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Seat;
use crate::cards::{Card, CatKind};

/// A complete player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw the top card, ending one required draw.
    Draw,
    /// End the turn without drawing; the next player owes two draws
    /// (or the attacker's remaining draws plus two when counter-attacking).
    Attack,
    /// End one required draw without drawing.
    Skip,
    /// Look at the top three cards.
    SeeFuture,
    /// Shuffle the draw pile.
    Shuffle,
    /// Take a random card from `target`.
    Favor { target: Seat },
    /// Discard two matching cats to steal a random card from `target`.
    CatPair { kind: CatKind, target: Seat },
    /// Defuse and put the bomb back on top.
    PlaceBombTop,
    /// Defuse and put the bomb back at depth `k`, where `1 <= k < deck len`.
    /// Depth 0 is [`Action::PlaceBombTop`]; the full length is
    /// [`Action::PlaceBombBottom`].
    PlaceBombPosition(u8),
    /// Defuse and put the bomb on the bottom.
    PlaceBombBottom,
    /// Defuse and reinsert the bomb at a uniformly random depth.
    UseDefuse,
}

/// Action lists are short outside bomb placement.
pub type ActionList = SmallVec<[Action; 8]>;

impl Action {
    /// Card spent from hand by this action, if any.
    #[must_use]
    pub fn card(self) -> Option<Card> {
        match self {
            Action::Draw => None,
            Action::Attack => Some(Card::Attack),
            Action::Skip => Some(Card::Skip),
            Action::SeeFuture => Some(Card::SeeFuture),
            Action::Shuffle => Some(Card::Shuffle),
            Action::Favor { .. } => Some(Card::Favor),
            Action::CatPair { kind, .. } => Some(Card::Cat(kind)),
            Action::PlaceBombTop
            | Action::PlaceBombPosition(_)
            | Action::PlaceBombBottom
            | Action::UseDefuse => Some(Card::Defuse),
        }
    }

    /// Answers a drawn bomb.
    #[must_use]
    pub fn is_placement(self) -> bool {
        matches!(
            self,
            Action::PlaceBombTop
                | Action::PlaceBombPosition(_)
                | Action::PlaceBombBottom
                | Action::UseDefuse
        )
    }

    /// Rank in the fixed tie-break order, lowest preferred.
    ///
    /// Draw, Attack, Skip, SeeFuture, Shuffle, Favor, CatPair, PlaceBombTop,
    /// PlaceBombPosition (shallow first), PlaceBombBottom, UseDefuse.
    #[must_use]
    pub fn precedence(self) -> (u8, u16) {
        match self {
            Action::Draw => (0, 0),
            Action::Attack => (1, 0),
            Action::Skip => (2, 0),
            Action::SeeFuture => (3, 0),
            Action::Shuffle => (4, 0),
            Action::Favor { target } => (5, u16::from(target.0)),
            Action::CatPair { kind, target } => (6, ((kind as u16) << 8) | u16::from(target.0)),
            Action::PlaceBombTop => (7, 0),
            Action::PlaceBombPosition(k) => (8, u16::from(k)),
            Action::PlaceBombBottom => (9, 0),
            Action::UseDefuse => (10, 0),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Favor { target } => write!(f, "Favor({target})"),
            Action::CatPair { kind, target } => write!(f, "CatPair({kind:?}, {target})"),
            Action::PlaceBombPosition(k) => write!(f, "PlaceBomb@{k}"),
            other => write!(f, "{other:?}"),
        }
    }
}
