//! Error types.
//!
//! Running out of cards is not an error: an empty-deck draw ends the game
//! with the survivors sharing the win (see [`crate::rules::GameResult`]).
//! Low confidence and tie-breaks are annotations on policy entries, not
//! errors either.

use thiserror::Error;

use super::action::Action;
use crate::cards::Card;
use super::player::Seat;
use crate::triggers::ClassificationGap;

/// Invalid operation on the draw pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot draw from an empty deck")]
    Empty,
    #[error("insert depth {depth} out of bounds for deck of {len} cards")]
    DepthOutOfBounds { depth: usize, len: usize },
}

/// Rejected setup or run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count {0} outside supported range 2..=5")]
    PlayerCount(usize),
    #[error("trials per action must be at least 1")]
    NoTrials,
    #[error("pass count must be at least 1")]
    NoPasses,
    #[error("deck recipe needs {needed} cards to deal but holds {available}")]
    NotEnoughCards { needed: usize, available: usize },
    #[error("{count} copies of {card} exceed the per-kind limit of 255")]
    TooManyCopies { card: Card, count: usize },
    #[error("invalid parameter {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure while simulating a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("{seat} attempted illegal action {action:?}")]
    IllegalAction { seat: Seat, action: Action },
    #[error(transparent)]
    ClassificationGap(#[from] ClassificationGap),
    #[error("game exceeded {0} decisions without ending")]
    DecisionLimit(u32),
    #[error("game is already over")]
    GameOver,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure decoding a stored policy table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("policy table encoding failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("policy table has {0} entries, expected 64")]
    WrongLength(usize),
}
