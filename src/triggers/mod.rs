//! Decision-situation classification.
//!
//! ## Key Components
//!
//! - [`Trigger`]: one of 64 classified situations, with its candidate actions
//! - [`classify`]: maps a state and the acting seat to exactly one trigger
//! - [`ClassificationGap`]: the loud failure when no rule matches
//!
//! ## Example Usage
//!
//! ```
//! use kittens_mc::cards::{Card, Deck, Hand};
//! use kittens_mc::core::{GameState, Seat};
//! use kittens_mc::triggers::{classify, Trigger};
//!
//! let state = GameState::from_parts(
//!     Deck::from_top([Card::Skip, Card::Bomb]),
//!     vec![Hand::from_cards([Card::Defuse]), Hand::new()],
//! );
//!
//! let trigger = classify(&state, Seat(0)).unwrap();
//! assert_eq!(
//!     trigger,
//!     Trigger::EndgameBlind { defuse: true, opponent_defuse: false, escape: false }
//! );
//! assert!(trigger.index() < 64);
//! ```

pub mod classify;
pub mod trigger;

pub use classify::{classify, ClassificationGap};
pub use trigger::{
    BombDepth, Category, FutureRisk, GamePhase, HeavyHolding, Holding, Risk, Trigger, TRIGGER_COUNT,
};
