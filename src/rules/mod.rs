//! Rules of play.
//!
//! [`Engine`] deals games, lists and checks legal actions, applies them,
//! and plays whole games through a [`Controller`]. Interactive cards are
//! switched on per engine with [`crate::core::InteractionRules`].

pub mod engine;

pub use engine::{Controller, Decision, Engine, GameResult};
