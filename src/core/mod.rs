//! Core types: seats, RNG, configuration, actions, state, errors.
//!
//! Everything else in the crate builds on these. The game state is plain
//! data here; the rules that move it forward live in [`crate::rules`].

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{Seat, SeatMap};
pub use rng::{mix_seed, GameRng};
pub use config::{DeckRecipe, GameConfig, InteractionRules, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{Action, ActionList};
pub use state::{GameState, Phase, Player, Sight};
pub use error::{ConfigError, DeckError, SimError, TableError};
