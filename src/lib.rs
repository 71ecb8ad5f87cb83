//! # kittens-mc
//!
//! Monte Carlo policy discovery for Exploding Kittens.
//!
//! Every decision point of a game is classified into one of 64 triggers.
//! For each trigger, every candidate action is scored by conditional Monte
//! Carlo: games are dealt and played out, those that never reach the
//! trigger are thrown away, and at the first arrival the acting seat plays
//! the candidate. The best candidate per trigger forms a policy table,
//! which the next pass uses as the continuation.
//!
//! ## Design Principles
//!
//! 1. **Exact conditioning**: trials are rejection-sampled, never
//!    reweighted or constructed, so a trigger's states arrive with the
//!    frequencies real play produces them.
//!
//! 2. **Reproducible**: one base seed fixes every deal, shuffle and policy
//!    draw, independent of thread count.
//!
//! 3. **Total classification**: any state with a seat to act maps to
//!    exactly one trigger. A state that maps to none is an error, not a
//!    silent fallback.
//!
//! ## Modules
//!
//! - `core`: seats, RNG, configuration, actions, state, errors
//! - `cards`: cards, deck, hands
//! - `rules`: the game engine
//! - `triggers`: the 64 triggers and the classifier
//! - `policy`: baseline, uniform and table policies
//! - `eval`: conditional Monte Carlo evaluator
//! - `refine`: multi-pass refinement and [`simulate`]

pub mod core;
pub mod cards;
pub mod rules;
pub mod triggers;
pub mod policy;
pub mod eval;
pub mod refine;

// Re-export commonly used types
pub use crate::core::{
    Seat, SeatMap,
    GameRng,
    DeckRecipe, GameConfig, InteractionRules,
    Action, ActionList,
    GameState, Phase,
    ConfigError, DeckError, SimError, TableError,
};

pub use crate::cards::{Card, CatKind, Deck, Hand};

pub use crate::rules::{Controller, Decision, Engine, GameResult};

pub use crate::triggers::{classify, ClassificationGap, Trigger, TRIGGER_COUNT};

pub use crate::policy::{
    Baseline, DefaultPolicy, Policy, UniformRandom,
    Confidence, PolicyEntry, PolicyTable, TablePolicy,
};

pub use crate::eval::{EvalConfig, Estimate, Evaluator};

pub use crate::refine::{simulate, PassReport, RefineConfig, Refinement, Refiner};
