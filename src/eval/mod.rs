//! Monte Carlo evaluation by rejection sampling.
//!
//! ## Key Types
//!
//! - [`Evaluator`]: runs conditional trials for a trigger/candidate pair
//! - [`Estimate`]: summed trial counters with win rate and error bars
//! - [`EvalConfig`]: confidence floor, attempt ceiling, batch count
//! - [`Arrivals`]: states sampled at a trigger, for checking the sampler

pub mod config;
pub mod evaluator;
pub mod stats;

pub use config::EvalConfig;
pub use evaluator::{Arrivals, Evaluator};
pub use stats::Estimate;
