//! Policy refinement and the simulation entry point.
//!
//! - [`simulate`]: configuration in, final table plus per-trigger
//!   confidence out
//! - [`Refiner`]: the pass loop, with [`Refiner::run_pass`] exposed for
//!   re-running a single pass
//! - [`select`]: best-candidate choice with precedence tie-breaking

pub mod config;
pub mod refiner;

pub use config::RefineConfig;
pub use refiner::{select, simulate, PassReport, Refinement, Refiner};
