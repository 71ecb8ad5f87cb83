//! Card & deck model.
//!
//! ## Key Types
//!
//! - `Card`, `CatKind`: the card vocabulary
//! - `Deck`: ordered draw pile addressed by depth (0 = next draw)
//! - `Hand`: per-kind card counts
//!
//! Standard deck construction lives in [`crate::core::GameConfig`], which
//! knows player count and deal sizes.

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{Card, CatKind};
pub use deck::Deck;
pub use hand::Hand;
