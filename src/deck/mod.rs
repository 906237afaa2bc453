//! The deck subsystem: ordered, double-ended card collections.
//!
//! ## Key Types
//!
//! - `Deck`: the deck itself; position 0 is the top
//! - `DeckBuilder`: construction parameters (jokers, ordering rules)
//! - `Insert`: placement for added cards (top, bottom, index)
//! - `DeckError`: empty-deck, insufficient-cards, and uneven-split failures

pub mod builder;
#[allow(clippy::module_inception)]
pub mod deck;

pub use builder::DeckBuilder;
pub use deck::{Deck, DeckError, Insert};
