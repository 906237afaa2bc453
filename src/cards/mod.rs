//! Card system: immutable card values, ordering rules, and instances.
//!
//! ## Key Types
//!
//! - `Rank` / `Suit` / `Color`: card enumerations with canonical orderings
//! - `Card`: immutable rank/suit value (jokers are rank `Joker` with a
//!   color suit)
//! - `CardOrdering`: explicit comparison context (suit priority + rank
//!   values) owned by a deck, never by the cards
//! - `AsCard` / `CardInstance`: extension seam for game-specific mutable
//!   card state

pub mod card;
pub mod instance;
pub mod ordering;

pub use card::{Card, CardError, Color, Rank, Suit};
pub use instance::{AsCard, CardInstance};
pub use ordering::CardOrdering;
