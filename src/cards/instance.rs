//! Card instances - game-specific mutable state on top of a card.
//!
//! The base [`Card`] is an immutable value. Games that need per-card state
//! (face-up flags, counters, markings) wrap it in a `CardInstance` and use
//! `Deck<CardInstance>` instead of `Deck<Card>`; every deck operation works
//! unchanged.
//!
//! Equality and hashing of an instance use **only** the base card, so the
//! comparison contract of the underlying deck is stable no matter what
//! extension state an instance carries.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;

/// Access to the base card identity of a deck element.
///
/// Implemented by [`Card`] itself and by [`CardInstance`]; implement it for
/// your own wrapper type to run game-specific cards through `Deck`.
pub trait AsCard: Clone + PartialEq {
    /// The underlying immutable card.
    fn card(&self) -> &Card;
}

impl AsCard for Card {
    fn card(&self) -> &Card {
        self
    }
}

/// A card plus mutable game state.
///
/// ## State Values (i64 only)
///
/// The `state` field uses `FxHashMap<String, i64>` for cheap hashing and
/// cloning. To store non-integer values:
/// - Booleans: use 0/1
/// - Enums: use discriminant values
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardInstance {
    card: Card,

    /// Is this card currently face up?
    pub face_up: bool,

    /// Mutable instance state (counters, markings, etc.)
    #[serde(default)]
    pub state: FxHashMap<String, i64>,
}

// Identity is the base card only; extension state never participates.
impl PartialEq for CardInstance {
    fn eq(&self, other: &Self) -> bool {
        self.card == other.card
    }
}

impl Eq for CardInstance {}

impl std::hash::Hash for CardInstance {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.card.hash(hasher);
    }
}

impl AsCard for CardInstance {
    fn card(&self) -> &Card {
        &self.card
    }
}

impl From<Card> for CardInstance {
    fn from(card: Card) -> Self {
        Self::new(card)
    }
}

impl CardInstance {
    /// Wrap a card, face down, with no state.
    #[must_use]
    pub fn new(card: Card) -> Self {
        Self {
            card,
            face_up: false,
            state: FxHashMap::default(),
        }
    }

    /// Turn the card over.
    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    /// Get a state value with a default.
    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.state.get(key).copied().unwrap_or(default)
    }

    /// Set a state value.
    pub fn set_state(&mut self, key: impl Into<String>, value: i64) {
        self.state.insert(key.into(), value);
    }

    /// Modify a state value by delta.
    pub fn modify_state(&mut self, key: &str, delta: i64) {
        let current = self.get_state(key, 0);
        self.state.insert(key.to_string(), current + delta);
    }

    /// Check if a state flag is set (non-zero).
    #[must_use]
    pub fn has_flag(&self, key: &str) -> bool {
        self.get_state(key, 0) != 0
    }

    /// Set a boolean flag (1 for true, 0 for false).
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.set_state(key, if value { 1 } else { 0 });
    }

    /// Clear all state (e.g., when a card returns to the deck).
    pub fn clear_state(&mut self) {
        self.state.clear();
    }
}
