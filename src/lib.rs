//! # parlor
//!
//! In-memory decks of cards and dice for tabletop-style game simulation.
//!
//! ## Design Principles
//!
//! 1. **Explicit randomness**: Every randomized operation takes
//!    `&mut GameRng`, a seedable deterministic generator. No global RNG,
//!    no hidden state, reproducible games.
//!
//! 2. **Ordering is a context, not a card property**: Cards are plain
//!    immutable values. Which card wins lives in a [`CardOrdering`] owned
//!    by the deck, so the same cards can play under different rules.
//!
//! 3. **Value semantics**: Cards are cheap copyable values, duplicates are
//!    allowed, and cloning a deck clones its cards. Game-specific mutable
//!    card state rides along via [`CardInstance`] and the [`AsCard`] seam.
//!
//! ## Modules
//!
//! - `core`: the deterministic RNG
//! - `cards`: ranks, suits, cards, ordering contexts, card instances
//! - `deck`: the deck (double-ended, O(1) at both ends)
//! - `dice`: single dice, weighted and exploding dice, dice pools
//!
//! ## Example
//!
//! ```
//! use parlor::{Deck, Dice, GameRng};
//!
//! let mut rng = GameRng::new(42);
//!
//! let mut deck = Deck::standard();
//! deck.shuffle(&mut rng);
//! let hands = deck.deal(4, 5).unwrap();
//! assert_eq!(hands.len(), 4);
//! assert_eq!(deck.len(), 32);
//!
//! let mut pool: Dice = "2d6".parse().unwrap();
//! let total = pool.roll(&mut rng);
//! assert!((2..=12).contains(&total));
//! ```

pub mod cards;
pub mod core;
pub mod deck;
pub mod dice;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState};

pub use crate::cards::{AsCard, Card, CardError, CardInstance, CardOrdering, Color, Rank, Suit};

pub use crate::deck::{Deck, DeckBuilder, DeckError, Insert};

pub use crate::dice::{
    Dice, DiceError, Die, DieKind, ExplodingDie, WeightedDie, DEFAULT_MAX_EXPLOSIONS,
};
