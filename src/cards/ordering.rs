//! Card comparison rules, decoupled from the cards themselves.
//!
//! A `CardOrdering` carries the two tables that decide which card wins:
//! `rank_values` (rank -> numeric value) and `suit_order` (suit -> sort
//! priority, used to break rank ties). Decks own one and pass it to their
//! sort/compare operations; nothing is global and cards hold no
//! back-reference to a deck, so the same two cards can compare differently
//! under different decks.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};

/// Comparison rules for cards: rank values plus suit priority.
///
/// The sort key of a card is `(rank_value, suit_index)`. A rank missing
/// from the table contributes value `0` (sorting below every known rank);
/// a suit missing from `suit_order` contributes index `-1`. `compare` is
/// defined from the same key, so comparing and sorting can never disagree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardOrdering {
    suit_order: Vec<Suit>,
    rank_values: FxHashMap<Rank, i32>,
}

impl CardOrdering {
    /// Build an ordering from explicit tables.
    #[must_use]
    pub fn new(
        suit_order: impl IntoIterator<Item = Suit>,
        rank_values: impl IntoIterator<Item = (Rank, i32)>,
    ) -> Self {
        Self {
            suit_order: suit_order.into_iter().collect(),
            rank_values: rank_values.into_iter().collect(),
        }
    }

    /// The canonical ordering: default rank values (aces high, jokers
    /// highest) and canonical suit priority.
    #[must_use]
    pub fn standard() -> Self {
        let rank_values = Rank::STANDARD
            .into_iter()
            .chain([Rank::Joker])
            .map(|r| (r, r.default_value()))
            .collect();
        Self {
            suit_order: Suit::ALL.to_vec(),
            rank_values,
        }
    }

    /// Replace the suit priority.
    pub fn set_suit_order(&mut self, suits: impl IntoIterator<Item = Suit>) {
        self.suit_order = suits.into_iter().collect();
    }

    /// Replace the rank value table.
    pub fn set_rank_values(&mut self, values: impl IntoIterator<Item = (Rank, i32)>) {
        self.rank_values = values.into_iter().collect();
    }

    /// The suit priority, lowest first.
    #[must_use]
    pub fn suit_order(&self) -> &[Suit] {
        &self.suit_order
    }

    /// Numeric value of a rank under these rules. Unknown ranks are 0.
    #[must_use]
    pub fn rank_value(&self, rank: Rank) -> i32 {
        self.rank_values.get(&rank).copied().unwrap_or(0)
    }

    /// Priority index of a suit. Unknown suits are -1.
    #[must_use]
    pub fn suit_index(&self, suit: Suit) -> i32 {
        self.suit_order
            .iter()
            .position(|&s| s == suit)
            .map_or(-1, |i| i as i32)
    }

    /// Sort key for a card: `(rank_value, suit_index)`.
    #[must_use]
    pub fn key(&self, card: &Card) -> (i32, i32) {
        (self.rank_value(card.rank()), self.suit_index(card.suit()))
    }

    /// Compare two cards under these rules.
    #[must_use]
    pub fn compare(&self, a: &Card, b: &Card) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }
}

impl Default for CardOrdering {
    fn default() -> Self {
        Self::standard()
    }
}
