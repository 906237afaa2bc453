//! Deck construction.
//!
//! `DeckBuilder` assembles a standard 52-card deck (optionally with the two
//! jokers) in new-deck order, with the comparison rules the deck will carry
//! for the rest of its life.

use std::collections::VecDeque;

use crate::cards::{Card, CardOrdering, Rank, Suit};

use super::deck::Deck;

/// Builds the canonical factory sequence, top first: A-K of hearts, A-K of
/// clubs, K-A of diamonds, K-A of spades, then the black and red jokers at
/// the bottom when enabled.
pub(crate) fn new_deck_cards(include_jokers: bool) -> VecDeque<Card> {
    let up: Vec<Rank> = std::iter::once(Rank::Ace)
        .chain(Rank::STANDARD[..12].iter().copied())
        .collect();
    let down: Vec<Rank> = up.iter().rev().copied().collect();

    let mut cards = VecDeque::with_capacity(if include_jokers { 54 } else { 52 });
    for suit in [Suit::Hearts, Suit::Clubs] {
        for &rank in &up {
            cards.push_back(Card::new_unchecked(rank, suit));
        }
    }
    for suit in [Suit::Diamonds, Suit::Spades] {
        for &rank in &down {
            cards.push_back(Card::new_unchecked(rank, suit));
        }
    }
    if include_jokers {
        cards.push_back(Card::black_joker());
        cards.push_back(Card::red_joker());
    }
    cards
}

/// Builder for [`Deck`] construction parameters.
///
/// ```
/// use parlor::{Deck, Suit};
///
/// let deck = Deck::builder()
///     .jokers(true)
///     .suit_order([Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades])
///     .build();
///
/// assert_eq!(deck.len(), 54);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeckBuilder {
    jokers: bool,
    ordering: CardOrdering,
}

impl DeckBuilder {
    /// Start from a jokerless deck with the standard ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the black and red jokers.
    #[must_use]
    pub fn jokers(mut self, include: bool) -> Self {
        self.jokers = include;
        self
    }

    /// Override the suit priority (lowest first).
    #[must_use]
    pub fn suit_order(mut self, suits: impl IntoIterator<Item = Suit>) -> Self {
        self.ordering.set_suit_order(suits);
        self
    }

    /// Override the rank value table.
    #[must_use]
    pub fn rank_values(mut self, values: impl IntoIterator<Item = (Rank, i32)>) -> Self {
        self.ordering.set_rank_values(values);
        self
    }

    /// Replace the entire ordering context.
    #[must_use]
    pub fn ordering(mut self, ordering: CardOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Build the deck, unshuffled, in new-deck order.
    #[must_use]
    pub fn build(self) -> Deck {
        Deck::from_parts(new_deck_cards(self.jokers), self.ordering, self.jokers)
    }
}
