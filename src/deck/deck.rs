//! The deck: an ordered, double-ended sequence of cards.
//!
//! Index 0 is the **top** of the deck. Storage is a ring buffer
//! (`VecDeque`), so draws and inserts at either end are O(1), indexed
//! access anywhere is O(1), and arbitrary insertion is O(min(i, len - i)).
//!
//! A deck owns its [`CardOrdering`]; sorting and comparison always use the
//! deck's own rules. Duplicate cards are allowed (multi-deck games).
//!
//! The element type is generic over [`AsCard`], defaulting to plain
//! [`Card`]. Use `Deck<CardInstance>` to carry mutable per-card state
//! through every operation unchanged.

use std::cmp::Ordering;
use std::collections::vec_deque;
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Index, RangeBounds};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{AsCard, Card, CardOrdering, Suit};
use crate::core::GameRng;

use super::builder::{new_deck_cards, DeckBuilder};

/// Errors from deck operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    /// A draw or deal was attempted on an empty deck.
    #[error("cannot draw from an empty deck")]
    EmptyDeck,

    /// A draw or deal asked for more cards than the deck holds.
    #[error("requested {requested} cards but only {available} remain")]
    InsufficientCards {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards actually in the deck.
        available: usize,
    },

    /// A strict split was attempted with a non-divisible deck size.
    #[error("cannot split {len} cards into {parts} equal parts")]
    UnevenSplit {
        /// Deck size at the time of the split.
        len: usize,
        /// Requested number of parts.
        parts: usize,
    },
}

/// Where to insert cards into a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Insert {
    /// On top of the deck (position 0).
    Top,
    /// At the bottom of the deck.
    Bottom,
    /// Before the card currently at this index, clamped to the bottom.
    At(usize),
}

/// An ordered, mutable deck of cards. Position 0 is the top.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck<C: AsCard = Card> {
    cards: VecDeque<C>,
    ordering: CardOrdering,
    include_jokers: bool,
}

impl Deck {
    /// A standard 52-card deck in new-deck order, standard ordering rules.
    #[must_use]
    pub fn standard() -> Self {
        DeckBuilder::new().build()
    }

    /// A 54-card deck (standard plus both jokers) in new-deck order.
    #[must_use]
    pub fn with_jokers() -> Self {
        DeckBuilder::new().jokers(true).build()
    }

    /// Start building a deck with custom parameters.
    #[must_use]
    pub fn builder() -> DeckBuilder {
        DeckBuilder::new()
    }

    /// Discard the current contents and rebuild new-deck order, honoring
    /// the jokers flag this deck was constructed with.
    pub fn reset(&mut self) {
        self.cards = new_deck_cards(self.include_jokers);
    }

    /// [`reset`](Self::reset), then shuffle.
    pub fn reset_shuffled(&mut self, rng: &mut GameRng) {
        self.reset();
        self.shuffle(rng);
    }
}

impl<C: AsCard> Deck<C> {
    /// An empty deck with the standard ordering rules.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cards: VecDeque::new(),
            ordering: CardOrdering::standard(),
            include_jokers: false,
        }
    }

    pub(crate) fn from_parts(
        cards: VecDeque<C>,
        ordering: CardOrdering,
        include_jokers: bool,
    ) -> Self {
        Self { cards, ordering, include_jokers }
    }

    /// A new deck sharing this deck's construction metadata.
    fn derived(&self, cards: VecDeque<C>) -> Self {
        Self {
            cards,
            ordering: self.ordering.clone(),
            include_jokers: self.include_jokers,
        }
    }

    fn check_available(&self, requested: usize) -> Result<(), DeckError> {
        if requested > self.cards.len() {
            if self.cards.is_empty() {
                Err(DeckError::EmptyDeck)
            } else {
                Err(DeckError::InsufficientCards {
                    requested,
                    available: self.cards.len(),
                })
            }
        } else {
            Ok(())
        }
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Does the deck contain this card?
    #[must_use]
    pub fn contains(&self, card: &C) -> bool {
        self.cards.contains(card)
    }

    /// The card at `index` (0 = top), if in range. O(1).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.cards.get(index)
    }

    /// Peek at the top card.
    #[must_use]
    pub fn top(&self) -> Option<&C> {
        self.cards.front()
    }

    /// Peek at the bottom card.
    #[must_use]
    pub fn bottom(&self) -> Option<&C> {
        self.cards.back()
    }

    /// Iterate top to bottom. Restartable: iterating never consumes cards.
    pub fn iter(&self) -> vec_deque::Iter<'_, C> {
        self.cards.iter()
    }

    /// Iterate over a sub-range of positions, top to bottom. O(n) in the
    /// length of the range.
    ///
    /// Panics if the range is out of bounds.
    pub fn range<R: RangeBounds<usize>>(&self, range: R) -> vec_deque::Iter<'_, C> {
        self.cards.range(range)
    }

    /// This deck's comparison rules.
    #[must_use]
    pub fn ordering(&self) -> &CardOrdering {
        &self.ordering
    }

    /// Replace this deck's comparison rules.
    pub fn set_ordering(&mut self, ordering: CardOrdering) {
        self.ordering = ordering;
    }

    /// Whether `reset` rebuilds with jokers.
    #[must_use]
    pub fn includes_jokers(&self) -> bool {
        self.include_jokers
    }

    /// Compare two cards under this deck's rules.
    #[must_use]
    pub fn compare(&self, a: &C, b: &C) -> Ordering {
        self.ordering.compare(a.card(), b.card())
    }

    /// Shuffle in place: a uniform random permutation.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.cards.make_contiguous());
    }

    /// Remove and return the top `n` cards, top-most first.
    ///
    /// Strict: fails with `EmptyDeck` if the deck is empty, or
    /// `InsufficientCards` if fewer than `n` remain; the deck is untouched
    /// on failure. For the lenient form see
    /// [`draw_up_to`](Self::draw_up_to).
    pub fn draw(&mut self, n: usize) -> Result<Vec<C>, DeckError> {
        self.check_available(n)?;
        Ok(self.cards.drain(..n).collect())
    }

    /// Remove and return the bottom `n` cards, bottom-most first.
    ///
    /// Same error policy as [`draw`](Self::draw).
    pub fn draw_from_bottom(&mut self, n: usize) -> Result<Vec<C>, DeckError> {
        self.check_available(n)?;
        let split = self.cards.len() - n;
        let mut drawn: Vec<C> = self.cards.drain(split..).collect();
        drawn.reverse();
        Ok(drawn)
    }

    /// Remove and return the top card.
    pub fn draw_one(&mut self) -> Result<C, DeckError> {
        self.cards.pop_front().ok_or(DeckError::EmptyDeck)
    }

    /// Remove and return up to `n` cards from the top.
    ///
    /// Lenient: returns as many as remain (possibly none), never errors.
    pub fn draw_up_to(&mut self, n: usize) -> Vec<C> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Add a block of cards at the given position.
    ///
    /// The block keeps its internal order: after `Insert::Top`, the first
    /// card of the block is the new top, so `draw(n)` followed by
    /// `add(drawn, Insert::Top)` restores the deck exactly. `Insert::At`
    /// clamps past-the-end indices to the bottom. O(1) per card at the
    /// ends, O(min(i, len - i)) per card in the middle.
    pub fn add(&mut self, cards: impl IntoIterator<Item = C>, at: Insert) {
        match at {
            Insert::Top => {
                let block: Vec<C> = cards.into_iter().collect();
                for card in block.into_iter().rev() {
                    self.cards.push_front(card);
                }
            }
            Insert::Bottom => self.cards.extend(cards),
            Insert::At(index) => {
                for (offset, card) in cards.into_iter().enumerate() {
                    let i = (index + offset).min(self.cards.len());
                    self.cards.insert(i, card);
                }
            }
        }
    }

    /// Insert each card at an independent uniform random position.
    pub fn scatter(&mut self, cards: impl IntoIterator<Item = C>, rng: &mut GameRng) {
        for card in cards {
            let i = rng.gen_range(0..=self.cards.len());
            self.cards.insert(i, card);
        }
    }

    /// Deal `num_hands` hands of `cards_each`, round-robin from the top:
    /// hand 0 gets the top card, hand 1 the next, and so on.
    ///
    /// Strict like [`draw`](Self::draw): fails without touching the deck if
    /// it cannot satisfy `num_hands * cards_each`.
    pub fn deal(&mut self, num_hands: usize, cards_each: usize) -> Result<Vec<Vec<C>>, DeckError> {
        // A request too large to even count certainly exceeds the deck.
        let requested = num_hands.checked_mul(cards_each).unwrap_or(usize::MAX);
        self.check_available(requested)?;

        let mut hands: Vec<Vec<C>> = (0..num_hands).map(|_| Vec::with_capacity(cards_each)).collect();
        for _ in 0..cards_each {
            for hand in &mut hands {
                // Length was checked up front
                match self.cards.pop_front() {
                    Some(card) => hand.push(card),
                    None => unreachable!("deal size was validated"),
                }
            }
        }
        Ok(hands)
    }

    /// A new deck holding clones of the cards matching `pred`, in deck
    /// order, with this deck's ordering rules. Does not mutate. O(n).
    #[must_use]
    pub fn filter(&self, mut pred: impl FnMut(&C) -> bool) -> Self {
        let cards = self.cards.iter().filter(|c| pred(c)).cloned().collect();
        self.derived(cards)
    }

    /// Remove every card matching `pred`, returning them in deck order.
    pub fn remove(&mut self, mut pred: impl FnMut(&C) -> bool) -> Vec<C> {
        let (removed, kept): (VecDeque<C>, VecDeque<C>) =
            std::mem::take(&mut self.cards).into_iter().partition(|c| pred(c));
        self.cards = kept;
        removed.into()
    }

    /// Count the cards matching `pred`. O(n).
    #[must_use]
    pub fn count(&self, mut pred: impl FnMut(&C) -> bool) -> usize {
        self.cards.iter().filter(|c| pred(c)).count()
    }

    /// Stable in-place sort, lowest card on top, under this deck's rules.
    pub fn sort(&mut self) {
        let ordering = &self.ordering;
        self.cards
            .make_contiguous()
            .sort_by_key(|c| ordering.key(c.card()));
    }

    /// Stable in-place sort, highest card on top.
    pub fn sort_descending(&mut self) {
        let ordering = &self.ordering;
        self.cards
            .make_contiguous()
            .sort_by_key(|c| std::cmp::Reverse(ordering.key(c.card())));
    }

    /// Loose split into `k` parts, in deck order: part sizes differ by at
    /// most one, with earlier parts absorbing the remainder. Borrows and
    /// clones; each part inherits this deck's ordering rules.
    ///
    /// Panics if `k == 0`.
    #[must_use]
    pub fn split(&self, k: usize) -> Vec<Self> {
        assert!(k > 0, "cannot split into 0 parts");

        let base = self.cards.len() / k;
        let remainder = self.cards.len() % k;

        let mut parts = Vec::with_capacity(k);
        let mut start = 0;
        for i in 0..k {
            let size = base + usize::from(i < remainder);
            let cards = self.cards.range(start..start + size).cloned().collect();
            parts.push(self.derived(cards));
            start += size;
        }
        parts
    }

    /// Strict split into `k` equal parts; fails with `UnevenSplit` unless
    /// the deck size is divisible by `k`. Concatenating the parts in order
    /// reconstructs the original sequence.
    ///
    /// Panics if `k == 0`.
    pub fn split_exact(&self, k: usize) -> Result<Vec<Self>, DeckError> {
        assert!(k > 0, "cannot split into 0 parts");

        if self.cards.len() % k != 0 {
            return Err(DeckError::UnevenSplit { len: self.cards.len(), parts: k });
        }
        Ok(self.split(k))
    }

    /// Cut: move the top `n` cards to the bottom without reordering either
    /// block. `n` is taken modulo the deck size; cutting an empty deck is a
    /// no-op. O(min(n, len - n)).
    pub fn cut(&mut self, n: usize) {
        if self.cards.is_empty() {
            return;
        }
        self.cards.rotate_left(n % self.cards.len());
    }

    /// Reverse cut: move the bottom `n` cards to the top. Undoes
    /// [`cut`](Self::cut) of the same `n`.
    pub fn cut_back(&mut self, n: usize) {
        if self.cards.is_empty() {
            return;
        }
        self.cards.rotate_right(n % self.cards.len());
    }

    /// A new deck with clones of this deck's cards on top of clones of
    /// `other`'s, carrying this deck's ordering rules.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut cards = self.cards.clone();
        cards.extend(other.cards.iter().cloned());
        self.derived(cards)
    }

    /// A new deck excluding every card matching `pred`. Does not mutate.
    #[must_use]
    pub fn without(&self, mut pred: impl FnMut(&C) -> bool) -> Self {
        self.filter(|c| !pred(c))
    }

    /// A new deck excluding every card of the given suit.
    #[must_use]
    pub fn without_suit(&self, suit: Suit) -> Self {
        self.without(|c| c.card().suit() == suit)
    }

    /// Convert the element type, e.g. wrap every card in a
    /// [`CardInstance`](crate::CardInstance).
    #[must_use]
    pub fn map<D: AsCard>(self, f: impl FnMut(C) -> D) -> Deck<D> {
        Deck {
            cards: self.cards.into_iter().map(f).collect(),
            ordering: self.ordering,
            include_jokers: self.include_jokers,
        }
    }
}

/// Decks compare equal iff they hold the same cards in the same order under
/// an equal ordering context. The jokers flag is construction metadata and
/// does not participate.
impl<C: AsCard> PartialEq for Deck<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards && self.ordering == other.ordering
    }
}

impl<C: AsCard> fmt::Display for Deck<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} cards)", self.cards.len())
    }
}

impl<C: AsCard> Default for Deck<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: AsCard> Index<usize> for Deck<C> {
    type Output = C;

    /// Panics if `index` is out of range; see [`Deck::get`] for the
    /// non-panicking form.
    fn index(&self, index: usize) -> &C {
        &self.cards[index]
    }
}

impl<C: AsCard> IntoIterator for Deck<C> {
    type Item = C;
    type IntoIter = vec_deque::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

impl<'a, C: AsCard> IntoIterator for &'a Deck<C> {
    type Item = &'a C;
    type IntoIter = vec_deque::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Collecting builds a deck with the standard ordering rules.
impl<C: AsCard> FromIterator<C> for Deck<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
            ordering: CardOrdering::standard(),
            include_jokers: false,
        }
    }
}

/// Extending appends to the bottom.
impl<C: AsCard> Extend<C> for Deck<C> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        self.cards.extend(iter);
    }
}
