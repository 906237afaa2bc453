//! Playing card values: ranks, suits, and the immutable `Card`.
//!
//! A `Card` is a plain rank/suit pair. Jokers are the `Joker` rank paired
//! with one of the two color suits (`Black`/`Red`); any other pairing of
//! joker parts is rejected at construction.
//!
//! Cards deliberately do **not** implement `Ord`: which of two cards wins
//! depends on the deck's rules, not the card itself. See
//! [`CardOrdering`](crate::CardOrdering) for comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from card construction and parsing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CardError {
    /// The rank/suit pairing is not a real card (e.g. a joker of spades).
    #[error("invalid card: {rank} of {suit}")]
    InvalidCard {
        /// Offending rank.
        rank: Rank,
        /// Offending suit.
        suit: Suit,
    },

    /// Text that does not parse as card notation.
    #[error("unrecognized card notation: {0:?}")]
    InvalidNotation(String),
}

/// Card suit, including the two joker colors.
///
/// The derived `Ord` is the canonical suit priority (English alphabetical,
/// jokers last), used by the default ordering context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    /// Black joker color.
    Black,
    /// Red joker color.
    Red,
}

impl Suit {
    /// The four standard suits, in canonical order.
    pub const STANDARD: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// All six suits (standard plus joker colors), in canonical order.
    pub const ALL: [Suit; 6] = [
        Suit::Clubs,
        Suit::Diamonds,
        Suit::Hearts,
        Suit::Spades,
        Suit::Black,
        Suit::Red,
    ];

    /// Is this one of the four standard suits?
    #[must_use]
    pub fn is_standard(self) -> bool {
        !matches!(self, Suit::Black | Suit::Red)
    }

    /// The color of this suit.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades | Suit::Black => Color::Black,
            Suit::Diamonds | Suit::Hearts | Suit::Red => Color::Red,
        }
    }

    /// Single-letter notation for the standard suits, color letter for jokers.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
            Suit::Black => 'B',
            Suit::Red => 'R',
        }
    }

    /// Unicode symbol for display (joker colors spell out their name).
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "\u{2663}",
            Suit::Diamonds => "\u{2666}",
            Suit::Hearts => "\u{2665}",
            Suit::Spades => "\u{2660}",
            Suit::Black => "Black",
            Suit::Red => "Red",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
            Suit::Black => "black",
            Suit::Red => "red",
        };
        f.write_str(name)
    }
}

/// Card rank, aces high, with `Joker` as a distinct rank above `Ace`.
///
/// The derived `Ord` is the canonical ascending rank order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Joker,
}

impl Rank {
    /// The thirteen standard ranks, ascending (aces high).
    pub const STANDARD: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Canonical numeric value: pip cards at face value, J=11, Q=12, K=13,
    /// A=14, Joker=15.
    #[must_use]
    pub fn default_value(self) -> i32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
            Rank::Joker => 15,
        }
    }

    /// Compact notation: `"2"`..`"10"`, `"J"`, `"Q"`, `"K"`, `"A"`, `"Joker"`.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Joker => "Joker",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card color: red (hearts, diamonds, red joker) or black (the rest).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

/// An immutable playing card.
///
/// Equality and hashing are value-based. There is no inherent ordering;
/// compare cards through a [`CardOrdering`](crate::CardOrdering) or the
/// owning deck's `compare`.
///
/// ## Notation
///
/// `Display` and `FromStr` round-trip through compact notation: rank symbol
/// followed by suit letter (`"As"`, `"10h"`, `"2c"`); jokers are `"BJ"` and
/// `"RJ"`. Parsing is case-insensitive except the suit letter must not be
/// confusable (`"as"` and `"AS"` both parse as the ace of spades).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRepr", into = "CardRepr")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

/// Serde representation that revalidates the rank/suit pairing on input.
#[derive(Serialize, Deserialize)]
struct CardRepr {
    rank: Rank,
    suit: Suit,
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        Self { rank: card.rank, suit: card.suit }
    }
}

impl TryFrom<CardRepr> for Card {
    type Error = CardError;

    fn try_from(repr: CardRepr) -> Result<Self, CardError> {
        Card::new(repr.rank, repr.suit)
    }
}

impl Card {
    /// Create a card, validating the rank/suit pairing.
    ///
    /// The `Joker` rank pairs only with the `Black`/`Red` color suits;
    /// standard ranks pair only with the four standard suits.
    pub fn new(rank: Rank, suit: Suit) -> Result<Self, CardError> {
        let valid = (rank == Rank::Joker) != suit.is_standard();
        if valid {
            Ok(Self { rank, suit })
        } else {
            Err(CardError::InvalidCard { rank, suit })
        }
    }

    /// Internal constructor for pairings already known to be valid.
    pub(crate) fn new_unchecked(rank: Rank, suit: Suit) -> Self {
        debug_assert!((rank == Rank::Joker) != suit.is_standard());
        Self { rank, suit }
    }

    /// The black joker.
    #[must_use]
    pub fn black_joker() -> Self {
        Self { rank: Rank::Joker, suit: Suit::Black }
    }

    /// The red joker.
    #[must_use]
    pub fn red_joker() -> Self {
        Self { rank: Rank::Joker, suit: Suit::Red }
    }

    /// This card's rank.
    #[must_use]
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// This card's suit (a color suit for jokers).
    #[must_use]
    pub fn suit(self) -> Suit {
        self.suit
    }

    /// Is this card a joker?
    #[must_use]
    pub fn is_joker(self) -> bool {
        self.rank == Rank::Joker
    }

    /// The card's color.
    #[must_use]
    pub fn color(self) -> Color {
        self.suit.color()
    }

    /// Is this card red (hearts, diamonds, or the red joker)?
    #[must_use]
    pub fn is_red(self) -> bool {
        self.color() == Color::Red
    }

    /// Is this card black (clubs, spades, or the black joker)?
    #[must_use]
    pub fn is_black(self) -> bool {
        self.color() == Color::Black
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            match self.suit {
                Suit::Red => f.write_str("RJ"),
                _ => f.write_str("BJ"),
            }
        } else {
            write!(f, "{}{}", self.rank.symbol(), self.suit.letter())
        }
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, CardError> {
        let err = || CardError::InvalidNotation(s.to_string());

        let trimmed = s.trim();
        if !trimmed.is_ascii() {
            return Err(err());
        }

        let upper = trimmed.to_ascii_uppercase();
        match upper.as_str() {
            "BJ" => return Ok(Card::black_joker()),
            "RJ" => return Ok(Card::red_joker()),
            _ => {}
        }

        let (rank_part, suit_part) = upper.split_at(upper.len().checked_sub(1).ok_or_else(err)?);
        let rank = match rank_part {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(err()),
        };
        let suit = match suit_part {
            "C" => Suit::Clubs,
            "D" => Suit::Diamonds,
            "H" => Suit::Hearts,
            "S" => Suit::Spades,
            _ => return Err(err()),
        };

        Card::new(rank, suit).map_err(|_| err())
    }
}
