//! Property-based invariant tests.
//!
//! These cover the algebraic deck properties (cut/uncut identity, split
//! reconstruction, draw/re-add identity) and the dice bounds, over
//! arbitrary seeds and sizes.

use proptest::prelude::*;

use parlor::{Card, Deck, DeckError, Dice, Die, ExplodingDie, GameRng, Insert};

fn shuffled_deck(seed: u64) -> Deck {
    let mut rng = GameRng::new(seed);
    let mut deck = Deck::standard();
    deck.shuffle(&mut rng);
    deck
}

fn cards_of(deck: &Deck) -> Vec<Card> {
    deck.iter().copied().collect()
}

proptest! {
    #[test]
    fn cut_then_cut_back_is_identity(seed in any::<u64>(), n in 0usize..=104) {
        let mut deck = shuffled_deck(seed);
        let original = cards_of(&deck);

        deck.cut(n);
        deck.cut_back(n);

        prop_assert_eq!(cards_of(&deck), original);
    }

    #[test]
    fn cut_preserves_the_multiset(seed in any::<u64>(), n in 0usize..=104) {
        let mut deck = shuffled_deck(seed);
        let mut original = cards_of(&deck);

        deck.cut(n);

        let mut now = cards_of(&deck);
        original.sort_by_key(Card::to_string);
        now.sort_by_key(Card::to_string);
        prop_assert_eq!(now, original);
    }

    #[test]
    fn draw_then_add_top_is_identity(seed in any::<u64>(), n in 0usize..=52) {
        let mut deck = shuffled_deck(seed);
        let original = cards_of(&deck);

        let drawn = deck.draw(n).unwrap();
        deck.add(drawn, Insert::Top);

        prop_assert_eq!(cards_of(&deck), original);
    }

    #[test]
    fn draw_from_bottom_then_add_bottom_is_identity(seed in any::<u64>(), n in 0usize..=52) {
        let mut deck = shuffled_deck(seed);
        let original = cards_of(&deck);

        // Bottom draws come back bottom-most first; re-adding them reversed
        // puts each card back beneath the previous one.
        let drawn = deck.draw_from_bottom(n).unwrap();
        deck.add(drawn.into_iter().rev(), Insert::Bottom);

        prop_assert_eq!(cards_of(&deck), original);
    }

    #[test]
    fn strict_split_fails_iff_indivisible(seed in any::<u64>(), k in 1usize..=60) {
        let deck = shuffled_deck(seed);

        match deck.split_exact(k) {
            Ok(parts) => {
                prop_assert_eq!(52 % k, 0);
                prop_assert!(parts.iter().all(|p| p.len() == 52 / k));
            }
            Err(e) => {
                prop_assert_ne!(52 % k, 0);
                prop_assert_eq!(e, DeckError::UnevenSplit { len: 52, parts: k });
            }
        }
    }

    #[test]
    fn loose_split_reconstructs_the_deck(seed in any::<u64>(), k in 1usize..=60) {
        let deck = shuffled_deck(seed);
        let parts = deck.split(k);

        let rebuilt: Vec<Card> = parts.iter().flat_map(|p| p.iter().copied()).collect();
        prop_assert_eq!(rebuilt, cards_of(&deck));
    }

    #[test]
    fn sorting_twice_reverses(seed in any::<u64>()) {
        let mut deck = shuffled_deck(seed);

        deck.sort();
        let ascending = cards_of(&deck);

        deck.sort_descending();
        let descending = cards_of(&deck);

        let reversed: Vec<Card> = ascending.into_iter().rev().collect();
        prop_assert_eq!(descending, reversed);
    }

    #[test]
    fn draws_partition_the_deck(seed in any::<u64>(), n in 0usize..=52) {
        let mut deck = shuffled_deck(seed);
        let original = cards_of(&deck);

        let drawn = deck.draw(n).unwrap();
        let remaining = cards_of(&deck);

        prop_assert_eq!(&original[..n], drawn.as_slice());
        prop_assert_eq!(&original[n..], remaining.as_slice());
    }

    #[test]
    fn die_roll_stays_in_range(seed in any::<u64>(), sides in 1u32..=1000) {
        let mut rng = GameRng::new(seed);
        let die = Die::new(sides).unwrap();

        let face = die.roll(&mut rng);
        prop_assert!(face >= 1 && face <= sides);
    }

    #[test]
    fn exploding_roll_respects_bounds(seed in any::<u64>(), sides in 1u32..=100, cap in 0u32..=20) {
        let mut rng = GameRng::new(seed);
        let mut die = ExplodingDie::with_max_explosions(sides, cap).unwrap();

        let total = die.roll(&mut rng);
        prop_assert!(total >= die.min());
        prop_assert!(total <= die.max());
        prop_assert!(die.explosions() <= cap);
    }

    #[test]
    fn pool_roll_stays_in_bounds(seed in any::<u64>(), sides in prop::collection::vec(1u32..=100, 0..8)) {
        let mut rng = GameRng::new(seed);
        let mut pool = Dice::from_sides(sides).unwrap();

        let total = pool.roll(&mut rng);
        prop_assert!(total >= pool.min());
        prop_assert!(total <= pool.max());
    }
}
