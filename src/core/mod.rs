//! Core building blocks shared by the deck and dice subsystems.
//!
//! Currently this is the deterministic RNG. Decks and dice never touch a
//! global generator: every randomized operation takes `&mut GameRng`.

pub mod rng;

pub use rng::{GameRng, GameRngState};
