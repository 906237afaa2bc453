//! The dice subsystem: single dice and dice pools.
//!
//! ## Key Types
//!
//! - `Die`: uniform die over `1..=sides`
//! - `WeightedDie`: per-face weights, zero-weight faces never rolled
//! - `ExplodingDie`: chains re-rolls on the maximum face, capped for
//!   guaranteed termination
//! - `DieKind`: closed enum over the three, for mixed pools
//! - `Dice`: an ordered pool rolled as one, with dice-notation parsing

pub mod die;
pub mod pool;

pub use die::{DiceError, Die, DieKind, ExplodingDie, WeightedDie, DEFAULT_MAX_EXPLOSIONS};
pub use pool::Dice;
