//! Single dice: standard, weighted, and exploding.
//!
//! All dice are validated at construction and roll through an explicit
//! [`GameRng`]. Faces are numbered 1 to `sides`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::GameRng;

/// Errors from dice construction and parsing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    /// A die must have at least one side.
    #[error("a die must have at least 1 side")]
    InvalidDie,

    /// The weight vector does not describe a valid distribution.
    #[error("bad weights for a {sides}-sided die: {detail}")]
    WeightMismatch {
        /// Number of sides the die was declared with.
        sides: u32,
        /// What was wrong with the weight vector.
        detail: String,
    },

    /// Text that does not parse as dice notation.
    #[error("unrecognized dice notation: {0:?}")]
    InvalidNotation(String),
}

/// A standard die: uniform over faces `1..=sides`.
///
/// Notation: `"d6"`, `"d20"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    sides: u32,
}

impl Die {
    /// Create a die. Fails with `InvalidDie` if `sides < 1`.
    pub fn new(sides: u32) -> Result<Self, DiceError> {
        if sides < 1 {
            return Err(DiceError::InvalidDie);
        }
        Ok(Self { sides })
    }

    /// Number of sides.
    #[must_use]
    pub fn sides(self) -> u32 {
        self.sides
    }

    /// Roll: a uniform random face in `[1, sides]`.
    pub fn roll(self, rng: &mut GameRng) -> u32 {
        rng.gen_range(1..=self.sides)
    }

    /// Lowest possible roll.
    #[must_use]
    pub fn min(self) -> u32 {
        1
    }

    /// Highest possible roll.
    #[must_use]
    pub fn max(self) -> u32 {
        self.sides
    }

    /// Expected value of a roll.
    #[must_use]
    pub fn average(self) -> f64 {
        (f64::from(self.sides) + 1.0) / 2.0
    }
}

/// The customary six-sided die.
impl Default for Die {
    fn default() -> Self {
        Self { sides: 6 }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides)
    }
}

/// A die whose faces are drawn from a non-uniform discrete distribution.
///
/// Faces with zero weight are never rolled. Notation: `"d6w"` (display
/// only; weight vectors have no textual form).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedDie {
    sides: u32,
    weights: Vec<f32>,
}

impl WeightedDie {
    /// Create a weighted die.
    ///
    /// Fails with `InvalidDie` if `sides < 1`, or `WeightMismatch` if the
    /// vector length differs from `sides`, any weight is negative or
    /// non-finite, or no weight is positive.
    pub fn new(sides: u32, weights: Vec<f32>) -> Result<Self, DiceError> {
        if sides < 1 {
            return Err(DiceError::InvalidDie);
        }
        if weights.len() != sides as usize {
            return Err(DiceError::WeightMismatch {
                sides,
                detail: format!("expected {} weights, got {}", sides, weights.len()),
            });
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DiceError::WeightMismatch {
                sides,
                detail: "weights must be finite and non-negative".to_string(),
            });
        }
        if !weights.iter().any(|w| *w > 0.0) {
            return Err(DiceError::WeightMismatch {
                sides,
                detail: "at least one weight must be positive".to_string(),
            });
        }
        Ok(Self { sides, weights })
    }

    /// Number of sides.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// The per-face weights, in face order.
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Roll: a face sampled proportionally to its weight.
    pub fn roll(&self, rng: &mut GameRng) -> u32 {
        let i = rng
            .choose_weighted(&self.weights)
            .expect("weight vector validated at construction");
        i as u32 + 1
    }

    /// Lowest face with positive weight.
    #[must_use]
    pub fn min(&self) -> u32 {
        self.weights
            .iter()
            .position(|w| *w > 0.0)
            .map_or(1, |i| i as u32 + 1)
    }

    /// Highest face with positive weight.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.weights
            .iter()
            .rposition(|w| *w > 0.0)
            .map_or(self.sides, |i| i as u32 + 1)
    }

    /// Expected value of a roll.
    #[must_use]
    pub fn average(&self) -> f64 {
        let total: f64 = self.weights.iter().map(|w| f64::from(*w)).sum();
        let weighted: f64 = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, w)| (i as f64 + 1.0) * f64::from(*w))
            .sum();
        weighted / total
    }
}

impl fmt::Display for WeightedDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}w", self.sides)
    }
}

/// A die that rolls again whenever its maximum face comes up, summing every
/// face into the total.
///
/// Termination is guaranteed by `max_explosions`
/// (default [`DEFAULT_MAX_EXPLOSIONS`]): once that many re-rolls have
/// triggered, the chain stops even on a maximum face. Totals saturate at
/// `u32::MAX`. Notation: `"d6!"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplodingDie {
    sides: u32,
    max_explosions: u32,
    explosions: u32,
}

/// Default cap on chained re-rolls for an exploding die.
pub const DEFAULT_MAX_EXPLOSIONS: u32 = 100;

// The per-roll explosion counter is transient and does not participate in
// equality.
impl PartialEq for ExplodingDie {
    fn eq(&self, other: &Self) -> bool {
        self.sides == other.sides && self.max_explosions == other.max_explosions
    }
}

impl Eq for ExplodingDie {}

impl ExplodingDie {
    /// Create an exploding die with the default re-roll cap.
    pub fn new(sides: u32) -> Result<Self, DiceError> {
        Self::with_max_explosions(sides, DEFAULT_MAX_EXPLOSIONS)
    }

    /// Create an exploding die with an explicit re-roll cap.
    ///
    /// A cap of 0 never explodes. Fails with `InvalidDie` if `sides < 1`.
    pub fn with_max_explosions(sides: u32, max_explosions: u32) -> Result<Self, DiceError> {
        if sides < 1 {
            return Err(DiceError::InvalidDie);
        }
        Ok(Self { sides, max_explosions, explosions: 0 })
    }

    /// Number of sides.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// The re-roll cap.
    #[must_use]
    pub fn max_explosions(&self) -> u32 {
        self.max_explosions
    }

    /// Re-rolls triggered by the most recent [`roll`](Self::roll). Reset to
    /// 0 at the start of each roll.
    #[must_use]
    pub fn explosions(&self) -> u32 {
        self.explosions
    }

    /// Roll, chaining an extra roll each time the maximum face comes up,
    /// until a non-maximum face or the re-roll cap. Returns the sum of
    /// every face in the chain.
    pub fn roll(&mut self, rng: &mut GameRng) -> u32 {
        self.explosions = 0;
        let mut total: u32 = 0;
        loop {
            let face = rng.gen_range(1..=self.sides);
            total = total.saturating_add(face);
            if face == self.sides && self.explosions < self.max_explosions {
                self.explosions += 1;
                continue;
            }
            return total;
        }
    }

    /// Lowest possible total. 1, except for the degenerate one-sided die
    /// whose every chain runs to the cap.
    #[must_use]
    pub fn min(&self) -> u32 {
        if self.sides == 1 {
            self.max()
        } else {
            1
        }
    }

    /// Highest possible total: a maximal chain, every roll showing the
    /// maximum face.
    #[must_use]
    pub fn max(&self) -> u32 {
        let max = u64::from(self.sides) * (u64::from(self.max_explosions) + 1);
        max.min(u64::from(u32::MAX)) as u32
    }

    /// Expected value of a roll, by the geometric-explosion model
    /// `s(s+1) / 2(s-1)`. The cap's contribution is negligible at the
    /// default setting and is ignored, except for the one-sided die whose
    /// total is deterministic.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.sides == 1 {
            return f64::from(self.max());
        }
        let s = f64::from(self.sides);
        s * (s + 1.0) / (2.0 * (s - 1.0))
    }
}

impl fmt::Display for ExplodingDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}!", self.sides)
    }
}

/// Any of the three die types, for mixing in a [`Dice`](crate::Dice) pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DieKind {
    /// Uniform die.
    Standard(Die),
    /// Weighted die.
    Weighted(WeightedDie),
    /// Exploding die.
    Exploding(ExplodingDie),
}

impl DieKind {
    /// Number of sides.
    #[must_use]
    pub fn sides(&self) -> u32 {
        match self {
            DieKind::Standard(d) => d.sides(),
            DieKind::Weighted(d) => d.sides(),
            DieKind::Exploding(d) => d.sides(),
        }
    }

    /// Roll this die.
    pub fn roll(&mut self, rng: &mut GameRng) -> u32 {
        match self {
            DieKind::Standard(d) => d.roll(rng),
            DieKind::Weighted(d) => d.roll(rng),
            DieKind::Exploding(d) => d.roll(rng),
        }
    }

    /// Lowest possible roll.
    #[must_use]
    pub fn min(&self) -> u32 {
        match self {
            DieKind::Standard(d) => d.min(),
            DieKind::Weighted(d) => d.min(),
            DieKind::Exploding(d) => d.min(),
        }
    }

    /// Highest possible roll.
    #[must_use]
    pub fn max(&self) -> u32 {
        match self {
            DieKind::Standard(d) => d.max(),
            DieKind::Weighted(d) => d.max(),
            DieKind::Exploding(d) => d.max(),
        }
    }

    /// Expected value of a roll.
    #[must_use]
    pub fn average(&self) -> f64 {
        match self {
            DieKind::Standard(d) => d.average(),
            DieKind::Weighted(d) => d.average(),
            DieKind::Exploding(d) => d.average(),
        }
    }
}

impl From<Die> for DieKind {
    fn from(die: Die) -> Self {
        DieKind::Standard(die)
    }
}

impl From<WeightedDie> for DieKind {
    fn from(die: WeightedDie) -> Self {
        DieKind::Weighted(die)
    }
}

impl From<ExplodingDie> for DieKind {
    fn from(die: ExplodingDie) -> Self {
        DieKind::Exploding(die)
    }
}

impl fmt::Display for DieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DieKind::Standard(d) => d.fmt(f),
            DieKind::Weighted(d) => d.fmt(f),
            DieKind::Exploding(d) => d.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_die_construction() {
        assert!(Die::new(6).is_ok());
        assert!(Die::new(1).is_ok());
        assert_eq!(Die::new(0), Err(DiceError::InvalidDie));
        assert_eq!(Die::default().sides(), 6);
    }

    #[test]
    fn test_die_roll_in_range() {
        let mut rng = GameRng::new(42);
        let die = Die::new(6).unwrap();

        for _ in 0..1000 {
            let face = die.roll(&mut rng);
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_die_roll_covers_all_faces() {
        let mut rng = GameRng::new(42);
        let die = Die::new(6).unwrap();

        let mut seen = [false; 6];
        for _ in 0..1000 {
            seen[(die.roll(&mut rng) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_die_bounds() {
        let die = Die::new(20).unwrap();
        assert_eq!(die.min(), 1);
        assert_eq!(die.max(), 20);
        assert!((die.average() - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_one_sided_die() {
        let mut rng = GameRng::new(42);
        let die = Die::new(1).unwrap();
        assert_eq!(die.roll(&mut rng), 1);
    }

    #[test]
    fn test_weighted_die_validation() {
        assert!(WeightedDie::new(3, vec![1.0, 2.0, 3.0]).is_ok());

        assert_eq!(WeightedDie::new(0, vec![]), Err(DiceError::InvalidDie));

        assert!(matches!(
            WeightedDie::new(3, vec![1.0, 2.0]),
            Err(DiceError::WeightMismatch { sides: 3, .. })
        ));
        assert!(matches!(
            WeightedDie::new(2, vec![1.0, -1.0]),
            Err(DiceError::WeightMismatch { .. })
        ));
        assert!(matches!(
            WeightedDie::new(2, vec![1.0, f32::NAN]),
            Err(DiceError::WeightMismatch { .. })
        ));
        assert!(matches!(
            WeightedDie::new(2, vec![0.0, 0.0]),
            Err(DiceError::WeightMismatch { .. })
        ));
    }

    #[test]
    fn test_weighted_die_never_rolls_zero_weight_face() {
        let mut rng = GameRng::new(42);
        let die = WeightedDie::new(6, vec![1.0, 1.0, 1.0, 1.0, 1.0, 0.0]).unwrap();

        for _ in 0..10_000 {
            assert_ne!(die.roll(&mut rng), 6);
        }
    }

    #[test]
    fn test_weighted_die_is_biased() {
        let mut rng = GameRng::new(42);
        let die = WeightedDie::new(2, vec![1.0, 9.0]).unwrap();

        let twos = (0..10_000).filter(|_| die.roll(&mut rng) == 2).count();
        // Expect about 9000
        assert!(twos > 8500 && twos < 9500, "twos = {twos}");
    }

    #[test]
    fn test_weighted_die_bounds() {
        let die = WeightedDie::new(6, vec![0.0, 1.0, 1.0, 1.0, 1.0, 0.0]).unwrap();
        assert_eq!(die.min(), 2);
        assert_eq!(die.max(), 5);
        assert!((die.average() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_exploding_die_counts_explosions() {
        let mut rng = GameRng::new(42);
        let mut die = ExplodingDie::new(2).unwrap();

        for _ in 0..1000 {
            let total = die.roll(&mut rng);
            // Chain of e maximum faces then one non-maximum (or capped):
            // total is at least explosions * 2 + 1
            assert!(total >= die.explosions() * 2 + 1);
            assert!(die.explosions() <= die.max_explosions());
        }
    }

    #[test]
    fn test_exploding_die_counter_resets_each_roll() {
        let mut rng = GameRng::new(42);
        let mut die = ExplodingDie::new(2).unwrap();

        // Roll until an explosion has happened, then until a clean roll:
        // the counter must reflect only the latest roll.
        let mut saw_explosion = false;
        let mut saw_clean = false;
        for _ in 0..1000 {
            die.roll(&mut rng);
            if die.explosions() > 0 {
                saw_explosion = true;
            } else {
                saw_clean = true;
            }
        }
        assert!(saw_explosion && saw_clean);
    }

    #[test]
    fn test_exploding_die_cap_zero_never_explodes() {
        let mut rng = GameRng::new(42);
        let mut die = ExplodingDie::with_max_explosions(6, 0).unwrap();

        for _ in 0..1000 {
            let total = die.roll(&mut rng);
            assert!((1..=6).contains(&total));
            assert_eq!(die.explosions(), 0);
        }
    }

    #[test]
    fn test_exploding_one_sided_die_terminates_at_cap() {
        let mut rng = GameRng::new(42);
        let mut die = ExplodingDie::with_max_explosions(1, 5).unwrap();

        // Every face is the maximum: the chain runs to the cap exactly.
        assert_eq!(die.roll(&mut rng), 6);
        assert_eq!(die.explosions(), 5);
    }

    #[test]
    fn test_exploding_die_mean_matches_geometric_model() {
        let mut rng = GameRng::new(42);
        let mut die = ExplodingDie::new(2).unwrap();

        let trials = 20_000;
        let sum: u64 = (0..trials).map(|_| u64::from(die.roll(&mut rng))).sum();
        let mean = sum as f64 / trials as f64;

        // Theoretical mean for an exploding d2 is 3.0
        assert!((mean - 3.0).abs() < 0.1, "mean = {mean}");
    }

    #[test]
    fn test_exploding_die_bounds() {
        let die = ExplodingDie::with_max_explosions(6, 2).unwrap();
        assert_eq!(die.min(), 1);
        assert_eq!(die.max(), 18);
        assert!((die.average() - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_die_kind_conversions_and_display() {
        let kinds: Vec<DieKind> = vec![
            Die::new(6).unwrap().into(),
            WeightedDie::new(6, vec![1.0; 6]).unwrap().into(),
            ExplodingDie::new(6).unwrap().into(),
        ];

        let text: Vec<String> = kinds.iter().map(DieKind::to_string).collect();
        assert_eq!(text, vec!["d6", "d6w", "d6!"]);
        assert!(kinds.iter().all(|k| k.sides() == 6));
    }

    #[test]
    fn test_serde_round_trip() {
        let die = WeightedDie::new(3, vec![1.0, 2.0, 3.0]).unwrap();
        let json = serde_json::to_string(&die).unwrap();
        let back: WeightedDie = serde_json::from_str(&json).unwrap();
        assert_eq!(die, back);
    }
}
