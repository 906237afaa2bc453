//! Dice pools: several dice rolled together.
//!
//! A pool keeps its members in insertion order and rolls them all at once,
//! reporting the aggregate (and, on request, the individual faces). Pools
//! parse from and print as simple dice notation (`"2d6"`, `"d20"`,
//! `"2d6 + d8!"`).

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GameRng;

use super::die::{Die, DiceError, DieKind, ExplodingDie};

/// An ordered pool of dice.
///
/// Members are any mix of [`Die`], [`WeightedDie`](super::WeightedDie),
/// and [`ExplodingDie`]. Pools are small in practice; storage is inline up
/// to four dice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dice {
    dice: SmallVec<[DieKind; 4]>,
}

impl Dice {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool of standard dice, one per side count: `[6, 6, 8]` builds two
    /// d6 and a d8. Fails with `InvalidDie` on a zero side count.
    pub fn from_sides(sides: impl IntoIterator<Item = u32>) -> Result<Self, DiceError> {
        let dice = sides
            .into_iter()
            .map(|s| Die::new(s).map(DieKind::from))
            .collect::<Result<_, _>>()?;
        Ok(Self { dice })
    }

    /// Add a die to the pool.
    pub fn push(&mut self, die: impl Into<DieKind>) {
        self.dice.push(die.into());
    }

    /// Number of dice in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Is the pool empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// The die at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DieKind> {
        self.dice.get(index)
    }

    /// Iterate over the member dice in pool order.
    pub fn iter(&self) -> std::slice::Iter<'_, DieKind> {
        self.dice.iter()
    }

    /// Roll every die and return the sum. An empty pool rolls 0.
    pub fn roll(&mut self, rng: &mut GameRng) -> u32 {
        self.dice
            .iter_mut()
            .fold(0u32, |total, die| total.saturating_add(die.roll(rng)))
    }

    /// Roll every die, returning the individual faces (in pool order)
    /// alongside the total.
    pub fn roll_detailed(&mut self, rng: &mut GameRng) -> (Vec<u32>, u32) {
        let faces: Vec<u32> = self.dice.iter_mut().map(|die| die.roll(rng)).collect();
        let total = faces.iter().fold(0u32, |t, f| t.saturating_add(*f));
        (faces, total)
    }

    /// Lowest possible total.
    #[must_use]
    pub fn min(&self) -> u32 {
        self.dice.iter().fold(0u32, |t, d| t.saturating_add(d.min()))
    }

    /// Highest possible total.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.dice.iter().fold(0u32, |t, d| t.saturating_add(d.max()))
    }

    /// Expected value of the total.
    #[must_use]
    pub fn average(&self) -> f64 {
        self.dice.iter().map(DieKind::average).sum()
    }
}

impl Index<usize> for Dice {
    type Output = DieKind;

    /// Panics if `index` is out of range; see [`Dice::get`] for the
    /// non-panicking form.
    fn index(&self, index: usize) -> &DieKind {
        &self.dice[index]
    }
}

impl IntoIterator for Dice {
    type Item = DieKind;
    type IntoIter = smallvec::IntoIter<[DieKind; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dice {
    type Item = &'a DieKind;
    type IntoIter = std::slice::Iter<'a, DieKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.iter()
    }
}

impl<K: Into<DieKind>> FromIterator<K> for Dice {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            dice: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<K: Into<DieKind>> Extend<K> for Dice {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.dice.extend(iter.into_iter().map(Into::into));
    }
}

/// Dice notation, runs of identical dice collapsed: `"2d6 + d8"`. An empty
/// pool prints as `"0"`.
impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dice.is_empty() {
            return f.write_str("0");
        }

        let mut first = true;
        let mut i = 0;
        while i < self.dice.len() {
            let mut j = i + 1;
            while j < self.dice.len() && self.dice[j] == self.dice[i] {
                j += 1;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            let run = j - i;
            if run > 1 {
                write!(f, "{}{}", run, self.dice[i])?;
            } else {
                write!(f, "{}", self.dice[i])?;
            }
            i = j;
        }
        Ok(())
    }
}

/// Parse simple dice notation: `NdS` terms joined by `+`, each with an
/// optional count and an optional trailing `!` for exploding dice
/// (`"2d6"`, `"d20"`, `"3d6! + d8"`). Weighted dice have no notation.
impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, DiceError> {
        if s.trim().is_empty() {
            return Err(DiceError::InvalidNotation(s.to_string()));
        }

        let mut pool = Dice::new();
        for term in s.split('+') {
            parse_term(term.trim(), &mut pool)?;
        }
        Ok(pool)
    }
}

fn parse_term(term: &str, pool: &mut Dice) -> Result<(), DiceError> {
    let err = || DiceError::InvalidNotation(term.to_string());

    let (body, exploding) = match term.strip_suffix('!') {
        Some(rest) => (rest, true),
        None => (term, false),
    };

    let d = body.find(['d', 'D']).ok_or_else(err)?;
    let (count_part, rest) = body.split_at(d);
    let sides_part = &rest[1..];

    let count: u32 = if count_part.is_empty() {
        1
    } else {
        count_part.parse().map_err(|_| err())?
    };
    if count == 0 {
        return Err(err());
    }
    let sides: u32 = sides_part.parse().map_err(|_| err())?;

    for _ in 0..count {
        if exploding {
            pool.push(ExplodingDie::new(sides)?);
        } else {
            pool.push(Die::new(sides)?);
        }
    }
    Ok(())
}
