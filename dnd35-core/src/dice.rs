//! Dice notation and rolling.
//!
//! Supports `XdY+Z` expressions with keep-highest/keep-lowest (`4d6kh3`).
//! Weapon damage in the item catalog is written in this notation and parsed
//! when a sheet is built. Every roll takes an injected RNG so callers can
//! seed it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for dice parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice specified")]
    NoDice,
    #[error("Cannot keep {keep} dice when only rolling {count} (in {notation})")]
    InvalidKeepCount {
        keep: u32,
        count: u32,
        notation: String,
    },
}

/// Standard die types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }

    pub fn from_sides(sides: u32) -> Option<DieType> {
        match sides {
            4 => Some(DieType::D4),
            6 => Some(DieType::D6),
            8 => Some(DieType::D8),
            10 => Some(DieType::D10),
            12 => Some(DieType::D12),
            20 => Some(DieType::D20),
            100 => Some(DieType::D100),
            _ => None,
        }
    }

    /// Average result rounded up (d8 gives 5).
    pub fn average_rounded_up(&self) -> u32 {
        self.sides() / 2 + 1
    }

    pub fn roll<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(1..=self.sides())
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Which dice of a pool count toward the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keep {
    All,
    Highest(u32),
    Lowest(u32),
}

/// A pool of identical dice within an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    pub count: u32,
    pub die_type: DieType,
    pub keep: Keep,
}

/// A complete dice expression (e.g., `2d6+3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    pub pools: Vec<DicePool>,
    pub modifier: i32,
}

impl DiceExpression {
    /// A single pool with no modifier.
    pub fn pool(count: u32, die_type: DieType) -> Self {
        Self {
            pools: vec![DicePool {
                count,
                die_type,
                keep: Keep::All,
            }],
            modifier: 0,
        }
    }

    /// Keep only the highest `n` dice of every pool.
    pub fn keep_highest(mut self, n: u32) -> Self {
        for pool in &mut self.pools {
            pool.keep = Keep::Highest(n.min(pool.count));
        }
        self
    }

    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Parse a dice notation string.
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let compact: String = notation
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if compact.is_empty() {
            return Err(DiceError::NoDice);
        }

        let mut pools = Vec::new();
        let mut modifier = 0;

        // Split into signed terms, keeping each sign with its term.
        let mut terms: Vec<(i32, String)> = Vec::new();
        let mut sign = 1;
        let mut current = String::new();
        for ch in compact.chars() {
            if ch == '+' || ch == '-' {
                if !current.is_empty() {
                    terms.push((sign, std::mem::take(&mut current)));
                }
                sign = if ch == '+' { 1 } else { -1 };
            } else {
                current.push(ch);
            }
        }
        if !current.is_empty() {
            terms.push((sign, current));
        }

        for (sign, term) in terms {
            match term.split_once('d') {
                Some((count, rest)) => pools.push(Self::parse_pool(&term, count, rest)?),
                None => {
                    let value: i32 = term
                        .parse()
                        .map_err(|_| DiceError::InvalidNotation(term.clone()))?;
                    modifier += sign * value;
                }
            }
        }

        if pools.is_empty() && modifier == 0 {
            return Err(DiceError::NoDice);
        }

        Ok(Self { pools, modifier })
    }

    fn parse_pool(term: &str, count: &str, rest: &str) -> Result<DicePool, DiceError> {
        let invalid = || DiceError::InvalidNotation(term.to_string());

        let count: u32 = if count.is_empty() {
            1
        } else {
            count.parse().map_err(|_| invalid())?
        };

        let (sides, keep) = if let Some((sides, n)) = rest.split_once("kh") {
            (sides, Keep::Highest(n.parse().map_err(|_| invalid())?))
        } else if let Some((sides, n)) = rest.split_once("kl") {
            (sides, Keep::Lowest(n.parse().map_err(|_| invalid())?))
        } else {
            (rest, Keep::All)
        };

        let sides: u32 = sides.parse().map_err(|_| invalid())?;
        let die_type = DieType::from_sides(sides).ok_or(DiceError::InvalidDieSize(sides))?;

        if let Keep::Highest(keep) | Keep::Lowest(keep) = keep {
            if keep > count {
                return Err(DiceError::InvalidKeepCount {
                    keep,
                    count,
                    notation: term.to_string(),
                });
            }
        }

        Ok(DicePool {
            count,
            die_type,
            keep,
        })
    }

    /// Highest total the expression can produce.
    pub fn max(&self) -> i32 {
        let dice: u32 = self
            .pools
            .iter()
            .map(|p| kept_count(p) * p.die_type.sides())
            .sum();
        dice as i32 + self.modifier
    }

    /// Roll with a specific RNG.
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> RollResult {
        let mut rolls = Vec::new();
        let mut total = self.modifier;

        for pool in &self.pools {
            let mut pool_rolls: Vec<u32> =
                (0..pool.count).map(|_| pool.die_type.roll(rng)).collect();
            let kept: u32 = match pool.keep {
                Keep::All => pool_rolls.iter().sum(),
                Keep::Highest(n) => {
                    let mut sorted = pool_rolls.clone();
                    sorted.sort_unstable_by(|a, b| b.cmp(a));
                    sorted.iter().take(n as usize).sum()
                }
                Keep::Lowest(n) => {
                    let mut sorted = pool_rolls.clone();
                    sorted.sort_unstable();
                    sorted.iter().take(n as usize).sum()
                }
            };
            total += kept as i32;
            rolls.append(&mut pool_rolls);
        }

        RollResult { rolls, total }
    }
}

fn kept_count(pool: &DicePool) -> u32 {
    match pool.keep {
        Keep::All => pool.count,
        Keep::Highest(n) | Keep::Lowest(n) => n,
    }
}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiceExpression::parse(s)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for pool in &self.pools {
            if !first {
                write!(f, "+")?;
            }
            first = false;
            write!(f, "{}{}", pool.count, pool.die_type)?;
            match pool.keep {
                Keep::All => {}
                Keep::Highest(n) => write!(f, "kh{n}")?,
                Keep::Lowest(n) => write!(f, "kl{n}")?,
            }
        }
        match self.modifier {
            0 if !first => Ok(()),
            m if m < 0 => write!(f, "{m}"),
            m if first => write!(f, "{m}"),
            m => write!(f, "+{m}"),
        }
    }
}

/// Result of rolling an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Every die rolled, including dropped ones.
    pub rolls: Vec<u32>,
    pub total: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_simple() {
        let expr = DiceExpression::parse("1d20").unwrap();
        assert_eq!(expr.pools.len(), 1);
        assert_eq!(expr.pools[0].count, 1);
        assert_eq!(expr.pools[0].die_type, DieType::D20);
        assert_eq!(expr.modifier, 0);
    }

    #[test]
    fn test_parse_with_modifier() {
        assert_eq!(DiceExpression::parse("1d8+5").unwrap().modifier, 5);
        assert_eq!(DiceExpression::parse("2d6 - 2").unwrap().modifier, -2);
    }

    #[test]
    fn test_parse_keep_highest() {
        let expr = DiceExpression::parse("4d6kh3").unwrap();
        assert_eq!(expr.pools[0].count, 4);
        assert_eq!(expr.pools[0].keep, Keep::Highest(3));
    }

    #[test]
    fn test_invalid_notation() {
        assert!(matches!(
            DiceExpression::parse("4d6kh5"),
            Err(DiceError::InvalidKeepCount {
                keep: 5,
                count: 4,
                ..
            })
        ));
        assert!(matches!(
            DiceExpression::parse("1d7"),
            Err(DiceError::InvalidDieSize(7))
        ));
        assert!(matches!(DiceExpression::parse(""), Err(DiceError::NoDice)));
        assert!(DiceExpression::parse("xd6").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for notation in ["1d20", "2d6+3", "4d6kh3", "1d8-1"] {
            let expr = DiceExpression::parse(notation).unwrap();
            assert_eq!(expr.to_string(), notation);
        }
    }

    #[test]
    fn test_max_and_average() {
        assert_eq!(DiceExpression::parse("2d6+3").unwrap().max(), 15);
        assert_eq!(DiceExpression::parse("4d6kh3").unwrap().max(), 18);
        assert_eq!(DieType::D8.average_rounded_up(), 5);
        assert_eq!(DieType::D12.average_rounded_up(), 7);
        assert_eq!(DieType::D4.average_rounded_up(), 3);
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let expr = DiceExpression::parse("3d6+1").unwrap();
        let a = expr.roll_with_rng(&mut StdRng::seed_from_u64(42));
        let b = expr.roll_with_rng(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!((4..=19).contains(&a.total));
    }

    #[test]
    fn test_keep_highest_drops_lowest() {
        let expr = DiceExpression::pool(4, DieType::D6).keep_highest(3);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let result = expr.roll_with_rng(&mut rng);
            let mut sorted = result.rolls.clone();
            sorted.sort_unstable();
            let expected: u32 = sorted[1..].iter().sum();
            assert_eq!(result.total, expected as i32);
        }
    }
}
