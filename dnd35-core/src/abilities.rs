//! Ability score calculator.
//!
//! Converts scores to modifiers and supports the two generation policies the
//! wizard offers: point buy against a cost table, and rolling 4d6 drop lowest.
//! The elite array is offered as a fixed alternative.

use crate::dice::{DiceExpression, DieType};
use crate::world::{Ability, AbilityScores};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// The elite array: 15, 14, 13, 12, 10, 8.
pub const ELITE_ARRAY: [i32; 6] = [15, 14, 13, 12, 10, 8];

/// Largest magnitude an ability score may take before the engine refuses it.
pub const ABILITY_SCORE_DOMAIN: std::ops::RangeInclusive<i32> = 0..=99;

/// Error from a point-buy cost lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointBuyError {
    #[error("Score {score} cannot be purchased (point buy covers {min}-{max})")]
    OutOfRange { score: i32, min: i32, max: i32 },
}

/// Modifier for an ability score: `floor((score - 10) / 2)`.
///
/// Defined for every integer, including scores below 1.
pub fn modifier_of(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Cost of each purchasable score under point buy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBuyTable {
    costs: BTreeMap<i32, i32>,
}

impl PointBuyTable {
    /// Build a table from `(score, cost)` pairs.
    pub fn new(costs: impl IntoIterator<Item = (i32, i32)>) -> Self {
        Self {
            costs: costs.into_iter().collect(),
        }
    }

    /// The D&D 3.5 DMG cost table covering 8 through 18.
    pub fn standard() -> Self {
        Self::new([
            (8, 0),
            (9, 1),
            (10, 2),
            (11, 3),
            (12, 4),
            (13, 5),
            (14, 6),
            (15, 8),
            (16, 10),
            (17, 13),
            (18, 16),
        ])
    }

    pub fn min_score(&self) -> i32 {
        self.costs.keys().next().copied().unwrap_or(0)
    }

    pub fn max_score(&self) -> i32 {
        self.costs.keys().next_back().copied().unwrap_or(0)
    }

    pub fn get(&self, score: i32) -> Option<i32> {
        self.costs.get(&score).copied()
    }
}

impl Default for PointBuyTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Cost of buying `score`; scores outside the table are rejected, never clamped.
pub fn point_buy_cost(score: i32, table: &PointBuyTable) -> Result<i32, PointBuyError> {
    table.get(score).ok_or(PointBuyError::OutOfRange {
        score,
        min: table.min_score(),
        max: table.max_score(),
    })
}

/// Outcome of checking a full set of scores against a point-buy budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBuyReport {
    pub valid: bool,
    /// Sum of the costs of every purchasable score.
    pub total_cost: i32,
    /// Budget minus total cost; negative when overspent.
    pub remaining: i32,
    pub violations: Vec<String>,
}

/// Check six scores against a budget.
///
/// Every out-of-range ability is reported by name in addition to any
/// budget overage.
pub fn validate_point_buy(
    scores: &AbilityScores,
    budget: i32,
    table: &PointBuyTable,
) -> PointBuyReport {
    let mut total_cost = 0;
    let mut violations = Vec::new();

    for ability in Ability::all() {
        let score = scores.get(ability);
        match point_buy_cost(score, table) {
            Ok(cost) => total_cost += cost,
            Err(PointBuyError::OutOfRange { min, max, .. }) => violations.push(format!(
                "{} score {score} is out of range ({min}-{max})",
                ability.name()
            )),
        }
    }

    let remaining = budget - total_cost;
    if remaining < 0 {
        violations.push(format!(
            "Total point cost {total_cost} exceeds budget {budget}"
        ));
    }

    tracing::trace!(total_cost, remaining, "point buy checked");

    PointBuyReport {
        valid: violations.is_empty(),
        total_cost,
        remaining,
        violations,
    }
}

/// Report every score that falls outside the configured range.
pub fn range_violations(scores: &AbilityScores, min: i32, max: i32) -> Vec<String> {
    Ability::all()
        .into_iter()
        .filter(|ability| !(min..=max).contains(&scores.get(*ability)))
        .map(|ability| {
            format!(
                "{} score {} is outside the allowed range ({min}-{max})",
                ability.name(),
                scores.get(ability)
            )
        })
        .collect()
}

/// Assign the elite array in the given ability order (highest first).
pub fn elite_array(order: [Ability; 6]) -> AbilityScores {
    let mut scores = AbilityScores::default();
    for (ability, value) in order.into_iter().zip(ELITE_ARRAY) {
        scores.set(ability, value);
    }
    scores
}

/// Roll 4d6, drop lowest, for one ability score.
pub fn roll_4d6_drop_lowest<R: Rng>(rng: &mut R) -> i32 {
    let expr = DiceExpression::pool(4, DieType::D6).keep_highest(3);
    expr.roll_with_rng(rng).total
}

/// Roll a full set of six scores, sorted highest first.
pub fn roll_ability_scores<R: Rng>(rng: &mut R) -> [i32; 6] {
    let mut scores = [0; 6];
    for score in scores.iter_mut() {
        *score = roll_4d6_drop_lowest(rng);
    }
    scores.sort_by(|a, b| b.cmp(a));
    scores
}

/// Number of level-up ability increases earned by a character level.
pub fn ability_increases_earned(character_level: u32) -> u32 {
    character_level / 4
}
