//! Rule configuration.
//!
//! House-rule knobs that the calculators read from the [`RuleBook`]
//! rather than hard-coding: point-buy budget, hit point policy, level cap
//! and encounter generation limits.
//!
//! [`RuleBook`]: crate::rulebook::RuleBook

use crate::abilities::PointBuyTable;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Error from reading configuration overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// How hit points are gained on levels after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitPointPolicy {
    /// Maximum of the hit die every level.
    Max,
    /// Half the hit die plus one (d8 gives 5).
    #[default]
    Average,
    /// Use the rolls stored on the build.
    Rolled,
}

impl FromStr for HitPointPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "max" | "maximum" => Ok(HitPointPolicy::Max),
            "average" | "avg" => Ok(HitPointPolicy::Average),
            "rolled" | "roll" => Ok(HitPointPolicy::Rolled),
            _ => Err(()),
        }
    }
}

/// How the encounter builder picks among affordable monsters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Always take the most expensive monster that still fits.
    #[default]
    GreedyLargest,
    /// Pick uniformly among everything that still fits.
    UniformAffordable,
}

impl FromStr for SelectionPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "greedy" | "greedylargest" => Ok(SelectionPolicy::GreedyLargest),
            "uniform" | "uniformaffordable" => Ok(SelectionPolicy::UniformAffordable),
            _ => Err(()),
        }
    }
}

/// Encounter generation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterConfig {
    pub max_monsters: usize,
    pub selection: SelectionPolicy,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            max_monsters: 8,
            selection: SelectionPolicy::default(),
        }
    }
}

/// Configuration for one ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Points available for point buy.
    pub point_buy_budget: i32,
    pub point_buy_table: PointBuyTable,
    /// Allowed range for final ability scores.
    pub ability_range: RangeInclusive<i32>,
    pub hit_point_policy: HitPointPolicy,
    pub max_character_level: u32,
    pub encounter: EncounterConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            point_buy_budget: 28,
            point_buy_table: PointBuyTable::standard(),
            ability_range: 1..=30,
            hit_point_policy: HitPointPolicy::default(),
            max_character_level: 20,
            encounter: EncounterConfig::default(),
        }
    }
}

impl RulesConfig {
    /// Set the point-buy budget.
    pub fn with_point_buy_budget(mut self, budget: i32) -> Self {
        self.point_buy_budget = budget;
        self
    }

    /// Replace the point-buy cost table.
    pub fn with_point_buy_table(mut self, table: PointBuyTable) -> Self {
        self.point_buy_table = table;
        self
    }

    pub fn with_ability_range(mut self, range: RangeInclusive<i32>) -> Self {
        self.ability_range = range;
        self
    }

    /// Set how hit points are gained after first level.
    pub fn with_hit_point_policy(mut self, policy: HitPointPolicy) -> Self {
        self.hit_point_policy = policy;
        self
    }

    pub fn with_max_character_level(mut self, level: u32) -> Self {
        self.max_character_level = level;
        self
    }

    /// Set the encounter generation limits.
    pub fn with_encounter(mut self, encounter: EncounterConfig) -> Self {
        self.encounter = encounter;
        self
    }

    /// Defaults overridden by `DND35_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, `.env`, test map).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DND35_POINT_BUY_BUDGET") {
            self.point_buy_budget = parse_value("DND35_POINT_BUY_BUDGET", &value)?;
        }
        if let Some(value) = lookup("DND35_HP_POLICY") {
            self.hit_point_policy = parse_value("DND35_HP_POLICY", &value)?;
        }
        if let Some(value) = lookup("DND35_MAX_LEVEL") {
            self.max_character_level = parse_value("DND35_MAX_LEVEL", &value)?;
        }
        if let Some(value) = lookup("DND35_MAX_MONSTERS") {
            self.encounter.max_monsters = parse_value("DND35_MAX_MONSTERS", &value)?;
        }
        if let Some(value) = lookup("DND35_ENCOUNTER_SELECTION") {
            self.encounter.selection = parse_value("DND35_ENCOUNTER_SELECTION", &value)?;
        }
        tracing::debug!(config = ?self, "rules config resolved");
        Ok(self)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.point_buy_budget, 28);
        assert_eq!(config.ability_range, 1..=30);
        assert_eq!(config.hit_point_policy, HitPointPolicy::Average);
        assert_eq!(config.max_character_level, 20);
        assert_eq!(config.encounter.max_monsters, 8);
    }

    #[test]
    fn test_overrides_apply() {
        let config = RulesConfig::default()
            .with_overrides(lookup(&[
                ("DND35_POINT_BUY_BUDGET", "32"),
                ("DND35_HP_POLICY", "max"),
                ("DND35_MAX_MONSTERS", "4"),
                ("DND35_ENCOUNTER_SELECTION", "uniform"),
            ]))
            .unwrap();
        assert_eq!(config.point_buy_budget, 32);
        assert_eq!(config.hit_point_policy, HitPointPolicy::Max);
        assert_eq!(config.encounter.max_monsters, 4);
        assert_eq!(config.encounter.selection, SelectionPolicy::UniformAffordable);
        assert_eq!(config.max_character_level, 20);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let result =
            RulesConfig::default().with_overrides(lookup(&[("DND35_MAX_LEVEL", "twenty")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidValue {
                key: "DND35_MAX_LEVEL".to_string(),
                value: "twenty".to_string(),
            })
        );
    }

    #[test]
    fn test_builder_setters() {
        let config = RulesConfig::default()
            .with_point_buy_budget(25)
            .with_hit_point_policy(HitPointPolicy::Rolled)
            .with_max_character_level(10);
        assert_eq!(config.point_buy_budget, 25);
        assert_eq!(config.hit_point_policy, HitPointPolicy::Rolled);
        assert_eq!(config.max_character_level, 10);
    }
}
