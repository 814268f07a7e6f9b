//! Character builder for D&D 3.5 character creation.
//!
//! Provides a step-by-step builder that produces a [`CharacterBuild`].
//! The builder checks what it can without the rule book's catalogs (a name,
//! a race, at least one class, legal base scores); everything else is left
//! to [`crate::derived::validate_build`].

use crate::abilities::{elite_array, roll_ability_scores, validate_point_buy};
use crate::config::RulesConfig;
use crate::world::{
    Ability, AbilityMethod, AbilityScores, CharacterBuild, CharacterClass, ClassLevel, ItemStack,
    MiscBonuses, PreparedSpell, RaceType, Skill,
};
use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;

/// Error from character building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("Character name is required")]
    MissingName,
    #[error("Race selection is required")]
    MissingRace,
    #[error("At least one class level is required")]
    MissingClass,
    #[error("Ability scores are required")]
    MissingAbilityScores,
    #[error("{0} is assigned more than once")]
    DuplicateAbility(Ability),
    #[error("Invalid point buy: {}", .0.join("; "))]
    InvalidPointBuy(Vec<String>),
}

/// Builder for D&D 3.5 characters.
#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    name: Option<String>,
    race: Option<RaceType>,
    classes: Vec<ClassLevel>,
    ability_method: AbilityMethod,
    base_abilities: Option<AbilityScores>,
    elite_order: Option<[Ability; 6]>,
    ability_increases: Vec<Ability>,
    skill_ranks: BTreeMap<Skill, u32>,
    feats: Vec<String>,
    inventory: Vec<ItemStack>,
    prepared_spells: Vec<PreparedSpell>,
    hit_point_rolls: Vec<u32>,
    misc: MiscBonuses,
}

impl CharacterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn race(mut self, race: RaceType) -> Self {
        self.race = Some(race);
        self
    }

    /// Add levels in a class. Levels are taken in call order.
    pub fn class(mut self, class: CharacterClass, levels: u32) -> Self {
        if levels == 0 {
            return self;
        }
        match self.classes.iter_mut().find(|c| c.class == class) {
            Some(existing) => existing.level = existing.level.saturating_add(levels),
            None => self.classes.push(ClassLevel::new(class, levels)),
        }
        self
    }

    /// Buy scores with points; checked against the budget on build.
    pub fn point_buy(mut self, scores: AbilityScores) -> Self {
        self.base_abilities = Some(scores);
        self.elite_order = None;
        self.ability_method = AbilityMethod::PointBuy;
        self
    }

    /// Assign the elite array, highest score to the first ability.
    pub fn elite_array(mut self, order: [Ability; 6]) -> Self {
        self.base_abilities = Some(elite_array(order));
        self.elite_order = Some(order);
        self.ability_method = AbilityMethod::EliteArray;
        self
    }

    /// Use scores rolled elsewhere.
    pub fn rolled(mut self, scores: AbilityScores) -> Self {
        self.base_abilities = Some(scores);
        self.elite_order = None;
        self.ability_method = AbilityMethod::Rolled;
        self
    }

    /// Roll 4d6-drop-lowest six times, highest result to the first ability.
    pub fn roll_abilities<R: Rng>(self, order: [Ability; 6], rng: &mut R) -> Self {
        let mut scores = AbilityScores::default();
        for (ability, value) in order.into_iter().zip(roll_ability_scores(rng)) {
            scores.set(ability, value);
        }
        self.rolled(scores)
    }

    /// Record the ability raised at the next fourth level.
    pub fn ability_increase(mut self, ability: Ability) -> Self {
        self.ability_increases.push(ability);
        self
    }

    pub fn skill(mut self, skill: Skill, ranks: u32) -> Self {
        if ranks == 0 {
            self.skill_ranks.remove(&skill);
        } else {
            self.skill_ranks.insert(skill, ranks);
        }
        self
    }

    pub fn feat(mut self, feat: impl Into<String>) -> Self {
        self.feats.push(feat.into());
        self
    }

    pub fn equip(mut self, item: impl Into<String>) -> Self {
        self.inventory.push(ItemStack::equipped(item));
        self
    }

    pub fn carry(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.inventory.push(ItemStack::carried(item, quantity));
        self
    }

    pub fn prepare(mut self, class: CharacterClass, spell: impl Into<String>, level: u32) -> Self {
        self.prepared_spells.push(PreparedSpell {
            class,
            spell: spell.into(),
            level,
        });
        self
    }

    /// Hit die result for the next character level after the first.
    pub fn hit_point_roll(mut self, roll: u32) -> Self {
        self.hit_point_rolls.push(roll);
        self
    }

    pub fn misc(mut self, misc: MiscBonuses) -> Self {
        self.misc = misc;
        self
    }

    /// Build with the default rules.
    pub fn build(self) -> Result<CharacterBuild, BuilderError> {
        self.build_with(&RulesConfig::default())
    }

    /// Build, checking point-buy scores against the configured budget.
    pub fn build_with(self, config: &RulesConfig) -> Result<CharacterBuild, BuilderError> {
        let name = self.name.ok_or(BuilderError::MissingName)?;
        let race = self.race.ok_or(BuilderError::MissingRace)?;
        if self.classes.is_empty() {
            return Err(BuilderError::MissingClass);
        }
        let base_abilities = self
            .base_abilities
            .ok_or(BuilderError::MissingAbilityScores)?;

        if let Some(order) = self.elite_order {
            for (i, ability) in order.iter().enumerate() {
                if order[..i].contains(ability) {
                    return Err(BuilderError::DuplicateAbility(*ability));
                }
            }
        }

        if self.ability_method == AbilityMethod::PointBuy {
            let report = validate_point_buy(
                &base_abilities,
                config.point_buy_budget,
                &config.point_buy_table,
            );
            if !report.valid {
                return Err(BuilderError::InvalidPointBuy(report.violations));
            }
        }

        let mut build = CharacterBuild::new(name, race);
        build.classes = self.classes;
        build.ability_method = self.ability_method;
        build.base_abilities = base_abilities;
        build.ability_increases = self.ability_increases;
        build.skill_ranks = self.skill_ranks;
        build.feats = self.feats;
        build.inventory = self.inventory;
        build.prepared_spells = self.prepared_spells;
        build.hit_point_rolls = self.hit_point_rolls;
        build.misc = self.misc;

        tracing::debug!(
            character = %build.name,
            race = race.name(),
            level = build.character_level(),
            method = build.ability_method.name(),
            "character built"
        );
        Ok(build)
    }
}
