//! Skill system.
//!
//! Rank caps, point costs, synergy bonuses and totals. A skill counts as a
//! class skill when any class in the build lists it; ranks in it cost one
//! point each and cap at character level + 3. Everything else costs two
//! points per rank and caps at half that.

use crate::class_data::is_class_skill_for_any;
use crate::progression::total_skill_points;
use crate::world::{AbilityModifiers, CharacterBuild, Size, Skill, ValidationReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Ranks a source skill needs before it grants a synergy bonus.
pub const SYNERGY_RANKS: u32 = 5;

/// Bonus granted by one qualifying synergy source.
pub const SYNERGY_BONUS: i32 = 2;

/// Unconditional synergies as `(source, target)`.
pub const SYNERGIES: &[(Skill, Skill)] = &[
    (Skill::Bluff, Skill::Diplomacy),
    (Skill::Bluff, Skill::Intimidate),
    (Skill::Bluff, Skill::SleightOfHand),
    (Skill::HandleAnimal, Skill::Ride),
    (Skill::Jump, Skill::Tumble),
    (Skill::KnowledgeArcana, Skill::Spellcraft),
    (Skill::KnowledgeLocal, Skill::GatherInformation),
    (Skill::KnowledgeNobility, Skill::Diplomacy),
    (Skill::SenseMotive, Skill::Diplomacy),
    (Skill::Tumble, Skill::Balance),
    (Skill::Tumble, Skill::Jump),
];

/// Error from allocating ranks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error("{ranks} ranks in {skill} cost {cost} points but only {available} are available")]
    InsufficientPoints {
        skill: Skill,
        ranks: u32,
        cost: u32,
        available: u32,
    },
    #[error("{requested} ranks in {skill} exceeds the maximum of {max}")]
    RankCapExceeded {
        skill: Skill,
        requested: u32,
        max: u32,
    },
}

/// Result of a successful rank allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankAllocation {
    pub skill: Skill,
    pub ranks: u32,
    pub points_spent: u32,
}

/// Maximum ranks at a character level.
pub fn max_ranks(level: u32, is_class_skill: bool) -> u32 {
    if is_class_skill {
        level + 3
    } else {
        (level + 3) / 2
    }
}

/// Skill points per rank.
pub fn cost_per_rank(is_class_skill: bool) -> u32 {
    if is_class_skill {
        1
    } else {
        2
    }
}

/// Plain sum of the parts of a skill check modifier.
pub fn skill_total(ranks: u32, ability_mod: i32, misc: i32, synergy: i32) -> i32 {
    ranks as i32 + ability_mod + misc + synergy
}

/// Synergy bonus on `skill` given the ranks held in every skill.
pub fn synergy_bonus(skill: Skill, ranks: &BTreeMap<Skill, u32>) -> i32 {
    SYNERGIES
        .iter()
        .filter(|(source, target)| {
            *target == skill && ranks.get(source).copied().unwrap_or(0) >= SYNERGY_RANKS
        })
        .count() as i32
        * SYNERGY_BONUS
}

/// Price `requested` ranks against the available points and the rank cap.
///
/// Points are checked before the cap.
pub fn allocate_rank(
    skill: Skill,
    requested: u32,
    available: u32,
    is_class_skill: bool,
    level: u32,
) -> Result<RankAllocation, SkillError> {
    let cost = requested * cost_per_rank(is_class_skill);
    if cost > available {
        return Err(SkillError::InsufficientPoints {
            skill,
            ranks: requested,
            cost,
            available,
        });
    }

    let max = max_ranks(level, is_class_skill);
    if requested > max {
        return Err(SkillError::RankCapExceeded {
            skill,
            requested,
            max,
        });
    }

    Ok(RankAllocation {
        skill,
        ranks: requested,
        points_spent: cost,
    })
}

/// Whether a skill is a class skill for this build.
pub fn is_class_skill(build: &CharacterBuild, skill: Skill) -> bool {
    let classes: Vec<_> = build.classes.iter().map(|c| c.class).collect();
    is_class_skill_for_any(&classes, skill)
}

/// Skill points spent on the ranks recorded in a build.
pub fn points_spent(build: &CharacterBuild) -> u32 {
    build
        .skill_ranks
        .iter()
        .map(|(skill, ranks)| ranks * cost_per_rank(is_class_skill(build, *skill)))
        .sum()
}

/// Check every recorded rank against its cap and the build's point total.
pub fn validate_skills(build: &CharacterBuild) -> ValidationReport {
    let mut report = ValidationReport::ok();
    let level = build.character_level();

    for (skill, ranks) in &build.skill_ranks {
        let max = max_ranks(level, is_class_skill(build, *skill));
        if *ranks > max {
            report.push(format!(
                "{ranks} ranks in {skill} exceeds the maximum of {max} at level {level}"
            ));
        }
    }

    let available = total_skill_points(build).max(0) as u32;
    let spent = points_spent(build);
    if spent > available {
        report.push(format!(
            "Spent {spent} skill points but only {available} are available"
        ));
    }

    tracing::trace!(spent, available, valid = report.valid, "skills validated");
    report
}

/// One line of the skill list on a character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBreakdown {
    pub ranks: u32,
    pub ability_modifier: i32,
    /// Racial, feat, size and armor check modifiers.
    pub misc: i32,
    pub synergy: i32,
    pub total: i32,
    pub class_skill: bool,
    /// False for trained-only skills without ranks.
    pub usable: bool,
}

/// Flat modifiers applied to skills beyond ranks, ability and synergy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillModifiers {
    pub racial: BTreeMap<Skill, i32>,
    pub feats: BTreeMap<Skill, i32>,
    /// Armor check penalty (zero or negative).
    pub armor_check_penalty: i32,
    pub size: Size,
}

/// Compute every skill's total for a build.
pub fn skill_breakdowns(
    build: &CharacterBuild,
    abilities: &AbilityModifiers,
    modifiers: &SkillModifiers,
) -> BTreeMap<Skill, SkillBreakdown> {
    Skill::all()
        .iter()
        .map(|&skill| {
            let ranks = build.ranks(skill);
            let ability_modifier = abilities.get(skill.ability());
            let mut misc = modifiers.racial.get(&skill).copied().unwrap_or(0)
                + modifiers.feats.get(&skill).copied().unwrap_or(0)
                + modifiers.armor_check_penalty * skill.armor_check_multiplier();
            if skill == Skill::Hide {
                misc += modifiers.size.hide_modifier();
            }
            let synergy = synergy_bonus(skill, &build.skill_ranks);
            let breakdown = SkillBreakdown {
                ranks,
                ability_modifier,
                misc,
                synergy,
                total: skill_total(ranks, ability_modifier, misc, synergy),
                class_skill: is_class_skill(build, skill),
                usable: ranks > 0 || !skill.trained_only(),
            };
            (skill, breakdown)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{AbilityScores, CharacterClass, RaceType};

    #[test]
    fn test_max_ranks() {
        assert_eq!(max_ranks(5, true), 8);
        assert_eq!(max_ranks(5, false), 4);
        assert_eq!(max_ranks(1, true), 4);
        assert_eq!(max_ranks(1, false), 2);
    }

    #[test]
    fn test_skill_total_is_plain_sum() {
        assert_eq!(skill_total(4, 2, 1, 2), 9);
        assert_eq!(skill_total(0, -1, 0, 0), -1);
    }

    #[test]
    fn test_allocate_rank_cross_class_costs_double() {
        let allocation = allocate_rank(Skill::Spot, 2, 4, false, 1).unwrap();
        assert_eq!(allocation.points_spent, 4);
        assert_eq!(
            allocate_rank(Skill::Spot, 3, 5, false, 1),
            Err(SkillError::InsufficientPoints {
                skill: Skill::Spot,
                ranks: 3,
                cost: 6,
                available: 5
            })
        );
    }

    #[test]
    fn test_allocate_rank_cap() {
        assert_eq!(
            allocate_rank(Skill::Climb, 5, 10, true, 1),
            Err(SkillError::RankCapExceeded {
                skill: Skill::Climb,
                requested: 5,
                max: 4
            })
        );
        assert!(allocate_rank(Skill::Climb, 4, 4, true, 1).is_ok());
    }

    #[test]
    fn test_allocate_checks_points_before_cap() {
        // Both over budget and over cap
        assert!(matches!(
            allocate_rank(Skill::Spot, 10, 3, false, 1),
            Err(SkillError::InsufficientPoints { .. })
        ));
    }

    #[test]
    fn test_synergy_needs_five_ranks() {
        let mut ranks = BTreeMap::new();
        ranks.insert(Skill::Bluff, 4);
        assert_eq!(synergy_bonus(Skill::Diplomacy, &ranks), 0);
        ranks.insert(Skill::Bluff, 5);
        ranks.insert(Skill::SenseMotive, 7);
        assert_eq!(synergy_bonus(Skill::Diplomacy, &ranks), 4);
        assert_eq!(synergy_bonus(Skill::Intimidate, &ranks), 2);
    }

    #[test]
    fn test_validate_skills_flags_overspend_and_cap() {
        let mut build = CharacterBuild::new("Vex", RaceType::Human);
        build.base_abilities = AbilityScores::new(10, 10, 10, 10, 10, 10);
        build.add_class_levels(CharacterClass::Fighter, 1);
        // 12 points available; Spot is cross-class for fighters
        build.skill_ranks.insert(Skill::Climb, 4);
        build.skill_ranks.insert(Skill::Spot, 3);
        let report = validate_skills(&build);
        assert!(!report.valid);
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].contains("Spot"));

        build.skill_ranks.insert(Skill::Spot, 2);
        assert!(validate_skills(&build).valid);
        assert_eq!(points_spent(&build), 8);
    }

    #[test]
    fn test_multiclass_class_skills_union() {
        let mut build = CharacterBuild::new("Vex", RaceType::Human);
        build.add_class_levels(CharacterClass::Fighter, 1);
        assert!(!is_class_skill(&build, Skill::Spellcraft));
        build.add_class_levels(CharacterClass::Wizard, 1);
        assert!(is_class_skill(&build, Skill::Spellcraft));
    }

    #[test]
    fn test_breakdown_applies_armor_check_and_size() {
        let mut build = CharacterBuild::new("Pip", RaceType::Halfling);
        build.add_class_levels(CharacterClass::Rogue, 1);
        build.skill_ranks.insert(Skill::Hide, 4);
        let abilities = AbilityScores::new(10, 14, 10, 10, 10, 10).modifiers();
        let modifiers = SkillModifiers {
            armor_check_penalty: -1,
            size: Size::Small,
            ..Default::default()
        };
        let sheet = skill_breakdowns(&build, &abilities, &modifiers);
        assert_eq!(sheet[&Skill::Hide].total, 4 + 2 - 1 + 4);
        assert_eq!(sheet[&Skill::Swim].misc, -2);
        assert!(!sheet[&Skill::OpenLock].usable);
        assert!(sheet[&Skill::OpenLock].class_skill);
    }
}
