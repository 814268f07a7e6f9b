//! Class progression calculator.
//!
//! Base attack bonus, base saves and skill points per level, and the
//! multiclass sums built from them. A multiclass character adds up each
//! class's contribution computed at that class's own level; progressions
//! are never blended at total character level.

use crate::world::{Ability, CharacterBuild, CharacterClass, ClassLevel, SaveKind};
use serde::{Deserialize, Serialize};

/// Highest level the engine accepts, in one class or across all classes.
pub const MAX_LEVEL_DOMAIN: u32 = 100;

/// Highest number of attacks a full attack grants from base attack bonus alone.
pub const MAX_ITERATIVE_ATTACKS: usize = 4;

/// Base attack bonus progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BabProgression {
    /// +1 per level (fighter, barbarian, paladin, ranger).
    Full,
    /// +3 per four levels (cleric, druid, monk, rogue, bard).
    Medium,
    /// +1 per two levels (wizard, sorcerer).
    Poor,
}

/// Base saving throw progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveProgression {
    Good,
    Poor,
}

/// Base attack bonus for `level` levels in a class with this progression.
pub fn base_attack_bonus(progression: BabProgression, level: u32) -> i32 {
    let level = i64::from(level);
    saturate(match progression {
        BabProgression::Full => level,
        BabProgression::Medium => level * 3 / 4,
        BabProgression::Poor => level / 2,
    })
}

/// Base save for `level` levels in a class with this progression.
pub fn saving_throw_base(progression: SaveProgression, level: u32) -> i32 {
    let level = i64::from(level);
    saturate(match progression {
        SaveProgression::Good => 2 + level / 2,
        SaveProgression::Poor => level / 3,
    })
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Skill points gained at one class level before racial bonuses.
///
/// First character level gets four times the per-level amount, at least 4;
/// later levels get at least 1. The minimum applies after the formula.
pub fn skill_points_at_level(class_base: i32, int_mod: i32, is_first_level: bool) -> i32 {
    let per_level = class_base + int_mod;
    if is_first_level {
        (per_level * 4).max(4)
    } else {
        per_level.max(1)
    }
}

/// Sum of each class's base attack bonus at its own level.
pub fn multiclass_base_attack_bonus(classes: &[ClassLevel]) -> i32 {
    classes
        .iter()
        .map(|c| base_attack_bonus(c.class.data().bab, c.level))
        .fold(0, i32::saturating_add)
}

/// Sum of each class's base save of one kind at its own level.
pub fn multiclass_save_base(classes: &[ClassLevel], kind: SaveKind) -> i32 {
    classes
        .iter()
        .map(|c| saving_throw_base(c.class.data().save(kind), c.level))
        .fold(0, i32::saturating_add)
}

/// Attack bonuses for a full attack: the base bonus, then -5 steps while
/// the bonus stays at +1 or better, four attacks at most.
pub fn iterative_attacks(base_attack_bonus: i32, total_bonus: i32) -> Vec<i32> {
    let mut attacks = vec![total_bonus];
    let mut remaining = base_attack_bonus - 5;
    while remaining >= 1 && attacks.len() < MAX_ITERATIVE_ATTACKS {
        attacks.push(total_bonus - (base_attack_bonus - remaining));
        remaining -= 5;
    }
    attacks
}

/// Skill points earned across every level of a build.
///
/// Levels are taken in list order, and each level uses the Intelligence
/// modifier the character had at that level, including earned increases.
pub fn total_skill_points(build: &CharacterBuild) -> i32 {
    let race = build.race.data();
    build
        .level_sequence()
        .into_iter()
        .enumerate()
        .map(|(index, class)| {
            let character_level = index as u32 + 1;
            let int_mod = build
                .abilities_at_level(character_level)
                .modifier(Ability::Intelligence);
            let is_first = index == 0;
            let mut points =
                skill_points_at_level(class.data().skill_points, int_mod, is_first);
            if race.bonus_skill_points {
                points += if is_first { 4 } else { 1 };
            }
            points
        })
        .sum()
}

/// Feat slots available to a build, by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatSlots {
    /// One at 1st level and every third level.
    pub general: u32,
    pub racial: u32,
    pub fighter_bonus: u32,
    pub wizard_bonus: u32,
    pub monk_bonus: u32,
}

impl FeatSlots {
    pub fn total(&self) -> u32 {
        self.general + self.racial + self.fighter_bonus + self.wizard_bonus + self.monk_bonus
    }
}

/// Count feat slots from character level, race and class levels.
pub fn feat_slots(build: &CharacterBuild) -> FeatSlots {
    let level = build.character_level();
    if level == 0 {
        return FeatSlots::default();
    }

    let fighter = build.class_level(CharacterClass::Fighter);
    let wizard = build.class_level(CharacterClass::Wizard);
    let monk = build.class_level(CharacterClass::Monk);

    FeatSlots {
        general: 1 + level / 3,
        racial: u32::from(build.race.data().bonus_feat),
        fighter_bonus: if fighter > 0 { 1 + fighter / 2 } else { 0 },
        // Scribe Scroll at 1st is granted outright; choosable bonus feats at 5, 10, 15, 20
        wizard_bonus: wizard / 5,
        monk_bonus: [1, 2, 6].iter().filter(|&&l| monk >= l).count() as u32,
    }
}

/// Experience penalty, in percent, for uneven multiclassing.
///
/// Each class more than one level away from the highest-level class costs
/// 20%. The favored class never counts; races without one treat their
/// highest-level class as favored.
pub fn multiclass_xp_penalty(build: &CharacterBuild) -> u32 {
    let favored = build.race.data().favored_class.or_else(|| {
        build
            .classes
            .iter()
            .max_by_key(|c| c.level)
            .map(|c| c.class)
    });

    let counted: Vec<u32> = build
        .classes
        .iter()
        .filter(|c| Some(c.class) != favored)
        .map(|c| c.level)
        .collect();

    let Some(&highest) = counted.iter().max() else {
        return 0;
    };
    let penalized = counted.iter().filter(|&&level| highest - level > 1).count() as u32;
    penalized * 20
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{AbilityScores, RaceType};

    #[test]
    fn test_bab_progressions() {
        assert_eq!(base_attack_bonus(BabProgression::Full, 7), 7);
        assert_eq!(base_attack_bonus(BabProgression::Medium, 4), 3);
        assert_eq!(base_attack_bonus(BabProgression::Medium, 7), 5);
        assert_eq!(base_attack_bonus(BabProgression::Poor, 4), 2);
        assert_eq!(base_attack_bonus(BabProgression::Poor, 1), 0);
    }

    #[test]
    fn test_huge_levels_saturate() {
        let classes = [ClassLevel::new(CharacterClass::Fighter, 3_000_000_000)];
        assert_eq!(multiclass_base_attack_bonus(&classes), i32::MAX);
        assert_eq!(base_attack_bonus(BabProgression::Medium, u32::MAX), i32::MAX);
        assert_eq!(saving_throw_base(SaveProgression::Poor, u32::MAX), 1_431_655_765);
    }

    #[test]
    fn test_save_progressions() {
        assert_eq!(saving_throw_base(SaveProgression::Good, 1), 2);
        assert_eq!(saving_throw_base(SaveProgression::Good, 20), 12);
        assert_eq!(saving_throw_base(SaveProgression::Poor, 1), 0);
        assert_eq!(saving_throw_base(SaveProgression::Poor, 3), 1);
        assert_eq!(saving_throw_base(SaveProgression::Poor, 20), 6);
    }

    #[test]
    fn test_skill_points_clamp_after_formula() {
        assert_eq!(skill_points_at_level(2, 3, true), 20);
        assert_eq!(skill_points_at_level(2, -3, true), 4);
        assert_eq!(skill_points_at_level(2, -3, false), 1);
        assert_eq!(skill_points_at_level(8, 1, false), 9);
    }

    #[test]
    fn test_fighter_wizard_bab_sums_per_class() {
        let classes = [
            ClassLevel::new(CharacterClass::Fighter, 4),
            ClassLevel::new(CharacterClass::Wizard, 4),
        ];
        assert_eq!(multiclass_base_attack_bonus(&classes), 6);
        // Good Fort from fighter, good Will from wizard
        assert_eq!(multiclass_save_base(&classes, SaveKind::Fortitude), 4 + 1);
        assert_eq!(multiclass_save_base(&classes, SaveKind::Will), 1 + 4);
        assert_eq!(multiclass_save_base(&classes, SaveKind::Reflex), 1 + 1);
    }

    #[test]
    fn test_iterative_attacks() {
        assert_eq!(iterative_attacks(0, 2), vec![2]);
        assert_eq!(iterative_attacks(5, 7), vec![7]);
        assert_eq!(iterative_attacks(6, 9), vec![9, 4]);
        assert_eq!(iterative_attacks(16, 16), vec![16, 11, 6, 1]);
        assert_eq!(iterative_attacks(20, 23), vec![23, 18, 13, 8]);
    }

    #[test]
    fn test_total_skill_points_uses_level_int() {
        let mut build = CharacterBuild::new("Sage", RaceType::Elf);
        build.base_abilities = AbilityScores::new(10, 10, 12, 13, 10, 10);
        build.ability_increases = vec![Ability::Intelligence];
        build.add_class_levels(CharacterClass::Wizard, 4);

        // Int 13 (+1) for levels 1-3, 14 (+2) at level 4
        assert_eq!(total_skill_points(&build), 12 + 3 + 3 + 4);
    }

    #[test]
    fn test_human_bonus_skill_points() {
        let mut build = CharacterBuild::new("Hal", RaceType::Human);
        build.add_class_levels(CharacterClass::Fighter, 2);
        assert_eq!(total_skill_points(&build), (8 + 4) + (2 + 1));
    }

    #[test]
    fn test_feat_slots() {
        let mut build = CharacterBuild::new("Hal", RaceType::Human);
        build.add_class_levels(CharacterClass::Fighter, 4);
        let slots = feat_slots(&build);
        assert_eq!(slots.general, 2);
        assert_eq!(slots.racial, 1);
        assert_eq!(slots.fighter_bonus, 3);
        assert_eq!(slots.total(), 6);

        let mut monk = CharacterBuild::new("Ko", RaceType::Dwarf);
        monk.add_class_levels(CharacterClass::Monk, 6);
        assert_eq!(feat_slots(&monk).monk_bonus, 3);
        assert_eq!(feat_slots(&monk).total(), 6);
    }

    #[test]
    fn test_multiclass_xp_penalty() {
        let mut build = CharacterBuild::new("Thorin", RaceType::Dwarf);
        build.add_class_levels(CharacterClass::Fighter, 5);
        build.add_class_levels(CharacterClass::Rogue, 1);
        // Fighter is favored for dwarves
        assert_eq!(multiclass_xp_penalty(&build), 0);

        build.add_class_levels(CharacterClass::Cleric, 3);
        // Rogue 1 trails Cleric 3 by two levels
        assert_eq!(multiclass_xp_penalty(&build), 20);

        let mut human = CharacterBuild::new("Hal", RaceType::Human);
        human.add_class_levels(CharacterClass::Wizard, 6);
        human.add_class_levels(CharacterClass::Rogue, 1);
        assert_eq!(multiclass_xp_penalty(&human), 0);
    }
}
