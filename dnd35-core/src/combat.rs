//! Derived combat statistics.
//!
//! Armor class, hit points, saving throws and attack bonuses assembled from
//! ability modifiers, class progressions, race data and equipment.

use crate::config::HitPointPolicy;
use crate::dice::DieType;
use crate::progression::{iterative_attacks, multiclass_base_attack_bonus, multiclass_save_base};
use crate::world::{AbilityModifiers, ClassLevel, SaveKind, Size};
use serde::{Deserialize, Serialize};

// ============================================================================
// Armor Class
// ============================================================================

/// Components of armor class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorClassInput {
    pub base: i32,
    pub armor_bonus: i32,
    pub shield_bonus: i32,
    pub dex_modifier: i32,
    /// Lowest max Dex bonus among worn armor, shield and load, if any.
    pub max_dex_bonus: Option<i32>,
    pub size_modifier: i32,
    pub deflection: i32,
    pub dodge: i32,
    pub natural: i32,
    pub other: i32,
}

impl Default for ArmorClassInput {
    fn default() -> Self {
        Self {
            base: 10,
            armor_bonus: 0,
            shield_bonus: 0,
            dex_modifier: 0,
            max_dex_bonus: None,
            size_modifier: 0,
            deflection: 0,
            dodge: 0,
            natural: 0,
            other: 0,
        }
    }
}

impl ArmorClassInput {
    /// Dexterity modifier after the max Dex cap.
    pub fn effective_dex(&self) -> i32 {
        match self.max_dex_bonus {
            Some(cap) if cap < self.dex_modifier => cap,
            _ => self.dex_modifier,
        }
    }
}

/// Full armor class.
pub fn armor_class(input: &ArmorClassInput) -> i32 {
    input.base
        + input.armor_bonus
        + input.shield_bonus
        + input.effective_dex()
        + input.size_modifier
        + input.deflection
        + input.dodge
        + input.natural
        + input.other
}

/// Armor class against touch attacks: no armor, shield or natural armor.
pub fn touch_armor_class(input: &ArmorClassInput) -> i32 {
    input.base
        + input.effective_dex()
        + input.size_modifier
        + input.deflection
        + input.dodge
        + input.other
}

/// Armor class when caught flat-footed: no Dex bonus and no dodge bonus.
///
/// A Dexterity penalty still applies.
pub fn flat_footed_armor_class(input: &ArmorClassInput) -> i32 {
    let dex = input.effective_dex().min(0);
    input.base
        + input.armor_bonus
        + input.shield_bonus
        + dex
        + input.size_modifier
        + input.deflection
        + input.natural
        + input.other
}

// ============================================================================
// Hit Points
// ============================================================================

/// One character level's contribution to hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDieLevel {
    pub die: DieType,
    pub con_modifier: i32,
    /// Stored roll, used under [`HitPointPolicy::Rolled`].
    pub roll: Option<u32>,
}

/// Total hit points for a sequence of character levels.
///
/// The first entry is the character's first level and always takes the
/// hit die maximum. Every level gains at least 1 hit point.
pub fn hit_points(levels: &[HitDieLevel], policy: HitPointPolicy) -> i32 {
    levels
        .iter()
        .enumerate()
        .map(|(index, level)| {
            let die_value = if index == 0 {
                level.die.sides()
            } else {
                match policy {
                    HitPointPolicy::Max => level.die.sides(),
                    HitPointPolicy::Average => level.die.average_rounded_up(),
                    HitPointPolicy::Rolled => match level.roll {
                        Some(roll) => roll.clamp(1, level.die.sides()),
                        None => {
                            tracing::warn!(
                                character_level = index + 1,
                                die = %level.die,
                                "no hit point roll stored, using average"
                            );
                            level.die.average_rounded_up()
                        }
                    },
                }
            };
            (die_value as i32 + level.con_modifier).max(1)
        })
        .sum()
}

// ============================================================================
// Saving Throws
// ============================================================================

/// Saving throw totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavingThrows {
    pub fortitude: i32,
    pub reflex: i32,
    pub will: i32,
}

impl SavingThrows {
    pub fn get(&self, kind: SaveKind) -> i32 {
        match kind {
            SaveKind::Fortitude => self.fortitude,
            SaveKind::Reflex => self.reflex,
            SaveKind::Will => self.will,
        }
    }
}

/// Multiclass base saves plus Con/Dex/Wis plus static bonuses.
pub fn saving_throws(
    classes: &[ClassLevel],
    modifiers: &AbilityModifiers,
    misc: SavingThrows,
) -> SavingThrows {
    let total = |kind: SaveKind| {
        multiclass_save_base(classes, kind) + modifiers.get(kind.ability()) + misc.get(kind)
    };
    SavingThrows {
        fortitude: total(SaveKind::Fortitude),
        reflex: total(SaveKind::Reflex),
        will: total(SaveKind::Will),
    }
}

// ============================================================================
// Attacks
// ============================================================================

/// Attack bonuses for a character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttackBonuses {
    pub base_attack_bonus: i32,
    pub melee: i32,
    pub ranged: i32,
    pub grapple: i32,
    /// Melee bonuses for each attack of a full attack.
    pub melee_full_attack: Vec<i32>,
    pub ranged_full_attack: Vec<i32>,
}

/// Melee, ranged and grapple bonuses from base attack bonus, Str, Dex and size.
pub fn attack_bonuses(
    classes: &[ClassLevel],
    modifiers: &AbilityModifiers,
    size: Size,
) -> AttackBonuses {
    let bab = multiclass_base_attack_bonus(classes);
    let melee = bab + modifiers.strength + size.ac_modifier();
    let ranged = bab + modifiers.dexterity + size.ac_modifier();
    AttackBonuses {
        base_attack_bonus: bab,
        melee,
        ranged,
        grapple: bab + modifiers.strength + size.grapple_modifier(),
        melee_full_attack: iterative_attacks(bab, melee),
        ranged_full_attack: iterative_attacks(bab, ranged),
    }
}

/// Initiative modifier.
pub fn initiative(modifiers: &AbilityModifiers, bonus: i32) -> i32 {
    modifiers.dexterity + bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{AbilityScores, CharacterClass};

    #[test]
    fn test_armor_class_sums_components() {
        let input = ArmorClassInput {
            armor_bonus: 5,
            shield_bonus: 2,
            dex_modifier: 1,
            deflection: 1,
            natural: 1,
            ..Default::default()
        };
        assert_eq!(armor_class(&input), 20);
        assert_eq!(touch_armor_class(&input), 12);
        assert_eq!(flat_footed_armor_class(&input), 19);
    }

    #[test]
    fn test_max_dex_caps_only_when_lower() {
        let capped = ArmorClassInput {
            armor_bonus: 8,
            dex_modifier: 4,
            max_dex_bonus: Some(1),
            ..Default::default()
        };
        assert_eq!(armor_class(&capped), 19);

        let uncapped = ArmorClassInput {
            armor_bonus: 3,
            dex_modifier: 2,
            max_dex_bonus: Some(6),
            ..Default::default()
        };
        assert_eq!(armor_class(&uncapped), 15);
    }

    #[test]
    fn test_flat_footed_keeps_dex_penalty() {
        let input = ArmorClassInput {
            dex_modifier: -2,
            dodge: 1,
            ..Default::default()
        };
        assert_eq!(flat_footed_armor_class(&input), 8);
        assert_eq!(armor_class(&input), 9);
    }

    #[test]
    fn test_hit_points_first_level_max() {
        let levels = [
            HitDieLevel {
                die: DieType::D10,
                con_modifier: 2,
                roll: None,
            },
            HitDieLevel {
                die: DieType::D10,
                con_modifier: 2,
                roll: None,
            },
            HitDieLevel {
                die: DieType::D4,
                con_modifier: 2,
                roll: None,
            },
        ];
        assert_eq!(hit_points(&levels, HitPointPolicy::Average), 12 + 8 + 5);
        assert_eq!(hit_points(&levels, HitPointPolicy::Max), 12 + 12 + 6);
    }

    #[test]
    fn test_hit_points_floor_per_level() {
        let levels = [
            HitDieLevel {
                die: DieType::D4,
                con_modifier: -5,
                roll: None,
            },
            HitDieLevel {
                die: DieType::D4,
                con_modifier: -5,
                roll: Some(1),
            },
        ];
        assert_eq!(hit_points(&levels, HitPointPolicy::Rolled), 2);
    }

    #[test]
    fn test_hit_points_rolled_falls_back_to_average() {
        let levels = [
            HitDieLevel {
                die: DieType::D8,
                con_modifier: 0,
                roll: None,
            },
            HitDieLevel {
                die: DieType::D8,
                con_modifier: 0,
                roll: Some(2),
            },
            HitDieLevel {
                die: DieType::D8,
                con_modifier: 0,
                roll: None,
            },
        ];
        assert_eq!(hit_points(&levels, HitPointPolicy::Rolled), 8 + 2 + 5);
    }

    #[test]
    fn test_saving_throws_add_abilities_and_misc() {
        let classes = [ClassLevel::new(CharacterClass::Fighter, 4)];
        let modifiers = AbilityScores::new(16, 12, 14, 10, 8, 10).modifiers();
        let misc = SavingThrows {
            fortitude: 0,
            reflex: 0,
            will: 2,
        };
        let saves = saving_throws(&classes, &modifiers, misc);
        assert_eq!(saves.fortitude, 4 + 2);
        assert_eq!(saves.reflex, 1 + 1);
        assert_eq!(saves.will, 1 - 1 + 2);
    }

    #[test]
    fn test_attack_bonuses_with_size() {
        let classes = [ClassLevel::new(CharacterClass::Fighter, 6)];
        let modifiers = AbilityScores::new(14, 16, 10, 10, 10, 10).modifiers();
        let attacks = attack_bonuses(&classes, &modifiers, Size::Small);
        assert_eq!(attacks.melee, 6 + 2 + 1);
        assert_eq!(attacks.ranged, 6 + 3 + 1);
        assert_eq!(attacks.grapple, 6 + 2 - 4);
        assert_eq!(attacks.melee_full_attack, vec![9, 4]);
    }
}
