//! D&D 3.5 race data.
//!
//! Size, speed, ability adjustments, unconditional skill and save bonuses,
//! and the favored class for each PHB race. Conditional traits (saves
//! against poison, stonecunning, low-light vision) are listed by name only.

use crate::world::{Ability, AbilityScores, CharacterClass, RaceType, Size, Skill};

/// Race-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceData {
    pub size: Size,
    /// Base land speed in feet.
    pub base_speed: u32,
    pub ability_adjustments: &'static [(Ability, i32)],
    pub special_abilities: &'static [&'static str],
    pub languages: &'static [&'static str],
    /// `None` means the highest-level class counts as favored.
    pub favored_class: Option<CharacterClass>,
    pub skill_bonuses: &'static [(Skill, i32)],
    /// Racial bonus on all saving throws.
    pub save_bonus: i32,
    /// Extra feat at 1st level.
    pub bonus_feat: bool,
    /// Extra skill points: four at 1st level, then one per level.
    pub bonus_skill_points: bool,
    /// Medium and heavy loads and armor do not reduce speed.
    pub speed_unaffected_by_load: bool,
}

impl RaceData {
    /// Apply racial ability adjustments in place.
    pub fn apply_adjustments(&self, scores: &mut AbilityScores) {
        for (ability, delta) in self.ability_adjustments {
            scores.adjust(*ability, *delta);
        }
    }

    /// Racial bonus on one skill.
    pub fn skill_bonus(&self, skill: Skill) -> i32 {
        self.skill_bonuses
            .iter()
            .filter(|(s, _)| *s == skill)
            .map(|(_, bonus)| bonus)
            .sum()
    }

    pub fn is_favored(&self, class: CharacterClass) -> bool {
        self.favored_class == Some(class)
    }
}

impl RaceType {
    /// Get race data.
    pub fn data(&self) -> RaceData {
        match self {
            RaceType::Human => RaceData {
                size: Size::Medium,
                base_speed: 30,
                ability_adjustments: &[],
                special_abilities: &["Bonus Feat", "Bonus Skill Points"],
                languages: &["Common"],
                favored_class: None,
                skill_bonuses: &[],
                save_bonus: 0,
                bonus_feat: true,
                bonus_skill_points: true,
                speed_unaffected_by_load: false,
            },
            RaceType::Dwarf => RaceData {
                size: Size::Medium,
                base_speed: 20,
                ability_adjustments: &[(Ability::Constitution, 2), (Ability::Charisma, -2)],
                special_abilities: &[
                    "Darkvision 60 ft.",
                    "Stonecunning",
                    "Stability",
                    "+2 on saves against poison",
                    "+2 on saves against spells and spell-like effects",
                    "+1 on attacks against orcs and goblinoids",
                    "+4 dodge bonus to AC against giants",
                ],
                languages: &["Common", "Dwarven"],
                favored_class: Some(CharacterClass::Fighter),
                skill_bonuses: &[],
                save_bonus: 0,
                bonus_feat: false,
                bonus_skill_points: false,
                speed_unaffected_by_load: true,
            },
            RaceType::Elf => RaceData {
                size: Size::Medium,
                base_speed: 30,
                ability_adjustments: &[(Ability::Dexterity, 2), (Ability::Constitution, -2)],
                special_abilities: &[
                    "Immunity to magic sleep",
                    "+2 on saves against enchantments",
                    "Low-light vision",
                    "Weapon proficiencies",
                    "Notice secret doors",
                ],
                languages: &["Common", "Elven"],
                favored_class: Some(CharacterClass::Wizard),
                skill_bonuses: &[(Skill::Listen, 2), (Skill::Search, 2), (Skill::Spot, 2)],
                save_bonus: 0,
                bonus_feat: false,
                bonus_skill_points: false,
                speed_unaffected_by_load: false,
            },
            RaceType::Gnome => RaceData {
                size: Size::Small,
                base_speed: 20,
                ability_adjustments: &[(Ability::Constitution, 2), (Ability::Strength, -2)],
                special_abilities: &[
                    "Low-light vision",
                    "+2 on saves against illusions",
                    "+1 on attacks against kobolds and goblinoids",
                    "+4 dodge bonus to AC against giants",
                    "Speak with burrowing animals",
                ],
                languages: &["Common", "Gnome"],
                favored_class: Some(CharacterClass::Bard),
                skill_bonuses: &[(Skill::Listen, 2), (Skill::Craft, 2)],
                save_bonus: 0,
                bonus_feat: false,
                bonus_skill_points: false,
                speed_unaffected_by_load: false,
            },
            RaceType::HalfElf => RaceData {
                size: Size::Medium,
                base_speed: 30,
                ability_adjustments: &[],
                special_abilities: &[
                    "Immunity to magic sleep",
                    "+2 on saves against enchantments",
                    "Low-light vision",
                    "Elven blood",
                ],
                languages: &["Common", "Elven"],
                favored_class: None,
                skill_bonuses: &[
                    (Skill::Listen, 1),
                    (Skill::Search, 1),
                    (Skill::Spot, 1),
                    (Skill::Diplomacy, 2),
                    (Skill::GatherInformation, 2),
                ],
                save_bonus: 0,
                bonus_feat: false,
                bonus_skill_points: false,
                speed_unaffected_by_load: false,
            },
            RaceType::HalfOrc => RaceData {
                size: Size::Medium,
                base_speed: 30,
                ability_adjustments: &[
                    (Ability::Strength, 2),
                    (Ability::Intelligence, -2),
                    (Ability::Charisma, -2),
                ],
                special_abilities: &["Darkvision 60 ft.", "Orc blood"],
                languages: &["Common", "Orc"],
                favored_class: Some(CharacterClass::Barbarian),
                skill_bonuses: &[],
                save_bonus: 0,
                bonus_feat: false,
                bonus_skill_points: false,
                speed_unaffected_by_load: false,
            },
            RaceType::Halfling => RaceData {
                size: Size::Small,
                base_speed: 20,
                ability_adjustments: &[(Ability::Dexterity, 2), (Ability::Strength, -2)],
                special_abilities: &[
                    "+2 morale bonus on saves against fear",
                    "+1 on attacks with thrown weapons and slings",
                ],
                languages: &["Common", "Halfling"],
                favored_class: Some(CharacterClass::Rogue),
                skill_bonuses: &[
                    (Skill::Climb, 2),
                    (Skill::Jump, 2),
                    (Skill::MoveSilently, 2),
                    (Skill::Listen, 2),
                ],
                save_bonus: 1,
                bonus_feat: false,
                bonus_skill_points: false,
                speed_unaffected_by_load: false,
            },
        }
    }
}
