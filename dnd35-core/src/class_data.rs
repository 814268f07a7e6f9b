//! D&D 3.5 class data.
//!
//! Hit die, progressions, skill points, class skills and spellcasting for
//! the eleven core classes.

use crate::dice::DieType;
use crate::progression::{BabProgression, SaveProgression};
use crate::world::{Ability, CharacterClass, SaveKind, Skill};

/// Source of a class's spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicKind {
    Arcane,
    Divine,
}

/// How a class casts spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spellcasting {
    pub kind: MagicKind,
    /// Ability that sets bonus spells and the highest castable level.
    pub ability: Ability,
    /// Casts from a known list without preparing.
    pub spontaneous: bool,
    /// Class level at which spells are first gained.
    pub first_level: u32,
    /// Extra domain spell slot per spell level 1+.
    pub domain_slot: bool,
}

/// Class-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassData {
    pub hit_die: DieType,
    pub bab: BabProgression,
    pub fortitude: SaveProgression,
    pub reflex: SaveProgression,
    pub will: SaveProgression,
    /// Skill points per level before the Intelligence modifier.
    pub skill_points: i32,
    pub class_skills: &'static [Skill],
    pub spellcasting: Option<Spellcasting>,
    /// Notable class features by the class level they are gained.
    pub features: &'static [(u32, &'static str)],
}

impl ClassData {
    pub fn save(&self, kind: SaveKind) -> SaveProgression {
        match kind {
            SaveKind::Fortitude => self.fortitude,
            SaveKind::Reflex => self.reflex,
            SaveKind::Will => self.will,
        }
    }

    pub fn is_class_skill(&self, skill: Skill) -> bool {
        self.class_skills.contains(&skill)
    }

    /// Features gained at or below a class level.
    pub fn features_at(&self, level: u32) -> impl Iterator<Item = &'static str> + '_ {
        self.features
            .iter()
            .filter(move |(gained, _)| *gained <= level)
            .map(|(_, name)| *name)
    }
}

const fn arcane(ability: Ability, spontaneous: bool) -> Option<Spellcasting> {
    Some(Spellcasting {
        kind: MagicKind::Arcane,
        ability,
        spontaneous,
        first_level: 1,
        domain_slot: false,
    })
}

const fn divine(first_level: u32, domain_slot: bool) -> Option<Spellcasting> {
    Some(Spellcasting {
        kind: MagicKind::Divine,
        ability: Ability::Wisdom,
        spontaneous: false,
        first_level,
        domain_slot,
    })
}

impl CharacterClass {
    /// Get class data.
    pub fn data(&self) -> ClassData {
        use BabProgression as Bab;
        use SaveProgression::{Good, Poor};

        match self {
            CharacterClass::Barbarian => ClassData {
                hit_die: DieType::D12,
                bab: Bab::Full,
                fortitude: Good,
                reflex: Poor,
                will: Poor,
                skill_points: 4,
                class_skills: &[
                    Skill::Climb,
                    Skill::Craft,
                    Skill::HandleAnimal,
                    Skill::Intimidate,
                    Skill::Jump,
                    Skill::Listen,
                    Skill::Ride,
                    Skill::Survival,
                    Skill::Swim,
                ],
                spellcasting: None,
                features: &[
                    (1, "Fast Movement"),
                    (1, "Rage 1/day"),
                    (2, "Uncanny Dodge"),
                    (3, "Trap Sense +1"),
                    (5, "Improved Uncanny Dodge"),
                    (7, "Damage Reduction 1/-"),
                    (11, "Greater Rage"),
                ],
            },
            CharacterClass::Bard => ClassData {
                hit_die: DieType::D6,
                bab: Bab::Medium,
                fortitude: Poor,
                reflex: Good,
                will: Good,
                skill_points: 6,
                class_skills: &[
                    Skill::Appraise,
                    Skill::Balance,
                    Skill::Bluff,
                    Skill::Climb,
                    Skill::Concentration,
                    Skill::Craft,
                    Skill::DecipherScript,
                    Skill::Diplomacy,
                    Skill::Disguise,
                    Skill::EscapeArtist,
                    Skill::GatherInformation,
                    Skill::Hide,
                    Skill::Jump,
                    Skill::KnowledgeArcana,
                    Skill::KnowledgeArchitecture,
                    Skill::KnowledgeDungeoneering,
                    Skill::KnowledgeGeography,
                    Skill::KnowledgeHistory,
                    Skill::KnowledgeLocal,
                    Skill::KnowledgeNature,
                    Skill::KnowledgeNobility,
                    Skill::KnowledgeReligion,
                    Skill::KnowledgePlanes,
                    Skill::Listen,
                    Skill::MoveSilently,
                    Skill::Perform,
                    Skill::Profession,
                    Skill::SenseMotive,
                    Skill::SleightOfHand,
                    Skill::Spellcraft,
                    Skill::Swim,
                    Skill::Tumble,
                    Skill::UseMagicDevice,
                ],
                spellcasting: arcane(Ability::Charisma, true),
                features: &[
                    (1, "Bardic Music"),
                    (1, "Bardic Knowledge"),
                    (1, "Countersong"),
                    (1, "Fascinate"),
                    (1, "Inspire Courage +1"),
                    (3, "Inspire Competence"),
                    (6, "Suggestion"),
                ],
            },
            CharacterClass::Cleric => ClassData {
                hit_die: DieType::D8,
                bab: Bab::Medium,
                fortitude: Good,
                reflex: Poor,
                will: Good,
                skill_points: 2,
                class_skills: &[
                    Skill::Concentration,
                    Skill::Craft,
                    Skill::Diplomacy,
                    Skill::Heal,
                    Skill::KnowledgeArcana,
                    Skill::KnowledgeHistory,
                    Skill::KnowledgeReligion,
                    Skill::KnowledgePlanes,
                    Skill::Profession,
                    Skill::Spellcraft,
                ],
                spellcasting: divine(1, true),
                features: &[
                    (1, "Aura"),
                    (1, "Domains"),
                    (1, "Spontaneous Casting"),
                    (1, "Turn or Rebuke Undead"),
                ],
            },
            CharacterClass::Druid => ClassData {
                hit_die: DieType::D8,
                bab: Bab::Medium,
                fortitude: Good,
                reflex: Poor,
                will: Good,
                skill_points: 4,
                class_skills: &[
                    Skill::Concentration,
                    Skill::Craft,
                    Skill::Diplomacy,
                    Skill::HandleAnimal,
                    Skill::Heal,
                    Skill::KnowledgeNature,
                    Skill::Listen,
                    Skill::Profession,
                    Skill::Ride,
                    Skill::Spellcraft,
                    Skill::Spot,
                    Skill::Survival,
                    Skill::Swim,
                ],
                spellcasting: divine(1, false),
                features: &[
                    (1, "Animal Companion"),
                    (1, "Nature Sense"),
                    (1, "Wild Empathy"),
                    (2, "Woodland Stride"),
                    (3, "Trackless Step"),
                    (4, "Resist Nature's Lure"),
                    (5, "Wild Shape 1/day"),
                ],
            },
            CharacterClass::Fighter => ClassData {
                hit_die: DieType::D10,
                bab: Bab::Full,
                fortitude: Good,
                reflex: Poor,
                will: Poor,
                skill_points: 2,
                class_skills: &[
                    Skill::Climb,
                    Skill::Craft,
                    Skill::HandleAnimal,
                    Skill::Intimidate,
                    Skill::Jump,
                    Skill::Ride,
                    Skill::Swim,
                ],
                spellcasting: None,
                features: &[(1, "Bonus Feat")],
            },
            CharacterClass::Monk => ClassData {
                hit_die: DieType::D8,
                bab: Bab::Medium,
                fortitude: Good,
                reflex: Good,
                will: Good,
                skill_points: 4,
                class_skills: &[
                    Skill::Balance,
                    Skill::Climb,
                    Skill::Concentration,
                    Skill::Craft,
                    Skill::Diplomacy,
                    Skill::EscapeArtist,
                    Skill::Hide,
                    Skill::Jump,
                    Skill::KnowledgeArcana,
                    Skill::KnowledgeReligion,
                    Skill::Listen,
                    Skill::MoveSilently,
                    Skill::Perform,
                    Skill::Profession,
                    Skill::SenseMotive,
                    Skill::Spot,
                    Skill::Swim,
                    Skill::Tumble,
                ],
                spellcasting: None,
                features: &[
                    (1, "Flurry of Blows"),
                    (1, "Unarmed Strike"),
                    (1, "AC Bonus"),
                    (2, "Evasion"),
                    (3, "Fast Movement"),
                    (3, "Still Mind"),
                    (4, "Ki Strike (magic)"),
                    (4, "Slow Fall 20 ft."),
                    (5, "Purity of Body"),
                ],
            },
            CharacterClass::Paladin => ClassData {
                hit_die: DieType::D10,
                bab: Bab::Full,
                fortitude: Good,
                reflex: Poor,
                will: Poor,
                skill_points: 2,
                class_skills: &[
                    Skill::Concentration,
                    Skill::Craft,
                    Skill::Diplomacy,
                    Skill::HandleAnimal,
                    Skill::Heal,
                    Skill::KnowledgeNobility,
                    Skill::KnowledgeReligion,
                    Skill::Profession,
                    Skill::Ride,
                    Skill::SenseMotive,
                ],
                spellcasting: divine(4, false),
                features: &[
                    (1, "Aura of Good"),
                    (1, "Detect Evil"),
                    (1, "Smite Evil 1/day"),
                    (2, "Divine Grace"),
                    (2, "Lay on Hands"),
                    (3, "Aura of Courage"),
                    (3, "Divine Health"),
                    (4, "Turn Undead"),
                    (5, "Special Mount"),
                ],
            },
            CharacterClass::Ranger => ClassData {
                hit_die: DieType::D8,
                bab: Bab::Full,
                fortitude: Good,
                reflex: Good,
                will: Poor,
                skill_points: 6,
                class_skills: &[
                    Skill::Climb,
                    Skill::Concentration,
                    Skill::Craft,
                    Skill::HandleAnimal,
                    Skill::Heal,
                    Skill::Hide,
                    Skill::Jump,
                    Skill::KnowledgeDungeoneering,
                    Skill::KnowledgeGeography,
                    Skill::KnowledgeNature,
                    Skill::Listen,
                    Skill::MoveSilently,
                    Skill::Profession,
                    Skill::Ride,
                    Skill::Search,
                    Skill::Spot,
                    Skill::Survival,
                    Skill::Swim,
                    Skill::UseRope,
                ],
                spellcasting: divine(4, false),
                features: &[
                    (1, "Favored Enemy"),
                    (1, "Track"),
                    (1, "Wild Empathy"),
                    (2, "Combat Style"),
                    (3, "Endurance"),
                    (4, "Animal Companion"),
                    (6, "Improved Combat Style"),
                    (7, "Woodland Stride"),
                ],
            },
            CharacterClass::Rogue => ClassData {
                hit_die: DieType::D6,
                bab: Bab::Medium,
                fortitude: Poor,
                reflex: Good,
                will: Poor,
                skill_points: 8,
                class_skills: &[
                    Skill::Appraise,
                    Skill::Balance,
                    Skill::Bluff,
                    Skill::Climb,
                    Skill::Craft,
                    Skill::DecipherScript,
                    Skill::Diplomacy,
                    Skill::DisableDevice,
                    Skill::Disguise,
                    Skill::EscapeArtist,
                    Skill::Forgery,
                    Skill::GatherInformation,
                    Skill::Hide,
                    Skill::Intimidate,
                    Skill::Jump,
                    Skill::KnowledgeLocal,
                    Skill::Listen,
                    Skill::MoveSilently,
                    Skill::OpenLock,
                    Skill::Perform,
                    Skill::Profession,
                    Skill::Search,
                    Skill::SenseMotive,
                    Skill::SleightOfHand,
                    Skill::Spot,
                    Skill::Swim,
                    Skill::Tumble,
                    Skill::UseMagicDevice,
                    Skill::UseRope,
                ],
                spellcasting: None,
                features: &[
                    (1, "Sneak Attack +1d6"),
                    (1, "Trapfinding"),
                    (2, "Evasion"),
                    (3, "Trap Sense +1"),
                    (4, "Uncanny Dodge"),
                    (8, "Improved Uncanny Dodge"),
                    (10, "Special Ability"),
                ],
            },
            CharacterClass::Sorcerer => ClassData {
                hit_die: DieType::D4,
                bab: Bab::Poor,
                fortitude: Poor,
                reflex: Poor,
                will: Good,
                skill_points: 2,
                class_skills: &[
                    Skill::Bluff,
                    Skill::Concentration,
                    Skill::Craft,
                    Skill::KnowledgeArcana,
                    Skill::Profession,
                    Skill::Spellcraft,
                ],
                spellcasting: arcane(Ability::Charisma, true),
                features: &[(1, "Summon Familiar")],
            },
            CharacterClass::Wizard => ClassData {
                hit_die: DieType::D4,
                bab: Bab::Poor,
                fortitude: Poor,
                reflex: Poor,
                will: Good,
                skill_points: 2,
                class_skills: &[
                    Skill::Concentration,
                    Skill::Craft,
                    Skill::DecipherScript,
                    Skill::KnowledgeArcana,
                    Skill::KnowledgeArchitecture,
                    Skill::KnowledgeDungeoneering,
                    Skill::KnowledgeGeography,
                    Skill::KnowledgeHistory,
                    Skill::KnowledgeLocal,
                    Skill::KnowledgeNature,
                    Skill::KnowledgeNobility,
                    Skill::KnowledgeReligion,
                    Skill::KnowledgePlanes,
                    Skill::Profession,
                    Skill::Spellcraft,
                ],
                spellcasting: arcane(Ability::Intelligence, false),
                features: &[(1, "Summon Familiar"), (1, "Scribe Scroll")],
            },
        }
    }

    /// Caster level granted by `level` levels in this class.
    ///
    /// Paladins and rangers cast at half their class level from 4th on.
    pub fn caster_level(&self, level: u32) -> u32 {
        match self.data().spellcasting {
            None => 0,
            Some(casting) if level < casting.first_level => 0,
            Some(_) => match self {
                CharacterClass::Paladin | CharacterClass::Ranger => level / 2,
                _ => level,
            },
        }
    }
}

/// Whether a skill is a class skill for any class in the list.
pub fn is_class_skill_for_any(classes: &[CharacterClass], skill: Skill) -> bool {
    classes.iter().any(|class| class.data().is_class_skill(skill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_dice() {
        assert_eq!(CharacterClass::Barbarian.data().hit_die, DieType::D12);
        assert_eq!(CharacterClass::Fighter.data().hit_die, DieType::D10);
        assert_eq!(CharacterClass::Cleric.data().hit_die, DieType::D8);
        assert_eq!(CharacterClass::Rogue.data().hit_die, DieType::D6);
        assert_eq!(CharacterClass::Wizard.data().hit_die, DieType::D4);
    }

    #[test]
    fn test_every_class_has_craft_and_a_good_save() {
        for class in CharacterClass::all() {
            let data = class.data();
            assert!(data.is_class_skill(Skill::Craft), "{}", class.name());
            assert!(
                SaveKind::all()
                    .iter()
                    .any(|kind| data.save(*kind) == SaveProgression::Good),
                "{}",
                class.name()
            );
        }
    }

    #[test]
    fn test_class_skill_lookup() {
        assert!(CharacterClass::Rogue.data().is_class_skill(Skill::DisableDevice));
        assert!(!CharacterClass::Fighter.data().is_class_skill(Skill::Spot));
        assert!(is_class_skill_for_any(
            &[CharacterClass::Fighter, CharacterClass::Wizard],
            Skill::Spellcraft
        ));
    }

    #[test]
    fn test_caster_levels() {
        assert_eq!(CharacterClass::Wizard.caster_level(5), 5);
        assert_eq!(CharacterClass::Paladin.caster_level(3), 0);
        assert_eq!(CharacterClass::Paladin.caster_level(4), 2);
        assert_eq!(CharacterClass::Ranger.caster_level(11), 5);
        assert_eq!(CharacterClass::Fighter.caster_level(20), 0);
    }

    #[test]
    fn test_features_at_level() {
        let rogue = CharacterClass::Rogue.data();
        let features: Vec<_> = rogue.features_at(2).collect();
        assert_eq!(features, vec!["Sneak Attack +1d6", "Trapfinding", "Evasion"]);
    }
}
