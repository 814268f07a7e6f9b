//! D&D 3.5 character types.
//!
//! Contains the records the calculators operate on: abilities, skills,
//! sizes, classes, races, and the mutable [`CharacterBuild`] aggregate that
//! the character-creation wizard fills in step by step.

use crate::abilities::modifier_of;
use crate::rulebook::{normalize_key, RulesError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a character build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Ability Scores
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Ability scores container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    /// Add a signed delta to one ability.
    pub fn adjust(&mut self, ability: Ability, delta: i32) {
        let current = self.get(ability);
        self.set(ability, current + delta);
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        modifier_of(self.get(ability))
    }

    pub fn modifiers(&self) -> AbilityModifiers {
        AbilityModifiers {
            strength: self.modifier(Ability::Strength),
            dexterity: self.modifier(Ability::Dexterity),
            constitution: self.modifier(Ability::Constitution),
            intelligence: self.modifier(Ability::Intelligence),
            wisdom: self.modifier(Ability::Wisdom),
            charisma: self.modifier(Ability::Charisma),
        }
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Modifiers derived from a set of ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityModifiers {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityModifiers {
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

// ============================================================================
// Size
// ============================================================================

/// Creature size categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Size {
    Fine,
    Diminutive,
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
    Colossal,
}

impl Size {
    /// Size modifier applied to armor class and attack rolls.
    pub fn ac_modifier(&self) -> i32 {
        match self {
            Size::Fine => 8,
            Size::Diminutive => 4,
            Size::Tiny => 2,
            Size::Small => 1,
            Size::Medium => 0,
            Size::Large => -1,
            Size::Huge => -2,
            Size::Gargantuan => -4,
            Size::Colossal => -8,
        }
    }

    /// Special size modifier for grapple checks.
    pub fn grapple_modifier(&self) -> i32 {
        match self {
            Size::Fine => -16,
            Size::Diminutive => -12,
            Size::Tiny => -8,
            Size::Small => -4,
            Size::Medium => 0,
            Size::Large => 4,
            Size::Huge => 8,
            Size::Gargantuan => 12,
            Size::Colossal => 16,
        }
    }

    /// Size modifier on Hide checks.
    pub fn hide_modifier(&self) -> i32 {
        -self.grapple_modifier()
    }

    /// Carrying capacity multiplier for bipeds as `(numerator, denominator)`.
    pub fn carry_multiplier(&self) -> (u64, u64) {
        match self {
            Size::Fine => (1, 8),
            Size::Diminutive => (1, 4),
            Size::Tiny => (1, 2),
            Size::Small => (3, 4),
            Size::Medium => (1, 1),
            Size::Large => (2, 1),
            Size::Huge => (4, 1),
            Size::Gargantuan => (8, 1),
            Size::Colossal => (16, 1),
        }
    }
}

// ============================================================================
// Saving Throws
// ============================================================================

/// The three saving throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SaveKind {
    Fortitude,
    Reflex,
    Will,
}

impl SaveKind {
    pub fn ability(&self) -> Ability {
        match self {
            SaveKind::Fortitude => Ability::Constitution,
            SaveKind::Reflex => Ability::Dexterity,
            SaveKind::Will => Ability::Wisdom,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SaveKind::Fortitude => "Fortitude",
            SaveKind::Reflex => "Reflex",
            SaveKind::Will => "Will",
        }
    }

    pub fn all() -> [SaveKind; 3] {
        [SaveKind::Fortitude, SaveKind::Reflex, SaveKind::Will]
    }
}

// ============================================================================
// Skills
// ============================================================================

/// D&D 3.5 skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Appraise,
    Balance,
    Bluff,
    Climb,
    Concentration,
    Craft,
    DecipherScript,
    Diplomacy,
    DisableDevice,
    Disguise,
    EscapeArtist,
    Forgery,
    GatherInformation,
    HandleAnimal,
    Heal,
    Hide,
    Intimidate,
    Jump,
    KnowledgeArcana,
    KnowledgeArchitecture,
    KnowledgeDungeoneering,
    KnowledgeGeography,
    KnowledgeHistory,
    KnowledgeLocal,
    KnowledgeNature,
    KnowledgeNobility,
    KnowledgeReligion,
    KnowledgePlanes,
    Listen,
    MoveSilently,
    OpenLock,
    Perform,
    Profession,
    Ride,
    Search,
    SenseMotive,
    SleightOfHand,
    Spellcraft,
    Spot,
    Survival,
    Swim,
    Tumble,
    UseMagicDevice,
    UseRope,
}

/// Every Knowledge skill, for classes that get all of them.
pub const ALL_KNOWLEDGE: [Skill; 10] = [
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
];

impl Skill {
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Climb | Skill::Jump | Skill::Swim => Ability::Strength,
            Skill::Balance
            | Skill::EscapeArtist
            | Skill::Hide
            | Skill::MoveSilently
            | Skill::OpenLock
            | Skill::Ride
            | Skill::SleightOfHand
            | Skill::Tumble
            | Skill::UseRope => Ability::Dexterity,
            Skill::Concentration => Ability::Constitution,
            Skill::Appraise
            | Skill::Craft
            | Skill::DecipherScript
            | Skill::DisableDevice
            | Skill::Forgery
            | Skill::KnowledgeArcana
            | Skill::KnowledgeArchitecture
            | Skill::KnowledgeDungeoneering
            | Skill::KnowledgeGeography
            | Skill::KnowledgeHistory
            | Skill::KnowledgeLocal
            | Skill::KnowledgeNature
            | Skill::KnowledgeNobility
            | Skill::KnowledgeReligion
            | Skill::KnowledgePlanes
            | Skill::Search
            | Skill::Spellcraft => Ability::Intelligence,
            Skill::Heal
            | Skill::Listen
            | Skill::Profession
            | Skill::SenseMotive
            | Skill::Spot
            | Skill::Survival => Ability::Wisdom,
            Skill::Bluff
            | Skill::Diplomacy
            | Skill::Disguise
            | Skill::GatherInformation
            | Skill::HandleAnimal
            | Skill::Intimidate
            | Skill::Perform
            | Skill::UseMagicDevice => Ability::Charisma,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Appraise => "Appraise",
            Skill::Balance => "Balance",
            Skill::Bluff => "Bluff",
            Skill::Climb => "Climb",
            Skill::Concentration => "Concentration",
            Skill::Craft => "Craft",
            Skill::DecipherScript => "Decipher Script",
            Skill::Diplomacy => "Diplomacy",
            Skill::DisableDevice => "Disable Device",
            Skill::Disguise => "Disguise",
            Skill::EscapeArtist => "Escape Artist",
            Skill::Forgery => "Forgery",
            Skill::GatherInformation => "Gather Information",
            Skill::HandleAnimal => "Handle Animal",
            Skill::Heal => "Heal",
            Skill::Hide => "Hide",
            Skill::Intimidate => "Intimidate",
            Skill::Jump => "Jump",
            Skill::KnowledgeArcana => "Knowledge (arcana)",
            Skill::KnowledgeArchitecture => "Knowledge (architecture and engineering)",
            Skill::KnowledgeDungeoneering => "Knowledge (dungeoneering)",
            Skill::KnowledgeGeography => "Knowledge (geography)",
            Skill::KnowledgeHistory => "Knowledge (history)",
            Skill::KnowledgeLocal => "Knowledge (local)",
            Skill::KnowledgeNature => "Knowledge (nature)",
            Skill::KnowledgeNobility => "Knowledge (nobility and royalty)",
            Skill::KnowledgeReligion => "Knowledge (religion)",
            Skill::KnowledgePlanes => "Knowledge (the planes)",
            Skill::Listen => "Listen",
            Skill::MoveSilently => "Move Silently",
            Skill::OpenLock => "Open Lock",
            Skill::Perform => "Perform",
            Skill::Profession => "Profession",
            Skill::Ride => "Ride",
            Skill::Search => "Search",
            Skill::SenseMotive => "Sense Motive",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Spellcraft => "Spellcraft",
            Skill::Spot => "Spot",
            Skill::Survival => "Survival",
            Skill::Swim => "Swim",
            Skill::Tumble => "Tumble",
            Skill::UseMagicDevice => "Use Magic Device",
            Skill::UseRope => "Use Rope",
        }
    }

    /// Skills that cannot be used without at least one rank.
    pub fn trained_only(&self) -> bool {
        matches!(
            self,
            Skill::DecipherScript
                | Skill::DisableDevice
                | Skill::HandleAnimal
                | Skill::KnowledgeArcana
                | Skill::KnowledgeArchitecture
                | Skill::KnowledgeDungeoneering
                | Skill::KnowledgeGeography
                | Skill::KnowledgeHistory
                | Skill::KnowledgeLocal
                | Skill::KnowledgeNature
                | Skill::KnowledgeNobility
                | Skill::KnowledgeReligion
                | Skill::KnowledgePlanes
                | Skill::OpenLock
                | Skill::Profession
                | Skill::SleightOfHand
                | Skill::Spellcraft
                | Skill::Tumble
                | Skill::UseMagicDevice
        )
    }

    /// How many times the armor check penalty applies (Swim takes it twice).
    pub fn armor_check_multiplier(&self) -> i32 {
        match self {
            Skill::Swim => 2,
            Skill::Balance
            | Skill::Climb
            | Skill::EscapeArtist
            | Skill::Hide
            | Skill::Jump
            | Skill::MoveSilently
            | Skill::SleightOfHand
            | Skill::Tumble => 1,
            _ => 0,
        }
    }

    pub fn all() -> &'static [Skill] {
        &[
            Skill::Appraise,
            Skill::Balance,
            Skill::Bluff,
            Skill::Climb,
            Skill::Concentration,
            Skill::Craft,
            Skill::DecipherScript,
            Skill::Diplomacy,
            Skill::DisableDevice,
            Skill::Disguise,
            Skill::EscapeArtist,
            Skill::Forgery,
            Skill::GatherInformation,
            Skill::HandleAnimal,
            Skill::Heal,
            Skill::Hide,
            Skill::Intimidate,
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
            Skill::OpenLock,
            Skill::Perform,
            Skill::Profession,
            Skill::Ride,
            Skill::Search,
            Skill::SenseMotive,
            Skill::SleightOfHand,
            Skill::Spellcraft,
            Skill::Spot,
            Skill::Survival,
            Skill::Swim,
            Skill::Tumble,
            Skill::UseMagicDevice,
            Skill::UseRope,
        ]
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Skill {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Skill::all()
            .iter()
            .copied()
            .find(|skill| {
                normalize_key(skill.name()) == key || normalize_key(&format!("{skill:?}")) == key
            })
            .ok_or_else(|| RulesError::UnknownSkill(s.to_string()))
    }
}

// ============================================================================
// Classes
// ============================================================================

/// D&D 3.5 core classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Wizard,
}

impl CharacterClass {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Wizard => "Wizard",
        }
    }

    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Wizard,
        ]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        CharacterClass::all()
            .iter()
            .copied()
            .find(|class| normalize_key(class.name()) == key)
            .ok_or_else(|| RulesError::UnknownClass(s.to_string()))
    }
}

/// Levels taken in one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    pub class: CharacterClass,
    pub level: u32,
}

impl ClassLevel {
    pub fn new(class: CharacterClass, level: u32) -> Self {
        Self { class, level }
    }
}

// ============================================================================
// Races
// ============================================================================

/// D&D 3.5 playable races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceType {
    Human,
    Dwarf,
    Elf,
    Gnome,
    HalfElf,
    HalfOrc,
    Halfling,
}

impl RaceType {
    pub fn name(&self) -> &'static str {
        match self {
            RaceType::Human => "Human",
            RaceType::Dwarf => "Dwarf",
            RaceType::Elf => "Elf",
            RaceType::Gnome => "Gnome",
            RaceType::HalfElf => "Half-Elf",
            RaceType::HalfOrc => "Half-Orc",
            RaceType::Halfling => "Halfling",
        }
    }

    pub fn all() -> &'static [RaceType] {
        &[
            RaceType::Human,
            RaceType::Dwarf,
            RaceType::Elf,
            RaceType::Gnome,
            RaceType::HalfElf,
            RaceType::HalfOrc,
            RaceType::Halfling,
        ]
    }
}

impl fmt::Display for RaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RaceType {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        RaceType::all()
            .iter()
            .copied()
            .find(|race| normalize_key(race.name()) == key)
            .ok_or_else(|| RulesError::UnknownRace(s.to_string()))
    }
}

// ============================================================================
// Character Build
// ============================================================================

/// How the base ability scores were generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AbilityMethod {
    /// Spend a point budget using the cost table.
    #[default]
    PointBuy,
    /// Assign 15, 14, 13, 12, 10, 8.
    EliteArray,
    /// Roll 4d6, drop the lowest die, six times.
    Rolled,
}

impl AbilityMethod {
    pub fn name(&self) -> &'static str {
        match self {
            AbilityMethod::PointBuy => "Point Buy",
            AbilityMethod::EliteArray => "Elite Array",
            AbilityMethod::Rolled => "Rolled",
        }
    }
}

/// A catalog item carried by a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Catalog key of the item.
    pub item: String,
    pub quantity: u32,
    pub equipped: bool,
}

impl ItemStack {
    pub fn carried(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
            equipped: false,
        }
    }

    pub fn equipped(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity: 1,
            equipped: true,
        }
    }
}

/// A spell prepared (or known, for spontaneous casters) in one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedSpell {
    pub class: CharacterClass,
    pub spell: String,
    pub level: u32,
}

/// Static bonuses not covered by race, class, feats or equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MiscBonuses {
    pub fortitude: i32,
    pub reflex: i32,
    pub will: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub hit_points: i32,
}

/// The mutable character aggregate edited by each wizard step.
///
/// Everything else about a character is recomputed from this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterBuild {
    pub id: CharacterId,
    pub name: String,
    pub race: RaceType,
    /// Class levels in the order they were taken; the first entry holds the
    /// character's first level.
    pub classes: Vec<ClassLevel>,
    pub ability_method: AbilityMethod,
    /// Scores before racial adjustments and level-up increases.
    pub base_abilities: AbilityScores,
    /// One ability per fourth character level, in the order gained.
    #[serde(default)]
    pub ability_increases: Vec<Ability>,
    #[serde(default)]
    pub skill_ranks: BTreeMap<Skill, u32>,
    #[serde(default)]
    pub feats: Vec<String>,
    #[serde(default)]
    pub inventory: Vec<ItemStack>,
    #[serde(default)]
    pub prepared_spells: Vec<PreparedSpell>,
    /// Hit die results for every character level after the first.
    #[serde(default)]
    pub hit_point_rolls: Vec<u32>,
    #[serde(default)]
    pub misc: MiscBonuses,
}

impl CharacterBuild {
    pub fn new(name: impl Into<String>, race: RaceType) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            race,
            classes: Vec::new(),
            ability_method: AbilityMethod::default(),
            base_abilities: AbilityScores::default(),
            ability_increases: Vec::new(),
            skill_ranks: BTreeMap::new(),
            feats: Vec::new(),
            inventory: Vec::new(),
            prepared_spells: Vec::new(),
            hit_point_rolls: Vec::new(),
            misc: MiscBonuses::default(),
        }
    }

    /// Add levels in a class, merging with an existing entry for that class.
    pub fn add_class_levels(&mut self, class: CharacterClass, levels: u32) {
        if let Some(existing) = self.classes.iter_mut().find(|c| c.class == class) {
            existing.level = existing.level.saturating_add(levels);
        } else {
            self.classes.push(ClassLevel::new(class, levels));
        }
    }

    /// Total character level across all classes, saturating at `u32::MAX`.
    pub fn character_level(&self) -> u32 {
        self.classes
            .iter()
            .fold(0, |total: u32, c| total.saturating_add(c.level))
    }

    /// Levels held in one class.
    pub fn class_level(&self, class: CharacterClass) -> u32 {
        self.classes
            .iter()
            .filter(|c| c.class == class)
            .fold(0, |total: u32, c| total.saturating_add(c.level))
    }

    /// The class taken at each character level, assuming levels were taken
    /// in list order.
    pub fn level_sequence(&self) -> Vec<CharacterClass> {
        self.classes
            .iter()
            .flat_map(|c| std::iter::repeat(c.class).take(c.level as usize))
            .collect()
    }

    pub fn ranks(&self, skill: Skill) -> u32 {
        self.skill_ranks.get(&skill).copied().unwrap_or(0)
    }

    pub fn has_feat(&self, feat: &str) -> bool {
        let key = normalize_key(feat);
        self.feats.iter().any(|f| normalize_key(f) == key)
    }

    /// Scores at the build's current level: racial adjustments plus the
    /// level-up increases earned so far.
    pub fn final_abilities(&self) -> AbilityScores {
        self.abilities_at_level(self.character_level())
    }

    /// Scores as they stood at a given character level.
    pub fn abilities_at_level(&self, level: u32) -> AbilityScores {
        let mut scores = self.base_abilities;
        self.race.data().apply_adjustments(&mut scores);
        let earned = (level / 4) as usize;
        for ability in self.ability_increases.iter().take(earned) {
            scores.adjust(*ability, 1);
        }
        scores
    }

    pub fn equipped_items(&self) -> impl Iterator<Item = &ItemStack> {
        self.inventory.iter().filter(|stack| stack.equipped)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Uniform result shape for every user-facing validation check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<String>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }

    pub fn from_violations(violations: Vec<String>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    pub fn push(&mut self, violation: impl Into<String>) {
        self.violations.push(violation.into());
        self.valid = false;
    }

    pub fn merge(&mut self, other: ValidationReport) {
        for violation in other.violations {
            self.push(violation);
        }
    }
}
