//! Feats and the prerequisite validator.
//!
//! Contains the core feat table with prerequisites and mechanical effects,
//! the prerequisite check, and whole-build feat validation against the
//! available feat slots.

use crate::combat::SavingThrows;
use crate::progression::{feat_slots, multiclass_base_attack_bonus};
use crate::rulebook::{normalize_key, RuleBook, RulesError};
use crate::world::{
    Ability, CharacterBuild, CharacterClass, RaceType, SaveKind, Skill, ValidationReport,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Feat Data
// ============================================================================

/// Feat categories that restrict which bonus slots a feat may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatKind {
    #[default]
    General,
    ItemCreation,
    Metamagic,
}

/// Requirements a character must meet to take a feat.
///
/// Each field is an independent category; empty or `None` means no
/// requirement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prerequisites {
    pub abilities: Vec<(Ability, i32)>,
    pub skills: Vec<(Skill, u32)>,
    pub base_attack_bonus: Option<i32>,
    pub feats: Vec<String>,
    /// Allowed races; empty means any.
    pub races: Vec<RaceType>,
    /// Required class and minimum level in it.
    pub class: Option<(CharacterClass, u32)>,
    pub caster_level: Option<u32>,
    pub character_level: Option<u32>,
}

/// A static bonus a feat grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatEffect {
    HitPoints(i32),
    Save(SaveKind, i32),
    Initiative(i32),
    DodgeAc(i32),
    Skill(Skill, i32),
}

/// A feat definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatData {
    pub name: String,
    pub kind: FeatKind,
    pub prerequisites: Prerequisites,
    pub effects: Vec<FeatEffect>,
    /// May be chosen with a fighter bonus feat slot.
    pub fighter_bonus: bool,
    /// May be taken more than once.
    pub repeatable: bool,
}

impl FeatData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatKind::General,
            prerequisites: Prerequisites::default(),
            effects: Vec::new(),
            fighter_bonus: false,
            repeatable: false,
        }
    }

    pub fn with_kind(mut self, kind: FeatKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: Prerequisites) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    pub fn with_ability(mut self, ability: Ability, minimum: i32) -> Self {
        self.prerequisites.abilities.push((ability, minimum));
        self
    }

    pub fn with_skill(mut self, skill: Skill, ranks: u32) -> Self {
        self.prerequisites.skills.push((skill, ranks));
        self
    }

    pub fn with_bab(mut self, minimum: i32) -> Self {
        self.prerequisites.base_attack_bonus = Some(minimum);
        self
    }

    pub fn with_feat(mut self, feat: &str) -> Self {
        self.prerequisites.feats.push(feat.to_string());
        self
    }

    pub fn with_class(mut self, class: CharacterClass, level: u32) -> Self {
        self.prerequisites.class = Some((class, level));
        self
    }

    pub fn with_caster_level(mut self, level: u32) -> Self {
        self.prerequisites.caster_level = Some(level);
        self
    }

    pub fn with_effect(mut self, effect: FeatEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add +2 on each of two skills.
    pub fn with_skill_pair(self, first: Skill, second: Skill) -> Self {
        self.with_effect(FeatEffect::Skill(first, 2))
            .with_effect(FeatEffect::Skill(second, 2))
    }

    pub fn fighter_bonus(mut self) -> Self {
        self.fighter_bonus = true;
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

// ============================================================================
// Prerequisite Check
// ============================================================================

/// Outcome of checking one feat's prerequisites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteCheck {
    pub eligible: bool,
    /// Every unmet requirement, in category order.
    pub missing: Vec<String>,
}

/// Highest caster level among the build's spellcasting classes.
pub fn caster_level(build: &CharacterBuild) -> u32 {
    build
        .classes
        .iter()
        .map(|c| c.class.caster_level(c.level))
        .max()
        .unwrap_or(0)
}

/// Check every prerequisite category and report all failures.
pub fn check_prerequisites(feat: &FeatData, build: &CharacterBuild) -> PrerequisiteCheck {
    let prereqs = &feat.prerequisites;
    let scores = build.final_abilities();
    let mut missing = Vec::new();

    for (ability, minimum) in &prereqs.abilities {
        let score = scores.get(*ability);
        if score < *minimum {
            missing.push(format!("{} {minimum} (have {score})", ability.name()));
        }
    }

    for (skill, minimum) in &prereqs.skills {
        let ranks = build.ranks(*skill);
        if ranks < *minimum {
            missing.push(format!("{skill} {minimum} ranks (have {ranks})"));
        }
    }

    if let Some(minimum) = prereqs.base_attack_bonus {
        let bab = multiclass_base_attack_bonus(&build.classes);
        if bab < minimum {
            missing.push(format!("Base attack bonus +{minimum} (have +{bab})"));
        }
    }

    for required in &prereqs.feats {
        if !build.has_feat(required) {
            missing.push(required.clone());
        }
    }

    if !prereqs.races.is_empty() && !prereqs.races.contains(&build.race) {
        let allowed: Vec<_> = prereqs.races.iter().map(|r| r.name()).collect();
        missing.push(format!("Race: {}", allowed.join(" or ")));
    }

    if let Some((class, minimum)) = prereqs.class {
        let level = build.class_level(class);
        if level < minimum {
            missing.push(format!("{class} level {minimum} (have {level})"));
        }
    }

    if let Some(minimum) = prereqs.caster_level {
        let level = caster_level(build);
        if level < minimum {
            missing.push(format!("Caster level {minimum} (have {level})"));
        }
    }

    if let Some(minimum) = prereqs.character_level {
        let level = build.character_level();
        if level < minimum {
            missing.push(format!("Character level {minimum} (have {level})"));
        }
    }

    PrerequisiteCheck {
        eligible: missing.is_empty(),
        missing,
    }
}

// ============================================================================
// Build Validation
// ============================================================================

/// Validate every feat on a build: known keys, duplicates, slots, prerequisites.
///
/// Fighter bonus slots only take fighter bonus feats and wizard bonus slots
/// only take metamagic or item creation feats; anything else needs a
/// general, racial or monk slot.
pub fn validate_feats(
    build: &CharacterBuild,
    book: &RuleBook,
) -> Result<ValidationReport, RulesError> {
    let mut report = ValidationReport::ok();
    let feats = build
        .feats
        .iter()
        .map(|name| book.feat(name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = BTreeSet::new();
    for feat in &feats {
        if !seen.insert(normalize_key(&feat.name)) && !feat.repeatable {
            report.push(format!("{} is taken more than once", feat.name));
        }
    }

    let slots = feat_slots(build);
    let mut fighter = slots.fighter_bonus;
    let mut wizard = slots.wizard_bonus;
    let mut open = slots.general + slots.racial + slots.monk_bonus;
    for feat in &feats {
        if feat.fighter_bonus && fighter > 0 {
            fighter -= 1;
        } else if matches!(feat.kind, FeatKind::Metamagic | FeatKind::ItemCreation) && wizard > 0 {
            wizard -= 1;
        } else if open > 0 {
            open -= 1;
        } else {
            report.push(format!("No feat slot available for {}", feat.name));
        }
    }

    for feat in &feats {
        let check = check_prerequisites(feat, build);
        if !check.eligible {
            report.push(format!(
                "{} requires: {}",
                feat.name,
                check.missing.join(", ")
            ));
        }
    }

    tracing::trace!(
        feats = feats.len(),
        slots = slots.total(),
        valid = report.valid,
        "feats validated"
    );
    Ok(report)
}

/// Static bonuses summed across a build's feats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatBonuses {
    pub hit_points: i32,
    pub saves: SavingThrows,
    pub initiative: i32,
    pub dodge_ac: i32,
    pub skills: BTreeMap<Skill, i32>,
}

/// Sum the mechanical effects of every feat on a build.
pub fn feat_bonuses(build: &CharacterBuild, book: &RuleBook) -> Result<FeatBonuses, RulesError> {
    let mut bonuses = FeatBonuses::default();
    for name in &build.feats {
        for effect in &book.feat(name)?.effects {
            match *effect {
                FeatEffect::HitPoints(amount) => bonuses.hit_points += amount,
                FeatEffect::Save(SaveKind::Fortitude, amount) => bonuses.saves.fortitude += amount,
                FeatEffect::Save(SaveKind::Reflex, amount) => bonuses.saves.reflex += amount,
                FeatEffect::Save(SaveKind::Will, amount) => bonuses.saves.will += amount,
                FeatEffect::Initiative(amount) => bonuses.initiative += amount,
                FeatEffect::DodgeAc(amount) => bonuses.dodge_ac += amount,
                FeatEffect::Skill(skill, amount) => {
                    *bonuses.skills.entry(skill).or_insert(0) += amount
                }
            }
        }
    }
    Ok(bonuses)
}

/// Every feat in a rule book the build currently qualifies for.
pub fn eligible_feats<'a>(build: &CharacterBuild, book: &'a RuleBook) -> Vec<&'a FeatData> {
    book.feats()
        .filter(|feat| feat.repeatable || !build.has_feat(&feat.name))
        .filter(|feat| check_prerequisites(feat, build).eligible)
        .collect()
}

// ============================================================================
// Core Feats
// ============================================================================

lazy_static::lazy_static! {
    /// Core 3.5 feats.
    pub static ref SRD_FEATS: Vec<FeatData> = {
        use Ability::*;
        use CharacterClass as C;

        vec![
            FeatData::new("Acrobatic").with_skill_pair(Skill::Jump, Skill::Tumble),
            FeatData::new("Agile").with_skill_pair(Skill::Balance, Skill::EscapeArtist),
            FeatData::new("Alertness").with_skill_pair(Skill::Listen, Skill::Spot),
            FeatData::new("Animal Affinity").with_skill_pair(Skill::HandleAnimal, Skill::Ride),
            FeatData::new("Armor Proficiency (Light)"),
            FeatData::new("Armor Proficiency (Medium)").with_feat("Armor Proficiency (Light)"),
            FeatData::new("Armor Proficiency (Heavy)").with_feat("Armor Proficiency (Medium)"),
            FeatData::new("Athletic").with_skill_pair(Skill::Climb, Skill::Swim),
            FeatData::new("Blind-Fight").fighter_bonus(),
            FeatData::new("Combat Casting"),
            FeatData::new("Combat Expertise").with_ability(Intelligence, 13).fighter_bonus(),
            FeatData::new("Improved Disarm")
                .with_ability(Intelligence, 13)
                .with_feat("Combat Expertise")
                .fighter_bonus(),
            FeatData::new("Improved Feint")
                .with_ability(Intelligence, 13)
                .with_feat("Combat Expertise")
                .fighter_bonus(),
            FeatData::new("Improved Trip")
                .with_ability(Intelligence, 13)
                .with_feat("Combat Expertise")
                .fighter_bonus(),
            FeatData::new("Combat Reflexes").fighter_bonus(),
            FeatData::new("Deceitful").with_skill_pair(Skill::Disguise, Skill::Forgery),
            FeatData::new("Deft Hands").with_skill_pair(Skill::SleightOfHand, Skill::UseRope),
            FeatData::new("Diligent").with_skill_pair(Skill::Appraise, Skill::DecipherScript),
            FeatData::new("Dodge")
                .with_ability(Dexterity, 13)
                .with_effect(FeatEffect::DodgeAc(1))
                .fighter_bonus(),
            FeatData::new("Mobility")
                .with_ability(Dexterity, 13)
                .with_feat("Dodge")
                .fighter_bonus(),
            FeatData::new("Spring Attack")
                .with_ability(Dexterity, 13)
                .with_feat("Dodge")
                .with_feat("Mobility")
                .with_bab(4)
                .fighter_bonus(),
            FeatData::new("Whirlwind Attack")
                .with_ability(Dexterity, 13)
                .with_ability(Intelligence, 13)
                .with_feat("Combat Expertise")
                .with_feat("Dodge")
                .with_feat("Mobility")
                .with_feat("Spring Attack")
                .with_bab(4)
                .fighter_bonus(),
            FeatData::new("Endurance"),
            FeatData::new("Diehard").with_feat("Endurance"),
            FeatData::new("Eschew Materials"),
            FeatData::new("Great Fortitude").with_effect(FeatEffect::Save(SaveKind::Fortitude, 2)),
            FeatData::new("Iron Will").with_effect(FeatEffect::Save(SaveKind::Will, 2)),
            FeatData::new("Lightning Reflexes").with_effect(FeatEffect::Save(SaveKind::Reflex, 2)),
            FeatData::new("Improved Initiative")
                .with_effect(FeatEffect::Initiative(4))
                .fighter_bonus(),
            FeatData::new("Improved Unarmed Strike").fighter_bonus(),
            FeatData::new("Improved Grapple")
                .with_ability(Dexterity, 13)
                .with_feat("Improved Unarmed Strike")
                .fighter_bonus(),
            FeatData::new("Deflect Arrows")
                .with_ability(Dexterity, 13)
                .with_feat("Improved Unarmed Strike")
                .fighter_bonus(),
            FeatData::new("Stunning Fist")
                .with_ability(Dexterity, 13)
                .with_ability(Wisdom, 13)
                .with_feat("Improved Unarmed Strike")
                .with_bab(8)
                .fighter_bonus(),
            FeatData::new("Investigator").with_skill_pair(Skill::GatherInformation, Skill::Search),
            FeatData::new("Magical Aptitude")
                .with_skill_pair(Skill::Spellcraft, Skill::UseMagicDevice),
            FeatData::new("Mounted Combat").with_skill(Skill::Ride, 1).fighter_bonus(),
            FeatData::new("Ride-By Attack")
                .with_skill(Skill::Ride, 1)
                .with_feat("Mounted Combat")
                .fighter_bonus(),
            FeatData::new("Negotiator").with_skill_pair(Skill::Diplomacy, Skill::SenseMotive),
            FeatData::new("Nimble Fingers").with_skill_pair(Skill::DisableDevice, Skill::OpenLock),
            FeatData::new("Persuasive").with_skill_pair(Skill::Bluff, Skill::Intimidate),
            FeatData::new("Self-Sufficient").with_skill_pair(Skill::Heal, Skill::Survival),
            FeatData::new("Stealthy").with_skill_pair(Skill::Hide, Skill::MoveSilently),
            FeatData::new("Point Blank Shot").fighter_bonus(),
            FeatData::new("Far Shot").with_feat("Point Blank Shot").fighter_bonus(),
            FeatData::new("Precise Shot").with_feat("Point Blank Shot").fighter_bonus(),
            FeatData::new("Rapid Shot")
                .with_ability(Dexterity, 13)
                .with_feat("Point Blank Shot")
                .fighter_bonus(),
            FeatData::new("Manyshot")
                .with_ability(Dexterity, 17)
                .with_feat("Point Blank Shot")
                .with_feat("Rapid Shot")
                .with_bab(6)
                .fighter_bonus(),
            FeatData::new("Shot on the Run")
                .with_ability(Dexterity, 13)
                .with_feat("Dodge")
                .with_feat("Mobility")
                .with_feat("Point Blank Shot")
                .with_bab(4)
                .fighter_bonus(),
            FeatData::new("Power Attack").with_ability(Strength, 13).fighter_bonus(),
            FeatData::new("Cleave")
                .with_ability(Strength, 13)
                .with_feat("Power Attack")
                .fighter_bonus(),
            FeatData::new("Great Cleave")
                .with_ability(Strength, 13)
                .with_feat("Power Attack")
                .with_feat("Cleave")
                .with_bab(4)
                .fighter_bonus(),
            FeatData::new("Improved Bull Rush")
                .with_ability(Strength, 13)
                .with_feat("Power Attack")
                .fighter_bonus(),
            FeatData::new("Improved Overrun")
                .with_ability(Strength, 13)
                .with_feat("Power Attack")
                .fighter_bonus(),
            FeatData::new("Improved Sunder")
                .with_ability(Strength, 13)
                .with_feat("Power Attack")
                .fighter_bonus(),
            FeatData::new("Quick Draw").with_bab(1).fighter_bonus(),
            FeatData::new("Run"),
            FeatData::new("Toughness").with_effect(FeatEffect::HitPoints(3)).repeatable(),
            FeatData::new("Track"),
            FeatData::new("Two-Weapon Fighting").with_ability(Dexterity, 15).fighter_bonus(),
            FeatData::new("Improved Two-Weapon Fighting")
                .with_ability(Dexterity, 17)
                .with_feat("Two-Weapon Fighting")
                .with_bab(6)
                .fighter_bonus(),
            FeatData::new("Weapon Finesse").with_bab(1).fighter_bonus(),
            FeatData::new("Weapon Focus").with_bab(1).fighter_bonus().repeatable(),
            FeatData::new("Weapon Specialization")
                .with_feat("Weapon Focus")
                .with_class(C::Fighter, 4)
                .fighter_bonus()
                .repeatable(),
            FeatData::new("Greater Weapon Focus")
                .with_feat("Weapon Focus")
                .with_class(C::Fighter, 8)
                .fighter_bonus()
                .repeatable(),
            FeatData::new("Improved Critical").with_bab(8).fighter_bonus().repeatable(),
            FeatData::new("Spell Focus").repeatable(),
            FeatData::new("Greater Spell Focus").with_feat("Spell Focus").repeatable(),
            FeatData::new("Spell Penetration"),
            FeatData::new("Greater Spell Penetration").with_feat("Spell Penetration"),
            FeatData::new("Spell Mastery").with_class(C::Wizard, 1).repeatable(),
            FeatData::new("Extra Turning").with_class(C::Cleric, 1).repeatable(),
            FeatData::new("Natural Spell")
                .with_ability(Wisdom, 13)
                .with_class(C::Druid, 5),
            FeatData::new("Leadership").with_prerequisites(Prerequisites {
                character_level: Some(6),
                ..Default::default()
            }),
            FeatData::new("Scribe Scroll")
                .with_kind(FeatKind::ItemCreation)
                .with_caster_level(1),
            FeatData::new("Brew Potion")
                .with_kind(FeatKind::ItemCreation)
                .with_caster_level(3),
            FeatData::new("Craft Wondrous Item")
                .with_kind(FeatKind::ItemCreation)
                .with_caster_level(3),
            FeatData::new("Craft Magic Arms and Armor")
                .with_kind(FeatKind::ItemCreation)
                .with_caster_level(5),
            FeatData::new("Craft Wand")
                .with_kind(FeatKind::ItemCreation)
                .with_caster_level(5),
            FeatData::new("Enlarge Spell").with_kind(FeatKind::Metamagic),
            FeatData::new("Extend Spell").with_kind(FeatKind::Metamagic),
            FeatData::new("Silent Spell").with_kind(FeatKind::Metamagic),
            FeatData::new("Still Spell").with_kind(FeatKind::Metamagic),
            FeatData::new("Empower Spell").with_kind(FeatKind::Metamagic),
            FeatData::new("Widen Spell").with_kind(FeatKind::Metamagic),
            FeatData::new("Maximize Spell").with_kind(FeatKind::Metamagic),
            FeatData::new("Heighten Spell").with_kind(FeatKind::Metamagic),
            FeatData::new("Quicken Spell").with_kind(FeatKind::Metamagic),
        ]
    };
}
