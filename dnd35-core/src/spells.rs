//! D&D 3.5 spells and spell slots.
//!
//! Contains the spell list keyed by class and spell level, the base spells
//! per day and spells known tables for every casting class, bonus spells
//! from a high casting ability, and spell preparation validation.

use crate::rulebook::{RuleBook, RulesError};
use crate::world::{CharacterBuild, CharacterClass, ValidationReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Spell Data
// ============================================================================

/// Schools of magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
    Universal,
}

impl SpellSchool {
    pub fn name(&self) -> &'static str {
        match self {
            SpellSchool::Abjuration => "Abjuration",
            SpellSchool::Conjuration => "Conjuration",
            SpellSchool::Divination => "Divination",
            SpellSchool::Enchantment => "Enchantment",
            SpellSchool::Evocation => "Evocation",
            SpellSchool::Illusion => "Illusion",
            SpellSchool::Necromancy => "Necromancy",
            SpellSchool::Transmutation => "Transmutation",
            SpellSchool::Universal => "Universal",
        }
    }
}

/// A spell and the level it has on each class list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellData {
    pub name: String,
    pub school: SpellSchool,
    pub levels: BTreeMap<CharacterClass, u32>,
}

impl SpellData {
    pub fn new(name: impl Into<String>, school: SpellSchool) -> Self {
        Self {
            name: name.into(),
            school,
            levels: BTreeMap::new(),
        }
    }

    /// Add the spell to one class list.
    pub fn with_level(mut self, class: CharacterClass, level: u32) -> Self {
        self.levels.insert(class, level);
        self
    }

    /// Add the spell to the sorcerer and wizard lists.
    pub fn arcane(self, level: u32) -> Self {
        self.with_level(CharacterClass::Sorcerer, level)
            .with_level(CharacterClass::Wizard, level)
    }

    pub fn level_for(&self, class: CharacterClass) -> Option<u32> {
        self.levels.get(&class).copied()
    }
}

// ============================================================================
// Spell Tables
// ============================================================================

/// No access to a spell level.
const N: i8 = -1;

#[rustfmt::skip]
const WIZARD_PER_DAY: [[i8; 10]; 20] = [
    [3, 1, N, N, N, N, N, N, N, N],
    [4, 2, N, N, N, N, N, N, N, N],
    [4, 2, 1, N, N, N, N, N, N, N],
    [4, 3, 2, N, N, N, N, N, N, N],
    [4, 3, 2, 1, N, N, N, N, N, N],
    [4, 3, 3, 2, N, N, N, N, N, N],
    [4, 4, 3, 2, 1, N, N, N, N, N],
    [4, 4, 3, 3, 2, N, N, N, N, N],
    [4, 4, 4, 3, 2, 1, N, N, N, N],
    [4, 4, 4, 3, 3, 2, N, N, N, N],
    [4, 4, 4, 4, 3, 2, 1, N, N, N],
    [4, 4, 4, 4, 3, 3, 2, N, N, N],
    [4, 4, 4, 4, 4, 3, 2, 1, N, N],
    [4, 4, 4, 4, 4, 3, 3, 2, N, N],
    [4, 4, 4, 4, 4, 4, 3, 2, 1, N],
    [4, 4, 4, 4, 4, 4, 3, 3, 2, N],
    [4, 4, 4, 4, 4, 4, 4, 3, 2, 1],
    [4, 4, 4, 4, 4, 4, 4, 3, 3, 2],
    [4, 4, 4, 4, 4, 4, 4, 4, 3, 3],
    [4, 4, 4, 4, 4, 4, 4, 4, 4, 4],
];

/// Cleric and druid; clerics add a domain slot at each level 1+.
#[rustfmt::skip]
const DIVINE_PER_DAY: [[i8; 10]; 20] = [
    [3, 1, N, N, N, N, N, N, N, N],
    [4, 2, N, N, N, N, N, N, N, N],
    [4, 2, 1, N, N, N, N, N, N, N],
    [5, 3, 2, N, N, N, N, N, N, N],
    [5, 3, 2, 1, N, N, N, N, N, N],
    [5, 3, 3, 2, N, N, N, N, N, N],
    [6, 4, 3, 2, 1, N, N, N, N, N],
    [6, 4, 3, 3, 2, N, N, N, N, N],
    [6, 4, 4, 3, 2, 1, N, N, N, N],
    [6, 4, 4, 3, 3, 2, N, N, N, N],
    [6, 5, 4, 4, 3, 2, 1, N, N, N],
    [6, 5, 4, 4, 3, 3, 2, N, N, N],
    [6, 5, 5, 4, 4, 3, 2, 1, N, N],
    [6, 5, 5, 4, 4, 3, 3, 2, N, N],
    [6, 5, 5, 5, 4, 4, 3, 2, 1, N],
    [6, 5, 5, 5, 4, 4, 3, 3, 2, N],
    [6, 5, 5, 5, 5, 4, 4, 3, 2, 1],
    [6, 5, 5, 5, 5, 4, 4, 3, 3, 2],
    [6, 5, 5, 5, 5, 5, 4, 4, 3, 3],
    [6, 5, 5, 5, 5, 5, 4, 4, 4, 4],
];

#[rustfmt::skip]
const SORCERER_PER_DAY: [[i8; 10]; 20] = [
    [5, 3, N, N, N, N, N, N, N, N],
    [6, 4, N, N, N, N, N, N, N, N],
    [6, 5, N, N, N, N, N, N, N, N],
    [6, 6, 3, N, N, N, N, N, N, N],
    [6, 6, 4, N, N, N, N, N, N, N],
    [6, 6, 5, 3, N, N, N, N, N, N],
    [6, 6, 6, 4, N, N, N, N, N, N],
    [6, 6, 6, 5, 3, N, N, N, N, N],
    [6, 6, 6, 6, 4, N, N, N, N, N],
    [6, 6, 6, 6, 5, 3, N, N, N, N],
    [6, 6, 6, 6, 6, 4, N, N, N, N],
    [6, 6, 6, 6, 6, 5, 3, N, N, N],
    [6, 6, 6, 6, 6, 6, 4, N, N, N],
    [6, 6, 6, 6, 6, 6, 5, 3, N, N],
    [6, 6, 6, 6, 6, 6, 6, 4, N, N],
    [6, 6, 6, 6, 6, 6, 6, 5, 3, N],
    [6, 6, 6, 6, 6, 6, 6, 6, 4, N],
    [6, 6, 6, 6, 6, 6, 6, 6, 5, 3],
    [6, 6, 6, 6, 6, 6, 6, 6, 6, 4],
    [6, 6, 6, 6, 6, 6, 6, 6, 6, 6],
];

#[rustfmt::skip]
const SORCERER_KNOWN: [[i8; 10]; 20] = [
    [4, 2, N, N, N, N, N, N, N, N],
    [5, 2, N, N, N, N, N, N, N, N],
    [5, 3, N, N, N, N, N, N, N, N],
    [6, 3, 1, N, N, N, N, N, N, N],
    [6, 4, 2, N, N, N, N, N, N, N],
    [7, 4, 2, 1, N, N, N, N, N, N],
    [7, 5, 3, 2, N, N, N, N, N, N],
    [8, 5, 3, 2, 1, N, N, N, N, N],
    [8, 5, 4, 3, 2, N, N, N, N, N],
    [9, 5, 4, 3, 2, 1, N, N, N, N],
    [9, 5, 5, 4, 3, 2, N, N, N, N],
    [9, 5, 5, 4, 3, 2, 1, N, N, N],
    [9, 5, 5, 4, 4, 3, 2, N, N, N],
    [9, 5, 5, 4, 4, 3, 2, 1, N, N],
    [9, 5, 5, 4, 4, 4, 3, 2, N, N],
    [9, 5, 5, 4, 4, 4, 3, 2, 1, N],
    [9, 5, 5, 4, 4, 4, 3, 3, 2, N],
    [9, 5, 5, 4, 4, 4, 3, 3, 2, 1],
    [9, 5, 5, 4, 4, 4, 3, 3, 3, 2],
    [9, 5, 5, 4, 4, 4, 3, 3, 3, 3],
];

#[rustfmt::skip]
const BARD_PER_DAY: [[i8; 10]; 20] = [
    [2, N, N, N, N, N, N, N, N, N],
    [3, 0, N, N, N, N, N, N, N, N],
    [3, 1, N, N, N, N, N, N, N, N],
    [3, 2, 0, N, N, N, N, N, N, N],
    [3, 3, 1, N, N, N, N, N, N, N],
    [3, 3, 2, N, N, N, N, N, N, N],
    [3, 3, 2, 0, N, N, N, N, N, N],
    [3, 3, 3, 1, N, N, N, N, N, N],
    [3, 3, 3, 2, N, N, N, N, N, N],
    [3, 3, 3, 2, 0, N, N, N, N, N],
    [3, 3, 3, 3, 1, N, N, N, N, N],
    [3, 3, 3, 3, 2, N, N, N, N, N],
    [3, 3, 3, 3, 2, 0, N, N, N, N],
    [4, 3, 3, 3, 3, 1, N, N, N, N],
    [4, 4, 3, 3, 3, 2, N, N, N, N],
    [4, 4, 4, 3, 3, 2, 0, N, N, N],
    [4, 4, 4, 4, 3, 3, 1, N, N, N],
    [4, 4, 4, 4, 4, 3, 2, N, N, N],
    [4, 4, 4, 4, 4, 4, 3, N, N, N],
    [4, 4, 4, 4, 4, 4, 4, N, N, N],
];

#[rustfmt::skip]
const BARD_KNOWN: [[i8; 10]; 20] = [
    [4, N, N, N, N, N, N, N, N, N],
    [5, 2, N, N, N, N, N, N, N, N],
    [6, 3, N, N, N, N, N, N, N, N],
    [6, 3, 2, N, N, N, N, N, N, N],
    [6, 4, 3, N, N, N, N, N, N, N],
    [6, 4, 3, N, N, N, N, N, N, N],
    [6, 4, 4, 2, N, N, N, N, N, N],
    [6, 4, 4, 3, N, N, N, N, N, N],
    [6, 4, 4, 3, N, N, N, N, N, N],
    [6, 4, 4, 4, 2, N, N, N, N, N],
    [6, 4, 4, 4, 3, N, N, N, N, N],
    [6, 4, 4, 4, 3, N, N, N, N, N],
    [6, 4, 4, 4, 4, 2, N, N, N, N],
    [6, 4, 4, 4, 4, 3, N, N, N, N],
    [6, 4, 4, 4, 4, 3, N, N, N, N],
    [6, 5, 4, 4, 4, 4, 2, N, N, N],
    [6, 5, 5, 4, 4, 4, 3, N, N, N],
    [6, 5, 5, 5, 4, 4, 3, N, N, N],
    [6, 5, 5, 5, 5, 4, 4, N, N, N],
    [6, 5, 5, 5, 5, 5, 4, N, N, N],
];

/// Paladin and ranger; no 0-level spells.
#[rustfmt::skip]
const HALF_CASTER_PER_DAY: [[i8; 10]; 20] = [
    [N, N, N, N, N, N, N, N, N, N],
    [N, N, N, N, N, N, N, N, N, N],
    [N, N, N, N, N, N, N, N, N, N],
    [N, 0, N, N, N, N, N, N, N, N],
    [N, 0, N, N, N, N, N, N, N, N],
    [N, 1, N, N, N, N, N, N, N, N],
    [N, 1, N, N, N, N, N, N, N, N],
    [N, 1, 0, N, N, N, N, N, N, N],
    [N, 1, 0, N, N, N, N, N, N, N],
    [N, 1, 1, N, N, N, N, N, N, N],
    [N, 1, 1, 0, N, N, N, N, N, N],
    [N, 1, 1, 1, N, N, N, N, N, N],
    [N, 1, 1, 1, N, N, N, N, N, N],
    [N, 2, 1, 1, 0, N, N, N, N, N],
    [N, 2, 1, 1, 1, N, N, N, N, N],
    [N, 2, 2, 1, 1, N, N, N, N, N],
    [N, 2, 2, 2, 1, N, N, N, N, N],
    [N, 3, 2, 2, 1, N, N, N, N, N],
    [N, 3, 3, 3, 2, N, N, N, N, N],
    [N, 3, 3, 3, 3, N, N, N, N, N],
];

fn table_row(table: &[[i8; 10]; 20], class_level: u32) -> Vec<Option<u32>> {
    if class_level == 0 {
        return Vec::new();
    }
    let row = &table[(class_level.min(20) - 1) as usize];
    let accessible = row.iter().rposition(|&n| n >= 0).map_or(0, |i| i + 1);
    row[..accessible]
        .iter()
        .map(|&n| u32::try_from(n).ok())
        .collect()
}

/// Base spells per day by spell level, before bonus and domain spells.
///
/// `None` marks a spell level the class cannot cast yet; `Some(0)` means
/// only bonus spells are available at that level.
pub fn base_spells_per_day(class: CharacterClass, class_level: u32) -> Vec<Option<u32>> {
    match class {
        CharacterClass::Wizard => table_row(&WIZARD_PER_DAY, class_level),
        CharacterClass::Cleric | CharacterClass::Druid => table_row(&DIVINE_PER_DAY, class_level),
        CharacterClass::Sorcerer => table_row(&SORCERER_PER_DAY, class_level),
        CharacterClass::Bard => table_row(&BARD_PER_DAY, class_level),
        CharacterClass::Paladin | CharacterClass::Ranger => {
            table_row(&HALF_CASTER_PER_DAY, class_level)
        }
        CharacterClass::Barbarian
        | CharacterClass::Fighter
        | CharacterClass::Monk
        | CharacterClass::Rogue => Vec::new(),
    }
}

/// Spells known by spell level for spontaneous casters.
pub fn spells_known(class: CharacterClass, class_level: u32) -> Option<Vec<u32>> {
    let table = match class {
        CharacterClass::Sorcerer => &SORCERER_KNOWN,
        CharacterClass::Bard => &BARD_KNOWN,
        _ => return None,
    };
    Some(
        table_row(table, class_level)
            .into_iter()
            .map(|n| n.unwrap_or(0))
            .collect(),
    )
}

/// Bonus spells for a casting ability modifier at one spell level.
pub fn bonus_spells(ability_modifier: i32, spell_level: u32) -> u32 {
    let level = spell_level as i32;
    if spell_level == 0 || ability_modifier < level {
        0
    } else {
        (1 + (ability_modifier - level) / 4) as u32
    }
}

/// Whether a casting score is high enough for a spell level.
pub fn can_cast_level(casting_score: i32, spell_level: u32) -> bool {
    casting_score >= 10 + spell_level as i32
}

/// Spell slots for one casting class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots {
    pub caster_level: u32,
    /// Spells per day by spell level, bonus spells included.
    pub per_day: Vec<u32>,
    /// Extra domain slots by spell level.
    pub domain: Vec<u32>,
    /// Spells known by spell level, for spontaneous casters.
    pub known: Option<Vec<u32>>,
}

impl SpellSlots {
    /// Slots at one spell level, domain slots included.
    pub fn available(&self, spell_level: u32) -> u32 {
        let index = spell_level as usize;
        self.per_day.get(index).copied().unwrap_or(0) + self.domain.get(index).copied().unwrap_or(0)
    }
}

/// Compute the slots a class grants at a class level and casting score.
///
/// Levels the casting score is too low for get no slots at all.
pub fn spell_slots(
    class: CharacterClass,
    class_level: u32,
    casting_score: i32,
) -> Option<SpellSlots> {
    let casting = class.data().spellcasting?;
    let modifier = crate::abilities::modifier_of(casting_score);
    let base = base_spells_per_day(class, class_level);

    let mut per_day = Vec::with_capacity(base.len());
    let mut domain = Vec::with_capacity(base.len());
    for (level, slots) in base.iter().enumerate() {
        let level = level as u32;
        match slots {
            Some(n) if can_cast_level(casting_score, level) => {
                per_day.push(n + bonus_spells(modifier, level));
                domain.push(u32::from(casting.domain_slot && level > 0));
            }
            _ => {
                per_day.push(0);
                domain.push(0);
            }
        }
    }

    Some(SpellSlots {
        caster_level: class.caster_level(class_level),
        per_day,
        domain,
        known: if casting.spontaneous {
            spells_known(class, class_level)
        } else {
            None
        },
    })
}

/// Slots for every casting class in a build.
pub fn build_spell_slots(build: &CharacterBuild) -> BTreeMap<CharacterClass, SpellSlots> {
    let scores = build.final_abilities();
    build
        .classes
        .iter()
        .filter_map(|c| {
            let casting = c.class.data().spellcasting?;
            spell_slots(c.class, c.level, scores.get(casting.ability)).map(|slots| (c.class, slots))
        })
        .collect()
}

/// Check prepared (or known) spells against class lists, slots and ability.
///
/// Prepared casters are limited by spells per day; spontaneous casters by
/// spells known.
pub fn validate_spells(
    build: &CharacterBuild,
    book: &RuleBook,
) -> Result<ValidationReport, RulesError> {
    let mut report = ValidationReport::ok();
    let slots = build_spell_slots(build);
    let scores = build.final_abilities();
    let mut used: BTreeMap<(CharacterClass, u32), u32> = BTreeMap::new();

    for prepared in &build.prepared_spells {
        let spell = book.spell(&prepared.spell)?;
        let class = prepared.class;

        if !slots.contains_key(&class) {
            report.push(format!("{} cannot cast {} spells", build.name, class));
            continue;
        }

        match spell.level_for(class) {
            Some(level) if level == prepared.level => {}
            Some(level) => report.push(format!(
                "{} is a level {level} {class} spell, not level {}",
                spell.name, prepared.level
            )),
            None => report.push(format!("{} is not on the {class} spell list", spell.name)),
        }

        if let Some(casting) = class.data().spellcasting {
            let score = scores.get(casting.ability);
            if !can_cast_level(score, prepared.level) {
                report.push(format!(
                    "{} {score} is too low to cast level {} spells",
                    casting.ability.name(),
                    prepared.level
                ));
            }
        }

        *used.entry((class, prepared.level)).or_insert(0) += 1;
    }

    for ((class, level), count) in &used {
        let Some(class_slots) = slots.get(class) else {
            continue;
        };
        let limit = match &class_slots.known {
            Some(known) => known.get(*level as usize).copied().unwrap_or(0),
            None => class_slots.available(*level),
        };
        if *count > limit {
            report.push(format!(
                "{count} level {level} {class} spells exceed the {limit} available"
            ));
        }
    }

    tracing::trace!(spells = build.prepared_spells.len(), valid = report.valid, "spells validated");
    Ok(report)
}

// ============================================================================
// Spell List
// ============================================================================

lazy_static::lazy_static! {
    /// Core 3.5 spells.
    pub static ref SRD_SPELLS: Vec<SpellData> = {
        use CharacterClass::{Bard, Cleric, Druid, Paladin, Ranger, Sorcerer, Wizard};
        use SpellSchool::*;

        vec![
            // 0-level
            SpellData::new("Acid Splash", Conjuration).arcane(0),
            SpellData::new("Daze", Enchantment).with_level(Bard, 0).arcane(0),
            SpellData::new("Detect Magic", Divination)
                .with_level(Bard, 0)
                .with_level(Cleric, 0)
                .with_level(Druid, 0)
                .arcane(0),
            SpellData::new("Light", Evocation)
                .with_level(Bard, 0)
                .with_level(Cleric, 0)
                .with_level(Druid, 0)
                .arcane(0),
            SpellData::new("Mage Hand", Transmutation).with_level(Bard, 0).arcane(0),
            SpellData::new("Prestidigitation", Universal).with_level(Bard, 0).arcane(0),
            SpellData::new("Ray of Frost", Evocation).arcane(0),
            SpellData::new("Read Magic", Divination)
                .with_level(Bard, 0)
                .with_level(Cleric, 0)
                .with_level(Druid, 0)
                .with_level(Paladin, 1)
                .with_level(Ranger, 1)
                .arcane(0),
            SpellData::new("Resistance", Abjuration)
                .with_level(Bard, 0)
                .with_level(Cleric, 0)
                .with_level(Druid, 0)
                .with_level(Paladin, 1)
                .arcane(0),
            SpellData::new("Guidance", Divination).with_level(Cleric, 0).with_level(Druid, 0),
            SpellData::new("Create Water", Conjuration)
                .with_level(Cleric, 0)
                .with_level(Druid, 0)
                .with_level(Paladin, 1),
            SpellData::new("Virtue", Transmutation)
                .with_level(Cleric, 0)
                .with_level(Druid, 0)
                .with_level(Paladin, 1),
            // 1st level
            SpellData::new("Magic Missile", Evocation).arcane(1),
            SpellData::new("Mage Armor", Conjuration).arcane(1),
            SpellData::new("Shield", Abjuration).arcane(1),
            SpellData::new("Burning Hands", Evocation).arcane(1),
            SpellData::new("Color Spray", Illusion).arcane(1),
            SpellData::new("Sleep", Enchantment).with_level(Bard, 1).arcane(1),
            SpellData::new("Charm Person", Enchantment).with_level(Bard, 1).arcane(1),
            SpellData::new("Grease", Conjuration).with_level(Bard, 1).arcane(1),
            SpellData::new("Identify", Divination).with_level(Bard, 1).arcane(1),
            SpellData::new("Feather Fall", Transmutation).with_level(Bard, 1).arcane(1),
            SpellData::new("Protection from Evil", Abjuration)
                .with_level(Cleric, 1)
                .with_level(Paladin, 1)
                .arcane(1),
            SpellData::new("Cure Light Wounds", Conjuration)
                .with_level(Bard, 1)
                .with_level(Cleric, 1)
                .with_level(Druid, 1)
                .with_level(Paladin, 1)
                .with_level(Ranger, 2),
            SpellData::new("Bless", Enchantment).with_level(Cleric, 1).with_level(Paladin, 1),
            SpellData::new("Divine Favor", Evocation).with_level(Cleric, 1).with_level(Paladin, 1),
            SpellData::new("Shield of Faith", Abjuration).with_level(Cleric, 1),
            SpellData::new("Entangle", Transmutation).with_level(Druid, 1).with_level(Ranger, 1),
            SpellData::new("Goodberry", Transmutation).with_level(Druid, 1),
            SpellData::new("Faerie Fire", Evocation).with_level(Druid, 1),
            SpellData::new("Longstrider", Transmutation).with_level(Druid, 1).with_level(Ranger, 1),
            SpellData::new("Pass without Trace", Transmutation)
                .with_level(Druid, 1)
                .with_level(Ranger, 1),
            SpellData::new("Summon Nature's Ally I", Conjuration)
                .with_level(Druid, 1)
                .with_level(Ranger, 1),
            // 2nd level
            SpellData::new("Invisibility", Illusion).with_level(Bard, 2).arcane(2),
            SpellData::new("Mirror Image", Illusion).with_level(Bard, 2).arcane(2),
            SpellData::new("Scorching Ray", Evocation).arcane(2),
            SpellData::new("Web", Conjuration).arcane(2),
            SpellData::new("Knock", Transmutation).arcane(2),
            SpellData::new("Bull's Strength", Transmutation)
                .with_level(Cleric, 2)
                .with_level(Druid, 2)
                .with_level(Paladin, 2)
                .arcane(2),
            SpellData::new("Cat's Grace", Transmutation)
                .with_level(Bard, 2)
                .with_level(Druid, 2)
                .with_level(Ranger, 2)
                .arcane(2),
            SpellData::new("Resist Energy", Abjuration)
                .with_level(Cleric, 2)
                .with_level(Druid, 2)
                .with_level(Paladin, 2)
                .with_level(Ranger, 1)
                .arcane(2),
            SpellData::new("Hold Person", Enchantment)
                .with_level(Bard, 2)
                .with_level(Cleric, 2)
                .arcane(3),
            SpellData::new("Cure Moderate Wounds", Conjuration)
                .with_level(Bard, 2)
                .with_level(Cleric, 2)
                .with_level(Druid, 3)
                .with_level(Paladin, 3)
                .with_level(Ranger, 3),
            SpellData::new("Spiritual Weapon", Evocation).with_level(Cleric, 2),
            SpellData::new("Barkskin", Transmutation).with_level(Druid, 2).with_level(Ranger, 2),
            // 3rd level
            SpellData::new("Fireball", Evocation).arcane(3),
            SpellData::new("Lightning Bolt", Evocation).arcane(3),
            SpellData::new("Fly", Transmutation).arcane(3),
            SpellData::new("Haste", Transmutation).with_level(Bard, 3).arcane(3),
            SpellData::new("Dispel Magic", Abjuration)
                .with_level(Bard, 3)
                .with_level(Cleric, 3)
                .with_level(Druid, 4)
                .with_level(Paladin, 3)
                .arcane(3),
            SpellData::new("Cure Serious Wounds", Conjuration)
                .with_level(Bard, 3)
                .with_level(Cleric, 3)
                .with_level(Druid, 4)
                .with_level(Paladin, 4)
                .with_level(Ranger, 4),
            SpellData::new("Prayer", Enchantment).with_level(Cleric, 3).with_level(Paladin, 3),
            SpellData::new("Call Lightning", Evocation).with_level(Druid, 3),
            SpellData::new("Speak with Animals", Divination)
                .with_level(Bard, 3)
                .with_level(Druid, 1)
                .with_level(Ranger, 1),
            // 4th level and up
            SpellData::new("Stoneskin", Abjuration).with_level(Druid, 5).arcane(4),
            SpellData::new("Greater Invisibility", Illusion).with_level(Bard, 4).arcane(4),
            SpellData::new("Dimension Door", Conjuration).with_level(Bard, 4).arcane(4),
            SpellData::new("Cure Critical Wounds", Conjuration)
                .with_level(Bard, 4)
                .with_level(Cleric, 4)
                .with_level(Druid, 5),
            SpellData::new("Flame Strike", Evocation).with_level(Cleric, 5).with_level(Druid, 4),
            SpellData::new("Raise Dead", Conjuration).with_level(Cleric, 5),
            SpellData::new("Cone of Cold", Evocation).arcane(5),
            SpellData::new("Teleport", Conjuration).arcane(5),
            SpellData::new("Disintegrate", Transmutation).arcane(6),
            SpellData::new("Chain Lightning", Evocation).arcane(6),
            SpellData::new("Heal", Conjuration).with_level(Cleric, 6).with_level(Druid, 7),
            SpellData::new("Finger of Death", Necromancy).with_level(Druid, 8).arcane(7),
            SpellData::new("Resurrection", Conjuration).with_level(Cleric, 7),
            SpellData::new("Mind Blank", Abjuration).arcane(8),
            SpellData::new("Gate", Conjuration).with_level(Cleric, 9).arcane(9),
            SpellData::new("Miracle", Evocation).with_level(Cleric, 9),
            SpellData::new("Meteor Swarm", Evocation).arcane(9),
            SpellData::new("Time Stop", Transmutation).arcane(9),
            SpellData::new("Wish", Universal).arcane(9),
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{AbilityScores, PreparedSpell, RaceType};

    #[test]
    fn test_base_spells_per_day() {
        assert_eq!(base_spells_per_day(CharacterClass::Wizard, 1), vec![Some(3), Some(1)]);
        assert_eq!(base_spells_per_day(CharacterClass::Wizard, 20).len(), 10);
        assert_eq!(base_spells_per_day(CharacterClass::Cleric, 4)[0], Some(5));
        assert_eq!(base_spells_per_day(CharacterClass::Bard, 2), vec![Some(3), Some(0)]);
        assert!(base_spells_per_day(CharacterClass::Paladin, 3).is_empty());
        assert_eq!(base_spells_per_day(CharacterClass::Paladin, 4), vec![None, Some(0)]);
        assert!(base_spells_per_day(CharacterClass::Fighter, 10).is_empty());
    }

    #[test]
    fn test_bonus_spells() {
        assert_eq!(bonus_spells(3, 0), 0);
        assert_eq!(bonus_spells(3, 1), 1);
        assert_eq!(bonus_spells(3, 3), 1);
        assert_eq!(bonus_spells(3, 4), 0);
        assert_eq!(bonus_spells(5, 1), 2);
        assert_eq!(bonus_spells(-1, 1), 0);
    }

    #[test]
    fn test_wizard_slots_with_bonus() {
        // Int 16 (+3): one bonus 1st level spell
        let slots = spell_slots(CharacterClass::Wizard, 1, 16).unwrap();
        assert_eq!(slots.per_day, vec![3, 2]);
        assert_eq!(slots.caster_level, 1);
        assert!(slots.known.is_none());
    }

    #[test]
    fn test_low_casting_score_blocks_level() {
        let slots = spell_slots(CharacterClass::Wizard, 3, 11).unwrap();
        assert_eq!(slots.per_day, vec![4, 2, 0]);
    }

    #[test]
    fn test_cleric_domain_slots() {
        let slots = spell_slots(CharacterClass::Cleric, 3, 14).unwrap();
        assert_eq!(slots.per_day, vec![4, 3, 2]);
        assert_eq!(slots.domain, vec![0, 1, 1]);
        assert_eq!(slots.available(1), 4);
    }

    #[test]
    fn test_paladin_bonus_only_level() {
        let slots = spell_slots(CharacterClass::Paladin, 4, 14).unwrap();
        assert_eq!(slots.per_day, vec![0, 1]);
        assert_eq!(slots.caster_level, 2);
        assert!(spell_slots(CharacterClass::Fighter, 4, 14).is_none());
    }

    #[test]
    fn test_sorcerer_known() {
        let slots = spell_slots(CharacterClass::Sorcerer, 4, 16).unwrap();
        assert_eq!(slots.known, Some(vec![6, 3, 1]));
    }

    #[test]
    fn test_validate_spells() {
        let book = RuleBook::srd();
        let mut build = CharacterBuild::new("Mira", RaceType::Elf);
        build.base_abilities = AbilityScores::new(8, 14, 12, 16, 10, 10);
        build.add_class_levels(CharacterClass::Wizard, 1);
        build.prepared_spells = vec![
            PreparedSpell {
                class: CharacterClass::Wizard,
                spell: "Magic Missile".into(),
                level: 1,
            },
            PreparedSpell {
                class: CharacterClass::Wizard,
                spell: "Sleep".into(),
                level: 1,
            },
        ];
        assert!(validate_spells(&build, &book).unwrap().valid);

        build.prepared_spells.push(PreparedSpell {
            class: CharacterClass::Wizard,
            spell: "Shield".into(),
            level: 1,
        });
        let report = validate_spells(&build, &book).unwrap();
        assert!(!report.valid);
        assert!(report.violations[0].contains("exceed"));

        build.prepared_spells = vec![PreparedSpell {
            class: CharacterClass::Wizard,
            spell: "Cure Light Wounds".into(),
            level: 1,
        }];
        let report = validate_spells(&build, &book).unwrap();
        assert!(report.violations[0].contains("not on the Wizard spell list"));
    }

    #[test]
    fn test_validate_spells_unknown_spell() {
        let book = RuleBook::srd();
        let mut build = CharacterBuild::new("Mira", RaceType::Elf);
        build.add_class_levels(CharacterClass::Wizard, 1);
        build.prepared_spells = vec![PreparedSpell {
            class: CharacterClass::Wizard,
            spell: "Frobnicate".into(),
            level: 1,
        }];
        assert!(matches!(
            validate_spells(&build, &book),
            Err(RulesError::UnknownSpell(_))
        ));
    }
}
