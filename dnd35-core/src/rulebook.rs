//! The rule book: reference tables plus configuration.
//!
//! A [`RuleBook`] is built once and passed by reference to every calculator
//! that needs catalog data. Races and classes are closed enums whose data
//! lives on the enum itself; feats, items, spells and monsters are keyed
//! tables that can be extended with custom content.

use crate::config::RulesConfig;
use crate::dice::DiceError;
use crate::encounter::{EncounterBudgetTable, MonsterData, SRD_MONSTERS};
use crate::feats::{FeatData, SRD_FEATS};
use crate::items::{ItemData, SRD_ITEMS};
use crate::spells::{SpellData, SRD_SPELLS};
use std::collections::BTreeMap;
use thiserror::Error;

/// Fail-fast errors for malformed input that no user action produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("Unknown race: {0}")]
    UnknownRace(String),
    #[error("Unknown class: {0}")]
    UnknownClass(String),
    #[error("Unknown feat: {0}")]
    UnknownFeat(String),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("Unknown spell: {0}")]
    UnknownSpell(String),
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),
    #[error("Unknown monster: {0}")]
    UnknownMonster(String),
    #[error("{ability} score {score} is outside the representable domain")]
    AbilityOutOfDomain { ability: String, score: i32 },
    #[error("Character has no class levels")]
    NoClassLevels,
    #[error("Class {0} is listed with zero levels")]
    ZeroClassLevel(String),
    #[error("{class} level {level} is outside the supported range")]
    ClassLevelOutOfDomain { class: String, level: u32 },
    #[error("Character level {0} is outside the supported range")]
    CharacterLevelOutOfDomain(u32),
    #[error("Damage for {item} does not parse: {source}")]
    InvalidDamage {
        item: String,
        #[source]
        source: DiceError,
    },
}

/// Normalize a lookup key: lowercase ASCII alphanumerics only.
///
/// `"Improved Initiative"`, `"improved_initiative"` and
/// `"improvedinitiative"` all map to the same key.
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Reference tables and configuration for one ruleset.
#[derive(Debug, Clone)]
pub struct RuleBook {
    pub config: RulesConfig,
    pub budgets: EncounterBudgetTable,
    feats: BTreeMap<String, FeatData>,
    items: BTreeMap<String, ItemData>,
    spells: BTreeMap<String, SpellData>,
    monsters: BTreeMap<String, MonsterData>,
}

impl RuleBook {
    /// The SRD tables with default configuration.
    pub fn srd() -> Self {
        Self::new(RulesConfig::default())
    }

    /// The SRD tables with a custom configuration.
    pub fn new(config: RulesConfig) -> Self {
        let mut book = Self {
            config,
            budgets: EncounterBudgetTable::standard(),
            feats: BTreeMap::new(),
            items: BTreeMap::new(),
            spells: BTreeMap::new(),
            monsters: BTreeMap::new(),
        };
        for feat in SRD_FEATS.iter() {
            book.insert_feat(feat.clone());
        }
        for item in SRD_ITEMS.iter() {
            book.insert_item(item.clone());
        }
        for spell in SRD_SPELLS.iter() {
            book.insert_spell(spell.clone());
        }
        for monster in SRD_MONSTERS.iter() {
            book.insert_monster(monster.clone());
        }
        tracing::debug!(
            feats = book.feats.len(),
            items = book.items.len(),
            spells = book.spells.len(),
            monsters = book.monsters.len(),
            "rule book loaded"
        );
        book
    }

    /// Register a feat, replacing any feat with the same key.
    pub fn insert_feat(&mut self, feat: FeatData) {
        self.feats.insert(normalize_key(&feat.name), feat);
    }

    /// Register an item under its catalog key.
    pub fn insert_item(&mut self, item: ItemData) {
        self.items.insert(normalize_key(&item.key), item);
    }

    pub fn insert_spell(&mut self, spell: SpellData) {
        self.spells.insert(normalize_key(&spell.name), spell);
    }

    pub fn insert_monster(&mut self, monster: MonsterData) {
        self.monsters.insert(normalize_key(&monster.name), monster);
    }

    pub fn feat(&self, name: &str) -> Result<&FeatData, RulesError> {
        self.feats
            .get(&normalize_key(name))
            .ok_or_else(|| RulesError::UnknownFeat(name.to_string()))
    }

    pub fn item(&self, key: &str) -> Result<&ItemData, RulesError> {
        self.items
            .get(&normalize_key(key))
            .ok_or_else(|| RulesError::UnknownItem(key.to_string()))
    }

    pub fn spell(&self, name: &str) -> Result<&SpellData, RulesError> {
        self.spells
            .get(&normalize_key(name))
            .ok_or_else(|| RulesError::UnknownSpell(name.to_string()))
    }

    pub fn monster(&self, name: &str) -> Result<&MonsterData, RulesError> {
        self.monsters
            .get(&normalize_key(name))
            .ok_or_else(|| RulesError::UnknownMonster(name.to_string()))
    }

    pub fn feats(&self) -> impl Iterator<Item = &FeatData> {
        self.feats.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemData> {
        self.items.values()
    }

    pub fn spells(&self) -> impl Iterator<Item = &SpellData> {
        self.spells.values()
    }

    /// Every monster, ordered by key.
    pub fn monsters(&self) -> Vec<&MonsterData> {
        self.monsters.values().collect()
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::srd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feats::Prerequisites;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Improved Initiative"), "improvedinitiative");
        assert_eq!(normalize_key("improved_initiative"), "improvedinitiative");
        assert_eq!(normalize_key("Half-Orc"), "halforc");
    }

    #[test]
    fn test_srd_lookups() {
        let book = RuleBook::srd();
        assert_eq!(book.feat("power attack").unwrap().name, "Power Attack");
        assert_eq!(book.item("Longsword").unwrap().name, "Longsword");
        assert!(book.spell("Magic Missile").is_ok());
        assert!(book.monster("goblin").is_ok());
    }

    #[test]
    fn test_unknown_keys_fail_fast() {
        let book = RuleBook::srd();
        assert_eq!(
            book.feat("Epic Awesomeness"),
            Err(RulesError::UnknownFeat("Epic Awesomeness".to_string()))
        );
        assert!(matches!(book.item("lightsaber"), Err(RulesError::UnknownItem(_))));
        assert!(matches!(book.spell("Wish Harder"), Err(RulesError::UnknownSpell(_))));
        assert!(matches!(book.monster("Tarrasque II"), Err(RulesError::UnknownMonster(_))));
    }

    #[test]
    fn test_insert_custom_feat() {
        let mut book = RuleBook::srd();
        book.insert_feat(FeatData::new("Shield Bash Mastery").with_prerequisites(
            Prerequisites {
                base_attack_bonus: Some(3),
                ..Default::default()
            },
        ));
        let feat = book.feat("shield bash mastery").unwrap();
        assert_eq!(feat.prerequisites.base_attack_bonus, Some(3));
    }
}
