//! Standard D&D 3.5 item catalog.
//!
//! Weapons, armor, shields, protective magic items and adventuring gear,
//! plus the equipment checks and the summary of worn gear that armor class,
//! saves and skills read from.

use crate::dice::{DiceError, DiceExpression};
use crate::rulebook::{RuleBook, RulesError};
use crate::world::{CharacterBuild, ValidationReport};
use serde::{Deserialize, Serialize};

// ============================================================================
// Item Types
// ============================================================================

/// Body slot an equipped item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Body,
    Shield,
    Hands,
    Ring,
    Neck,
    Shoulders,
}

impl EquipSlot {
    /// How many equipped items the slot holds.
    pub fn capacity(&self) -> usize {
        match self {
            EquipSlot::Ring | EquipSlot::Hands => 2,
            _ => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Body => "body",
            EquipSlot::Shield => "shield",
            EquipSlot::Hands => "hands",
            EquipSlot::Ring => "ring",
            EquipSlot::Neck => "neck",
            EquipSlot::Shoulders => "shoulders",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    Simple,
    Martial,
    Exotic,
}

/// Effort needed to wield a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Light,
    OneHanded,
    TwoHanded,
    Ranged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Damage for a Medium wielder, in dice notation.
    pub damage: String,
    pub critical: String,
    pub category: WeaponCategory,
    pub handedness: Handedness,
    pub range_increment: Option<u32>,
    /// Ranged weapons that need both hands (bows, crossbows).
    pub two_handed_ranged: bool,
}

impl WeaponStats {
    pub fn new(
        damage: &str,
        critical: &str,
        category: WeaponCategory,
        handedness: Handedness,
    ) -> Self {
        Self {
            damage: damage.to_string(),
            critical: critical.to_string(),
            category,
            handedness,
            range_increment: None,
            two_handed_ranged: false,
        }
    }

    pub fn with_range(mut self, feet: u32) -> Self {
        self.range_increment = Some(feet);
        self
    }

    /// A ranged weapon that needs both hands to use.
    pub fn launcher(damage: &str, critical: &str, category: WeaponCategory, range: u32) -> Self {
        let mut stats = Self::new(damage, critical, category, Handedness::Ranged).with_range(range);
        stats.two_handed_ranged = true;
        stats
    }

    pub fn needs_both_hands(&self) -> bool {
        self.handedness == Handedness::TwoHanded || self.two_handed_ranged
    }

    /// Parse the damage notation.
    pub fn damage_dice(&self) -> Result<DiceExpression, DiceError> {
        self.damage.parse()
    }

    /// Strength added to damage: one and a half times a bonus for two-handed
    /// melee weapons, only a penalty for ranged weapons.
    pub fn strength_damage(&self, strength_modifier: i32) -> i32 {
        match self.handedness {
            Handedness::TwoHanded if strength_modifier > 0 => strength_modifier * 3 / 2,
            Handedness::Ranged => strength_modifier.min(0),
            _ => strength_modifier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorCategory {
    Light,
    Medium,
    Heavy,
}

/// Armor and shield statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorStats {
    pub category: ArmorCategory,
    pub bonus: i32,
    pub max_dex_bonus: Option<i32>,
    /// Zero or negative.
    pub check_penalty: i32,
    /// Arcane spell failure, percent.
    pub spell_failure: u32,
}

impl ArmorStats {
    pub fn new(
        category: ArmorCategory,
        bonus: i32,
        max_dex_bonus: Option<i32>,
        check_penalty: i32,
        spell_failure: u32,
    ) -> Self {
        Self {
            category,
            bonus,
            max_dex_bonus,
            check_penalty,
            spell_failure,
        }
    }

    /// Medium and heavy armor slow the wearer.
    pub fn reduces_speed(&self) -> bool {
        self.category != ArmorCategory::Light
    }
}

/// Bonuses from rings, amulets and cloaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProtectiveStats {
    pub deflection: i32,
    pub natural_armor: i32,
    /// Resistance bonus on all saves.
    pub resistance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon(WeaponStats),
    Armor(ArmorStats),
    Shield(ArmorStats),
    Protective(ProtectiveStats),
    Gear,
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    /// Catalog key, such as `chain-shirt`.
    pub key: String,
    pub name: String,
    /// Pounds, for a Medium character.
    pub weight: f64,
    pub value_gp: f64,
    pub slot: Option<EquipSlot>,
    pub kind: ItemKind,
}

fn catalog_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

impl ItemData {
    fn new(name: &str, slot: Option<EquipSlot>, kind: ItemKind) -> Self {
        Self {
            key: catalog_key(name),
            name: name.to_string(),
            weight: 0.0,
            value_gp: 0.0,
            slot,
            kind,
        }
    }

    pub fn weapon(name: &str, stats: WeaponStats) -> Self {
        Self::new(name, Some(EquipSlot::Hands), ItemKind::Weapon(stats))
    }

    pub fn armor(name: &str, stats: ArmorStats) -> Self {
        Self::new(name, Some(EquipSlot::Body), ItemKind::Armor(stats))
    }

    pub fn shield(name: &str, stats: ArmorStats) -> Self {
        Self::new(name, Some(EquipSlot::Shield), ItemKind::Shield(stats))
    }

    pub fn protective(name: &str, slot: EquipSlot, stats: ProtectiveStats) -> Self {
        Self::new(name, Some(slot), ItemKind::Protective(stats))
    }

    pub fn gear(name: &str) -> Self {
        Self::new(name, None, ItemKind::Gear)
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_value(mut self, value_gp: f64) -> Self {
        self.value_gp = value_gp;
        self
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }
}

// ============================================================================
// Equipment
// ============================================================================

/// What a build's equipped items contribute to its statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentSummary {
    pub armor_bonus: i32,
    pub shield_bonus: i32,
    /// Lowest max Dex bonus among worn armor and shield.
    pub max_dex_bonus: Option<i32>,
    /// Worst armor check penalty from armor plus shield.
    pub check_penalty: i32,
    pub spell_failure: u32,
    pub deflection: i32,
    pub natural_armor: i32,
    pub resistance: i32,
    pub armor_reduces_speed: bool,
}

pub(crate) fn min_option(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Summarize equipped armor, shields and protective items.
///
/// Bonuses of the same type do not stack; the highest applies.
pub fn equipment_summary(
    build: &CharacterBuild,
    book: &RuleBook,
) -> Result<EquipmentSummary, RulesError> {
    let mut summary = EquipmentSummary::default();
    for stack in build.equipped_items() {
        match &book.item(&stack.item)?.kind {
            ItemKind::Armor(armor) => {
                summary.armor_bonus = summary.armor_bonus.max(armor.bonus);
                summary.max_dex_bonus = min_option(summary.max_dex_bonus, armor.max_dex_bonus);
                summary.check_penalty += armor.check_penalty;
                summary.spell_failure += armor.spell_failure;
                summary.armor_reduces_speed |= armor.reduces_speed();
            }
            ItemKind::Shield(shield) => {
                summary.shield_bonus = summary.shield_bonus.max(shield.bonus);
                summary.max_dex_bonus = min_option(summary.max_dex_bonus, shield.max_dex_bonus);
                summary.check_penalty += shield.check_penalty;
                summary.spell_failure += shield.spell_failure;
            }
            ItemKind::Protective(stats) => {
                summary.deflection = summary.deflection.max(stats.deflection);
                summary.natural_armor = summary.natural_armor.max(stats.natural_armor);
                summary.resistance = summary.resistance.max(stats.resistance);
            }
            ItemKind::Weapon(_) | ItemKind::Gear => {}
        }
    }
    summary.spell_failure = summary.spell_failure.min(100);
    Ok(summary)
}

/// Damage line for one equipped weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponAttack {
    pub name: String,
    /// Medium damage dice with Strength folded into the modifier.
    pub damage: DiceExpression,
    pub critical: String,
}

/// Damage for every equipped weapon, in inventory order.
///
/// Catalog entries whose damage notation does not parse fail fast.
pub fn weapon_attacks(
    build: &CharacterBuild,
    book: &RuleBook,
    strength_modifier: i32,
) -> Result<Vec<WeaponAttack>, RulesError> {
    let mut attacks = Vec::new();
    for stack in build.equipped_items() {
        let item = book.item(&stack.item)?;
        let ItemKind::Weapon(weapon) = &item.kind else {
            continue;
        };
        let dice = parse_damage(&item.name, weapon)?;
        let modifier = dice.modifier + weapon.strength_damage(strength_modifier);
        attacks.push(WeaponAttack {
            name: item.name.clone(),
            damage: dice.with_modifier(modifier),
            critical: weapon.critical.clone(),
        });
    }
    Ok(attacks)
}

fn parse_damage(name: &str, weapon: &WeaponStats) -> Result<DiceExpression, RulesError> {
    weapon.damage_dice().map_err(|source| {
        tracing::warn!(item = name, damage = %weapon.damage, "weapon damage does not parse");
        RulesError::InvalidDamage {
            item: name.to_string(),
            source,
        }
    })
}

/// Total weight of everything carried, in pounds.
pub fn carried_weight(build: &CharacterBuild, book: &RuleBook) -> Result<f64, RulesError> {
    build
        .inventory
        .iter()
        .try_fold(0.0_f64, |total, stack| -> Result<f64, RulesError> {
            Ok(total + book.item(&stack.item)?.weight * f64::from(stack.quantity))
        })
}

/// Check equipped items against slot limits and hand use.
pub fn validate_equipment(
    build: &CharacterBuild,
    book: &RuleBook,
) -> Result<ValidationReport, RulesError> {
    let mut report = ValidationReport::ok();
    let mut used: Vec<(EquipSlot, usize)> = Vec::new();
    let mut hands = 0;

    for stack in build.equipped_items() {
        let item = book.item(&stack.item)?;
        let Some(slot) = item.slot else {
            report.push(format!("{} cannot be equipped", item.name));
            continue;
        };
        if stack.quantity != 1 {
            report.push(format!("Only one {} can be equipped per entry", item.name));
        }
        match used.iter_mut().find(|(s, _)| *s == slot) {
            Some((_, count)) => *count += 1,
            None => used.push((slot, 1)),
        }
        if let ItemKind::Weapon(weapon) = &item.kind {
            parse_damage(&item.name, weapon)?;
        }
        hands += match &item.kind {
            ItemKind::Weapon(weapon) if weapon.needs_both_hands() => 2,
            ItemKind::Weapon(_) => 1,
            ItemKind::Shield(_) => 1,
            _ => 0,
        };
    }

    for (slot, count) in &used {
        if *count > slot.capacity() {
            report.push(format!(
                "{count} items equipped in the {} slot (limit {})",
                slot.name(),
                slot.capacity()
            ));
        }
    }

    if hands > 2 {
        report.push(format!("Equipped weapons and shield need {hands} hands"));
    }

    tracing::trace!(hands, valid = report.valid, "equipment validated");
    Ok(report)
}

// ============================================================================
// Catalog
// ============================================================================

lazy_static::lazy_static! {
    /// Standard D&D 3.5 items.
    pub static ref SRD_ITEMS: Vec<ItemData> = {
        use ArmorCategory::{Heavy, Light, Medium};
        use Handedness::{Light as LightWeapon, OneHanded, TwoHanded};
        use WeaponCategory::{Exotic, Martial, Simple};

        vec![
            // Simple weapons
            ItemData::weapon(
                "Dagger",
                WeaponStats::new("1d4", "19-20/x2", Simple, LightWeapon).with_range(10),
            )
                .with_weight(1.0)
                .with_value(2.0),
            ItemData::weapon(
                "Club",
                WeaponStats::new("1d6", "x2", Simple, OneHanded).with_range(10),
            )
                .with_weight(3.0),
            ItemData::weapon("Heavy Mace", WeaponStats::new("1d8", "x2", Simple, OneHanded))
                .with_weight(8.0)
                .with_value(12.0),
            ItemData::weapon("Morningstar", WeaponStats::new("1d8", "x2", Simple, OneHanded))
                .with_weight(6.0)
                .with_value(8.0),
            ItemData::weapon("Quarterstaff", WeaponStats::new("1d6", "x2", Simple, TwoHanded))
                .with_weight(4.0),
            ItemData::weapon(
                "Spear",
                WeaponStats::new("1d8", "x3", Simple, TwoHanded).with_range(20),
            )
                .with_weight(6.0)
                .with_value(2.0),
            ItemData::weapon("Light Crossbow", WeaponStats::launcher("1d8", "19-20/x2", Simple, 80))
                .with_weight(4.0)
                .with_value(35.0),
            ItemData::weapon(
                "Heavy Crossbow",
                WeaponStats::launcher("1d10", "19-20/x2", Simple, 120),
            )
                .with_weight(8.0)
                .with_value(50.0),
            ItemData::weapon(
                "Sling",
                WeaponStats::new("1d4", "x2", Simple, Handedness::Ranged).with_range(50),
            ),
            // Martial weapons
            ItemData::weapon("Handaxe", WeaponStats::new("1d6", "x3", Martial, LightWeapon))
                .with_weight(3.0)
                .with_value(6.0),
            ItemData::weapon(
                "Short Sword",
                WeaponStats::new("1d6", "19-20/x2", Martial, LightWeapon),
            )
                .with_weight(2.0)
                .with_value(10.0),
            ItemData::weapon("Longsword", WeaponStats::new("1d8", "19-20/x2", Martial, OneHanded))
                .with_weight(4.0)
                .with_value(15.0),
            ItemData::weapon("Rapier", WeaponStats::new("1d6", "18-20/x2", Martial, OneHanded))
                .with_weight(2.0)
                .with_value(20.0),
            ItemData::weapon("Scimitar", WeaponStats::new("1d6", "18-20/x2", Martial, OneHanded))
                .with_weight(4.0)
                .with_value(15.0),
            ItemData::weapon("Battleaxe", WeaponStats::new("1d8", "x3", Martial, OneHanded))
                .with_weight(6.0)
                .with_value(10.0),
            ItemData::weapon("Warhammer", WeaponStats::new("1d8", "x3", Martial, OneHanded))
                .with_weight(5.0)
                .with_value(12.0),
            ItemData::weapon("Greatsword", WeaponStats::new("2d6", "19-20/x2", Martial, TwoHanded))
                .with_weight(8.0)
                .with_value(50.0),
            ItemData::weapon("Greataxe", WeaponStats::new("1d12", "x3", Martial, TwoHanded))
                .with_weight(12.0)
                .with_value(20.0),
            ItemData::weapon("Shortbow", WeaponStats::launcher("1d6", "x3", Martial, 60))
                .with_weight(2.0)
                .with_value(30.0),
            ItemData::weapon("Longbow", WeaponStats::launcher("1d8", "x3", Martial, 100))
                .with_weight(3.0)
                .with_value(75.0),
            // Exotic weapons
            ItemData::weapon(
                "Bastard Sword",
                WeaponStats::new("1d10", "19-20/x2", Exotic, OneHanded),
            )
                .with_weight(6.0)
                .with_value(35.0),
            ItemData::weapon("Dwarven Waraxe", WeaponStats::new("1d10", "x3", Exotic, OneHanded))
                .with_weight(8.0)
                .with_value(30.0),

            // Armor
            ItemData::armor("Padded", ArmorStats::new(Light, 1, Some(8), 0, 5))
                .with_weight(10.0)
                .with_value(5.0),
            ItemData::armor("Leather", ArmorStats::new(Light, 2, Some(6), 0, 10))
                .with_weight(15.0)
                .with_value(10.0),
            ItemData::armor("Studded Leather", ArmorStats::new(Light, 3, Some(5), -1, 15))
                .with_weight(20.0)
                .with_value(25.0),
            ItemData::armor("Chain Shirt", ArmorStats::new(Light, 4, Some(4), -2, 20))
                .with_weight(25.0)
                .with_value(100.0),
            ItemData::armor("Hide", ArmorStats::new(Medium, 3, Some(4), -3, 20))
                .with_weight(25.0)
                .with_value(15.0),
            ItemData::armor("Scale Mail", ArmorStats::new(Medium, 4, Some(3), -4, 25))
                .with_weight(30.0)
                .with_value(50.0),
            ItemData::armor("Chainmail", ArmorStats::new(Medium, 5, Some(2), -5, 30))
                .with_weight(40.0)
                .with_value(150.0),
            ItemData::armor("Breastplate", ArmorStats::new(Medium, 5, Some(3), -4, 25))
                .with_weight(30.0)
                .with_value(200.0),
            ItemData::armor("Splint Mail", ArmorStats::new(Heavy, 6, Some(0), -7, 40))
                .with_weight(45.0)
                .with_value(200.0),
            ItemData::armor("Banded Mail", ArmorStats::new(Heavy, 6, Some(1), -6, 35))
                .with_weight(35.0)
                .with_value(250.0),
            ItemData::armor("Half-Plate", ArmorStats::new(Heavy, 7, Some(0), -7, 40))
                .with_weight(50.0)
                .with_value(600.0),
            ItemData::armor("Full Plate", ArmorStats::new(Heavy, 8, Some(1), -6, 35))
                .with_weight(50.0)
                .with_value(1500.0),

            // Shields
            ItemData::shield("Buckler", ArmorStats::new(Light, 1, None, -1, 5))
                .with_weight(5.0)
                .with_value(15.0),
            ItemData::shield("Light Wooden Shield", ArmorStats::new(Light, 1, None, -1, 5))
                .with_weight(5.0)
                .with_value(3.0),
            ItemData::shield("Light Steel Shield", ArmorStats::new(Light, 1, None, -1, 5))
                .with_weight(6.0)
                .with_value(9.0),
            ItemData::shield("Heavy Wooden Shield", ArmorStats::new(Medium, 2, None, -2, 15))
                .with_weight(10.0)
                .with_value(7.0),
            ItemData::shield("Heavy Steel Shield", ArmorStats::new(Medium, 2, None, -2, 15))
                .with_weight(15.0)
                .with_value(20.0),
            ItemData::shield("Tower Shield", ArmorStats::new(Heavy, 4, Some(2), -10, 50))
                .with_weight(45.0)
                .with_value(30.0),

            // Protective items
            ItemData::protective(
                "Ring of Protection +1",
                EquipSlot::Ring,
                ProtectiveStats {
                    deflection: 1,
                    ..Default::default()
                },
            )
                .with_value(2000.0),
            ItemData::protective(
                "Ring of Protection +2",
                EquipSlot::Ring,
                ProtectiveStats {
                    deflection: 2,
                    ..Default::default()
                },
            )
                .with_value(8000.0),
            ItemData::protective(
                "Amulet of Natural Armor +1",
                EquipSlot::Neck,
                ProtectiveStats {
                    natural_armor: 1,
                    ..Default::default()
                },
            )
                .with_value(2000.0),
            ItemData::protective(
                "Cloak of Resistance +1",
                EquipSlot::Shoulders,
                ProtectiveStats {
                    resistance: 1,
                    ..Default::default()
                },
            )
                .with_weight(1.0)
                .with_value(1000.0),
            ItemData::protective(
                "Cloak of Resistance +2",
                EquipSlot::Shoulders,
                ProtectiveStats {
                    resistance: 2,
                    ..Default::default()
                },
            )
                .with_weight(1.0)
                .with_value(4000.0),

            // Adventuring gear
            ItemData::gear("Backpack").with_weight(2.0).with_value(2.0),
            ItemData::gear("Bedroll").with_weight(5.0).with_value(0.1),
            ItemData::gear("Hemp Rope (50 ft.)")
                .with_key("hemp-rope")
                .with_weight(10.0)
                .with_value(1.0),
            ItemData::gear("Silk Rope (50 ft.)")
                .with_key("silk-rope")
                .with_weight(5.0)
                .with_value(10.0),
            ItemData::gear("Torch").with_weight(1.0).with_value(0.01),
            ItemData::gear("Trail Rations (1 day)")
                .with_key("trail-rations")
                .with_weight(1.0)
                .with_value(0.5),
            ItemData::gear("Waterskin").with_weight(4.0).with_value(1.0),
            ItemData::gear("Flint and Steel").with_value(1.0),
            ItemData::gear("Thieves' Tools").with_weight(1.0).with_value(30.0),
            ItemData::gear("Spell Component Pouch").with_weight(2.0).with_value(5.0),
            ItemData::gear("Spellbook").with_weight(3.0).with_value(15.0),
            ItemData::gear("Wooden Holy Symbol").with_value(1.0),
            ItemData::gear("Silver Holy Symbol").with_weight(1.0).with_value(25.0),
            ItemData::gear("Arrows (20)").with_key("arrows").with_weight(3.0).with_value(1.0),
            ItemData::gear("Crossbow Bolts (10)")
                .with_key("crossbow-bolts")
                .with_weight(1.0)
                .with_value(1.0),
            ItemData::gear("Sling Bullets (10)")
                .with_key("sling-bullets")
                .with_weight(5.0)
                .with_value(0.1),
            ItemData::gear("Hooded Lantern").with_weight(2.0).with_value(7.0),
            ItemData::gear("Flask of Oil").with_weight(1.0).with_value(0.1),
            ItemData::gear("Healer's Kit").with_weight(1.0).with_value(50.0),
            ItemData::gear("Grappling Hook").with_weight(4.0).with_value(1.0),
            ItemData::gear("Crowbar").with_weight(5.0).with_value(2.0),
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ItemStack, RaceType};

    #[test]
    fn test_catalog_keys() {
        assert_eq!(catalog_key("Chain Shirt"), "chain-shirt");
        assert_eq!(catalog_key("Thieves' Tools"), "thieves-tools");
        assert_eq!(catalog_key("Half-Plate"), "half-plate");
        let book = RuleBook::srd();
        assert_eq!(book.item("chain-shirt").unwrap().name, "Chain Shirt");
        assert_eq!(book.item("Chain Shirt").unwrap().key, "chain-shirt");
        assert_eq!(book.item("hemp-rope").unwrap().weight, 10.0);
    }

    #[test]
    fn test_equipment_summary() {
        let book = RuleBook::srd();
        let mut build = CharacterBuild::new("Tank", RaceType::Human);
        build.inventory = vec![
            ItemStack::equipped("full-plate"),
            ItemStack::equipped("heavy-steel-shield"),
            ItemStack::equipped("ring-of-protection-1"),
            ItemStack::equipped("cloak-of-resistance-1"),
            ItemStack::carried("longsword", 1),
        ];
        let summary = equipment_summary(&build, &book).unwrap();
        assert_eq!(summary.armor_bonus, 8);
        assert_eq!(summary.shield_bonus, 2);
        assert_eq!(summary.max_dex_bonus, Some(1));
        assert_eq!(summary.check_penalty, -8);
        assert_eq!(summary.spell_failure, 50);
        assert_eq!(summary.deflection, 1);
        assert_eq!(summary.resistance, 1);
        assert!(summary.armor_reduces_speed);
    }

    #[test]
    fn test_carried_weight_counts_quantity() {
        let book = RuleBook::srd();
        let mut build = CharacterBuild::new("Mule", RaceType::Human);
        build.inventory = vec![
            ItemStack::carried("torch", 5),
            ItemStack::equipped("chain-shirt"),
        ];
        assert_eq!(carried_weight(&build, &book).unwrap(), 30.0);
    }

    #[test]
    fn test_two_handed_weapon_with_shield() {
        let book = RuleBook::srd();
        let mut build = CharacterBuild::new("Oops", RaceType::Human);
        build.inventory = vec![
            ItemStack::equipped("greatsword"),
            ItemStack::equipped("heavy-wooden-shield"),
        ];
        let report = validate_equipment(&build, &book).unwrap();
        assert!(!report.valid);
        assert!(report.violations[0].contains("3 hands"));
    }

    #[test]
    fn test_two_suits_of_armor() {
        let book = RuleBook::srd();
        let mut build = CharacterBuild::new("Oops", RaceType::Human);
        build.inventory = vec![ItemStack::equipped("leather"), ItemStack::equipped("chainmail")];
        let report = validate_equipment(&build, &book).unwrap();
        assert!(report.violations.iter().any(|v| v.contains("body")));
    }

    #[test]
    fn test_unknown_item_fails_fast() {
        let book = RuleBook::srd();
        let mut build = CharacterBuild::new("Oops", RaceType::Human);
        build.inventory = vec![ItemStack::equipped("vorpal-spoon")];
        assert_eq!(
            validate_equipment(&build, &book),
            Err(RulesError::UnknownItem("vorpal-spoon".to_string()))
        );
    }

    #[test]
    fn test_every_catalog_weapon_parses() {
        for item in SRD_ITEMS.iter() {
            if let ItemKind::Weapon(weapon) = &item.kind {
                let dice = weapon.damage_dice().unwrap();
                assert_eq!(dice.to_string(), weapon.damage, "{}", item.name);
            }
        }
    }

    #[test]
    fn test_weapon_attacks_add_strength() {
        let book = RuleBook::srd();
        let mut build = CharacterBuild::new("Brakka", RaceType::Human);
        build.inventory = vec![
            ItemStack::equipped("longsword"),
            ItemStack::equipped("greatsword"),
            ItemStack::equipped("light-crossbow"),
            ItemStack::carried("dagger", 1),
        ];
        let attacks = weapon_attacks(&build, &book, 3).unwrap();
        let lines: Vec<String> = attacks.iter().map(|a| a.damage.to_string()).collect();
        assert_eq!(lines, vec!["1d8+3", "2d6+4", "1d8"]);
        assert_eq!(attacks[0].critical, "19-20/x2");

        let weak = weapon_attacks(&build, &book, -1).unwrap();
        assert_eq!(weak[1].damage.to_string(), "2d6-1");
        assert_eq!(weak[2].damage.to_string(), "1d8-1");
    }

    #[test]
    fn test_bad_damage_notation_fails_fast() {
        let mut book = RuleBook::srd();
        book.insert_item(ItemData::weapon(
            "Glass Sword",
            WeaponStats::new("1d7", "x2", WeaponCategory::Exotic, Handedness::OneHanded),
        ));
        let mut build = CharacterBuild::new("Oops", RaceType::Human);
        build.inventory = vec![ItemStack::equipped("glass-sword")];

        let expected = RulesError::InvalidDamage {
            item: "Glass Sword".into(),
            source: DiceError::InvalidDieSize(7),
        };
        assert_eq!(validate_equipment(&build, &book).unwrap_err(), expected);
        assert_eq!(weapon_attacks(&build, &book, 0).unwrap_err(), expected);
    }
}
