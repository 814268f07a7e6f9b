//! Character sheet assembly.
//!
//! [`derive_stats`] recomputes every derived number from a
//! [`CharacterBuild`] and the [`RuleBook`]. Nothing here is cached; calling
//! it twice on the same build gives identical results.

use crate::abilities::{
    ability_increases_earned, range_violations, validate_point_buy, ABILITY_SCORE_DOMAIN,
};
use crate::combat::{
    armor_class, attack_bonuses, flat_footed_armor_class, hit_points, initiative, saving_throws,
    touch_armor_class, ArmorClassInput, AttackBonuses, HitDieLevel, SavingThrows,
};
use crate::encumbrance::{effective_speed, Encumbrance};
use crate::feats::{feat_bonuses, validate_feats};
use crate::items::{
    carried_weight, equipment_summary, min_option, validate_equipment, weapon_attacks,
    EquipmentSummary, WeaponAttack,
};
use crate::progression::{
    feat_slots, multiclass_xp_penalty, total_skill_points, FeatSlots, MAX_LEVEL_DOMAIN,
};
use crate::rulebook::{RuleBook, RulesError};
use crate::skills::{
    points_spent, skill_breakdowns, validate_skills, SkillBreakdown, SkillModifiers,
};
use crate::spells::{build_spell_slots, validate_spells, SpellSlots};
use crate::world::{
    Ability, AbilityMethod, AbilityModifiers, AbilityScores, CharacterBuild, CharacterClass, Size,
    Skill, ValidationReport,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Armor class against normal, touch and flat-footed attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorClasses {
    pub total: i32,
    pub touch: i32,
    pub flat_footed: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPoints {
    pub available: i32,
    pub spent: u32,
}

/// Every number on a character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub character_level: u32,
    pub size: Size,
    pub abilities: AbilityScores,
    pub modifiers: AbilityModifiers,
    pub hit_points: i32,
    pub armor_class: ArmorClasses,
    pub attacks: AttackBonuses,
    /// Damage for each equipped weapon.
    pub weapons: Vec<WeaponAttack>,
    pub initiative: i32,
    pub saves: SavingThrows,
    pub skills: BTreeMap<Skill, SkillBreakdown>,
    pub skill_points: SkillPoints,
    pub feat_slots: FeatSlots,
    /// Speed in feet after armor and load.
    pub speed: u32,
    pub encumbrance: Encumbrance,
    pub equipment: EquipmentSummary,
    pub spell_slots: BTreeMap<CharacterClass, SpellSlots>,
    /// Multiclass experience penalty in percent.
    pub xp_penalty: u32,
}

/// Reject builds no calculation can make sense of.
fn check_structure(build: &CharacterBuild) -> Result<AbilityScores, RulesError> {
    if build.classes.is_empty() {
        return Err(RulesError::NoClassLevels);
    }
    if let Some(empty) = build.classes.iter().find(|c| c.level == 0) {
        return Err(RulesError::ZeroClassLevel(empty.class.name().to_string()));
    }
    // Checked before anything sums levels or expands them per level
    if let Some(huge) = build.classes.iter().find(|c| c.level > MAX_LEVEL_DOMAIN) {
        return Err(RulesError::ClassLevelOutOfDomain {
            class: huge.class.name().to_string(),
            level: huge.level,
        });
    }
    let level = build.character_level();
    if level > MAX_LEVEL_DOMAIN {
        return Err(RulesError::CharacterLevelOutOfDomain(level));
    }

    let scores = build.final_abilities();
    for ability in Ability::all() {
        let score = scores.get(ability);
        if !ABILITY_SCORE_DOMAIN.contains(&score) {
            return Err(RulesError::AbilityOutOfDomain {
                ability: ability.name().to_string(),
                score,
            });
        }
    }
    Ok(scores)
}

/// Recompute every derived statistic for a build.
pub fn derive_stats(build: &CharacterBuild, book: &RuleBook) -> Result<DerivedStats, RulesError> {
    let abilities = check_structure(build)?;
    let modifiers = abilities.modifiers();
    let race = build.race.data();

    let equipment = equipment_summary(build, book)?;
    let feats = feat_bonuses(build, book)?;
    let encumbrance = Encumbrance::new(
        carried_weight(build, book)?,
        abilities.get(Ability::Strength),
        race.size,
    );

    // Armor and load penalties do not stack; the worse one applies
    let max_dex_bonus = min_option(equipment.max_dex_bonus, encumbrance.penalties.max_dex_bonus);
    let check_penalty = equipment.check_penalty.min(encumbrance.penalties.check_penalty);

    let ac_input = ArmorClassInput {
        armor_bonus: equipment.armor_bonus,
        shield_bonus: equipment.shield_bonus,
        dex_modifier: modifiers.dexterity,
        max_dex_bonus,
        size_modifier: race.size.ac_modifier(),
        deflection: equipment.deflection,
        dodge: feats.dodge_ac,
        natural: equipment.natural_armor,
        other: build.misc.armor_class,
        ..Default::default()
    };

    let hit_dice: Vec<HitDieLevel> = build
        .level_sequence()
        .into_iter()
        .enumerate()
        .map(|(index, class)| HitDieLevel {
            die: class.data().hit_die,
            con_modifier: modifiers.constitution,
            roll: index
                .checked_sub(1)
                .and_then(|i| build.hit_point_rolls.get(i).copied()),
        })
        .collect();

    let save_misc = SavingThrows {
        fortitude: race.save_bonus
            + feats.saves.fortitude
            + equipment.resistance
            + build.misc.fortitude,
        reflex: race.save_bonus + feats.saves.reflex + equipment.resistance + build.misc.reflex,
        will: race.save_bonus + feats.saves.will + equipment.resistance + build.misc.will,
    };

    let skill_modifiers = SkillModifiers {
        racial: race.skill_bonuses.iter().copied().collect(),
        feats: feats.skills.clone(),
        armor_check_penalty: check_penalty,
        size: race.size,
    };

    let stats = DerivedStats {
        character_level: build.character_level(),
        size: race.size,
        abilities,
        modifiers,
        hit_points: hit_points(&hit_dice, book.config.hit_point_policy)
            + feats.hit_points
            + build.misc.hit_points,
        armor_class: ArmorClasses {
            total: armor_class(&ac_input),
            touch: touch_armor_class(&ac_input),
            flat_footed: flat_footed_armor_class(&ac_input),
        },
        attacks: attack_bonuses(&build.classes, &modifiers, race.size),
        weapons: weapon_attacks(build, book, modifiers.strength)?,
        initiative: initiative(&modifiers, feats.initiative + build.misc.initiative),
        saves: saving_throws(&build.classes, &modifiers, save_misc),
        skills: skill_breakdowns(build, &modifiers, &skill_modifiers),
        skill_points: SkillPoints {
            available: total_skill_points(build),
            spent: points_spent(build),
        },
        feat_slots: feat_slots(build),
        speed: effective_speed(
            race.base_speed,
            encumbrance.load,
            equipment.armor_reduces_speed,
            race.speed_unaffected_by_load,
        ),
        encumbrance,
        equipment,
        spell_slots: build_spell_slots(build),
        xp_penalty: multiclass_xp_penalty(build),
    };

    tracing::debug!(
        character = %build.name,
        level = stats.character_level,
        hit_points = stats.hit_points,
        armor_class = stats.armor_class.total,
        "derived stats computed"
    );
    Ok(stats)
}

/// Run every user-facing check on a build and collect the violations.
///
/// Structural problems (no classes, unknown keys, impossible scores) are
/// errors rather than violations.
pub fn validate_build(
    build: &CharacterBuild,
    book: &RuleBook,
) -> Result<ValidationReport, RulesError> {
    let scores = check_structure(build)?;
    let config = &book.config;
    let mut report = ValidationReport::ok();

    report.merge(ValidationReport::from_violations(range_violations(
        &scores,
        *config.ability_range.start(),
        *config.ability_range.end(),
    )));

    if build.ability_method == AbilityMethod::PointBuy {
        let point_buy = validate_point_buy(
            &build.base_abilities,
            config.point_buy_budget,
            &config.point_buy_table,
        );
        report.merge(ValidationReport::from_violations(point_buy.violations));
    }

    let level = build.character_level();
    if level > config.max_character_level {
        report.push(format!(
            "Character level {level} exceeds the maximum of {}",
            config.max_character_level
        ));
    }

    let earned = ability_increases_earned(level) as usize;
    if build.ability_increases.len() > earned {
        report.push(format!(
            "{} ability increases taken but only {earned} earned",
            build.ability_increases.len()
        ));
    }

    report.merge(validate_skills(build));
    report.merge(validate_feats(build, book)?);
    report.merge(validate_equipment(build, book)?);
    report.merge(validate_spells(build, book)?);

    tracing::debug!(
        character = %build.name,
        valid = report.valid,
        violations = report.violations.len(),
        "build validated"
    );
    Ok(report)
}
