//! Testing utilities.
//!
//! Sample builds that pass full validation, a seeded RNG helper, and
//! assertion helpers for validation reports. Used by the unit tests, the
//! `tests/` suites and the demos.

use crate::world::{
    Ability, AbilityMethod, AbilityScores, CharacterBuild, CharacterClass, ItemStack,
    PreparedSpell, RaceType, Skill, ValidationReport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic RNG for tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn prepared(class: CharacterClass, spell: &str, level: u32) -> PreparedSpell {
    PreparedSpell {
        class,
        spell: spell.to_string(),
        level,
    }
}

/// A 4th level human fighter with a 28-point buy.
pub fn sample_fighter() -> CharacterBuild {
    let mut build = CharacterBuild::new("Brakka", RaceType::Human);
    build.ability_method = AbilityMethod::PointBuy;
    build.base_abilities = AbilityScores::new(16, 14, 14, 10, 12, 8);
    build.add_class_levels(CharacterClass::Fighter, 4);
    build.ability_increases = vec![Ability::Strength];
    build.skill_ranks = [(Skill::Climb, 7), (Skill::Jump, 7), (Skill::Intimidate, 7)]
        .into_iter()
        .collect();
    build.feats = [
        "Power Attack",
        "Cleave",
        "Improved Initiative",
        "Dodge",
        "Toughness",
        "Alertness",
    ]
    .map(String::from)
    .to_vec();
    build.inventory = vec![
        ItemStack::equipped("breastplate"),
        ItemStack::equipped("heavy-steel-shield"),
        ItemStack::equipped("longsword"),
        ItemStack::carried("backpack", 1),
        ItemStack::carried("trail-rations", 3),
    ];
    build.hit_point_rolls = vec![7, 5, 9];
    build
}

/// A 3rd level elf wizard with a full set of prepared spells.
pub fn sample_wizard() -> CharacterBuild {
    use CharacterClass::Wizard;

    let mut build = CharacterBuild::new("Ilyra", RaceType::Elf);
    build.ability_method = AbilityMethod::PointBuy;
    build.base_abilities = AbilityScores::new(8, 14, 14, 16, 12, 10);
    build.add_class_levels(Wizard, 3);
    build.skill_ranks = [
        (Skill::Concentration, 6),
        (Skill::Spellcraft, 6),
        (Skill::KnowledgeArcana, 6),
        (Skill::KnowledgeHistory, 6),
        (Skill::DecipherScript, 6),
    ]
    .into_iter()
    .collect();
    build.feats = vec!["Improved Initiative".into(), "Combat Casting".into()];
    build.inventory = vec![
        ItemStack::equipped("quarterstaff"),
        ItemStack::carried("spellbook", 1),
        ItemStack::carried("spell-component-pouch", 1),
    ];
    build.prepared_spells = vec![
        prepared(Wizard, "Detect Magic", 0),
        prepared(Wizard, "Light", 0),
        prepared(Wizard, "Ray of Frost", 0),
        prepared(Wizard, "Magic Missile", 1),
        prepared(Wizard, "Shield", 1),
        prepared(Wizard, "Sleep", 1),
        prepared(Wizard, "Scorching Ray", 2),
        prepared(Wizard, "Mirror Image", 2),
    ];
    build
}

/// An 8th level human fighter 4 / wizard 4.
pub fn sample_fighter_wizard() -> CharacterBuild {
    use CharacterClass::{Fighter, Wizard};

    let mut build = CharacterBuild::new("Corin", RaceType::Human);
    build.ability_method = AbilityMethod::PointBuy;
    build.base_abilities = AbilityScores::new(14, 12, 14, 15, 10, 8);
    build.add_class_levels(Fighter, 4);
    build.add_class_levels(Wizard, 4);
    build.ability_increases = vec![Ability::Intelligence, Ability::Intelligence];
    build.skill_ranks = [(Skill::Climb, 4), (Skill::Spellcraft, 4), (Skill::Concentration, 5)]
        .into_iter()
        .collect();
    build.feats = [
        "Power Attack",
        "Cleave",
        "Improved Initiative",
        "Alertness",
        "Combat Casting",
        "Toughness",
    ]
    .map(String::from)
    .to_vec();
    build.inventory = vec![
        ItemStack::equipped("chain-shirt"),
        ItemStack::equipped("longsword"),
        ItemStack::carried("spellbook", 1),
    ];
    build.prepared_spells = vec![
        prepared(Wizard, "Magic Missile", 1),
        prepared(Wizard, "Shield", 1),
        prepared(Wizard, "Invisibility", 2),
    ];
    build
}

/// Panic with every violation if a report is not valid.
#[track_caller]
pub fn assert_valid(report: &ValidationReport) {
    assert!(
        report.valid,
        "expected a valid report, got violations: {:#?}",
        report.violations
    );
}

/// Panic unless some violation contains `needle`.
#[track_caller]
pub fn assert_violation(report: &ValidationReport, needle: &str) {
    assert!(!report.valid, "expected violations, report is valid");
    assert!(
        report.violations.iter().any(|v| v.contains(needle)),
        "no violation mentions {needle:?}: {:#?}",
        report.violations
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::validate_build;
    use crate::rulebook::RuleBook;

    #[test]
    fn test_samples_are_valid() {
        let book = RuleBook::srd();
        for build in [sample_fighter(), sample_wizard(), sample_fighter_wizard()] {
            assert_valid(&validate_build(&build, &book).unwrap());
        }
    }

    #[test]
    fn test_assert_violation() {
        let report = ValidationReport::from_violations(vec!["Spot is over cap".into()]);
        assert_violation(&report, "Spot");
    }

    #[test]
    #[should_panic(expected = "expected a valid report")]
    fn test_assert_valid_panics() {
        assert_valid(&ValidationReport::from_violations(vec!["bad".into()]));
    }
}
