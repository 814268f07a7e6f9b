//! QA tests for build validation.
//!
//! Each test breaks one rule on an otherwise legal character and checks
//! that the report names it. Malformed input that no player could produce
//! must fail fast with an error instead.
//! Run with: `cargo test -p dnd35-core --test qa_validation`

use dnd35_core::testing::{
    assert_valid, assert_violation, sample_fighter, sample_fighter_wizard, sample_wizard,
};
use dnd35_core::world::{AbilityMethod, AbilityScores, ItemStack, PreparedSpell, Skill};
use dnd35_core::{
    validate_build, CharacterBuild, CharacterBuilder, CharacterClass, RaceType, RuleBook,
    RulesConfig, RulesError,
};

fn setup() {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn first_level_fighter(feats: &[&str]) -> CharacterBuild {
    let mut builder = CharacterBuilder::new()
        .name("Brakka")
        .race(RaceType::Human)
        .class(CharacterClass::Fighter, 1)
        .point_buy(AbilityScores::new(16, 12, 14, 10, 12, 10));
    for feat in feats {
        builder = builder.feat(*feat);
    }
    builder.build().expect("fighter builds")
}

// =============================================================================
// TEST 1: Legal builds pass
// =============================================================================

#[test]
fn test_samples_pass_validation() {
    setup();
    let book = RuleBook::srd();
    for build in [sample_fighter(), sample_wizard(), sample_fighter_wizard()] {
        assert_valid(&validate_build(&build, &book).unwrap());
    }
}

// =============================================================================
// TEST 2: Feats
// =============================================================================

#[test]
fn test_cleave_needs_power_attack() {
    let book = RuleBook::srd();
    let report = validate_build(&first_level_fighter(&["Cleave"]), &book).unwrap();
    assert_violation(&report, "Cleave requires: Power Attack");
}

#[test]
fn test_dodge_needs_dexterity() {
    let book = RuleBook::srd();
    let report = validate_build(&first_level_fighter(&["Dodge"]), &book).unwrap();
    assert_violation(&report, "Dodge requires: Dexterity 13 (have 12)");
}

#[test]
fn test_more_feats_than_slots() {
    let book = RuleBook::srd();
    // Human fighter 1: one general, one racial, one fighter bonus slot
    let legal = first_level_fighter(&["Power Attack", "Cleave", "Improved Initiative"]);
    assert_valid(&validate_build(&legal, &book).unwrap());

    let greedy = first_level_fighter(&[
        "Power Attack",
        "Cleave",
        "Improved Initiative",
        "Toughness",
    ]);
    let report = validate_build(&greedy, &book).unwrap();
    assert_violation(&report, "No feat slot available for Toughness");
}

#[test]
fn test_duplicate_feat() {
    let book = RuleBook::srd();
    let doubled = first_level_fighter(&["Power Attack", "Power Attack"]);
    let report = validate_build(&doubled, &book).unwrap();
    assert_violation(&report, "Power Attack is taken more than once");
}

#[test]
fn test_unknown_feat_is_an_error() {
    let book = RuleBook::srd();
    let result = validate_build(&first_level_fighter(&["Vorpal Sneeze"]), &book);
    assert_eq!(result, Err(RulesError::UnknownFeat("Vorpal Sneeze".into())));
}

// =============================================================================
// TEST 3: Skills
// =============================================================================

#[test]
fn test_class_skill_over_cap() {
    let book = RuleBook::srd();
    let mut build = sample_fighter();
    build.skill_ranks.insert(Skill::Climb, 8);
    let report = validate_build(&build, &book).unwrap();
    assert_violation(&report, "8 ranks in Climb exceeds the maximum of 7 at level 4");
    assert_violation(&report, "Spent 22 skill points but only 21 are available");
}

#[test]
fn test_cross_class_skill_over_cap() {
    let book = RuleBook::srd();
    let mut build = sample_wizard();
    build.skill_ranks.insert(Skill::Climb, 4);
    let report = validate_build(&build, &book).unwrap();
    assert_violation(&report, "4 ranks in Climb exceeds the maximum of 3");
}

// =============================================================================
// TEST 4: Equipment
// =============================================================================

#[test]
fn test_greatsword_and_shield() {
    let book = RuleBook::srd();
    let mut build = sample_fighter();
    build.inventory.retain(|stack| stack.item != "longsword");
    build.inventory.push(ItemStack::equipped("greatsword"));
    let report = validate_build(&build, &book).unwrap();
    assert_violation(&report, "need 3 hands");
}

// =============================================================================
// TEST 5: Spells
// =============================================================================

#[test]
fn test_too_many_prepared_spells() {
    let book = RuleBook::srd();
    let mut build = sample_wizard();
    build.prepared_spells.push(PreparedSpell {
        class: CharacterClass::Wizard,
        spell: "Invisibility".into(),
        level: 2,
    });
    let report = validate_build(&build, &book).unwrap();
    assert_violation(&report, "3 level 2 Wizard spells exceed the 2 available");
}

#[test]
fn test_spell_at_wrong_level_or_off_list() {
    let book = RuleBook::srd();
    let mut build = sample_wizard();
    build.prepared_spells.push(PreparedSpell {
        class: CharacterClass::Wizard,
        spell: "Magic Missile".into(),
        level: 2,
    });
    build.prepared_spells.push(PreparedSpell {
        class: CharacterClass::Wizard,
        spell: "Cure Light Wounds".into(),
        level: 1,
    });
    let report = validate_build(&build, &book).unwrap();
    assert_violation(&report, "Magic Missile is a level 1 Wizard spell, not level 2");
    assert_violation(&report, "Cure Light Wounds is not on the Wizard spell list");
}

#[test]
fn test_low_intelligence_wizard() {
    let book = RuleBook::srd();
    let mut build = CharacterBuild::new("Dim", RaceType::Human);
    build.ability_method = AbilityMethod::Rolled;
    build.base_abilities = AbilityScores::new(10, 12, 12, 11, 10, 10);
    build.add_class_levels(CharacterClass::Wizard, 3);
    build.prepared_spells.push(PreparedSpell {
        class: CharacterClass::Wizard,
        spell: "Mirror Image".into(),
        level: 2,
    });
    let report = validate_build(&build, &book).unwrap();
    assert_violation(&report, "Intelligence 11 is too low to cast level 2 spells");
    assert_violation(&report, "1 level 2 Wizard spells exceed the 0 available");
}

#[test]
fn test_fighter_cannot_prepare_spells() {
    let book = RuleBook::srd();
    let mut build = sample_fighter();
    build.prepared_spells.push(PreparedSpell {
        class: CharacterClass::Fighter,
        spell: "Magic Missile".into(),
        level: 1,
    });
    let report = validate_build(&build, &book).unwrap();
    assert_violation(&report, "Brakka cannot cast Fighter spells");
}

#[test]
fn test_unknown_spell_is_an_error() {
    let book = RuleBook::srd();
    let mut build = sample_wizard();
    build.prepared_spells.push(PreparedSpell {
        class: CharacterClass::Wizard,
        spell: "Summon Lawyer".into(),
        level: 1,
    });
    assert_eq!(
        validate_build(&build, &book),
        Err(RulesError::UnknownSpell("Summon Lawyer".into()))
    );
}

// =============================================================================
// TEST 6: Abilities and levels
// =============================================================================

#[test]
fn test_point_buy_over_configured_budget() {
    // The sample fighter spends exactly 28
    let book = RuleBook::new(RulesConfig::default().with_point_buy_budget(25));
    let report = validate_build(&sample_fighter(), &book).unwrap();
    assert_violation(&report, "Total point cost 28 exceeds budget 25");
}

#[test]
fn test_final_score_outside_range() {
    let book = RuleBook::new(RulesConfig::default().with_ability_range(3..=16));
    let report = validate_build(&sample_fighter(), &book).unwrap();
    assert_violation(&report, "Strength score 17 is outside the allowed range (3-16)");
}

#[test]
fn test_level_cap() {
    let book = RuleBook::new(RulesConfig::default().with_max_character_level(6));
    let report = validate_build(&sample_fighter_wizard(), &book).unwrap();
    assert_violation(&report, "Character level 8 exceeds the maximum of 6");
}

#[test]
fn test_unearned_ability_increase() {
    let book = RuleBook::srd();
    let mut build = sample_fighter();
    build.ability_increases.push(dnd35_core::world::Ability::Constitution);
    let report = validate_build(&build, &book).unwrap();
    assert_violation(&report, "2 ability increases taken but only 1 earned");
}

#[test]
fn test_no_classes_is_an_error() {
    let book = RuleBook::srd();
    let build = CharacterBuild::new("Nobody", RaceType::Gnome);
    assert_eq!(validate_build(&build, &book), Err(RulesError::NoClassLevels));
}
