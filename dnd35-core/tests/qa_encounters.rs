//! QA tests for encounter generation.
//!
//! Checks target CR arithmetic, budget limits across many seeds, terrain
//! filtering and the selection policies.
//! Run with: `cargo test -p dnd35-core --test qa_encounters`

use dnd35_core::config::{EncounterConfig, SelectionPolicy};
use dnd35_core::encounter::{
    build_encounter, target_challenge_rating, treasure_value, ChallengeRating, EncounterBudgetTable,
    MonsterData, MonsterKind,
};
use dnd35_core::testing::seeded_rng;
use dnd35_core::{generate_encounter, Difficulty, Environment, RuleBook, RulesConfig};

fn setup() {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// TEST 1: Target challenge rating
// =============================================================================

#[test]
fn test_target_cr_party_size() {
    assert_eq!(target_challenge_rating(5, 0, 3), 4);
    assert_eq!(target_challenge_rating(5, 0, 4), 5);
    assert_eq!(target_challenge_rating(5, 0, 5), 5);
    assert_eq!(target_challenge_rating(5, 0, 6), 6);
    assert_eq!(target_challenge_rating(5, 0, 7), 7);
    assert_eq!(target_challenge_rating(5, Difficulty::Deadly.modifier(), 4), 9);
}

#[test]
fn test_target_cr_floor() {
    assert_eq!(target_challenge_rating(1, Difficulty::Easy.modifier(), 2), 1);
}

// =============================================================================
// TEST 2: Budget limits
// =============================================================================

#[test]
fn test_generated_encounters_stay_within_budget() {
    setup();
    let book = RuleBook::srd();
    let party = [3, 4, 4, 5];

    for difficulty in Difficulty::all() {
        for &environment in Environment::all() {
            for seed in 0..25 {
                let mut rng = seeded_rng(seed);
                let encounter =
                    generate_encounter(&book, &party, difficulty, environment, &mut rng);
                assert!(
                    encounter.spent <= encounter.budget,
                    "{} {} seed {seed}: spent {} of {}",
                    difficulty.name(),
                    environment.name(),
                    encounter.spent,
                    encounter.budget
                );
                assert!(encounter.monsters.len() <= book.config.encounter.max_monsters);
                assert!(encounter.monsters.iter().all(|m| m.found_in(environment)));
            }
        }
    }
}

#[test]
fn test_uniform_policy_respects_cap() {
    let config = RulesConfig::default().with_encounter(EncounterConfig {
        max_monsters: 3,
        selection: SelectionPolicy::UniformAffordable,
    });
    let book = RuleBook::new(config);

    for seed in 0..40 {
        let encounter = generate_encounter(
            &book,
            &[8, 8, 8, 8],
            Difficulty::Hard,
            Environment::Any,
            &mut seeded_rng(seed),
        );
        assert!(!encounter.monsters.is_empty());
        assert!(encounter.monsters.len() <= 3);
        assert!(encounter.spent <= encounter.budget);
    }
}

// =============================================================================
// TEST 3: Determinism
// =============================================================================

#[test]
fn test_same_seed_same_encounter() {
    let book = RuleBook::srd();
    let roll = |seed| {
        generate_encounter(
            &book,
            &[2, 3, 3],
            Difficulty::Challenging,
            Environment::Forest,
            &mut seeded_rng(seed),
        )
    };
    assert_eq!(roll(11), roll(11));
}

// =============================================================================
// TEST 4: Selection on a custom table
// =============================================================================

#[test]
fn test_goblin_band() {
    let goblins = vec![MonsterData::new(
        "Goblin",
        ChallengeRating::Fraction(3),
        MonsterKind::Humanoid,
    )];
    let table = EncounterBudgetTable::standard();
    let config = EncounterConfig::default();

    // CR 1 buys 300 experience; a CR 1/3 goblin costs 100
    let band = build_encounter(1, &table, &goblins, &config, &mut seeded_rng(0));
    assert_eq!(band.len(), 3);

    let capped = EncounterConfig {
        max_monsters: 2,
        ..EncounterConfig::default()
    };
    assert_eq!(build_encounter(1, &table, &goblins, &capped, &mut seeded_rng(0)).len(), 2);
}

#[test]
fn test_greedy_takes_the_biggest_first() {
    let monsters = vec![
        MonsterData::new("Goblin", ChallengeRating::Fraction(3), MonsterKind::Humanoid),
        MonsterData::new("Ogre", ChallengeRating::Whole(3), MonsterKind::Giant),
        MonsterData::new("Gnoll", ChallengeRating::Whole(1), MonsterKind::Humanoid),
    ];
    let table = EncounterBudgetTable::standard();
    // CR 4 buys 1350: the ogre (900) first, then a gnoll (300), then a goblin
    let config = EncounterConfig::default();
    let picked = build_encounter(4, &table, &monsters, &config, &mut seeded_rng(5));
    let names: Vec<&str> = picked.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Ogre", "Gnoll", "Goblin"]);
}

#[test]
fn test_nothing_affordable() {
    let dragons = vec![MonsterData::new(
        "Red Dragon",
        ChallengeRating::Whole(15),
        MonsterKind::Dragon,
    )];
    let table = EncounterBudgetTable::standard();
    let config = EncounterConfig::default();
    assert!(build_encounter(2, &table, &dragons, &config, &mut seeded_rng(0)).is_empty());
    assert!(build_encounter(2, &table, &[], &config, &mut seeded_rng(0)).is_empty());
}

// =============================================================================
// TEST 5: Treasure and edge cases
// =============================================================================

#[test]
fn test_treasure_follows_encounter_level() {
    let book = RuleBook::srd();
    for seed in 0..10 {
        let encounter = generate_encounter(
            &book,
            &[6, 6, 6, 6],
            Difficulty::Challenging,
            Environment::Any,
            &mut seeded_rng(seed),
        );
        assert_eq!(encounter.encounter_level, book.budgets.encounter_level(encounter.spent));
        assert_eq!(encounter.treasure_gp, treasure_value(encounter.encounter_level));
    }
}

#[test]
fn test_empty_party() {
    let book = RuleBook::srd();
    let encounter = generate_encounter(
        &book,
        &[],
        Difficulty::Challenging,
        Environment::Any,
        &mut seeded_rng(1),
    );
    assert_eq!(encounter.target_challenge_rating, 1);
    assert_eq!(encounter.budget, 300);
}

#[test]
fn test_budgets_past_twenty() {
    let table = EncounterBudgetTable::standard();
    assert_eq!(table.budget(20), 345_600);
    assert_eq!(table.budget(21), 460_800);
    assert_eq!(table.budget(22), 691_200);
    assert_eq!(table.budget(0), table.budget(1));
}
