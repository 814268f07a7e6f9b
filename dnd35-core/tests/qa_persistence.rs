//! QA tests for saving and loading characters.
//!
//! These tests verify that a saved build comes back with the same derived
//! sheet, and that foreign or damaged saves are rejected.
//! Run with: `cargo test -p dnd35-core --test qa_persistence`

use dnd35_core::persist::CHARACTER_SAVE_VERSION;
use dnd35_core::testing::{sample_fighter, sample_fighter_wizard, sample_wizard};
use dnd35_core::{derive_stats, validate_build, PersistError, RuleBook, RulesError, SavedCharacter};
use std::path::PathBuf;

fn setup() {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh path under the system temp directory.
fn scratch_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dnd35-{label}-{}.json", uuid::Uuid::new_v4()))
}

// =============================================================================
// TEST 1: Save to disk and load back
// =============================================================================

#[test]
fn test_save_and_load_through_a_file() {
    setup();
    let book = RuleBook::srd();
    let path = scratch_path("roundtrip");

    for build in [sample_fighter(), sample_wizard(), sample_fighter_wizard()] {
        let before = derive_stats(&build, &book).expect("derives before saving");
        let saved = SavedCharacter::new(build);
        std::fs::write(&path, saved.to_json().unwrap()).expect("write save file");

        let text = std::fs::read_to_string(&path).expect("read save file");
        let loaded = SavedCharacter::from_json(&text).expect("load save file");
        assert_eq!(loaded.metadata, saved.metadata);

        let build = loaded.into_build();
        assert!(validate_build(&build, &book).unwrap().valid);
        assert_eq!(derive_stats(&build, &book).unwrap(), before);
    }

    let _ = std::fs::remove_file(&path);
}

// =============================================================================
// TEST 2: Character list from headers
// =============================================================================

#[test]
fn test_character_list_from_metadata() {
    let saves: Vec<String> = [sample_fighter(), sample_wizard()]
        .into_iter()
        .map(|b| SavedCharacter::new(b).to_json().unwrap())
        .collect();

    let listing: Vec<String> = saves
        .iter()
        .map(|json| {
            let meta = SavedCharacter::peek_metadata(json).unwrap();
            format!("{} ({}) {}", meta.name, meta.race, meta.classes.join("/"))
        })
        .collect();

    assert_eq!(listing, vec!["Brakka (Human) Fighter 4", "Ilyra (Elf) Wizard 3"]);
}

// =============================================================================
// TEST 3: Rejected saves
// =============================================================================

#[test]
fn test_future_version_rejected() {
    let json = SavedCharacter::new(sample_wizard()).to_json().unwrap();
    let bumped = json.replacen(
        &format!("\"version\": {CHARACTER_SAVE_VERSION}"),
        "\"version\": 7",
        1,
    );
    assert!(matches!(
        SavedCharacter::from_json(&bumped),
        Err(PersistError::VersionMismatch { found: 7, .. })
    ));
}

#[test]
fn test_truncated_save_rejected() {
    let json = SavedCharacter::new(sample_fighter()).to_json().unwrap();
    let truncated = &json[..json.len() / 2];
    assert!(matches!(
        SavedCharacter::from_json(truncated),
        Err(PersistError::Json(_))
    ));
}

#[test]
fn test_edited_save_with_huge_levels_fails_fast() {
    let book = RuleBook::srd();
    let mut saved = SavedCharacter::new(sample_fighter());
    saved.build.classes[0].level = 3_000_000_000;
    let json = saved.to_json().unwrap();

    let build = SavedCharacter::from_json(&json).unwrap().into_build();
    let expected = RulesError::ClassLevelOutOfDomain {
        class: "Fighter".to_string(),
        level: 3_000_000_000,
    };
    assert_eq!(validate_build(&build, &book).unwrap_err(), expected);
    assert_eq!(derive_stats(&build, &book).unwrap_err(), expected);
}
