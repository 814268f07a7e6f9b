//! Serialized character blobs.
//!
//! A [`SavedCharacter`] wraps a [`CharacterBuild`] with a format version and
//! a small metadata header so a character list can be shown without
//! deserializing every build. Where the JSON ends up is the caller's
//! business; this module only produces and checks the text.

use crate::world::{CharacterBuild, CharacterId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current character save version.
pub const CHARACTER_SAVE_VERSION: u32 = 1;

/// Metadata about a saved character for quick display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMetadata {
    pub id: CharacterId,
    pub name: String,
    pub race: String,
    /// Classes with levels, e.g. `"Fighter 4"`.
    pub classes: Vec<String>,
    pub level: u32,
}

/// A saved character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCharacter {
    pub version: u32,
    /// Seconds since the Unix epoch.
    pub saved_at: u64,
    pub metadata: CharacterMetadata,
    pub build: CharacterBuild,
}

impl SavedCharacter {
    pub fn new(build: CharacterBuild) -> Self {
        let metadata = CharacterMetadata {
            id: build.id,
            name: build.name.clone(),
            race: build.race.name().to_string(),
            classes: build
                .classes
                .iter()
                .map(|c| format!("{} {}", c.class, c.level))
                .collect(),
            level: build.character_level(),
        };

        Self {
            version: CHARACTER_SAVE_VERSION,
            saved_at: unix_now(),
            metadata,
            build,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a saved character, rejecting other format versions.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let saved: Self = serde_json::from_str(json)?;
        check_version(saved.version)?;
        Ok(saved)
    }

    /// Read only the metadata header.
    pub fn peek_metadata(json: &str) -> Result<CharacterMetadata, PersistError> {
        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: CharacterMetadata,
        }

        let partial: Partial = serde_json::from_str(json)?;
        check_version(partial.version)?;
        Ok(partial.metadata)
    }

    pub fn into_build(self) -> CharacterBuild {
        self.build
    }
}

fn check_version(found: u32) -> Result<(), PersistError> {
    if found != CHARACTER_SAVE_VERSION {
        tracing::warn!(found, expected = CHARACTER_SAVE_VERSION, "character save version mismatch");
        return Err(PersistError::VersionMismatch {
            expected: CHARACTER_SAVE_VERSION,
            found,
        });
    }
    Ok(())
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::derive_stats;
    use crate::rulebook::RuleBook;
    use crate::testing::sample_fighter_wizard;

    #[test]
    fn test_saved_character_metadata() {
        let saved = SavedCharacter::new(sample_fighter_wizard());
        assert_eq!(saved.version, CHARACTER_SAVE_VERSION);
        assert_eq!(saved.metadata.level, 8);
        assert_eq!(saved.metadata.classes, vec!["Fighter 4", "Wizard 4"]);
        assert_eq!(saved.metadata.id, saved.build.id);
    }

    #[test]
    fn test_json_round_trip_keeps_derived_stats() {
        let book = RuleBook::srd();
        let saved = SavedCharacter::new(sample_fighter_wizard());
        let json = saved.to_json().unwrap();
        let loaded = SavedCharacter::from_json(&json).unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(
            derive_stats(&loaded.into_build(), &book).unwrap(),
            derive_stats(&saved.build, &book).unwrap()
        );
    }

    #[test]
    fn test_peek_metadata() {
        let json = SavedCharacter::new(sample_fighter_wizard()).to_json().unwrap();
        let metadata = SavedCharacter::peek_metadata(&json).unwrap();
        assert_eq!(metadata.race, "Human");
    }

    #[test]
    fn test_version_mismatch() {
        let mut saved = SavedCharacter::new(sample_fighter_wizard());
        saved.version = 99;
        let json = saved.to_json().unwrap();
        assert!(matches!(
            SavedCharacter::from_json(&json),
            Err(PersistError::VersionMismatch {
                expected: 1,
                found: 99,
            })
        ));
        assert!(matches!(
            SavedCharacter::peek_metadata(&json),
            Err(PersistError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_garbage_is_json_error() {
        assert!(matches!(
            SavedCharacter::from_json("{not json"),
            Err(PersistError::Json(_))
        ));
    }
}
