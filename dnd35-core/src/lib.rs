//! D&D 3.5 character rules engine.
//!
//! This crate provides:
//! - Ability scores, point buy and racial adjustments
//! - Class progressions, multiclass BAB and saves, skill points, feat slots
//! - Derived combat statistics, skills, encumbrance and spell slots
//! - Feat prerequisite, skill, equipment and spell preparation validation
//! - Encounter budgets and monster selection
//!
//! Every calculation is a pure function of a [`CharacterBuild`] and a
//! [`RuleBook`]; the only randomness is in dice, rolled ability scores and
//! encounter generation, all of which take an injected RNG.
//!
//! # Quick Start
//!
//! ```
//! use dnd35_core::{
//!     derive_stats, validate_build, CharacterBuilder, CharacterClass, RaceType, RuleBook,
//! };
//! use dnd35_core::world::AbilityScores;
//!
//! let book = RuleBook::srd();
//! let build = CharacterBuilder::new()
//!     .name("Thorin")
//!     .race(RaceType::Dwarf)
//!     .class(CharacterClass::Fighter, 1)
//!     .point_buy(AbilityScores::new(16, 12, 14, 10, 12, 8))
//!     .feat("Power Attack")
//!     .equip("battleaxe")
//!     .build()
//!     .unwrap();
//!
//! assert!(validate_build(&build, &book).unwrap().valid);
//! let stats = derive_stats(&build, &book).unwrap();
//! assert_eq!(stats.attacks.base_attack_bonus, 1);
//! ```

pub mod abilities;
pub mod character_builder;
pub mod class_data;
pub mod combat;
pub mod config;
pub mod derived;
pub mod dice;
pub mod encounter;
pub mod encumbrance;
pub mod feats;
pub mod items;
pub mod persist;
pub mod progression;
pub mod race_data;
pub mod rulebook;
pub mod skills;
pub mod spells;
pub mod testing;
pub mod world;

// Primary public API
pub use character_builder::{BuilderError, CharacterBuilder};
pub use config::{ConfigError, RulesConfig};
pub use derived::{derive_stats, validate_build, DerivedStats};
pub use encounter::{generate_encounter, Difficulty, Encounter, Environment};
pub use persist::{PersistError, SavedCharacter};
pub use rulebook::{RuleBook, RulesError};
pub use world::{CharacterBuild, CharacterClass, RaceType, ValidationReport};
