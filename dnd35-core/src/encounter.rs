//! Encounter budget calculator.
//!
//! A party's average level and size set a target challenge rating; the
//! target CR sets an experience budget; monsters are drawn from the
//! candidate list until nothing affordable remains. Selection is a greedy
//! fill, not an optimal packing, and never spends more than the budget.

use crate::config::{EncounterConfig, SelectionPolicy};
use crate::rulebook::RuleBook;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Monsters
// ============================================================================

/// A monster's challenge rating. Weak monsters have fractional CRs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeRating {
    Whole(u32),
    /// One over the given denominator, e.g. `Fraction(3)` is CR 1/3.
    Fraction(u32),
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeRating::Whole(n) => write!(f, "{n}"),
            ChallengeRating::Fraction(d) => write!(f, "1/{d}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonsterKind {
    Aberration,
    Animal,
    Dragon,
    Giant,
    Humanoid,
    MagicalBeast,
    MonstrousHumanoid,
    Ooze,
    Outsider,
    Undead,
    Vermin,
}

/// Terrain an encounter takes place in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Environment {
    /// Found everywhere.
    Any,
    Cold,
    Desert,
    Forest,
    Hills,
    Marsh,
    Mountains,
    Plains,
    Underground,
}

impl Environment {
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Any => "Any",
            Environment::Cold => "Cold",
            Environment::Desert => "Desert",
            Environment::Forest => "Forest",
            Environment::Hills => "Hills",
            Environment::Marsh => "Marsh",
            Environment::Mountains => "Mountains",
            Environment::Plains => "Plains",
            Environment::Underground => "Underground",
        }
    }

    pub fn all() -> &'static [Environment] {
        &[
            Environment::Any,
            Environment::Cold,
            Environment::Desert,
            Environment::Forest,
            Environment::Hills,
            Environment::Marsh,
            Environment::Mountains,
            Environment::Plains,
            Environment::Underground,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterData {
    pub name: String,
    pub challenge_rating: ChallengeRating,
    pub environments: Vec<Environment>,
    pub kind: MonsterKind,
}

impl MonsterData {
    pub fn new(
        name: impl Into<String>,
        challenge_rating: ChallengeRating,
        kind: MonsterKind,
    ) -> Self {
        Self {
            name: name.into(),
            challenge_rating,
            environments: vec![Environment::Any],
            kind,
        }
    }

    pub fn with_environments(mut self, environments: &[Environment]) -> Self {
        self.environments = environments.to_vec();
        self
    }

    /// Whether the monster can appear in an environment.
    pub fn found_in(&self, environment: Environment) -> bool {
        environment == Environment::Any
            || self
                .environments
                .iter()
                .any(|e| *e == Environment::Any || *e == environment)
    }
}

// ============================================================================
// Budgets
// ============================================================================

/// Experience budget for CR 1 through 20.
const STANDARD_BUDGETS: [u64; 20] = [
    300, 600, 900, 1_350, 1_800, 2_700, 3_600, 5_400, 7_200, 10_800, 14_400, 21_600, 28_800,
    43_200, 57_600, 86_400, 115_200, 172_800, 230_400, 345_600,
];

/// Treasure value in gold for encounter level 1 through 20.
const TREASURE_BY_LEVEL: [u64; 20] = [
    300, 600, 900, 1_200, 1_600, 2_000, 2_600, 3_400, 4_500, 5_800, 7_500, 9_800, 13_000,
    17_000, 22_000, 28_000, 36_000, 47_000, 61_000, 80_000,
];

/// Doubles every two steps past the end of a table.
fn extrapolate(table: &[u64], index: u32) -> u64 {
    let last = table.len() as u32;
    if index == 0 {
        return 0;
    }
    if index <= last {
        return table[(index - 1) as usize];
    }
    let doublings = (index - last + 1) / 2;
    let base = table[(index - 1 - 2 * doublings) as usize];
    match 1u64.checked_shl(doublings) {
        Some(factor) => base.saturating_mul(factor),
        None if base == 0 => 0,
        None => u64::MAX,
    }
}

/// Experience budget per challenge rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterBudgetTable {
    budgets: Vec<u64>,
}

impl EncounterBudgetTable {
    pub fn new(budgets: Vec<u64>) -> Self {
        Self { budgets }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_BUDGETS.to_vec())
    }

    /// Budget for a target CR; CR 0 counts as CR 1.
    pub fn budget(&self, challenge_rating: u32) -> u64 {
        if self.budgets.len() < 2 {
            return self.budgets.first().copied().unwrap_or(0);
        }
        extrapolate(&self.budgets, challenge_rating.max(1))
    }

    /// What one monster of a given CR costs against a budget.
    pub fn cost(&self, challenge_rating: ChallengeRating) -> u64 {
        match challenge_rating {
            ChallengeRating::Whole(cr) => self.budget(cr),
            ChallengeRating::Fraction(d) => self.budget(1) / u64::from(d.max(1)),
        }
    }

    /// Highest CR whose budget the spent experience reaches; zero when it
    /// reaches none.
    pub fn encounter_level(&self, spent: u64) -> u32 {
        (1..)
            .take_while(|&cr| self.budget(cr) <= spent && cr <= 100)
            .last()
            .unwrap_or(0)
    }
}

impl Default for EncounterBudgetTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Treasure value in gold pieces for an encounter level.
pub fn treasure_value(encounter_level: u32) -> u64 {
    extrapolate(&TREASURE_BY_LEVEL, encounter_level)
}

// ============================================================================
// Target CR
// ============================================================================

/// Difficulty presets relative to the party's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Challenging,
    Hard,
    Deadly,
}

impl Difficulty {
    pub fn modifier(&self) -> i32 {
        match self {
            Difficulty::Easy => -2,
            Difficulty::Challenging => 0,
            Difficulty::Hard => 2,
            Difficulty::Deadly => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Challenging => "Challenging",
            Difficulty::Hard => "Hard",
            Difficulty::Deadly => "Deadly",
        }
    }

    pub fn all() -> [Difficulty; 4] {
        [
            Difficulty::Easy,
            Difficulty::Challenging,
            Difficulty::Hard,
            Difficulty::Deadly,
        ]
    }
}

/// Target CR for a party: level plus difficulty, adjusted for party size.
///
/// Parties under four get -1; over five get +1, and over six another +1.
/// Never below 1.
pub fn target_challenge_rating(
    party_average_level: u32,
    difficulty_modifier: i32,
    party_size: u32,
) -> u32 {
    let mut cr = party_average_level as i32 + difficulty_modifier;
    if party_size < 4 {
        cr -= 1;
    }
    if party_size > 5 {
        cr += 1;
    }
    if party_size > 6 {
        cr += 1;
    }
    cr.max(1) as u32
}

// ============================================================================
// Selection
// ============================================================================

/// Fill an encounter from the candidates without exceeding the budget for
/// `target_cr`.
///
/// Stops when nothing affordable remains, the budget is spent, or the
/// configured monster cap is reached. Equal candidates are picked uniformly
/// at random.
pub fn build_encounter<'a, R: Rng>(
    target_cr: u32,
    table: &EncounterBudgetTable,
    monsters: &'a [MonsterData],
    config: &EncounterConfig,
    rng: &mut R,
) -> Vec<&'a MonsterData> {
    let mut remaining = table.budget(target_cr);
    let mut chosen = Vec::new();

    while chosen.len() < config.max_monsters && remaining > 0 {
        let affordable: Vec<(&MonsterData, u64)> = monsters
            .iter()
            .map(|m| (m, table.cost(m.challenge_rating)))
            .filter(|(_, cost)| *cost > 0 && *cost <= remaining)
            .collect();

        let candidates: Vec<(&MonsterData, u64)> = match config.selection {
            SelectionPolicy::GreedyLargest => {
                let Some(largest) = affordable.iter().map(|(_, cost)| *cost).max() else {
                    break;
                };
                affordable.into_iter().filter(|(_, cost)| *cost == largest).collect()
            }
            SelectionPolicy::UniformAffordable => affordable,
        };

        let Some(&(monster, cost)) = candidates.choose(rng) else {
            break;
        };
        remaining -= cost;
        tracing::trace!(monster = %monster.name, cost, remaining, "monster added to encounter");
        chosen.push(monster);
    }

    chosen
}

/// A generated encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub target_challenge_rating: u32,
    pub difficulty: Difficulty,
    pub environment: Environment,
    pub budget: u64,
    pub spent: u64,
    pub monsters: Vec<MonsterData>,
    pub encounter_level: u32,
    pub treasure_gp: u64,
}

/// Generate an encounter for a party from the rule book's monster table.
///
/// The party's average level is rounded to the nearest whole level; an
/// empty party counts as a lone 1st level character.
pub fn generate_encounter<R: Rng>(
    book: &RuleBook,
    party_levels: &[u32],
    difficulty: Difficulty,
    environment: Environment,
    rng: &mut R,
) -> Encounter {
    let party_size = party_levels.len().max(1) as u32;
    let total: u32 = party_levels.iter().sum();
    let average = ((total + party_size / 2) / party_size).max(1);
    let target = target_challenge_rating(average, difficulty.modifier(), party_levels.len() as u32);

    let candidates: Vec<MonsterData> = book
        .monsters()
        .into_iter()
        .filter(|m| m.found_in(environment))
        .cloned()
        .collect();
    if candidates.is_empty() {
        tracing::warn!(environment = environment.name(), "no monsters for environment");
    }

    let monsters: Vec<MonsterData> =
        build_encounter(target, &book.budgets, &candidates, &book.config.encounter, rng)
            .into_iter()
            .cloned()
            .collect();
    let spent = monsters
        .iter()
        .map(|m| book.budgets.cost(m.challenge_rating))
        .sum();
    let encounter_level = book.budgets.encounter_level(spent);

    tracing::debug!(
        target,
        difficulty = difficulty.name(),
        monsters = monsters.len(),
        spent,
        "encounter generated"
    );

    Encounter {
        target_challenge_rating: target,
        difficulty,
        environment,
        budget: book.budgets.budget(target),
        spent,
        monsters,
        encounter_level,
        treasure_gp: treasure_value(encounter_level),
    }
}

/// [`generate_encounter`] with the thread RNG.
pub fn roll_encounter(
    book: &RuleBook,
    party_levels: &[u32],
    difficulty: Difficulty,
    environment: Environment,
) -> Encounter {
    generate_encounter(book, party_levels, difficulty, environment, &mut rand::thread_rng())
}

// ============================================================================
// Monster Table
// ============================================================================

lazy_static::lazy_static! {
    /// Core monsters with their CRs and usual terrain.
    pub static ref SRD_MONSTERS: Vec<MonsterData> = {
        use ChallengeRating::{Fraction, Whole};
        use Environment::*;
        use MonsterKind::*;

        vec![
            MonsterData::new("Kobold", Fraction(4), Humanoid)
                .with_environments(&[Underground, Forest]),
            MonsterData::new("Goblin", Fraction(3), Humanoid).with_environments(&[Plains, Hills]),
            MonsterData::new("Dire Rat", Fraction(3), Animal)
                .with_environments(&[Underground, Marsh]),
            MonsterData::new("Human Skeleton", Fraction(3), Undead),
            MonsterData::new("Orc", Fraction(2), Humanoid).with_environments(&[Hills, Mountains]),
            MonsterData::new("Hobgoblin", Fraction(2), Humanoid)
                .with_environments(&[Hills, Plains]),
            MonsterData::new("Human Zombie", Fraction(2), Undead),
            MonsterData::new("Gnoll", Whole(1), Humanoid).with_environments(&[Plains]),
            MonsterData::new("Lizardfolk", Whole(1), Humanoid).with_environments(&[Marsh]),
            MonsterData::new("Wolf", Whole(1), Animal).with_environments(&[Forest, Plains, Cold]),
            MonsterData::new("Ghoul", Whole(1), Undead),
            MonsterData::new("Medium Monstrous Spider", Whole(1), Vermin)
                .with_environments(&[Underground, Forest]),
            MonsterData::new("Bugbear", Whole(2), Humanoid).with_environments(&[Mountains, Hills]),
            MonsterData::new("Black Bear", Whole(2), Animal).with_environments(&[Forest]),
            MonsterData::new("Worg", Whole(2), MagicalBeast).with_environments(&[Plains, Hills]),
            MonsterData::new("Ogre", Whole(3), Giant).with_environments(&[Hills, Mountains]),
            MonsterData::new("Dire Wolf", Whole(3), Animal).with_environments(&[Forest, Cold]),
            MonsterData::new("Wight", Whole(3), Undead),
            MonsterData::new("Gelatinous Cube", Whole(3), Ooze).with_environments(&[Underground]),
            MonsterData::new("Owlbear", Whole(4), MagicalBeast).with_environments(&[Forest]),
            MonsterData::new("Minotaur", Whole(4), MonstrousHumanoid)
                .with_environments(&[Underground]),
            MonsterData::new("Troll", Whole(5), Giant).with_environments(&[Mountains, Cold, Marsh]),
            MonsterData::new("Wraith", Whole(5), Undead),
            MonsterData::new("Manticore", Whole(5), MagicalBeast)
                .with_environments(&[Marsh, Hills]),
            MonsterData::new("Hill Giant", Whole(7), Giant).with_environments(&[Hills]),
            MonsterData::new("Chimera", Whole(7), MagicalBeast).with_environments(&[Hills, Desert]),
            MonsterData::new("Mind Flayer", Whole(8), Aberration).with_environments(&[Underground]),
            MonsterData::new("Stone Giant", Whole(8), Giant).with_environments(&[Mountains]),
            MonsterData::new("Frost Giant", Whole(9), Giant).with_environments(&[Cold]),
            MonsterData::new("Young Blue Dragon", Whole(6), Dragon).with_environments(&[Desert]),
            MonsterData::new("Adult Black Dragon", Whole(14), Dragon).with_environments(&[Marsh]),
            MonsterData::new("Purple Worm", Whole(12), MagicalBeast)
                .with_environments(&[Underground, Desert]),
            MonsterData::new("Beholder", Whole(13), Aberration).with_environments(&[Underground]),
            MonsterData::new("Storm Giant", Whole(13), Giant).with_environments(&[Mountains]),
            MonsterData::new("Balor", Whole(20), Outsider),
            MonsterData::new("Tarrasque", Whole(20), MagicalBeast),
        ]
    };
}
