//! Encumbrance calculator.
//!
//! Carrying capacity by Strength and size, the load level a carried weight
//! falls into, and the penalties each load level imposes.

use crate::world::Size;
use serde::{Deserialize, Serialize};

/// Heavy load, in pounds, for Strength 1 through 29.
const HEAVY_LOADS: [u32; 29] = [
    10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 115, 130, 150, 175, 200, 230, 260, 300, 350, 400,
    460, 520, 600, 700, 800, 920, 1040, 1200, 1400,
];

/// Load thresholds in pounds; each is the most a character can carry at that load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarryingCapacity {
    pub light: u32,
    pub medium: u32,
    pub heavy: u32,
}

impl CarryingCapacity {
    fn from_heavy(heavy: u32) -> Self {
        Self {
            light: heavy / 3,
            medium: heavy * 2 / 3,
            heavy,
        }
    }
}

/// Heavy load for a Strength score, before size.
fn heavy_load(strength: i32) -> u32 {
    if strength <= 0 {
        return 0;
    }
    if strength <= 29 {
        return HEAVY_LOADS[(strength - 1) as usize];
    }
    // Each +10 above the table quadruples the score with the same last digit
    let steps = (strength - 20) / 10;
    let base = strength - steps * 10;
    HEAVY_LOADS[(base - 1) as usize].saturating_mul(4u32.saturating_pow(steps as u32))
}

/// Carrying capacity of a Medium biped.
pub fn carrying_capacity(strength: i32) -> CarryingCapacity {
    CarryingCapacity::from_heavy(heavy_load(strength))
}

/// Carrying capacity scaled for creature size.
pub fn carrying_capacity_for_size(strength: i32, size: Size) -> CarryingCapacity {
    let (numerator, denominator) = size.carry_multiplier();
    let heavy = u64::from(heavy_load(strength)) * numerator / denominator;
    CarryingCapacity::from_heavy(u32::try_from(heavy).unwrap_or(u32::MAX))
}

/// How burdened a character is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoadLevel {
    Light,
    Medium,
    Heavy,
    Overloaded,
}

impl LoadLevel {
    pub fn name(&self) -> &'static str {
        match self {
            LoadLevel::Light => "Light",
            LoadLevel::Medium => "Medium",
            LoadLevel::Heavy => "Heavy",
            LoadLevel::Overloaded => "Overloaded",
        }
    }
}

/// Load level for a carried weight. A weight equal to a threshold stays in
/// the lighter band.
pub fn load_level(weight: f64, capacity: &CarryingCapacity) -> LoadLevel {
    if weight > f64::from(capacity.heavy) {
        LoadLevel::Overloaded
    } else if weight > f64::from(capacity.medium) {
        LoadLevel::Heavy
    } else if weight > f64::from(capacity.light) {
        LoadLevel::Medium
    } else {
        LoadLevel::Light
    }
}

/// Penalties imposed by a load level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadPenalties {
    pub reduces_speed: bool,
    /// Check penalty; does not stack with armor, the worse applies.
    pub check_penalty: i32,
    pub max_dex_bonus: Option<i32>,
    /// Multiple of speed when running; zero when unable to run.
    pub run_multiplier: u32,
}

pub fn penalties_for(load: LoadLevel) -> LoadPenalties {
    match load {
        LoadLevel::Light => LoadPenalties {
            reduces_speed: false,
            check_penalty: 0,
            max_dex_bonus: None,
            run_multiplier: 4,
        },
        LoadLevel::Medium => LoadPenalties {
            reduces_speed: true,
            check_penalty: -3,
            max_dex_bonus: Some(3),
            run_multiplier: 4,
        },
        LoadLevel::Heavy => LoadPenalties {
            reduces_speed: true,
            check_penalty: -6,
            max_dex_bonus: Some(1),
            run_multiplier: 3,
        },
        LoadLevel::Overloaded => LoadPenalties {
            reduces_speed: true,
            check_penalty: -6,
            max_dex_bonus: Some(0),
            run_multiplier: 0,
        },
    }
}

/// Speed in medium or heavy armor or load, rounded to 5-foot squares.
pub fn reduced_speed(base_speed: u32) -> u32 {
    (base_speed * 2 / 3 + 4) / 5 * 5
}

/// Movement speed after armor and load.
///
/// Overloaded characters move 5 feet; races that ignore load keep their
/// base speed otherwise.
pub fn effective_speed(
    base_speed: u32,
    load: LoadLevel,
    armor_reduces_speed: bool,
    unaffected_by_load: bool,
) -> u32 {
    if load == LoadLevel::Overloaded {
        return 5;
    }
    if unaffected_by_load {
        return base_speed;
    }
    if armor_reduces_speed || penalties_for(load).reduces_speed {
        reduced_speed(base_speed)
    } else {
        base_speed
    }
}

/// Load state for a character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Encumbrance {
    pub carried_weight: f64,
    pub capacity: CarryingCapacity,
    pub load: LoadLevel,
    pub penalties: LoadPenalties,
}

impl Encumbrance {
    pub fn new(carried_weight: f64, strength: i32, size: Size) -> Self {
        let capacity = carrying_capacity_for_size(strength, size);
        let load = load_level(carried_weight, &capacity);
        Self {
            carried_weight,
            capacity,
            load,
            penalties: penalties_for(load),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_ten_capacity() {
        assert_eq!(
            carrying_capacity(10),
            CarryingCapacity {
                light: 33,
                medium: 66,
                heavy: 100
            }
        );
    }

    #[test]
    fn test_seventy_pounds_is_heavy_for_strength_ten() {
        let capacity = carrying_capacity(10);
        assert_eq!(load_level(70.0, &capacity), LoadLevel::Heavy);
        assert_eq!(load_level(66.0, &capacity), LoadLevel::Medium);
        assert_eq!(load_level(33.0, &capacity), LoadLevel::Light);
        assert_eq!(load_level(100.5, &capacity), LoadLevel::Overloaded);
    }

    #[test]
    fn test_capacity_above_table() {
        assert_eq!(carrying_capacity(29).heavy, 1400);
        assert_eq!(carrying_capacity(30).heavy, 1600);
        assert_eq!(carrying_capacity(35).heavy, 800 * 4);
        assert_eq!(carrying_capacity(40).heavy, 400 * 16);
    }

    #[test]
    fn test_nonpositive_strength_carries_nothing() {
        assert_eq!(carrying_capacity(0), CarryingCapacity::default());
        assert_eq!(carrying_capacity(-2).heavy, 0);
    }

    #[test]
    fn test_size_multiplier() {
        assert_eq!(carrying_capacity_for_size(10, Size::Small).heavy, 75);
        assert_eq!(carrying_capacity_for_size(10, Size::Large).heavy, 200);
    }

    #[test]
    fn test_reduced_speed() {
        assert_eq!(reduced_speed(30), 20);
        assert_eq!(reduced_speed(20), 15);
        assert_eq!(reduced_speed(40), 30);
    }

    #[test]
    fn test_effective_speed() {
        assert_eq!(effective_speed(30, LoadLevel::Light, false, false), 30);
        assert_eq!(effective_speed(30, LoadLevel::Medium, false, false), 20);
        assert_eq!(effective_speed(30, LoadLevel::Light, true, false), 20);
        assert_eq!(effective_speed(20, LoadLevel::Heavy, true, true), 20);
        assert_eq!(effective_speed(30, LoadLevel::Overloaded, false, false), 5);
    }

    #[test]
    fn test_penalty_rows() {
        assert_eq!(penalties_for(LoadLevel::Medium).max_dex_bonus, Some(3));
        assert_eq!(penalties_for(LoadLevel::Heavy).check_penalty, -6);
        assert_eq!(penalties_for(LoadLevel::Heavy).run_multiplier, 3);
        assert!(!penalties_for(LoadLevel::Light).reduces_speed);
    }
}
