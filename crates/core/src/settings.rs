//! Difficulty knobs supplied by the host and read by generation and combat.

use serde::{Deserialize, Serialize};

/// Ceiling for any multiplier applied to a spawn or placement count.
pub const MAX_COUNT_MULT: f64 = 4.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    pub enemy_hp_mult: f64,
    pub enemy_dmg_mult: f64,
    pub loot_mult: f64,
    pub hazard_mult: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::normal()
    }
}

impl Difficulty {
    pub fn easy() -> Self {
        Self { enemy_hp_mult: 0.75, enemy_dmg_mult: 0.75, loot_mult: 1.5, hazard_mult: 0.5 }
    }

    pub fn normal() -> Self {
        Self { enemy_hp_mult: 1.0, enemy_dmg_mult: 1.0, loot_mult: 1.0, hazard_mult: 1.0 }
    }

    pub fn hard() -> Self {
        Self { enemy_hp_mult: 1.4, enemy_dmg_mult: 1.3, loot_mult: 0.75, hazard_mult: 1.5 }
    }

    /// Parses a TOML table such as `enemy_hp_mult = 1.2`; absent keys keep defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Scales an integer count by a multiplier clamped to `0..=MAX_COUNT_MULT`, never
    /// dropping a nonzero base to zero.
    pub(crate) fn scale_count(base: usize, mult: f64) -> usize {
        if base == 0 {
            return 0;
        }
        let mult = if mult.is_nan() { 1.0 } else { mult.clamp(0.0, MAX_COUNT_MULT) };
        ((base as f64) * mult).round().max(1.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_only_named_knobs() {
        let parsed = Difficulty::from_toml_str("enemy_hp_mult = 2.0\nhazard_mult = 0.5\n")
            .expect("valid difficulty table");
        assert_eq!(parsed.enemy_hp_mult, 2.0);
        assert_eq!(parsed.hazard_mult, 0.5);
        assert_eq!(parsed.enemy_dmg_mult, 1.0);
        assert_eq!(parsed.loot_mult, 1.0);
    }

    #[test]
    fn empty_toml_is_normal_difficulty() {
        assert_eq!(Difficulty::from_toml_str("").expect("empty table"), Difficulty::normal());
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(Difficulty::from_toml_str("enemy_hp_mult = \"lots\"").is_err());
    }

    #[test]
    fn scale_count_keeps_nonzero_bases_alive() {
        assert_eq!(Difficulty::scale_count(3, 0.1), 1);
        assert_eq!(Difficulty::scale_count(4, 1.5), 6);
        assert_eq!(Difficulty::scale_count(0, 3.0), 0);
    }

    #[test]
    fn oversized_multipliers_are_capped() {
        let wild = Difficulty::from_toml_str("hazard_mult = 1e6\nloot_mult = -3.0\n")
            .expect("numbers parse");
        assert_eq!(Difficulty::scale_count(5, wild.hazard_mult), 20);
        assert_eq!(Difficulty::scale_count(5, wild.loot_mult), 1);
        assert_eq!(Difficulty::scale_count(5, f64::NAN), 5);
    }
}
