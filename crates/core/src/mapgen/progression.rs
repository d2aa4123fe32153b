//! Floor-depth scaling rules used by map generation.

use crate::settings::Difficulty;

pub const STARTING_FLOOR: u32 = 1;
pub const START_ROOM_COUNT: usize = 3;
pub const MAX_ROOM_COUNT: usize = 12;
pub const BOSS_FLOOR_INTERVAL: u32 = 5;

const FIRST_ROOM_STEP: u32 = 2;
const MAX_ROOM_STEP: u32 = 5;
const HP_GROWTH_PER_FLOOR: f64 = 0.15;
const DMG_GROWTH_PER_FLOOR: f64 = 0.10;

/// Saturating step function: each extra room takes one floor longer to arrive than the
/// previous one, until the step reaches its cap.
pub fn target_room_count(floor: u32) -> usize {
    let mut rooms = START_ROOM_COUNT;
    let mut step = FIRST_ROOM_STEP;
    let mut threshold = STARTING_FLOOR + step;
    while threshold <= floor && rooms < MAX_ROOM_COUNT {
        rooms += 1;
        step = (step + 1).min(MAX_ROOM_STEP);
        threshold += step;
    }
    rooms
}

pub fn is_boss_floor(floor: u32) -> bool {
    floor > 0 && floor % BOSS_FLOOR_INTERVAL == 0
}

pub fn enemy_hp_mult(floor: u32, difficulty: &Difficulty) -> f64 {
    (1.0 + HP_GROWTH_PER_FLOOR * f64::from(floor.saturating_sub(1))) * difficulty.enemy_hp_mult
}

pub fn enemy_dmg_mult(floor: u32, difficulty: &Difficulty) -> f64 {
    (1.0 + DMG_GROWTH_PER_FLOOR * f64::from(floor.saturating_sub(1))) * difficulty.enemy_dmg_mult
}

pub fn scatter_trap_count(floor: u32, difficulty: &Difficulty) -> usize {
    Difficulty::scale_count((floor / 2 + 1) as usize, difficulty.hazard_mult)
}

pub fn needs_full_heal_pity(floor: u32) -> bool {
    floor <= 2 || floor % 3 == 0
}

pub(super) fn enemies_per_room_max(floor: u32) -> i32 {
    1 + (floor / 3) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_count_steps_lengthen_and_saturate() {
        let counts: Vec<usize> = (1..=20).map(target_room_count).collect();
        assert_eq!(&counts[..10], &[3, 3, 4, 4, 4, 5, 5, 5, 5, 6]);
        assert_eq!(target_room_count(15), 7);
        assert_eq!(target_room_count(20), 8);
        assert_eq!(target_room_count(10_000), MAX_ROOM_COUNT);
        assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn boss_floors_are_every_fifth() {
        assert!(!is_boss_floor(1));
        assert!(is_boss_floor(5));
        assert!(is_boss_floor(10));
        assert!(!is_boss_floor(11));
    }

    #[test]
    fn enemy_multipliers_grow_with_depth_and_difficulty() {
        let normal = Difficulty::normal();
        assert_eq!(enemy_hp_mult(1, &normal), 1.0);
        assert!(enemy_hp_mult(5, &normal) > enemy_hp_mult(4, &normal));
        assert!(enemy_dmg_mult(3, &Difficulty::hard()) > enemy_dmg_mult(3, &normal));
    }

    #[test]
    fn full_heal_pity_floors() {
        let pity: Vec<u32> = (1..=9).filter(|floor| needs_full_heal_pity(*floor)).collect();
        assert_eq!(pity, vec![1, 2, 3, 6, 9]);
    }
}
