//! Static game data: enemy templates, the depth ladder, item templates, and loot tables.

use serde::{Deserialize, Serialize};

use crate::items::{Item, PotionEffect, TrinketBonus};
use crate::rng::DungeonRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Rat,
    Bat,
    Goblin,
    Spider,
    Skeleton,
    Orc,
    Wraith,
    Troll,
}

pub const ENEMY_TIERS: [EnemyKind; 8] = [
    EnemyKind::Rat,
    EnemyKind::Bat,
    EnemyKind::Goblin,
    EnemyKind::Spider,
    EnemyKind::Skeleton,
    EnemyKind::Orc,
    EnemyKind::Wraith,
    EnemyKind::Troll,
];

pub struct EnemyStats {
    pub name: &'static str,
    pub symbol: char,
    pub color: &'static str,
    pub hp: i32,
    pub dmg: i32,
    pub toughness: i32,
    pub sight: u32,
    pub speed: u8,
}

pub fn get_enemy_stats(kind: EnemyKind) -> EnemyStats {
    match kind {
        EnemyKind::Rat => EnemyStats {
            name: "Rat",
            symbol: 'r',
            color: "#a08060",
            hp: 4,
            dmg: 2,
            toughness: 0,
            sight: 5,
            speed: 1,
        },
        EnemyKind::Bat => EnemyStats {
            name: "Bat",
            symbol: 'b',
            color: "#806090",
            hp: 3,
            dmg: 2,
            toughness: 0,
            sight: 6,
            speed: 2,
        },
        EnemyKind::Goblin => EnemyStats {
            name: "Goblin",
            symbol: 'g',
            color: "#50a040",
            hp: 7,
            dmg: 3,
            toughness: 0,
            sight: 6,
            speed: 1,
        },
        EnemyKind::Spider => EnemyStats {
            name: "Spider",
            symbol: 's',
            color: "#603030",
            hp: 6,
            dmg: 3,
            toughness: 0,
            sight: 5,
            speed: 2,
        },
        EnemyKind::Skeleton => EnemyStats {
            name: "Skeleton",
            symbol: 'k',
            color: "#e0e0d0",
            hp: 10,
            dmg: 4,
            toughness: 1,
            sight: 6,
            speed: 1,
        },
        EnemyKind::Orc => EnemyStats {
            name: "Orc",
            symbol: 'o',
            color: "#407030",
            hp: 14,
            dmg: 5,
            toughness: 1,
            sight: 6,
            speed: 1,
        },
        EnemyKind::Wraith => EnemyStats {
            name: "Wraith",
            symbol: 'w',
            color: "#9090c0",
            hp: 12,
            dmg: 6,
            toughness: 0,
            sight: 8,
            speed: 1,
        },
        EnemyKind::Troll => EnemyStats {
            name: "Troll",
            symbol: 't',
            color: "#708050",
            hp: 22,
            dmg: 7,
            toughness: 2,
            sight: 5,
            speed: 1,
        },
    }
}

fn tier_index(floor: u32) -> usize {
    ((floor.saturating_sub(1) / 2) as usize).min(ENEMY_TIERS.len() - 2)
}

/// The enemy a floor is themed around; bosses and bounties use it.
pub fn primary_enemy(floor: u32) -> EnemyKind {
    ENEMY_TIERS[tier_index(floor)]
}

pub fn floor_enemy_pool(floor: u32) -> [EnemyKind; 2] {
    let tier = tier_index(floor);
    [ENEMY_TIERS[tier], ENEMY_TIERS[tier + 1]]
}

const WEAPON_LADDER: [(&str, i32); 5] =
    [("Dagger", 3), ("Short Sword", 4), ("Mace", 5), ("Longsword", 6), ("War Axe", 8)];

pub fn weapon(name: &str, max_damage: i32) -> Item {
    Item::Weapon { name: name.to_string(), max_damage, forged: 0 }
}

pub fn weapon_for_floor(floor: u32, rng: &mut DungeonRng) -> Item {
    let best = ((floor / 2 + 1) as usize).min(WEAPON_LADDER.len() - 1);
    let (name, max_damage) = WEAPON_LADDER[rng.range_usize(0, best)];
    weapon(name, max_damage)
}

pub fn trinket(rng: &mut DungeonRng) -> Item {
    if rng.chance(0.5) {
        Item::Trinket { name: "Iron Ring".into(), bonus: TrinketBonus::Toughness(1) }
    } else {
        Item::Trinket { name: "Fang Charm".into(), bonus: TrinketBonus::Damage(1) }
    }
}

pub fn material(rng: &mut DungeonRng) -> Item {
    if rng.chance(0.7) {
        Item::Material { name: "Iron Ore".into(), value: 5 }
    } else {
        Item::Material { name: "Silver Ingot".into(), value: 12 }
    }
}

pub fn valuable(floor: u32, rng: &mut DungeonRng) -> Item {
    if rng.chance(0.8) {
        let gold = rng.range(5, 15) as u32 * floor.max(1);
        Item::Valuable { name: "Gold Coins".into(), gold }
    } else {
        Item::Valuable { name: "Ruby".into(), gold: 30 + 5 * floor }
    }
}

pub fn raw_rat_meat() -> Item {
    Item::Food { name: "Raw Rat Meat".into(), hunger: 15, heal: 0, cooked: false }
}

pub fn bread() -> Item {
    Item::Food { name: "Bread".into(), hunger: 35, heal: 1, cooked: true }
}

pub fn apple() -> Item {
    Item::Food { name: "Apple".into(), hunger: 15, heal: 1, cooked: true }
}

pub fn food(rng: &mut DungeonRng) -> Item {
    match rng.range(0, 2) {
        0 => bread(),
        1 => apple(),
        _ => raw_rat_meat(),
    }
}

pub fn potion(effect: PotionEffect) -> Item {
    Item::Potion { effect }
}

pub fn full_heal_potion() -> Item {
    potion(PotionEffect::FullHeal)
}

pub fn random_potion(rng: &mut DungeonRng) -> Item {
    let roll = rng.range(0, 99);
    let effect = match roll {
        0..=29 => PotionEffect::Heal(10),
        30..=44 => PotionEffect::Regeneration { turns: 8, amount: 2 },
        45..=59 => PotionEffect::Speed { turns: 10 },
        60..=74 => PotionEffect::Invisibility { turns: 8 },
        75..=89 => PotionEffect::Explosive { damage: 8 },
        _ => PotionEffect::FullHeal,
    };
    potion(effect)
}

pub fn random_loot(floor: u32, rng: &mut DungeonRng) -> Item {
    match rng.range(0, 99) {
        0..=19 => food(rng),
        20..=39 => random_potion(rng),
        40..=54 => valuable(floor, rng),
        55..=69 => weapon_for_floor(floor, rng),
        70..=79 => trinket(rng),
        80..=89 => material(rng),
        _ => valuable(floor, rng),
    }
}

pub fn price_of(item: &Item, floor: u32) -> u32 {
    let base = match item {
        Item::Weapon { max_damage, forged, .. } => 6 * (*max_damage as u32) + 10 * u32::from(*forged),
        Item::Trinket { .. } => 40,
        Item::Material { value, .. } => value * 2,
        Item::Valuable { gold, .. } => *gold,
        Item::Food { hunger, .. } => hunger / 2 + 4,
        Item::Potion { effect: PotionEffect::FullHeal } => 60,
        Item::Potion { .. } => 25,
    };
    base + 2 * floor
}
