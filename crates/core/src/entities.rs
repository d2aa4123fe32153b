//! Actors and per-run records: enemies, the hint mouse, and the player with stats and codex.
//! This module exists so combat and AI read derived numbers (damage, toughness) from one place.
//! It does not own turn rules or spawn placement.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{EnemyKind, get_enemy_stats};
use crate::items::{Item, TrinketBonus};
use crate::status::StatusEffects;
use crate::types::{Pos, StatusKind};

pub const PLAYER_MAX_HP: i32 = 20;
pub const PLAYER_BASE_DAMAGE: i32 = 3;
pub const MAX_HUNGER: u32 = 100;
pub const INVENTORY_CAPACITY: usize = 10;
pub const HAND_SLOTS: usize = 2;
pub const TRINKET_SLOTS: usize = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub dmg: i32,
    pub toughness: i32,
    pub sight: u32,
    pub speed: u8,
    pub symbol: char,
    pub name: String,
    pub color: String,
    pub boss: bool,
    pub status_effects: StatusEffects,
}

impl Enemy {
    /// Builds an enemy from its template with hp and damage multipliers already combined
    /// from floor depth and difficulty.
    pub fn spawn(kind: EnemyKind, pos: Pos, hp_mult: f64, dmg_mult: f64) -> Self {
        let stats = get_enemy_stats(kind);
        let hp = scale_stat(stats.hp, hp_mult);
        Self {
            kind,
            pos,
            hp,
            max_hp: hp,
            dmg: scale_stat(stats.dmg, dmg_mult),
            toughness: stats.toughness,
            sight: stats.sight,
            speed: stats.speed,
            symbol: stats.symbol,
            name: stats.name.to_string(),
            color: stats.color.to_string(),
            boss: false,
            status_effects: StatusEffects::default(),
        }
    }

    pub fn into_boss(mut self) -> Self {
        self.hp *= 3;
        self.max_hp = self.hp;
        self.dmg = scale_stat(self.dmg, 1.5);
        self.symbol = self.symbol.to_ascii_uppercase();
        self.name = format!("Elder {}", self.name);
        self.boss = true;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

fn scale_stat(base: i32, mult: f64) -> i32 {
    ((f64::from(base) * mult).floor() as i32).max(1)
}

/// Hint creature that only exists while a hidden area is concealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mouse {
    pub pos: Pos,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub turns: u64,
    pub floors_descended: u32,
    pub kills: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub max_combo: u32,
    pub items_found: u32,
    pub potions_used: u32,
    pub traps_triggered: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codex {
    pub enemies_slain: BTreeMap<String, u32>,
    pub items_discovered: BTreeMap<String, u32>,
}

impl Codex {
    pub fn record_kill(&mut self, name: &str) {
        *self.enemies_slain.entry(name.to_string()).or_default() += 1;
    }

    pub fn record_item(&mut self, name: &str) {
        *self.items_discovered.entry(name.to_string()).or_default() += 1;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
    pub target: EnemyKind,
    pub required: u32,
    pub progress: u32,
    pub reward: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub base_damage: i32,
    pub base_toughness: i32,
    pub hunger: u32,
    pub gold: u32,
    pub combo: u32,
    pub score: u64,
    pub kills: u32,
    pub inventory: Vec<Item>,
    pub hands: [Option<Item>; HAND_SLOTS],
    pub trinkets: [Option<Item>; TRINKET_SLOTS],
    pub status_effects: StatusEffects,
    pub stats: RunStats,
    pub codex: Codex,
    pub bounty: Option<Bounty>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Pos::default(),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            base_damage: PLAYER_BASE_DAMAGE,
            base_toughness: 0,
            hunger: MAX_HUNGER,
            gold: 0,
            combo: 0,
            score: 0,
            kills: 0,
            inventory: Vec::new(),
            hands: [None, None],
            trinkets: [None, None],
            status_effects: StatusEffects::default(),
            stats: RunStats::default(),
            codex: Codex::default(),
            bounty: None,
        }
    }

    /// Best held weapon, or bare fists, plus every trinket damage bonus.
    pub fn damage(&self) -> i32 {
        let weapon = self
            .hands
            .iter()
            .flatten()
            .filter_map(|item| match item {
                Item::Weapon { max_damage, .. } => Some(*max_damage),
                _ => None,
            })
            .max()
            .unwrap_or(self.base_damage);
        weapon + self.trinket_bonus(|bonus| match bonus {
            TrinketBonus::Damage(value) => value,
            TrinketBonus::Toughness(_) => 0,
        })
    }

    pub fn toughness(&self) -> i32 {
        self.base_toughness
            + self.trinket_bonus(|bonus| match bonus {
                TrinketBonus::Toughness(value) => value,
                TrinketBonus::Damage(_) => 0,
            })
    }

    fn trinket_bonus(&self, select: impl Fn(TrinketBonus) -> i32) -> i32 {
        self.trinkets
            .iter()
            .flatten()
            .map(|item| match item {
                Item::Trinket { bonus, .. } => select(*bonus),
                _ => 0,
            })
            .sum()
    }

    pub fn is_invisible(&self) -> bool {
        self.status_effects.has(StatusKind::Invisibility)
    }

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= INVENTORY_CAPACITY
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp.max(before));
        self.hp - before
    }

    /// Index of the held weapon with the highest damage, if any.
    pub(crate) fn best_weapon_slot(&self) -> Option<usize> {
        self.hands
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| match item {
                Some(Item::Weapon { max_damage, .. }) => Some((slot, *max_damage)),
                _ => None,
            })
            .max_by_key(|(slot, damage)| (*damage, Reverse(*slot)))
            .map(|(slot, _)| slot)
    }

    pub(crate) fn weakest_weapon_slot(&self) -> usize {
        self.hands
            .iter()
            .enumerate()
            .min_by_key(|(slot, item)| match item {
                Some(Item::Weapon { max_damage, .. }) => (*max_damage, *slot),
                _ => (i32::MIN, *slot),
            })
            .map(|(slot, _)| slot)
            .unwrap_or(0)
    }
}
