//! Using inventory items and picking loot up off the floor.
//! This module exists to keep inventory mutation rules in one place.
//! It does not own item definitions; see the crate-level `items` and `content` modules.

use super::*;
use crate::entities::MAX_HUNGER;
use crate::items::PotionEffect;

pub const RAW_FOOD_POISON_CHANCE: f64 = 0.3;
const RAW_FOOD_POISON_TURNS: u32 = 4;
const RAW_FOOD_POISON_DAMAGE: i32 = 1;

impl RunState {
    /// Consumes or equips the item in `slot`. Returns false, leaving everything untouched,
    /// for an empty slot or an item with no use.
    pub(super) fn use_item(&mut self, slot: usize) -> bool {
        let Some(item) = self.player.inventory.get(slot) else {
            return false;
        };
        if matches!(item, Item::Material { .. } | Item::Valuable { .. }) {
            return false;
        }

        let item = self.player.inventory.remove(slot);
        match item {
            Item::Food { name, hunger, heal, cooked } => self.eat(name, hunger, heal, cooked),
            Item::Potion { effect } => self.drink(effect),
            weapon @ Item::Weapon { .. } => self.equip_weapon(weapon, slot),
            trinket @ Item::Trinket { .. } => self.equip_trinket(trinket, slot),
            other => {
                self.player.inventory.insert(slot, other);
                return false;
            }
        }
        true
    }

    fn eat(&mut self, name: String, hunger: u32, heal: i32, cooked: bool) {
        self.player.hunger = (self.player.hunger + hunger).min(MAX_HUNGER);
        self.player.heal(heal);
        let poisoned = !cooked && self.rng.chance(RAW_FOOD_POISON_CHANCE);
        if poisoned {
            self.player.status_effects.add_poison(RAW_FOOD_POISON_TURNS, RAW_FOOD_POISON_DAMAGE);
        }
        self.log.push(LogEvent::Ate { item: name, poisoned });
    }

    fn drink(&mut self, effect: PotionEffect) {
        self.player.stats.potions_used += 1;
        self.log.push(LogEvent::PotionUsed { item: effect.name().to_string() });
        match effect {
            PotionEffect::FullHeal => {
                self.player.hp = self.player.hp.max(self.player.max_hp);
            }
            PotionEffect::Heal(amount) => {
                self.player.heal(amount);
            }
            PotionEffect::Regeneration { turns, amount } => {
                self.apply_player_status(StatusKind::Regeneration, turns, amount);
            }
            PotionEffect::Speed { turns } => self.apply_player_status(StatusKind::Speed, turns, 1),
            PotionEffect::Invisibility { turns } => {
                self.apply_player_status(StatusKind::Invisibility, turns, 1);
            }
            PotionEffect::Explosive { damage } => self.explode(damage),
        }
    }

    fn apply_player_status(&mut self, status: StatusKind, turns: u32, magnitude: i32) {
        self.player.status_effects.apply(status, turns, magnitude);
        self.log.push(LogEvent::StatusApplied { status, turns });
    }

    /// Fills a free hand, otherwise swaps with the weakest held weapon. The displaced
    /// weapon goes back into the inventory where the new one came from.
    fn equip_weapon(&mut self, weapon: Item, from_slot: usize) {
        let name = weapon.name().to_string();
        let hand = self
            .player
            .hands
            .iter()
            .position(Option::is_none)
            .unwrap_or_else(|| self.player.weakest_weapon_slot());
        if let Some(previous) = self.player.hands[hand].replace(weapon) {
            self.player.inventory.insert(from_slot, previous);
        }
        self.log.push(LogEvent::Equipped { item: name });
    }

    fn equip_trinket(&mut self, trinket: Item, from_slot: usize) {
        let name = trinket.name().to_string();
        let slot = self.player.trinkets.iter().position(Option::is_none).unwrap_or(0);
        if let Some(previous) = self.player.trinkets[slot].replace(trinket) {
            self.player.inventory.insert(from_slot, previous);
        }
        self.log.push(LogEvent::Equipped { item: name });
    }

    pub(super) fn pick_up_loot(&mut self) {
        let pos = self.player.pos;
        let Some(loot) = self.floor.map.loot(pos) else {
            return;
        };
        if let Item::Valuable { gold, .. } = loot {
            let amount = *gold;
            self.floor.map.take_loot(pos);
            self.player.gold += amount;
            self.log.push(LogEvent::GoldPickedUp { amount });
            return;
        }
        if self.player.inventory_full() {
            self.log.push(LogEvent::InventoryFull { item: loot.name().to_string() });
            return;
        }
        let Some(item) = self.floor.map.take_loot(pos) else {
            return;
        };
        self.player.codex.record_item(item.name());
        self.player.stats.items_found += 1;
        self.floor.stats.items_found += 1;
        self.log.push(LogEvent::ItemPickedUp { item: item.name().to_string() });
        self.player.inventory.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{EnemyKind, apple, bread, full_heal_potion, potion, weapon};
    use crate::entities::INVENTORY_CAPACITY;
    use crate::game::test_support::*;

    #[test]
    fn eating_restores_hunger_up_to_the_cap() {
        let mut state = arena_state();
        state.player.hunger = 90;
        state.player.hp = 10;
        state.player.inventory.push(bread());
        assert!(state.use_item(0));
        assert_eq!(state.player.hunger, MAX_HUNGER);
        assert_eq!(state.player.hp, 11);
        assert!(state.player.inventory.is_empty());
        assert_eq!(state.log().last(), Some(&LogEvent::Ate { item: "Bread".into(), poisoned: false }));
    }

    #[test]
    fn invalid_slots_and_materials_are_rejected() {
        let mut state = arena_state();
        assert!(!state.step(Action::UseItem { slot: 0 }).accepted);
        state.player.inventory.push(Item::Material { name: "Iron Ore".into(), value: 5 });
        assert!(!state.use_item(0));
        assert_eq!(state.player.inventory.len(), 1);
        assert!(state.log().is_empty());
    }

    #[test]
    fn potions_apply_their_effects() {
        let mut state = arena_state();
        state.player.hp = 3;
        state.player.inventory = vec![
            full_heal_potion(),
            potion(PotionEffect::Speed { turns: 10 }),
            potion(PotionEffect::Invisibility { turns: 8 }),
        ];
        assert!(state.use_item(0));
        assert_eq!(state.player.hp, state.player.max_hp);
        assert!(state.use_item(0));
        assert!(state.use_item(0));
        assert!(state.player.status_effects.has(StatusKind::Speed));
        assert!(state.player.is_invisible());
        assert_eq!(state.player.stats.potions_used, 3);
    }

    #[test]
    fn explosive_flask_uses_the_shared_kill_path() {
        let mut state = arena_state();
        let target = state.player.pos.offset(1, 0);
        let id = add_enemy(&mut state, EnemyKind::Rat, target);
        state.player.inventory.push(potion(PotionEffect::Explosive { damage: 8 }));
        assert!(state.use_item(0));
        assert!(!state.floor.enemies.contains_key(id));
        assert_eq!(state.player.kills, 1);
    }

    #[test]
    fn weapons_fill_free_hands_then_swap_the_weakest() {
        let mut state = arena_state();
        state.player.inventory = vec![weapon("Dagger", 3), weapon("Mace", 5), weapon("Longsword", 6)];
        assert!(state.use_item(0));
        assert!(state.use_item(0));
        assert!(state.use_item(0));
        assert_eq!(state.player.hands[0], Some(weapon("Longsword", 6)));
        assert_eq!(state.player.hands[1], Some(weapon("Mace", 5)));
        assert_eq!(state.player.inventory, vec![weapon("Dagger", 3)]);
    }

    #[test]
    fn gold_is_banked_and_full_packs_leave_loot_behind() {
        let mut state = arena_state();
        let pos = state.player.pos;
        state.floor.map.place_loot(pos, Item::Valuable { name: "Ruby".into(), gold: 35 });
        state.pick_up_loot();
        assert_eq!(state.player.gold, 35);

        state.player.inventory = vec![apple(); INVENTORY_CAPACITY];
        state.floor.map.place_loot(pos, bread());
        state.pick_up_loot();
        assert!(state.floor.map.loot(pos).is_some());
        assert_eq!(state.log().last(), Some(&LogEvent::InventoryFull { item: "Bread".into() }));
    }
}
