//! Bump-free interactions with adjacent props.

use super::*;
use crate::content::{get_enemy_stats, primary_enemy};
use crate::entities::Bounty;

pub const BOUNTY_KILLS: u32 = 3;
pub const BOUNTY_REWARD_PER_FLOOR: u32 = 25;
pub const FORGE_BONUS: i32 = 2;
pub const MAX_FORGE_TIER: u8 = 3;

impl RunState {
    /// Uses the first adjacent prop in `Direction::ALL` order. Returns false when there is
    /// nothing to use, which rejects the turn.
    pub(super) fn interact(&mut self) -> bool {
        let origin = self.player.pos;
        let target = Direction::ALL.into_iter().map(|direction| origin.step(direction)).find(|pos| {
            self.floor.map.tile(*pos).is_interactable() && !self.floor.hides(*pos)
        });
        let Some(pos) = target else {
            return false;
        };

        match self.floor.map.tile(pos) {
            Tile::Campfire => self.use_campfire(),
            Tile::Shrine => self.use_shrine(pos),
            Tile::BountyBoard => self.use_bounty_board(),
            Tile::Blacksmith => self.use_blacksmith(),
            Tile::Shop => self.log.push(LogEvent::ShopOpened { pos }),
            _ => return false,
        }
        true
    }

    fn use_campfire(&mut self) {
        let mut count = 0;
        for item in &mut self.player.inventory {
            if let Some(cooked) = item.cooked() {
                *item = cooked;
                count += 1;
            }
        }
        if count == 0 {
            self.log.push(LogEvent::CampfireNothingToCook);
        } else {
            self.log.push(LogEvent::FoodCooked { count });
        }
    }

    fn use_shrine(&mut self, pos: Pos) {
        if !self.floor.used_shrines.insert(pos) {
            self.log.push(LogEvent::ShrineSpent);
            return;
        }
        self.player.hp = self.player.max_hp;
        self.player.status_effects.remove(StatusKind::Burning);
        self.player.status_effects.remove(StatusKind::Poison);
        self.log.push(LogEvent::ShrineBlessed);
    }

    fn use_bounty_board(&mut self) {
        if self.player.bounty.is_some() {
            self.log.push(LogEvent::BountyAlreadyActive);
            return;
        }
        let target = primary_enemy(self.floor.number);
        let reward = BOUNTY_REWARD_PER_FLOOR * self.floor.number;
        self.player.bounty = Some(Bounty { target, required: BOUNTY_KILLS, progress: 0, reward });
        self.log.push(LogEvent::BountyAccepted {
            target: get_enemy_stats(target).name.to_string(),
            required: BOUNTY_KILLS,
            reward,
        });
    }

    /// Spends the first material in the pack on the best held weapon below the tier cap.
    fn use_blacksmith(&mut self) {
        let Some(material) = self.player.inventory.iter().position(|item| matches!(item, Item::Material { .. }))
        else {
            self.log.push(LogEvent::BlacksmithNeedsMaterial);
            return;
        };
        let forgeable = self
            .player
            .best_weapon_slot()
            .filter(|slot| {
                matches!(self.player.hands[*slot], Some(Item::Weapon { forged, .. }) if forged < MAX_FORGE_TIER)
            });
        let Some(slot) = forgeable else {
            self.log.push(LogEvent::NothingToForge);
            return;
        };
        let Some(Item::Weapon { name, max_damage, forged }) = self.player.hands[slot].as_mut() else {
            return;
        };
        self.player.inventory.remove(material);
        *max_damage += FORGE_BONUS;
        *forged += 1;
        self.log.push(LogEvent::WeaponForged { item: name.clone(), tier: *forged });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{EnemyKind, raw_rat_meat, weapon};
    use crate::game::test_support::*;

    fn with_prop(tile: Tile) -> RunState {
        let mut state = arena_state();
        state.floor.map.set_tile(state.player.pos.offset(0, -1), tile);
        state
    }

    #[test]
    fn nothing_adjacent_rejects_the_turn() {
        let mut state = arena_state();
        let report = state.step(Action::Interact);
        assert!(!report.accepted);
        assert_eq!(state.turn, 0);
        assert!(state.log().is_empty());
    }

    #[test]
    fn campfire_cooks_every_raw_food() {
        let mut state = with_prop(Tile::Campfire);
        state.player.inventory = vec![raw_rat_meat(), raw_rat_meat()];
        assert!(state.interact());
        assert!(state.player.inventory.iter().all(|item| !item.is_raw_food()));
        assert_eq!(state.log().last(), Some(&LogEvent::FoodCooked { count: 2 }));
    }

    #[test]
    fn shrine_heals_once_per_floor() {
        let mut state = with_prop(Tile::Shrine);
        state.player.hp = 4;
        state.player.status_effects.add_poison(5, 1);
        assert!(state.interact());
        assert_eq!(state.player.hp, state.player.max_hp);
        assert!(!state.player.status_effects.has(StatusKind::Poison));

        state.player.hp = 4;
        assert!(state.interact());
        assert_eq!(state.player.hp, 4);
        assert_eq!(state.log().last(), Some(&LogEvent::ShrineSpent));
    }

    #[test]
    fn bounty_board_hands_out_one_bounty() {
        let mut state = with_prop(Tile::BountyBoard);
        assert!(state.interact());
        assert_eq!(
            state.player.bounty,
            Some(Bounty { target: EnemyKind::Rat, required: 3, progress: 0, reward: 25 })
        );
        assert!(state.interact());
        assert_eq!(state.log().last(), Some(&LogEvent::BountyAlreadyActive));
    }

    #[test]
    fn blacksmith_forges_the_best_weapon_up_to_the_cap() {
        let mut state = with_prop(Tile::Blacksmith);
        state.player.hands = [Some(weapon("Dagger", 3)), Some(weapon("Mace", 5))];
        assert!(state.interact());
        assert_eq!(state.log().last(), Some(&LogEvent::BlacksmithNeedsMaterial));

        state.player.inventory = vec![Item::Material { name: "Iron Ore".into(), value: 5 }; 4];
        for _ in 0..4 {
            assert!(state.interact());
        }
        assert_eq!(
            state.player.hands[1],
            Some(Item::Weapon { name: "Mace".into(), max_damage: 11, forged: 3 })
        );
        assert_eq!(state.player.inventory.len(), 1);
        assert_eq!(state.log().last(), Some(&LogEvent::NothingToForge));
    }

    #[test]
    fn shop_interaction_only_opens_the_counter() {
        let mut state = with_prop(Tile::Shop);
        let shop = state.player.pos.offset(0, -1);
        let report = state.step(Action::Interact);
        assert!(report.accepted);
        assert!(state.log().contains(&LogEvent::ShopOpened { pos: shop }));
    }
}
