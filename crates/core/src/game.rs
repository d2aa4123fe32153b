//! Turn engine for a run.
//! This module exists to own every rule that mutates a `RunState` in response to one action.
//! It does not own floor construction (see `mapgen`) or persistence (see `save_file`).

use log::debug;

use crate::entities::Player;
use crate::items::Item;
use crate::mapgen::{STARTING_FLOOR, generate_floor};
use crate::rng::DungeonRng;
use crate::settings::Difficulty;
use crate::state::{AutoWalk, RunState};
use crate::types::*;

mod ai;
mod auto_walk;
mod combat;
mod engine;
mod floor_transition;
mod hash;
mod interact;
mod items;
mod pathfinding;
mod traps;

#[cfg(test)]
mod test_support;

pub use combat::{AttackRoll, is_combo_milestone, kill_score};
pub use pathfinding::find_path;

impl RunState {
    /// Starts a fresh run: seeds the stream and generates the first floor.
    pub fn new(seed: u32, difficulty: Difficulty) -> Self {
        let mut rng = DungeonRng::new(seed);
        let mut player = Player::new();
        let floor = generate_floor(STARTING_FLOOR, &mut rng, &mut player, &difficulty);
        debug!("run started with seed {seed}");
        Self {
            rng,
            difficulty,
            floor,
            player,
            turn: 0,
            phase: TurnPhase::Idle,
            outcome: RunOutcome::InProgress,
            log: Vec::new(),
            auto_walk: AutoWalk::new(),
            pending_death: None,
        }
    }

    /// Runs one player-initiated turn. Manual input always cancels a pending auto-walk.
    pub fn step(&mut self, action: Action) -> TurnReport {
        self.auto_walk.clear();
        self.run_turn(action)
    }

    /// Buys offer `offer_index` from the shop at `shop_pos`. Does not consume a turn.
    pub fn purchase(&mut self, shop_pos: Pos, offer_index: usize) -> Result<Item, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if chebyshev(self.player.pos, shop_pos) != 1 {
            return Err(GameError::NotAdjacentToShop);
        }
        let Some(shop) = self.floor.shops.iter_mut().find(|shop| shop.pos == shop_pos) else {
            return Err(GameError::NotAdjacentToShop);
        };
        let Some(offer) = shop.stock.get(offer_index) else {
            return Err(GameError::NoSuchOffer);
        };
        if self.player.gold < offer.price {
            return Err(GameError::InsufficientGold);
        }
        if self.player.inventory_full() {
            return Err(GameError::InventoryFull);
        }

        let offer = shop.stock.remove(offer_index);
        self.player.gold -= offer.price;
        self.player.codex.record_item(offer.item.name());
        self.player.inventory.push(offer.item.clone());
        self.log.push(LogEvent::Purchased { item: offer.item.name().to_string(), price: offer.price });
        Ok(offer.item)
    }

    pub(crate) fn player_alive(&self) -> bool {
        self.player.hp > 0
    }

    pub(crate) fn damage_player(&mut self, amount: i32, cause: DeathCause) {
        if amount <= 0 {
            return;
        }
        self.player.hp -= amount;
        self.note_damage_taken(amount, cause);
    }

    /// Bookkeeping for damage already subtracted from the player's hp.
    pub(crate) fn note_damage_taken(&mut self, amount: i32, cause: DeathCause) {
        let amount = u64::from(amount.max(0).unsigned_abs());
        self.player.stats.damage_taken += amount;
        self.floor.stats.damage_taken += amount;
        self.auto_walk.clear();
        if self.player.hp <= 0 && self.pending_death.is_none() {
            self.pending_death = Some(cause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::bread;
    use crate::floor::{Offer, Shop};

    #[test]
    fn new_run_starts_on_the_first_floor_at_the_spawn() {
        let state = RunState::new(42, Difficulty::normal());
        assert_eq!(state.floor.number, STARTING_FLOOR);
        assert_eq!(state.player.pos, Pos::new(0, 0));
        assert_eq!(state.turn, 0);
        assert_eq!(state.phase, TurnPhase::Idle);
        assert!(state.log().is_empty());
    }

    #[test]
    fn purchase_checks_adjacency_gold_and_stock() {
        let mut state = RunState::new(7, Difficulty::normal());
        let shop_pos = state.player.pos.offset(1, 0);
        state.floor.shops.push(Shop {
            pos: shop_pos,
            stock: vec![Offer { item: bread(), price: 10 }],
        });

        assert_eq!(state.purchase(Pos::new(40, 40), 0), Err(GameError::NotAdjacentToShop));
        assert_eq!(state.purchase(shop_pos, 0), Err(GameError::InsufficientGold));
        state.player.gold = 15;
        assert_eq!(state.purchase(shop_pos, 3), Err(GameError::NoSuchOffer));

        let turn = state.turn;
        let bought = state.purchase(shop_pos, 0).expect("affordable offer");
        assert_eq!(bought.name(), "Bread");
        assert_eq!(state.player.gold, 5);
        assert_eq!(state.turn, turn, "shopping is free");
        assert!(state.floor.shops[0].stock.is_empty());
    }

    #[test]
    fn lethal_damage_remembers_the_first_cause() {
        let mut state = RunState::new(7, Difficulty::normal());
        state.player.hp = 2;
        state.damage_player(5, DeathCause::Trap(TrapKind::Spike));
        state.damage_player(5, DeathCause::Starvation);
        assert_eq!(state.pending_death, Some(DeathCause::Trap(TrapKind::Spike)));
    }
}
