//! Player movement: bumps, smashing, reveals, and stairs.

use super::*;
use crate::content::random_loot;
use crate::game::pathfinding::cuts_corner;

const SMASH_LOOT_CHANCE: f64 = 0.25;

impl RunState {
    pub(super) fn player_move(&mut self, dx: i32, dy: i32) -> Option<PlayerActed> {
        let direction = Direction::from_delta(dx, dy)?;
        let from = self.player.pos;
        let target = from.step(direction);

        if let Some(id) = self.floor.enemy_at(target) {
            self.player_attack(id);
            return Some(PlayerActed::Stayed);
        }

        let tile = self.floor.map.tile(target);
        if tile.is_smashable() && !self.floor.hides(target) {
            self.smash_prop(target, tile);
            return Some(PlayerActed::Stayed);
        }

        if !self.floor.is_walkable(target) {
            return None;
        }
        if cuts_corner(from, direction, |pos| self.floor.is_walkable(pos)) {
            return None;
        }

        self.player.pos = target;
        if self.floor.is_false_wall(target) {
            self.reveal_hidden_area();
        }
        match tile {
            Tile::Trapdoor => {
                self.descend();
                Some(PlayerActed::Descended)
            }
            Tile::Entrance | Tile::Upstairs => {
                self.log.push(LogEvent::ExitSealed);
                Some(PlayerActed::Moved)
            }
            _ => Some(PlayerActed::Moved),
        }
    }

    fn smash_prop(&mut self, pos: Pos, tile: Tile) {
        self.floor.map.set_tile(pos, Tile::Floor);
        self.log.push(LogEvent::PropSmashed { tile, pos });
        if self.rng.chance(SMASH_LOOT_CHANCE) {
            let item = random_loot(self.floor.number, &mut self.rng);
            let name = item.name().to_string();
            if self.floor.map.place_loot(pos, item) {
                self.log.push(LogEvent::LootDropped { item: name, pos });
            }
        }
    }

    /// Entering any false wall opens the whole area for good and sends the mouse away.
    fn reveal_hidden_area(&mut self) {
        let Some(area) = self.floor.hidden_area.as_mut() else {
            return;
        };
        area.revealed = true;
        self.floor.mouse = None;
        self.log.push(LogEvent::HiddenAreaRevealed);
        debug!("hidden area revealed on floor {}", self.floor.number);
    }
}
