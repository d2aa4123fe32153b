//! Per-room contents: enemies, loot, clutter, and the interactable props.

use crate::content::{
    EnemyKind, floor_enemy_pool, food, full_heal_potion, price_of, primary_enemy, random_loot,
    random_potion, trinket, weapon_for_floor,
};
use crate::entities::Enemy;
use crate::floor::{Offer, Room, RoomKind, Shop};
use crate::items::Item;
use crate::settings::Difficulty;
use crate::types::{EnemyId, Pos, Tile};

use super::generator::GenContext;
use super::grid::{is_free, is_prop_safe, prop_cell, random_free_cell};
use super::hazards::random_trap;
use super::progression;

const PRIMARY_ENEMY_CHANCE: f64 = 0.7;
const ENEMY_ROOM_LOOT_CHANCE: f64 = 0.35;
const GRASS_CHANCE: f64 = 0.4;
const TREASURE_GUARDIAN_CHANCE: f64 = 0.5;
const BLACKSMITH_CHANCE: f64 = 0.5;
const SHOP_STOCK: usize = 3;
const BOSS_LOOT: usize = 2;

pub(super) fn populate_rooms(context: &mut GenContext<'_>) {
    for index in 0..context.floor.rooms.len() {
        let room = context.floor.rooms[index];
        match room.kind {
            RoomKind::Start => furnish_start_room(context, &room),
            RoomKind::Enemy => populate_enemy_room(context, &room),
            RoomKind::Boss => populate_boss_room(context, &room),
            RoomKind::Treasure => populate_treasure_room(context, &room),
            RoomKind::Trap => populate_trap_room(context, &room),
            RoomKind::Shop => furnish_shop(context, &room),
            RoomKind::Shrine => furnish_shrine(context, &room),
        }
    }
}

/// Bounty board on every floor, and a campfire once the run has left the surface.
fn furnish_start_room(context: &mut GenContext<'_>, room: &Room) {
    let bottom_row = room.bottom() - 1;
    if context.floor_number() > 1 {
        place_fixed_prop(context, Pos::new(room.x + 1, bottom_row), Tile::Campfire);
    }
    place_fixed_prop(context, Pos::new(room.right() - 1, bottom_row), Tile::BountyBoard);
}

fn place_fixed_prop(context: &mut GenContext<'_>, pos: Pos, tile: Tile) {
    if is_prop_safe(&context.floor, pos) {
        context.floor.map.set_tile(pos, tile);
    }
}

fn populate_enemy_room(context: &mut GenContext<'_>, room: &Room) {
    scatter_grass(context, room);
    place_clutter(context, room);

    let floor_number = context.floor_number();
    let count = context.rng.range(1, progression::enemies_per_room_max(floor_number));
    let pool = floor_enemy_pool(floor_number);
    for _ in 0..count {
        let kind = if context.rng.chance(PRIMARY_ENEMY_CHANCE) { pool[0] } else { pool[1] };
        let Some(pos) = random_free_cell(&context.floor, room, context.rng) else {
            break;
        };
        spawn_enemy(context, kind, pos);
    }

    let loot_chance = ENEMY_ROOM_LOOT_CHANCE * context.difficulty.loot_mult;
    if context.rng.chance(loot_chance) {
        let item = random_loot(floor_number, context.rng);
        drop_loot(context, room, item);
    }
}

fn scatter_grass(context: &mut GenContext<'_>, room: &Room) {
    if !context.rng.chance(GRASS_CHANCE) {
        return;
    }
    let cells: Vec<Pos> = room.cells().collect();
    let patches = context.rng.range(2, 6);
    for _ in 0..patches {
        if let Some(&pos) = context.rng.pick(&cells)
            && context.floor.map.tile(pos) == Tile::Floor
        {
            context.floor.map.set_tile(pos, Tile::Grass);
        }
    }
}

fn place_clutter(context: &mut GenContext<'_>, room: &Room) {
    let count = context.rng.range(0, 2);
    for _ in 0..count {
        let tile = if context.rng.chance(0.5) { Tile::Crate } else { Tile::Barrel };
        if let Some(pos) = prop_cell(&context.floor, room, None, context.rng) {
            context.floor.map.set_tile(pos, tile);
        }
    }
}

fn populate_boss_room(context: &mut GenContext<'_>, room: &Room) {
    let center = room.center();
    let pos = if is_free(&context.floor, center) {
        Some(center)
    } else {
        random_free_cell(&context.floor, room, context.rng)
    };
    if let Some(pos) = pos {
        let kind = primary_enemy(context.floor_number());
        let boss = build_enemy(context, kind, pos).into_boss();
        context.floor.enemies.insert(boss);
    }
    for _ in 0..BOSS_LOOT {
        let item = random_loot(context.floor_number(), context.rng);
        drop_loot(context, room, item);
    }
}

fn populate_treasure_room(context: &mut GenContext<'_>, room: &Room) {
    let base = context.rng.range(2, 4) as usize;
    let count = Difficulty::scale_count(base, context.difficulty.loot_mult);
    for _ in 0..count {
        let item = random_loot(context.floor_number(), context.rng);
        drop_loot(context, room, item);
    }
    if context.rng.chance(TREASURE_GUARDIAN_CHANCE)
        && let Some(pos) = random_free_cell(&context.floor, room, context.rng)
    {
        let kind = primary_enemy(context.floor_number());
        spawn_enemy(context, kind, pos);
    }
}

fn populate_trap_room(context: &mut GenContext<'_>, room: &Room) {
    let base = context.rng.range(3, 5) as usize;
    let count = Difficulty::scale_count(base, context.difficulty.hazard_mult);
    for _ in 0..count {
        let Some(pos) = random_free_cell(&context.floor, room, context.rng) else {
            break;
        };
        let trap = random_trap(context.floor_number(), context.rng);
        context.floor.map.place_trap(pos, trap);
    }
    let reward = random_loot(context.floor_number(), context.rng);
    drop_loot(context, room, reward);
}

fn furnish_shop(context: &mut GenContext<'_>, room: &Room) {
    if let Some(pos) = prop_cell(&context.floor, room, Some(room.center()), context.rng) {
        context.floor.map.set_tile(pos, Tile::Shop);
        let floor_number = context.floor_number();
        let stock = (0..SHOP_STOCK)
            .map(|_| {
                let item = shop_item(floor_number, context);
                let price = price_of(&item, floor_number);
                Offer { item, price }
            })
            .collect();
        context.floor.shops.push(Shop { pos, stock });
    }
    if context.rng.chance(BLACKSMITH_CHANCE)
        && let Some(pos) = prop_cell(&context.floor, room, None, context.rng)
    {
        context.floor.map.set_tile(pos, Tile::Blacksmith);
    }
}

fn shop_item(floor_number: u32, context: &mut GenContext<'_>) -> Item {
    match context.rng.range(0, 4) {
        0 => weapon_for_floor(floor_number, context.rng),
        1 => random_potion(context.rng),
        2 => trinket(context.rng),
        3 => food(context.rng),
        _ => full_heal_potion(),
    }
}

fn furnish_shrine(context: &mut GenContext<'_>, room: &Room) {
    if let Some(pos) = prop_cell(&context.floor, room, Some(room.center()), context.rng) {
        context.floor.map.set_tile(pos, Tile::Shrine);
    }
}

fn build_enemy(context: &GenContext<'_>, kind: EnemyKind, pos: Pos) -> Enemy {
    let floor_number = context.floor_number();
    Enemy::spawn(
        kind,
        pos,
        progression::enemy_hp_mult(floor_number, context.difficulty),
        progression::enemy_dmg_mult(floor_number, context.difficulty),
    )
}

fn spawn_enemy(context: &mut GenContext<'_>, kind: EnemyKind, pos: Pos) -> EnemyId {
    let enemy = build_enemy(context, kind, pos);
    context.floor.enemies.insert(enemy)
}

/// Loot goes on a free cell; if the room has none left the item is skipped.
fn drop_loot(context: &mut GenContext<'_>, room: &Room, item: Item) {
    if let Some(pos) = random_free_cell(&context.floor, room, context.rng) {
        context.floor.map.place_loot(pos, item);
    }
}
