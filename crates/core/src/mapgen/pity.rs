//! Guarantees that keep an unlucky floor survivable.

use log::debug;

use crate::content::{food, full_heal_potion};
use crate::floor::RoomKind;
use crate::items::Item;

use super::generator::GenContext;
use super::grid::random_free_cell;
use super::progression;

pub(super) fn ensure_food(context: &mut GenContext<'_>) {
    if context.floor.has_loot_matching(Item::is_food) {
        return;
    }
    let item = food(context.rng);
    place_somewhere(context, item);
}

pub(super) fn ensure_full_heal(context: &mut GenContext<'_>) {
    if !progression::needs_full_heal_pity(context.floor.number)
        || context.floor.has_loot_matching(Item::is_full_heal)
    {
        return;
    }
    place_somewhere(context, full_heal_potion());
}

/// Tries every non-start room in a shuffled order, then the start room.
fn place_somewhere(context: &mut GenContext<'_>, item: Item) {
    let mut order: Vec<usize> = (0..context.floor.rooms.len())
        .filter(|&index| context.floor.rooms[index].kind != RoomKind::Start)
        .collect();
    context.rng.shuffle(&mut order);
    order.extend(
        (0..context.floor.rooms.len()).filter(|&index| context.floor.rooms[index].kind == RoomKind::Start),
    );

    for index in order {
        let room = context.floor.rooms[index];
        if let Some(pos) = random_free_cell(&context.floor, &room, context.rng) {
            debug!("floor {}: pity {} placed at ({}, {})", context.floor.number, item.name(), pos.x, pos.y);
            context.floor.map.place_loot(pos, item);
            return;
        }
    }
    debug!("floor {}: nowhere to place pity {}", context.floor.number, item.name());
}
