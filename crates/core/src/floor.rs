//! Per-floor state: the sparse map plus everything that lives and dies with it.
//! This module exists so floor regeneration can discard one value wholesale.
//! It does not own turn sequencing or generation policy.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::entities::{Enemy, Mouse};
use crate::items::Item;
use crate::map::SpatialIndex;
use crate::types::{EnemyId, Pos, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Start,
    Enemy,
    Boss,
    Treasure,
    Trap,
    Shop,
    Shrine,
}

/// Rectangle of floor cells `x..x+width`, `y..y+height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub kind: RoomKind,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32, kind: RoomKind) -> Self {
        Self { x, y, width, height, kind }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(&self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    /// True when `pos` is inside the room and not on its outermost ring of cells.
    pub fn contains_strictly(&self, pos: Pos) -> bool {
        pos.x > self.x && pos.x < self.right() && pos.y > self.y && pos.y < self.bottom()
    }

    pub fn expanded(&self, margin: i32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
            kind: self.kind,
        }
    }

    pub fn intersects(&self, other: &Room) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        let (x, y, right, bottom) = (self.x, self.y, self.right(), self.bottom());
        (y..=bottom).flat_map(move |row| (x..=right).map(move |column| Pos { y: row, x: column }))
    }
}

/// Concealed corridor and room reachable only through its false walls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenArea {
    pub tiles: BTreeSet<Pos>,
    pub false_walls: BTreeSet<Pos>,
    pub revealed: bool,
}

impl HiddenArea {
    /// Cells that still behave as solid wall.
    pub fn conceals(&self, pos: Pos) -> bool {
        !self.revealed && self.tiles.contains(&pos) && !self.false_walls.contains(&pos)
    }

    /// Cells that still look like wall, false walls included.
    pub fn hides(&self, pos: Pos) -> bool {
        !self.revealed && self.tiles.contains(&pos)
    }

    pub fn is_false_wall(&self, pos: Pos) -> bool {
        !self.revealed && self.false_walls.contains(&pos)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub item: Item,
    pub price: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub pos: Pos,
    pub stock: Vec<Offer>,
}

/// Write-only per-floor telemetry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorStats {
    pub kills: u32,
    pub items_found: u32,
    pub traps_triggered: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FloorState {
    pub number: u32,
    pub map: SpatialIndex,
    pub rooms: Vec<Room>,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub hidden_area: Option<HiddenArea>,
    pub mouse: Option<Mouse>,
    pub hint_flash_turns: u8,
    pub hidden_trap_count: u32,
    pub exit: Pos,
    pub trapdoor: Option<Pos>,
    pub shops: Vec<Shop>,
    pub used_shrines: BTreeSet<Pos>,
    pub stats: FloorStats,
}

/// `SlotMap` has no `PartialEq`, so enemies compare by their live `(id, enemy)` pairs.
impl PartialEq for FloorState {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            number,
            map,
            rooms,
            enemies,
            hidden_area,
            mouse,
            hint_flash_turns,
            hidden_trap_count,
            exit,
            trapdoor,
            shops,
            used_shrines,
            stats,
        } = self;
        *number == other.number
            && *map == other.map
            && *rooms == other.rooms
            && enemies.iter().eq(other.enemies.iter())
            && *hidden_area == other.hidden_area
            && *mouse == other.mouse
            && *hint_flash_turns == other.hint_flash_turns
            && *hidden_trap_count == other.hidden_trap_count
            && *exit == other.exit
            && *trapdoor == other.trapdoor
            && *shops == other.shops
            && *used_shrines == other.used_shrines
            && *stats == other.stats
    }
}

impl FloorState {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            map: SpatialIndex::new(),
            rooms: Vec::new(),
            enemies: SlotMap::with_key(),
            hidden_area: None,
            mouse: None,
            hint_flash_turns: 0,
            hidden_trap_count: 0,
            exit: Pos::default(),
            trapdoor: None,
            shops: Vec::new(),
            used_shrines: BTreeSet::new(),
            stats: FloorStats::default(),
        }
    }

    pub fn start_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.kind == RoomKind::Start)
    }

    pub fn conceals(&self, pos: Pos) -> bool {
        self.hidden_area.as_ref().is_some_and(|area| area.conceals(pos))
    }

    pub fn hides(&self, pos: Pos) -> bool {
        self.hidden_area.as_ref().is_some_and(|area| area.hides(pos))
    }

    pub fn is_false_wall(&self, pos: Pos) -> bool {
        self.hidden_area.as_ref().is_some_and(|area| area.is_false_wall(pos))
    }

    pub fn hidden_area_active(&self) -> bool {
        self.hidden_area.as_ref().is_some_and(|area| !area.revealed)
    }

    /// What a renderer may show at `pos`: concealed cells, false walls included, read as wall.
    pub fn apparent_tile(&self, pos: Pos) -> Tile {
        if self.hides(pos) { Tile::Wall } else { self.map.tile(pos) }
    }

    /// Terrain test for the player: false walls are enterable, the concealed interior is not.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.map.tile(pos).is_walkable() && !self.conceals(pos)
    }

    /// Terrain test for enemies, which never find the hidden area on their own.
    pub fn is_walkable_for_enemy(&self, pos: Pos) -> bool {
        self.map.tile(pos).is_walkable() && !self.hides(pos)
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<EnemyId> {
        self.enemies.iter().find(|(_, enemy)| enemy.pos == pos).map(|(id, _)| id)
    }

    pub fn shop_at(&self, pos: Pos) -> Option<&Shop> {
        self.shops.iter().find(|shop| shop.pos == pos)
    }

    pub fn has_loot_matching(&self, predicate: impl Fn(&Item) -> bool) -> bool {
        self.map.iter().any(|(_, cell)| cell.loot.as_ref().is_some_and(&predicate))
    }
}
