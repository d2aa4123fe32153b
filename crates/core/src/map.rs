//! Sparse coordinate-keyed tile store shared by generation and simulation.
//! This module exists so that every per-coordinate fact (terrain, loot, trap) lives in one
//! typed record. It does not know about rooms, enemies, or concealment rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::items::Item;
use crate::types::{Pos, StatusKind, Tile, TrapKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusApplication {
    pub kind: StatusKind,
    pub turns: u32,
    pub magnitude: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub kind: TrapKind,
    pub damage: i32,
    pub status: Option<StatusApplication>,
    pub hidden: bool,
}

impl Trap {
    pub fn new(kind: TrapKind, floor: u32, hidden: bool) -> Self {
        let depth_bonus = (floor / 3) as i32;
        let (damage, status) = match kind {
            TrapKind::Fire => (
                2 + depth_bonus,
                Some(StatusApplication { kind: StatusKind::Burning, turns: 3, magnitude: 1 }),
            ),
            TrapKind::Poison => (
                1 + depth_bonus,
                Some(StatusApplication { kind: StatusKind::Poison, turns: 4, magnitude: 1 }),
            ),
            TrapKind::Spike => (3 + depth_bonus, None),
            TrapKind::Shock => (
                2 + depth_bonus,
                Some(StatusApplication { kind: StatusKind::Slow, turns: 3, magnitude: 1 }),
            ),
        };
        Self { kind, damage, status, hidden }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub tile: Tile,
    pub loot: Option<Item>,
    pub trap: Option<Trap>,
}

impl Cell {
    pub fn new(tile: Tile) -> Self {
        Self { tile, loot: None, trap: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Pos, Cell)>", into = "Vec<(Pos, Cell)>")]
pub struct SpatialIndex {
    cells: BTreeMap<Pos, Cell>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Missing coordinates are solid rock.
    pub fn tile(&self, pos: Pos) -> Tile {
        self.cells.get(&pos).map_or(Tile::Wall, |cell| cell.tile)
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if tile == Tile::Wall {
            self.cells.remove(&pos);
            return;
        }
        self.cells.entry(pos).and_modify(|cell| cell.tile = tile).or_insert_with(|| Cell::new(tile));
    }

    /// Opens a coordinate as floor unless something is already there.
    pub fn carve(&mut self, pos: Pos) -> bool {
        if self.cells.contains_key(&pos) {
            return false;
        }
        self.cells.insert(pos, Cell::new(Tile::Floor));
        true
    }

    pub fn loot(&self, pos: Pos) -> Option<&Item> {
        self.cells.get(&pos).and_then(|cell| cell.loot.as_ref())
    }

    /// Places loot on an existing open cell that has none yet.
    pub fn place_loot(&mut self, pos: Pos, item: Item) -> bool {
        match self.cells.get_mut(&pos) {
            Some(cell) if cell.loot.is_none() && cell.tile.is_walkable() => {
                cell.loot = Some(item);
                true
            }
            _ => false,
        }
    }

    pub fn take_loot(&mut self, pos: Pos) -> Option<Item> {
        self.cells.get_mut(&pos).and_then(|cell| cell.loot.take())
    }

    pub fn trap(&self, pos: Pos) -> Option<&Trap> {
        self.cells.get(&pos).and_then(|cell| cell.trap.as_ref())
    }

    pub fn place_trap(&mut self, pos: Pos, trap: Trap) -> bool {
        match self.cells.get_mut(&pos) {
            Some(cell) if cell.trap.is_none() && cell.tile.is_walkable() => {
                cell.trap = Some(trap);
                true
            }
            _ => false,
        }
    }

    pub fn take_trap(&mut self, pos: Pos) -> Option<Trap> {
        self.cells.get_mut(&pos).and_then(|cell| cell.trap.take())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn count_tiles(&self, tile: Tile) -> usize {
        self.cells.values().filter(|cell| cell.tile == tile).count()
    }
}

impl From<Vec<(Pos, Cell)>> for SpatialIndex {
    fn from(entries: Vec<(Pos, Cell)>) -> Self {
        Self { cells: entries.into_iter().collect() }
    }
}

impl From<SpatialIndex> for Vec<(Pos, Cell)> {
    fn from(index: SpatialIndex) -> Self {
        index.cells.into_iter().collect()
    }
}
