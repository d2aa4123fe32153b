//! Corridor graph between rooms: a Prim spanning tree plus distance-weighted loop edges.

use crate::floor::Room;
use crate::map::SpatialIndex;
use crate::rng::DungeonRng;
use crate::types::{Pos, manhattan};

const LOOP_CHANCE: f64 = 0.3;
const WIDE_CORRIDOR_CHANCE: f64 = 0.3;
const MIN_START_EXITS: usize = 2;
const START_INDEX: usize = 0;

/// Decides the corridor graph and carves every edge. Returns the edges in carve order.
pub(super) fn connect_rooms(
    map: &mut SpatialIndex,
    rooms: &[Room],
    rng: &mut DungeonRng,
) -> Vec<(usize, usize)> {
    let mut edges = spanning_tree(rooms);
    add_loop_edges(rooms, &mut edges, rng);
    add_start_exits(rooms, &mut edges);
    for &(from, to) in &edges {
        carve_corridor(map, rooms[from].center(), rooms[to].center(), rng);
    }
    edges
}

fn spanning_tree(rooms: &[Room]) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    if rooms.len() < 2 {
        return edges;
    }

    let mut connected = vec![START_INDEX];
    let mut pending: Vec<usize> = (1..rooms.len()).collect();
    while !pending.is_empty() {
        let mut best: Option<(u32, usize, usize)> = None;
        for &connected_index in &connected {
            let connected_center = rooms[connected_index].center();
            for &pending_index in &pending {
                let distance = manhattan(connected_center, rooms[pending_index].center());
                let candidate = (distance, connected_index, pending_index);
                if best.is_none_or(|current| candidate < current) {
                    best = Some(candidate);
                }
            }
        }
        let Some((_, connected_index, pending_index)) = best else {
            break;
        };
        edges.push((connected_index, pending_index));
        connected.push(pending_index);
        pending.retain(|&index| index != pending_index);
    }
    edges
}

/// Extra edges close loops; nearer pairs are likelier, the farthest pair never links.
fn add_loop_edges(rooms: &[Room], edges: &mut Vec<(usize, usize)>, rng: &mut DungeonRng) {
    let mut pairs = Vec::new();
    for left in 0..rooms.len() {
        for right in (left + 1)..rooms.len() {
            pairs.push((left, right, manhattan(rooms[left].center(), rooms[right].center())));
        }
    }
    let Some(max_distance) = pairs.iter().map(|(_, _, distance)| *distance).max() else {
        return;
    };
    if max_distance == 0 {
        return;
    }

    for (left, right, distance) in pairs {
        if is_linked(edges, left, right) {
            continue;
        }
        let probability = LOOP_CHANCE * (1.0 - f64::from(distance) / f64::from(max_distance));
        if rng.chance(probability) {
            edges.push((left, right));
        }
    }
}

fn add_start_exits(rooms: &[Room], edges: &mut Vec<(usize, usize)>) {
    if rooms.len() <= MIN_START_EXITS {
        return;
    }
    let origin = rooms[START_INDEX].center();
    while degree(edges, START_INDEX) < MIN_START_EXITS {
        let nearest = (1..rooms.len())
            .filter(|&index| !is_linked(edges, START_INDEX, index))
            .min_by_key(|&index| (manhattan(origin, rooms[index].center()), index));
        match nearest {
            Some(index) => edges.push((START_INDEX, index)),
            None => break,
        }
    }
}

fn is_linked(edges: &[(usize, usize)], a: usize, b: usize) -> bool {
    edges.iter().any(|&(from, to)| (from, to) == (a, b) || (from, to) == (b, a))
}

fn degree(edges: &[(usize, usize)], index: usize) -> usize {
    edges.iter().filter(|&&(from, to)| from == index || to == index).count()
}

/// L-shaped corridor; wide corridors get a parallel strip one cell over.
fn carve_corridor(map: &mut SpatialIndex, start: Pos, end: Pos, rng: &mut DungeonRng) {
    let horizontal_first = rng.chance(0.5);
    let wide = rng.chance(WIDE_CORRIDOR_CHANCE);
    let corner = if horizontal_first { Pos::new(end.x, start.y) } else { Pos::new(start.x, end.y) };
    carve_segment(map, start, corner, wide);
    carve_segment(map, corner, end, wide);
    if wide {
        map.carve(corner.offset(1, 1));
    }
}

/// Horizontal runs widen downwards, vertical runs widen rightwards.
fn carve_segment(map: &mut SpatialIndex, from: Pos, to: Pos, wide: bool) {
    carve_line(map, from, to);
    if wide {
        let (dx, dy) = if from.y == to.y { (0, 1) } else { (1, 0) };
        carve_line(map, from.offset(dx, dy), to.offset(dx, dy));
    }
}

fn carve_line(map: &mut SpatialIndex, from: Pos, to: Pos) {
    let (left, right) = (from.x.min(to.x), from.x.max(to.x));
    let (top, bottom) = (from.y.min(to.y), from.y.max(to.y));
    for y in top..=bottom {
        for x in left..=right {
            map.carve(Pos::new(x, y));
        }
    }
}
