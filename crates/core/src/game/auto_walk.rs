//! Queued multi-turn walking, drained one step per host update.
//! This module exists so long walks are plain turns that can be cancelled between any two of them.
//! It does not own path search; see `pathfinding`.

use super::*;
use crate::game::pathfinding::{auto_walk_passable, cuts_corner, find_path};

impl RunState {
    /// Replaces the queue with a path to `target`. Returns false, leaving the queue empty,
    /// when no path exists or the run is over.
    pub fn plan_auto_walk(&mut self, target: Pos) -> bool {
        self.auto_walk.clear();
        if self.is_over() {
            return false;
        }
        let Some(steps) = find_path(&self.floor, self.player.pos, target) else {
            return false;
        };
        debug!("auto-walk planned {} steps to {target:?}", steps.len());
        self.auto_walk.extend(steps);
        !self.auto_walk.is_empty()
    }

    /// Takes the next queued step as a full turn. `None` once the queue is empty.
    /// A step that is no longer open, or that something now occupies, cancels the walk
    /// without spending a turn.
    pub fn auto_walk_tick(&mut self) -> Option<TurnReport> {
        let direction = self.auto_walk.pop_front()?;
        if !self.auto_walk_step_open(direction) {
            debug!("auto-walk blocked at {:?} heading {direction:?}", self.player.pos);
            self.auto_walk.clear();
            return Some(TurnReport::rejected());
        }
        Some(self.run_turn(Action::step(direction)))
    }

    fn auto_walk_step_open(&self, direction: Direction) -> bool {
        let from = self.player.pos;
        let floor = &self.floor;
        auto_walk_passable(floor, from.step(direction))
            && !cuts_corner(from, direction, |pos| floor.is_walkable(pos) && !floor.hides(pos))
    }

    pub fn cancel_auto_walk(&mut self) {
        self.auto_walk.clear();
    }
}
