//! Descending through the trapdoor.
//! This module exists to swap the whole floor while the player carries on unchanged.
//! It does not own how the next floor is laid out; see `mapgen`.

use super::*;

impl RunState {
    /// Regenerates floor `n + 1`. The auto-walk queue is dropped first so no queued
    /// step lands on coordinates of the discarded floor.
    pub(super) fn descend(&mut self) {
        self.auto_walk.clear();
        let next = self.floor.number + 1;
        self.floor = generate_floor(next, &mut self.rng, &mut self.player, &self.difficulty);
        self.player.stats.floors_descended += 1;
        self.log.push(LogEvent::Descended { floor: next });
        debug!(
            "descended to floor {next}: {} rooms, {} enemies",
            self.floor.rooms.len(),
            self.floor.enemies.len()
        );
    }
}
