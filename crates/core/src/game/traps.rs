//! Trap triggering for the player and for enemies.
//! Traps fire once: the trap is removed and the tile settles to plain floor.

use super::*;
use crate::map::Trap;

impl RunState {
    /// Removes the trap at `pos`, keeping the concealed-trap tally in step.
    fn spring_trap(&mut self, pos: Pos) -> Option<Trap> {
        let trap = self.floor.map.take_trap(pos)?;
        if trap.hidden {
            self.floor.hidden_trap_count = self.floor.hidden_trap_count.saturating_sub(1);
        }
        self.floor.map.set_tile(pos, Tile::Floor);
        Some(trap)
    }

    pub(super) fn trigger_player_trap(&mut self) {
        let Some(trap) = self.spring_trap(self.player.pos) else {
            return;
        };
        self.player.stats.traps_triggered += 1;
        self.floor.stats.traps_triggered += 1;
        self.log.push(LogEvent::TrapTriggered {
            kind: trap.kind,
            damage: trap.damage,
            hidden: trap.hidden,
        });
        self.damage_player(trap.damage, DeathCause::Trap(trap.kind));
        if let Some(status) = trap.status {
            self.player.status_effects.apply(status.kind, status.turns, status.magnitude);
            self.log.push(LogEvent::StatusApplied { status: status.kind, turns: status.turns });
        }
    }

    pub(super) fn trigger_enemy_trap(&mut self, id: EnemyId) {
        let Some(pos) = self.floor.enemies.get(id).map(|enemy| enemy.pos) else {
            return;
        };
        let Some(trap) = self.spring_trap(pos) else {
            return;
        };
        let Some(enemy) = self.floor.enemies.get_mut(id) else {
            return;
        };
        if let Some(status) = trap.status {
            enemy.status_effects.apply(status.kind, status.turns, status.magnitude);
        }
        self.log.push(LogEvent::EnemyTriggeredTrap { enemy: enemy.name.clone(), kind: trap.kind });
        self.damage_enemy_by_hazard(id, trap.damage);
    }
}
