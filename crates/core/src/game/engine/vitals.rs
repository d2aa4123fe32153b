//! Status ticks, hunger, and natural regeneration.

use super::*;

pub(super) const HUNGER_INTERVAL: u64 = 4;
pub(super) const HUNGRY_THRESHOLD: u32 = 20;
pub(super) const REGEN_INTERVAL: u64 = 10;
pub(super) const REGEN_MIN_HUNGER: u32 = 40;
const STARVATION_DAMAGE: i32 = 1;

impl RunState {
    pub(super) fn tick_statuses(&mut self) {
        if self.player_alive() {
            let max_hp = self.player.max_hp;
            let report = self.player.status_effects.tick(&mut self.player.hp, max_hp);
            for (status, damage) in report.damage {
                self.log.push(LogEvent::StatusDamage { status, damage });
                self.note_damage_taken(damage, DeathCause::Status(status));
            }
            if report.healed > 0 {
                self.log.push(LogEvent::Regenerated { amount: report.healed });
            }
            for status in report.expired {
                self.log.push(LogEvent::StatusExpired { status });
            }
        }

        let mut dead = Vec::new();
        for (id, enemy) in &mut self.floor.enemies {
            let max_hp = enemy.max_hp;
            enemy.status_effects.tick(&mut enemy.hp, max_hp);
            if !enemy.is_alive() {
                dead.push(id);
            }
        }
        for id in dead {
            if let Some(enemy) = self.floor.enemies.remove(id) {
                self.log.push(LogEvent::EnemyDied { enemy: enemy.name });
            }
        }

        self.floor.hint_flash_turns = self.floor.hint_flash_turns.saturating_sub(1);
    }

    pub(super) fn tick_hunger_and_regen(&mut self) {
        if self.turn % HUNGER_INTERVAL == 0 && self.player.hunger > 0 {
            self.player.hunger -= 1;
            if self.player.hunger == HUNGRY_THRESHOLD {
                self.log.push(LogEvent::Hungry);
            }
        }

        if self.player.hunger == 0 {
            self.log.push(LogEvent::Starving);
            self.damage_player(STARVATION_DAMAGE, DeathCause::Starvation);
            return;
        }

        if self.turn % REGEN_INTERVAL == 0
            && self.player.hunger >= REGEN_MIN_HUNGER
            && self.player.hp < self.player.max_hp
        {
            let amount = self.player.heal(1);
            self.log.push(LogEvent::Regenerated { amount });
        }
    }
}
