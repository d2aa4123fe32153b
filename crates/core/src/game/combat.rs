//! Attack resolution, kill bookkeeping, and drops.
//! This module exists so melee and explosions share one scoring path.
//! It does not own movement or the decision to attack.

use super::*;
use crate::content::{EnemyKind, random_potion, raw_rat_meat};

pub const PLAYER_MISS_CHANCE: f64 = 0.05;
pub const PLAYER_CRIT_CHANCE: f64 = 0.10;
pub const ENEMY_CRIT_CHANCE: f64 = 0.05;
pub const INVISIBLE_DODGE_CHANCE: f64 = 0.8;

const RAT_MEAT_CHANCE: f64 = 0.2;
const POTION_DROP_CHANCE: f64 = 0.05;
const COMBO_POTION_DROP_CHANCE: f64 = 0.15;
const COMBO_DROP_THRESHOLD: u32 = 3;

/// One attack's dice, rolled before any toughness is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackRoll {
    pub raw: i32,
    pub missed: bool,
    pub crit: bool,
}

impl AttackRoll {
    /// Damage roll, then the flat miss roll, then the crit roll if the swing connected.
    pub fn player(max_damage: i32, rng: &mut DungeonRng) -> Self {
        let raw = rng.triangular_int(0, max_damage);
        let missed = rng.chance(PLAYER_MISS_CHANCE);
        let crit = !missed && rng.chance(PLAYER_CRIT_CHANCE);
        Self { raw, missed, crit }
    }

    pub fn enemy(max_damage: i32, rng: &mut DungeonRng) -> Self {
        let raw = rng.triangular_int(0, max_damage);
        let crit = rng.chance(ENEMY_CRIT_CHANCE);
        Self { raw, missed: false, crit }
    }

    /// Player crits double the roll.
    pub fn player_damage(self, toughness: i32) -> i32 {
        if self.missed {
            return 0;
        }
        let damage = if self.crit { self.raw * 2 } else { self.raw };
        (damage - toughness).max(0)
    }

    /// Enemy crits add half again, rounded down.
    pub fn enemy_damage(self, toughness: i32) -> i32 {
        let damage = if self.crit { (f64::from(self.raw) * 1.5).floor() as i32 } else { self.raw };
        (damage - toughness).max(0)
    }
}

pub fn kill_score(pre_death_hp: i32, dealt: i32, combo: u32) -> u64 {
    let base = u64::from((pre_death_hp + dealt).max(0).unsigned_abs());
    base * 10 * (1 + u64::from(combo / 3))
}

pub fn is_combo_milestone(combo: u32) -> bool {
    combo == 3 || (combo >= 5 && combo % 5 == 0)
}

impl RunState {
    pub(super) fn player_attack(&mut self, id: EnemyId) {
        let Some(toughness) = self.floor.enemies.get(id).map(|enemy| enemy.toughness) else {
            return;
        };
        let roll = AttackRoll::player(self.player.damage(), &mut self.rng);
        self.apply_player_hit(id, roll.player_damage(toughness), roll.crit);
    }

    /// Applies `dealt` damage from the player to one enemy. Anything short of a kill
    /// breaks the combo.
    pub(crate) fn apply_player_hit(&mut self, id: EnemyId, dealt: i32, crit: bool) {
        let Some(enemy) = self.floor.enemies.get_mut(id) else {
            return;
        };
        let name = enemy.name.clone();
        if dealt <= 0 {
            self.player.combo = 0;
            self.log.push(LogEvent::PlayerMissed { enemy: name });
            return;
        }

        let pre_death_hp = enemy.hp;
        enemy.hp -= dealt;
        let lethal = !enemy.is_alive();
        self.record_damage_dealt(dealt);
        self.log.push(LogEvent::PlayerHit { enemy: name, damage: dealt, crit });
        if lethal {
            self.kill_enemy(id, pre_death_hp, dealt);
        } else {
            self.player.combo = 0;
        }
    }

    fn record_damage_dealt(&mut self, dealt: i32) {
        let dealt = u64::from(dealt.max(0).unsigned_abs());
        self.player.stats.damage_dealt += dealt;
        self.floor.stats.damage_dealt += dealt;
    }

    fn kill_enemy(&mut self, id: EnemyId, pre_death_hp: i32, dealt: i32) {
        let Some(enemy) = self.floor.enemies.remove(id) else {
            return;
        };
        self.player.kills += 1;
        self.player.stats.kills += 1;
        self.floor.stats.kills += 1;
        self.player.combo += 1;
        self.player.stats.max_combo = self.player.stats.max_combo.max(self.player.combo);

        let gained = kill_score(pre_death_hp, dealt, self.player.combo);
        self.player.score += gained;
        self.player.codex.record_kill(&enemy.name);
        self.log.push(LogEvent::EnemySlain { enemy: enemy.name.clone(), score: gained });
        if enemy.boss {
            self.log.push(LogEvent::BossSlain { enemy: enemy.name.clone() });
        }
        if is_combo_milestone(self.player.combo) {
            self.log.push(LogEvent::ComboMilestone { combo: self.player.combo });
        }

        self.advance_bounty(enemy.kind);
        self.roll_kill_drop(enemy.kind, enemy.pos);
    }

    /// At most one drop per kill. A rat that misses its meat roll still gets the potion roll.
    fn roll_kill_drop(&mut self, kind: EnemyKind, pos: Pos) {
        let drop = if kind == EnemyKind::Rat && self.rng.chance(RAT_MEAT_CHANCE) {
            Some(raw_rat_meat())
        } else {
            let chance = if self.player.combo >= COMBO_DROP_THRESHOLD {
                COMBO_POTION_DROP_CHANCE
            } else {
                POTION_DROP_CHANCE
            };
            if self.rng.chance(chance) { Some(random_potion(&mut self.rng)) } else { None }
        };
        if let Some(item) = drop {
            let name = item.name().to_string();
            if self.floor.map.place_loot(pos, item) {
                self.log.push(LogEvent::LootDropped { item: name, pos });
            }
        }
    }

    fn advance_bounty(&mut self, kind: EnemyKind) {
        let Some(bounty) = self.player.bounty.as_mut() else {
            return;
        };
        if bounty.target != kind || bounty.progress >= bounty.required {
            return;
        }
        bounty.progress += 1;
        self.log.push(LogEvent::BountyProgress { progress: bounty.progress, required: bounty.required });
        if bounty.progress == bounty.required {
            let reward = bounty.reward;
            self.player.gold += reward;
            self.player.bounty = None;
            self.log.push(LogEvent::BountyCompleted { reward });
        }
    }

    pub(super) fn enemy_attack(&mut self, id: EnemyId) {
        let Some((name, max_damage)) =
            self.floor.enemies.get(id).map(|enemy| (enemy.name.clone(), enemy.dmg))
        else {
            return;
        };
        if self.player.is_invisible() && self.rng.chance(INVISIBLE_DODGE_CHANCE) {
            self.log.push(LogEvent::EnemyMissed { enemy: name });
            return;
        }
        let roll = AttackRoll::enemy(max_damage, &mut self.rng);
        self.apply_enemy_hit(&name, roll.enemy_damage(self.player.toughness()), roll.crit);
    }

    /// Applies final melee damage to the player. Any real hit breaks the combo.
    pub(crate) fn apply_enemy_hit(&mut self, enemy: &str, damage: i32, crit: bool) {
        if damage <= 0 {
            self.log.push(LogEvent::EnemyMissed { enemy: enemy.to_string() });
            return;
        }
        self.player.combo = 0;
        self.log.push(LogEvent::EnemyHit { enemy: enemy.to_string(), damage, crit });
        self.damage_player(damage, DeathCause::Enemy(enemy.to_string()));
    }

    /// Hits every enemy within one tile at once. Kills are scored in id order, and a
    /// survivor breaks the combo after the kills are counted.
    pub(super) fn explode(&mut self, damage: i32) {
        let origin = self.player.pos;
        let targets: Vec<EnemyId> = self
            .floor
            .enemies
            .iter()
            .filter(|(_, enemy)| chebyshev(enemy.pos, origin) <= 1)
            .map(|(id, _)| id)
            .collect();
        if targets.is_empty() {
            self.log.push(LogEvent::ExplosionFizzled);
            return;
        }

        let mut kills = Vec::new();
        let mut survivors = false;
        for id in targets {
            let Some(enemy) = self.floor.enemies.get_mut(id) else {
                continue;
            };
            let pre_death_hp = enemy.hp;
            enemy.hp -= damage;
            let name = enemy.name.clone();
            if enemy.is_alive() {
                survivors = true;
            } else {
                kills.push((id, pre_death_hp));
            }
            self.record_damage_dealt(damage);
            self.log.push(LogEvent::PlayerHit { enemy: name, damage, crit: false });
        }
        for (id, pre_death_hp) in kills {
            self.kill_enemy(id, pre_death_hp, damage);
        }
        if survivors {
            self.player.combo = 0;
        }
    }

    /// Trap and status damage. Such deaths are logged but earn nothing.
    pub(super) fn damage_enemy_by_hazard(&mut self, id: EnemyId, damage: i32) {
        let Some(enemy) = self.floor.enemies.get_mut(id) else {
            return;
        };
        enemy.hp -= damage;
        if !enemy.is_alive()
            && let Some(dead) = self.floor.enemies.remove(id)
        {
            self.log.push(LogEvent::EnemyDied { enemy: dead.name });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Bounty;
    use crate::game::test_support::*;

    #[test]
    fn enemy_hit_for_three_takes_player_from_ten_to_seven() {
        let mut state = arena_state();
        state.player.hp = 10;
        let roll = AttackRoll { raw: 3, missed: false, crit: false };
        state.apply_enemy_hit("Goblin", roll.enemy_damage(state.player.toughness()), false);
        assert_eq!(state.player.hp, 7);
        assert_eq!(state.player.combo, 0);
    }

    #[test]
    fn enemy_crit_is_floored_and_toughness_absorbs() {
        let roll = AttackRoll { raw: 3, missed: false, crit: true };
        assert_eq!(roll.enemy_damage(0), 4);
        assert_eq!(roll.enemy_damage(5), 0);
        let miss = AttackRoll { raw: 5, missed: true, crit: false };
        assert_eq!(miss.player_damage(0), 0);
        assert_eq!(AttackRoll { raw: 3, missed: false, crit: true }.player_damage(1), 5);
    }

    #[test]
    fn lethal_hit_scores_and_removes_enemy() {
        let mut state = arena_state();
        let target = state.player.pos.offset(1, 0);
        let id = add_enemy(&mut state, EnemyKind::Goblin, target);
        state.floor.enemies[id].hp = 1;

        state.apply_player_hit(id, 2, false);

        assert!(!state.floor.enemies.contains_key(id));
        assert_eq!(state.player.kills, 1);
        assert_eq!(state.player.combo, 1);
        assert_eq!(state.player.score, (1 + 2) * 10);
        assert!(state.log().iter().any(|event| matches!(event, LogEvent::EnemySlain { score: 30, .. })));
    }

    #[test]
    fn non_lethal_hit_breaks_the_combo() {
        let mut state = arena_state();
        state.player.combo = 4;
        let target = state.player.pos.offset(0, 1);
        let id = add_enemy(&mut state, EnemyKind::Orc, target);
        state.apply_player_hit(id, 1, false);
        assert_eq!(state.player.combo, 0);
        assert!(state.floor.enemies.contains_key(id));
    }

    #[test]
    fn combo_multiplier_and_milestones() {
        assert_eq!(kill_score(4, 3, 2), 70);
        assert_eq!(kill_score(4, 3, 3), 140);
        let milestones: Vec<u32> = (1..=25).filter(|combo| is_combo_milestone(*combo)).collect();
        assert_eq!(milestones, vec![3, 5, 10, 15, 20, 25]);
    }

    #[test]
    fn explosion_hits_every_adjacent_enemy() {
        let mut state = arena_state();
        let origin = state.player.pos;
        let near = add_enemy(&mut state, EnemyKind::Rat, origin.offset(1, 1));
        let also_near = add_enemy(&mut state, EnemyKind::Rat, origin.offset(-1, 0));
        let far = add_enemy(&mut state, EnemyKind::Rat, origin.offset(3, 0));

        state.explode(50);

        assert!(!state.floor.enemies.contains_key(near));
        assert!(!state.floor.enemies.contains_key(also_near));
        assert!(state.floor.enemies.contains_key(far));
        assert_eq!(state.player.kills, 2);
        assert_eq!(state.player.combo, 2);
    }

    #[test]
    fn explosion_without_targets_fizzles() {
        let mut state = arena_state();
        state.explode(8);
        assert_eq!(state.log().last(), Some(&LogEvent::ExplosionFizzled));
    }

    #[test]
    fn bounty_pays_out_on_the_last_required_kill() {
        let mut state = arena_state();
        state.player.bounty =
            Some(Bounty { target: EnemyKind::Rat, required: 2, progress: 1, reward: 25 });
        let target = state.player.pos.offset(1, 0);
        let id = add_enemy(&mut state, EnemyKind::Rat, target);
        state.floor.enemies[id].hp = 1;
        state.apply_player_hit(id, 5, false);
        assert_eq!(state.player.gold, 25);
        assert!(state.player.bounty.is_none());
    }
}
