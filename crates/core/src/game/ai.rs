//! Enemy and mouse behaviour for the AI phase.
//! This module exists to decide where non-player creatures go each turn.
//! It does not own damage rules; attacks are handed to `combat`.

use super::*;
use crate::game::pathfinding::cuts_corner;

const SLOW_SKIP_CHANCE: f64 = 0.5;
const MOUSE_PANIC_RADIUS: u32 = 6;
/// Set during the AI phase, so the same turn's status tick already takes one off.
const HINT_FLASH_TURNS: u8 = 4;

impl RunState {
    pub(super) fn run_ai_phase(&mut self) {
        for _ in 0..self.enemy_passes() {
            if !self.player_alive() {
                break;
            }
            self.run_enemy_pass();
        }
        if self.player_alive() {
            self.mouse_step();
        }
    }

    /// Player speed halves how often enemies act; player slow gives them an extra pass
    /// every other turn.
    fn enemy_passes(&self) -> u32 {
        let even_turn = self.turn % 2 == 0;
        let effects = &self.player.status_effects;
        if effects.has(StatusKind::Speed) {
            u32::from(even_turn)
        } else if effects.has(StatusKind::Slow) {
            if even_turn { 2 } else { 1 }
        } else {
            1
        }
    }

    fn run_enemy_pass(&mut self) {
        let ids: Vec<EnemyId> = self.floor.enemies.keys().collect();
        for id in ids.into_iter().rev() {
            if !self.player_alive() {
                break;
            }
            self.enemy_act(id);
        }
    }

    fn enemy_act(&mut self, id: EnemyId) {
        let Some(enemy) = self.floor.enemies.get(id) else {
            return;
        };
        let slowed = enemy.status_effects.has(StatusKind::Slow);
        let speed = if slowed { 1 } else { enemy.speed.max(1) };
        let sight = enemy.sight;
        let distance = chebyshev(enemy.pos, self.player.pos);

        if slowed && self.rng.chance(SLOW_SKIP_CHANCE) {
            return;
        }
        if self.player.is_invisible() && distance > 1 {
            return;
        }
        if distance <= 1 {
            self.enemy_attack(id);
            return;
        }

        for _ in 0..speed {
            let Some(pos) = self.floor.enemies.get(id).map(|enemy| enemy.pos) else {
                return;
            };
            let distance = chebyshev(pos, self.player.pos);
            if distance <= 1 {
                return;
            }
            let step = if distance <= sight { self.chase_step(pos) } else { self.wander_step(pos) };
            let Some(next) = step else {
                return;
            };
            self.move_enemy(id, next);
        }
    }

    fn move_enemy(&mut self, id: EnemyId, to: Pos) {
        if let Some(enemy) = self.floor.enemies.get_mut(id) {
            enemy.pos = to;
        }
        self.trigger_enemy_trap(id);
    }

    /// Greedy step toward the player over a fixed candidate order; the first closest
    /// candidate wins.
    fn chase_step(&self, from: Pos) -> Option<Pos> {
        let target = self.player.pos;
        let dx = (target.x - from.x).signum();
        let dy = (target.y - from.y).signum();
        let mut candidates = vec![(dx, dy), (dx, 0), (0, dy)];
        if dx == 0 {
            candidates.extend([(1, dy), (-1, dy)]);
        }
        if dy == 0 {
            candidates.extend([(dx, 1), (dx, -1)]);
        }

        candidates
            .into_iter()
            .filter_map(|(cx, cy)| Direction::from_delta(cx, cy))
            .filter(|direction| self.enemy_can_enter(from, *direction))
            .map(|direction| from.step(direction))
            .min_by_key(|pos| chebyshev(*pos, target))
    }

    fn wander_step(&mut self, from: Pos) -> Option<Pos> {
        let mut directions = Direction::ALL;
        self.rng.shuffle(&mut directions);
        directions
            .into_iter()
            .find(|direction| self.enemy_can_enter(from, *direction))
            .map(|direction| from.step(direction))
    }

    fn enemy_can_enter(&self, from: Pos, direction: Direction) -> bool {
        let to = from.step(direction);
        self.floor.is_walkable_for_enemy(to)
            && self.floor.enemy_at(to).is_none()
            && to != self.player.pos
            && self.floor.mouse.is_none_or(|mouse| mouse.pos != to)
            && !cuts_corner(from, direction, |pos| self.floor.is_walkable_for_enemy(pos))
    }

    fn mouse_step(&mut self) {
        if !self.floor.hidden_area_active() {
            self.floor.mouse = None;
            return;
        }
        let Some(mouse) = self.floor.mouse else {
            return;
        };

        let next = if manhattan(mouse.pos, self.player.pos) <= MOUSE_PANIC_RADIUS {
            self.mouse_flee_step(mouse.pos).or_else(|| self.mouse_wander_step(mouse.pos))
        } else {
            self.mouse_wander_step(mouse.pos)
        };
        let Some(next) = next else {
            return;
        };

        if self.floor.is_false_wall(next) {
            self.floor.mouse = None;
            self.floor.hint_flash_turns = HINT_FLASH_TURNS;
            self.log.push(LogEvent::MouseFled);
        } else if let Some(mouse) = self.floor.mouse.as_mut() {
            mouse.pos = next;
        }
    }

    /// Best neighbour toward the nearest false wall, taken only if it gets closer.
    fn mouse_flee_step(&self, from: Pos) -> Option<Pos> {
        let area = self.floor.hidden_area.as_ref()?;
        let goal = area.false_walls.iter().copied().min_by_key(|wall| (manhattan(from, *wall), *wall))?;
        let current = manhattan(from, goal);
        Direction::ALL
            .into_iter()
            .filter(|direction| self.mouse_can_enter(from, *direction))
            .map(|direction| from.step(direction))
            .min_by_key(|pos| manhattan(*pos, goal))
            .filter(|pos| manhattan(*pos, goal) < current)
    }

    fn mouse_wander_step(&mut self, from: Pos) -> Option<Pos> {
        let mut directions = Direction::ALL;
        self.rng.shuffle(&mut directions);
        directions
            .into_iter()
            .find(|direction| self.mouse_can_enter(from, *direction))
            .map(|direction| from.step(direction))
    }

    /// The mouse may slip through false walls but never into the concealed interior.
    fn mouse_can_enter(&self, from: Pos, direction: Direction) -> bool {
        let to = from.step(direction);
        self.floor.is_walkable(to)
            && self.floor.enemy_at(to).is_none()
            && to != self.player.pos
            && !cuts_corner(from, direction, |pos| self.floor.is_walkable(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::EnemyKind;
    use crate::entities::Mouse;
    use crate::game::test_support::*;

    #[test]
    fn adjacent_enemy_attacks_instead_of_moving() {
        let mut state = arena_state();
        let pos = state.player.pos.offset(1, 0);
        let id = add_enemy(&mut state, EnemyKind::Goblin, pos);
        state.enemy_act(id);
        assert_eq!(state.floor.enemies[id].pos, pos);
        assert!(state.log().iter().any(|event| matches!(
            event,
            LogEvent::EnemyHit { .. } | LogEvent::EnemyMissed { .. }
        )));
    }

    #[test]
    fn chasing_enemy_closes_the_distance() {
        let mut state = arena_state();
        let start = state.player.pos.offset(3, 0);
        let id = add_enemy(&mut state, EnemyKind::Goblin, start);
        state.enemy_act(id);
        assert_eq!(state.floor.enemies[id].pos, state.player.pos.offset(2, 0));
    }

    #[test]
    fn invisible_player_is_not_tracked_at_range() {
        let mut state = arena_state();
        state.player.status_effects.apply(StatusKind::Invisibility, 5, 1);
        let start = state.player.pos.offset(3, 3);
        let id = add_enemy(&mut state, EnemyKind::Goblin, start);
        state.enemy_act(id);
        assert_eq!(state.floor.enemies[id].pos, start);
    }

    #[test]
    fn fast_enemy_stops_once_adjacent() {
        let mut state = arena_state();
        let target = state.player.pos.offset(-4, 0);
        let id = add_enemy(&mut state, EnemyKind::Bat, target);
        state.enemy_act(id);
        assert_eq!(state.floor.enemies[id].pos, state.player.pos.offset(-2, 0));
        state.enemy_act(id);
        assert_eq!(state.floor.enemies[id].pos, state.player.pos.offset(-1, 0));
    }

    #[test]
    fn fast_enemy_wanders_its_full_speed_out_of_sight() {
        let mut state = arena_state();
        let start = Pos::new(7, 7);
        state.player.pos = Pos::new(1, 1);
        let mut farthest = 0;
        for seed in 0..50 {
            state.floor.enemies.clear();
            state.rng = DungeonRng::new(seed);
            let id = add_enemy(&mut state, EnemyKind::Bat, start);
            state.floor.enemies[id].sight = 0;
            state.enemy_act(id);
            let end = state.floor.enemies[id].pos;
            assert!(ARENA.contains(end));
            assert!(chebyshev(start, end) <= 2);
            farthest = farthest.max(chebyshev(start, end));
        }
        assert_eq!(farthest, 2, "a speed-2 wanderer must be able to cover two cells");
    }

    #[test]
    fn player_speed_and_slow_change_enemy_passes() {
        let mut state = arena_state();
        state.turn = 3;
        assert_eq!(state.enemy_passes(), 1);
        state.player.status_effects.apply(StatusKind::Speed, 4, 1);
        assert_eq!(state.enemy_passes(), 0);
        state.turn = 4;
        assert_eq!(state.enemy_passes(), 1);
        state.player.status_effects.remove(StatusKind::Speed);
        state.player.status_effects.apply(StatusKind::Slow, 4, 1);
        assert_eq!(state.enemy_passes(), 2);
    }

    #[test]
    fn enemies_never_enter_the_hidden_area() {
        let mut state = arena_state();
        let false_wall = add_hidden_corridor(&mut state);
        let inside = false_wall.offset(-1, 0);
        assert!(!state.enemy_can_enter(inside, Direction::East));
    }

    #[test]
    fn panicking_mouse_vanishes_into_the_false_wall() {
        let mut state = arena_state();
        let false_wall = add_hidden_corridor(&mut state);
        state.floor.mouse = Some(Mouse { pos: false_wall.offset(-1, 0) });

        state.mouse_step();

        assert!(state.floor.mouse.is_none());
        assert_eq!(state.floor.hint_flash_turns, HINT_FLASH_TURNS);
        assert_eq!(state.log().last(), Some(&LogEvent::MouseFled));
    }

    #[test]
    fn mouse_is_dropped_once_the_area_is_revealed() {
        let mut state = arena_state();
        add_hidden_corridor(&mut state);
        state.floor.mouse = Some(Mouse { pos: ARENA.center().offset(2, 2) });
        if let Some(area) = state.floor.hidden_area.as_mut() {
            area.revealed = true;
        }
        state.mouse_step();
        assert!(state.floor.mouse.is_none());
    }
}
