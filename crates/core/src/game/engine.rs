//! Fixed-order turn pipeline.
//! This module exists to sequence one accepted action through every phase and record the trace.
//! It does not own the rules applied inside each phase; those live in sibling modules.

use log::trace;

use super::*;

mod movement;
mod vitals;


/// What the player phase actually did once the action was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PlayerActed {
    Stayed,
    Moved,
    Descended,
}

impl RunState {
    pub(super) fn run_turn(&mut self, action: Action) -> TurnReport {
        if self.is_over() {
            return TurnReport::rejected();
        }
        let mut phases = Vec::new();
        self.enter_phase(TurnPhase::PlayerActing, &mut phases);
        let Some(acted) = self.resolve_player_action(action) else {
            self.phase = TurnPhase::Idle;
            self.auto_walk.clear();
            return TurnReport::rejected();
        };
        self.turn += 1;
        self.player.stats.turns += 1;

        self.enter_phase(TurnPhase::TrapResolution, &mut phases);
        if acted == PlayerActed::Moved && self.player_alive() {
            self.trigger_player_trap();
        }

        let landed_on_loot = self.floor.map.loot(self.player.pos).is_some();
        if acted == PlayerActed::Moved && self.player_alive() && landed_on_loot {
            self.enter_phase(TurnPhase::LootPickup, &mut phases);
            self.pick_up_loot();
        }

        self.enter_phase(TurnPhase::AiPhase, &mut phases);
        if self.player_alive() {
            self.run_ai_phase();
        }

        self.enter_phase(TurnPhase::StatusTick, &mut phases);
        self.tick_statuses();

        self.enter_phase(TurnPhase::HungerRegen, &mut phases);
        if self.player_alive() {
            self.tick_hunger_and_regen();
        }

        self.enter_phase(TurnPhase::DeathCheck, &mut phases);
        self.check_death();

        let settled = if self.is_over() { TurnPhase::GameOver } else { TurnPhase::Idle };
        self.enter_phase(settled, &mut phases);
        TurnReport { accepted: true, phases, game_over: self.is_over() }
    }

    fn enter_phase(&mut self, phase: TurnPhase, phases: &mut Vec<TurnPhase>) {
        trace!("turn {} entering {phase:?}", self.turn);
        self.phase = phase;
        phases.push(phase);
    }

    /// Validates and applies the player's action. Rejection happens before any mutation
    /// or random draw.
    fn resolve_player_action(&mut self, action: Action) -> Option<PlayerActed> {
        match action {
            Action::Wait => Some(PlayerActed::Stayed),
            Action::Move { dx, dy } => self.player_move(dx, dy),
            Action::Interact => self.interact().then_some(PlayerActed::Stayed),
            Action::UseItem { slot } => self.use_item(slot).then_some(PlayerActed::Stayed),
        }
    }

    fn check_death(&mut self) {
        if self.player.hp > 0 {
            self.pending_death = None;
            return;
        }
        let cause = self.pending_death.take().unwrap_or(DeathCause::Starvation);
        debug!("player died on floor {} at turn {}: {cause:?}", self.floor.number, self.turn);
        self.outcome = RunOutcome::Dead(cause.clone());
        self.log.push(LogEvent::PlayerDied { cause });
        self.auto_walk.clear();
    }
}
