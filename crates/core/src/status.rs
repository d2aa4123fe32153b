//! Timed buffs and debuffs carried by the player and by enemies.
//! This module exists to keep refresh and tick rules in one place.
//! It does not own death handling or event logging; callers react to the tick report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::StatusKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub turns: u32,
    pub magnitude: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: BTreeMap<StatusKind, StatusEffect>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    pub damage: Vec<(StatusKind, i32)>,
    pub healed: i32,
    pub expired: Vec<StatusKind>,
}

impl StatusEffects {
    /// Applies or refreshes an effect. Effects never stack: a reapplication keeps
    /// the longer duration, and damage/heal effects also keep the stronger magnitude.
    pub fn apply(&mut self, kind: StatusKind, turns: u32, magnitude: i32) {
        if turns == 0 {
            return;
        }
        match self.effects.get_mut(&kind) {
            Some(existing) => {
                existing.turns = existing.turns.max(turns);
                if refreshes_magnitude(kind) {
                    existing.magnitude = existing.magnitude.max(magnitude);
                }
            }
            None => {
                self.effects.insert(kind, StatusEffect { turns, magnitude });
            }
        }
    }

    pub fn add_burning(&mut self, turns: u32, damage: i32) {
        self.apply(StatusKind::Burning, turns, damage);
    }

    pub fn add_poison(&mut self, turns: u32, damage: i32) {
        self.apply(StatusKind::Poison, turns, damage);
    }

    pub fn get(&self, kind: StatusKind) -> Option<StatusEffect> {
        self.effects.get(&kind).copied()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.contains_key(&kind)
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.remove(&kind);
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatusKind, StatusEffect)> + '_ {
        self.effects.iter().map(|(kind, effect)| (*kind, *effect))
    }

    /// Advances every effect by one turn, applying per-tick damage and healing to `hp`.
    /// Each effect fires exactly once per call.
    pub fn tick(&mut self, hp: &mut i32, max_hp: i32) -> StatusTick {
        let mut report = StatusTick::default();
        for (kind, effect) in &mut self.effects {
            match kind {
                StatusKind::Burning | StatusKind::Poison => {
                    *hp -= effect.magnitude;
                    report.damage.push((*kind, effect.magnitude));
                }
                StatusKind::Regeneration => {
                    let before = *hp;
                    *hp = (*hp + effect.magnitude).min(max_hp.max(before));
                    report.healed += *hp - before;
                }
                StatusKind::Speed | StatusKind::Slow | StatusKind::Invisibility => {}
            }
            effect.turns = effect.turns.saturating_sub(1);
            if effect.turns == 0 {
                report.expired.push(*kind);
            }
        }
        self.effects.retain(|_, effect| effect.turns > 0);
        report
    }
}

fn refreshes_magnitude(kind: StatusKind) -> bool {
    matches!(
        kind,
        StatusKind::Burning | StatusKind::Poison | StatusKind::Regeneration | StatusKind::Slow
    )
}
