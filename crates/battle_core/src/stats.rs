//! Base stats, stat stages, and the two stage-modifier formulas.
//!
//! Grounded on `state.rs::apply_stat_boost` and
//! `damage/formula.rs::apply_boost`/`apply_acc_eva_boost`: the teacher keeps
//! two distinct rational-multiplier tables, one for the five core battle
//! stats and a separate, gentler one for accuracy/evasion. Spec.md §3 uses
//! the same two-formula split, so that shape carries over directly even
//! though the underlying numbers are generic rather than Pokémon's.

use serde::{Deserialize, Serialize};

/// The eight stats a stage can apply to. HP is never staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl StatKind {
    pub const ALL: [StatKind; 7] = [
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpAttack,
        StatKind::SpDefense,
        StatKind::Speed,
        StatKind::Accuracy,
        StatKind::Evasion,
    ];

    fn index(self) -> usize {
        match self {
            StatKind::Attack => 0,
            StatKind::Defense => 1,
            StatKind::SpAttack => 2,
            StatKind::SpDefense => 3,
            StatKind::Speed => 4,
            StatKind::Accuracy => 5,
            StatKind::Evasion => 6,
        }
    }

    fn is_accuracy_like(self) -> bool {
        matches!(self, StatKind::Accuracy | StatKind::Evasion)
    }
}

/// A creature's unboosted base stats, set at construction and never mutated
/// in battle (level-up recalculation replaces the whole struct, it doesn't
/// patch fields in place).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpAttack => self.sp_attack,
            StatKind::SpDefense => self.sp_defense,
            StatKind::Speed => self.speed,
            // Accuracy/evasion have no base value; they're 100% at stage 0.
            StatKind::Accuracy | StatKind::Evasion => 100,
        }
    }
}

/// In-battle stage modifiers for the seven stageable stats, each clamped to
/// `[-6, 6]`. Reset on switch-out (owned by `Creature`, cleared by whatever
/// calls `Creature::on_switch_out`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatStages {
    stages: [i8; 7],
}

impl Default for StatStages {
    fn default() -> Self {
        Self { stages: [0; 7] }
    }
}

impl StatStages {
    pub const MIN: i8 = -6;
    pub const MAX: i8 = 6;

    pub fn get(&self, stat: StatKind) -> i8 {
        self.stages[stat.index()]
    }

    /// Applies `delta` to `stat`, clamped to `[-6, 6]`. Returns the actual
    /// change applied (may be less than `delta` in magnitude if clamped, and
    /// zero if already at the cap — callers use this to decide whether to
    /// log "won't go any higher/lower").
    pub fn modify(&mut self, stat: StatKind, delta: i8) -> i8 {
        let before = self.stages[stat.index()];
        let after = (before + delta).clamp(Self::MIN, Self::MAX);
        self.stages[stat.index()] = after;
        after - before
    }

    pub fn reset(&mut self) {
        self.stages = [0; 7];
    }

    /// Sets `stat` directly to `value` (still clamped to `[-6, 6]`), used by
    /// `ClearEffects` to zero out one side of a stage without disturbing
    /// the other.
    pub fn set(&mut self, stat: StatKind, value: i8) {
        self.stages[stat.index()] = value.clamp(Self::MIN, Self::MAX);
    }
}

/// The core-stat stage multiplier: `max(2, 2+s) / max(2, 2-s)`.
fn core_stage_multiplier(stage: i8) -> f64 {
    let s = stage as f64;
    (2.0 + s).max(2.0) / (2.0 - s).max(2.0)
}

/// The accuracy/evasion stage multiplier: `max(3, 3+s) / max(3, 3-s)`.
fn acc_eva_stage_multiplier(stage: i8) -> f64 {
    let s = stage as f64;
    (3.0 + s).max(3.0) / (3.0 - s).max(3.0)
}

/// The stage-modifier multiplier for any stageable stat, dispatching to
/// whichever of the two formulas applies (spec.md §3).
pub fn stage_multiplier(stat: StatKind, stage: i8) -> f64 {
    if stat.is_accuracy_like() {
        acc_eva_stage_multiplier(stage)
    } else {
        core_stage_multiplier(stage)
    }
}

/// A creature's fixed talent/nature-equivalent: a per-stat multiplier baked
/// in at construction, applied on top of the stage multiplier. Grounded on
/// the teacher's nature system, generalized from a fixed enum of 25 natures
/// to a plain per-stat multiplier table so catalog authors can express any
/// talent without new core-logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Talent {
    pub attack: f64,
    pub defense: f64,
    pub sp_attack: f64,
    pub sp_defense: f64,
    pub speed: f64,
}

impl Default for Talent {
    fn default() -> Self {
        Self {
            attack: 1.0,
            defense: 1.0,
            sp_attack: 1.0,
            sp_defense: 1.0,
            speed: 1.0,
        }
    }
}

impl Talent {
    pub fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpAttack => self.sp_attack,
            StatKind::SpDefense => self.sp_defense,
            StatKind::Speed => self.speed,
            StatKind::Accuracy | StatKind::Evasion => 1.0,
        }
    }
}
