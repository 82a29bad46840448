//! Event emission: a synchronous subscription interface owned by the battle
//! instance, replacing the source's global Qt-style signals (spec.md §9).
//! Grounded on the teacher's `abilities/hooks.rs` hook-table style, adapted
//! from per-ability function pointers to a single subscriber callback list
//! the engine invokes inline.

use crate::stats::StatKind;
use crate::status::StatusCondition;
use crate::team::CreatureRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Foe,
}

/// An append-only, player-facing narrative log entry (spec.md §3). Distinct
/// from `tracing` events, which are for engineers, not the host UI
/// (SPEC_FULL.md §B).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub turn: u32,
    pub text: String,
    pub source: Option<(Side, CreatureRef)>,
    pub target: Option<(Side, CreatureRef)>,
}

impl LogEntry {
    pub fn plain(turn: u32, text: impl Into<String>) -> Self {
        Self {
            turn,
            text: text.into(),
            source: None,
            target: None,
        }
    }
}

/// Coarse effectiveness bucket carried on `DamageDealt`, per spec.md §6's
/// event payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectivenessBucket {
    NoEffect,
    NotVeryEffective,
    Neutral,
    SuperEffective,
}

impl EffectivenessBucket {
    pub fn from_factor(factor: f32) -> Self {
        if factor == 0.0 {
            EffectivenessBucket::NoEffect
        } else if factor < 1.0 {
            EffectivenessBucket::NotVeryEffective
        } else if factor > 1.0 {
            EffectivenessBucket::SuperEffective
        } else {
            EffectivenessBucket::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted,
    TurnStarted { turn: u32, player_awaiting_switch: bool, foe_awaiting_switch: bool },
    TurnEnded { turn: u32 },
    DamageDealt {
        target: (Side, CreatureRef),
        amount: u32,
        was_critical: bool,
        effectiveness: EffectivenessBucket,
    },
    HealingDone { target: (Side, CreatureRef), amount: u32 },
    StatusChanged {
        target: (Side, CreatureRef),
        old: StatusCondition,
        new: StatusCondition,
    },
    StatStageChanged {
        target: (Side, CreatureRef),
        stat: StatKind,
        old: i8,
        new: i8,
    },
    CreatureSwitched { side: Side, slot: usize },
    LogAppended(LogEntry),
    BattleEnded(crate::battle::BattleResult),
}

/// A subscriber callback. Invoked synchronously; subscribers must not
/// re-enter the engine from within a handler (spec.md §5).
pub type EventHandler = Box<dyn FnMut(&BattleEvent)>;
