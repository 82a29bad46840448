//! Status conditions: at most one non-`None` condition per creature at a
//! time, plus the turn-start (wake/thaw) and turn-end (damage tick) rolls
//! that apply to each.
//!
//! The teacher models status as a `Status` bitflags field that can combine
//! with a separate `Volatiles` bitflags field (confusion, flinch, etc. all
//! stack independently). Spec.md §3 is explicit that a creature carries "at
//! most one status condition" including confusion in that same slot, so this
//! module uses a plain enum rather than bitflags — the simpler shape is a
//! deliberate divergence from the teacher, not an oversight.

use serde::{Deserialize, Serialize};

use crate::rng::BattleRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCondition {
    None,
    Poison,
    Burn,
    Freeze,
    Paralyze,
    Sleep,
    Fear,
    Tired,
    Bleed,
    Confusion,
}

impl Default for StatusCondition {
    fn default() -> Self {
        StatusCondition::None
    }
}

impl StatusCondition {
    /// Whether this status, on its own, prevents the afflicted creature from
    /// acting this turn. Paralyze/Sleep/Fear/Tired always prevent action;
    /// Freeze allows the action attempt (it only drains HP per turn) per
    /// `original_source/creature.cpp::canAct`; Confusion allows the attempt
    /// too — the self-hit roll is a separate effect layered on top, resolved
    /// by the battle engine rather than by the status itself.
    pub fn blocks_action(self) -> bool {
        matches!(
            self,
            StatusCondition::Paralyze
                | StatusCondition::Sleep
                | StatusCondition::Fear
                | StatusCondition::Tired
        )
    }

    /// Whether this status deals end-of-turn damage, and the fraction of max
    /// HP it deals if so. Poison/Burn/Freeze all tick for max_hp/8; Bleed and
    /// Confusion use flat amounts instead (see `end_of_turn_flat_damage`).
    pub fn end_of_turn_damage_fraction(self) -> Option<f64> {
        match self {
            StatusCondition::Poison | StatusCondition::Burn | StatusCondition::Freeze => {
                Some(1.0 / 8.0)
            }
            _ => None,
        }
    }

    /// Flat (non-percentage) end-of-turn damage and the chance (1-100) of it
    /// triggering, for statuses that tick a fixed amount rather than a
    /// fraction of max HP. Bleed always ticks; Confusion ticks 5% of the
    /// time — this is a second, independent mechanic from the 50% self-hit
    /// roll `can_act()` callers must apply before letting a confused
    /// creature act (see `Creature::can_act`).
    pub fn end_of_turn_flat_damage(self) -> Option<(u32, u8)> {
        match self {
            StatusCondition::Bleed => Some((80, 100)),
            StatusCondition::Confusion => Some((50, 5)),
            _ => None,
        }
    }

    /// Rolls whether this status clears itself at the start of the turn
    /// (wake from Sleep, thaw from Freeze). Returns `true` if the condition
    /// should be cleared. Non-clearing statuses always return `false`.
    pub fn roll_turn_start_clear(
        self,
        rng: &mut BattleRng,
        wake_chance: u8,
        thaw_chance: u8,
    ) -> bool {
        match self {
            StatusCondition::Sleep => rng.roll_chance(wake_chance),
            StatusCondition::Freeze => rng.roll_chance(thaw_chance),
            _ => false,
        }
    }
}
