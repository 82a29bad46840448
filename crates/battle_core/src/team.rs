//! `Team`: an ordered sequence of creatures with one active slot, addressed
//! by stable handles rather than raw indices.
//!
//! Grounded on `state.rs`'s `entity_index(player, slot)` addressing scheme,
//! generalized from the teacher's fixed `MAX_ENTITIES` arrays to an owned
//! `Vec<Creature>` of length 1–6, per spec.md §9's explicit direction to
//! "represent creatures by stable integer handles into an arena" rather than
//! raw pointers or indices that shift under switching.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;

/// A stable handle to a creature within a team. Indexes into `Team`'s
/// backing `Vec` and never changes even when `active_index` moves, so
/// effects and duration hooks can reference a creature across turns without
/// caring whether it is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureRef(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    EmptyRoster,
    TooManyCreatures,
}

/// An ordered roster of 1–6 creatures with one on-field "active" slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    creatures: Vec<Creature>,
    active_index: usize,
}

impl Team {
    pub const MAX_SIZE: usize = 6;

    pub fn new(creatures: Vec<Creature>) -> Result<Self, TeamError> {
        if creatures.is_empty() {
            return Err(TeamError::EmptyRoster);
        }
        if creatures.len() > Self::MAX_SIZE {
            return Err(TeamError::TooManyCreatures);
        }
        Ok(Self {
            creatures,
            active_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn active_ref(&self) -> CreatureRef {
        CreatureRef(self.active_index)
    }

    pub fn active(&self) -> &Creature {
        &self.creatures[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut Creature {
        &mut self.creatures[self.active_index]
    }

    pub fn creature_ref_at(&self, slot: usize) -> CreatureRef {
        CreatureRef(slot)
    }

    pub fn get(&self, r: CreatureRef) -> Option<&Creature> {
        self.creatures.get(r.0)
    }

    pub fn get_mut(&mut self, r: CreatureRef) -> Option<&mut Creature> {
        self.creatures.get_mut(r.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.creatures.iter_mut()
    }

    /// True if every creature on the roster has fainted.
    pub fn is_defeated(&self) -> bool {
        self.creatures.iter().all(|c| c.is_fainted())
    }

    /// True if the active creature has fainted but teammates remain, i.e.
    /// the side owes a forced switch before its next real action.
    pub fn needs_forced_switch(&self) -> bool {
        self.active().is_fainted() && !self.is_defeated()
    }

    /// Switches the active slot to `slot`, provided it is in range and not
    /// fainted. Resets the incoming creature's stat stages, per spec.md
    /// §4.7's switch dispatch. Returns `false` (no-op) on an invalid or
    /// fainted target.
    pub fn switch_active(&mut self, slot: usize) -> bool {
        let Some(incoming) = self.creatures.get(slot) else {
            return false;
        };
        if incoming.is_fainted() {
            return false;
        }
        self.active_index = slot;
        self.creatures[slot].stat_stages.reset();
        true
    }

    /// Finds the first non-fainted teammate, used by the PvE AI's
    /// forced-switch-on-faint rule (spec.md §4.8).
    pub fn first_available_slot(&self) -> Option<usize> {
        self.creatures.iter().position(|c| !c.is_fainted())
    }
}
