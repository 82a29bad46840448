//! battle_core - a turn-based, generic-creature battle engine
//!
//! Drives two teams of creatures through a two-phase (input/execution) turn
//! cycle: skills, status conditions, stat stages, and a small polymorphic
//! effect system compose to express a wide range of combat mechanics from
//! plain data, without new core-engine code per species (spec.md §1).
//!
//! A new species or skill is authored as data against [`creature::Creature`]
//! and [`skills::Skill`]; [`catalog`] shows the shape. Battles are driven
//! through [`battle::BattleEngine`].

pub mod battle;
pub mod catalog;
pub mod creature;
pub mod damage;
pub mod effects;
pub mod rng;
pub mod skills;
pub mod stats;
pub mod status;
pub mod team;
pub mod types;

pub use battle::{Action, BattleConfig, BattleEngine, BattleEvent, BattleResult, BattleState};
pub use creature::Creature;
pub use skills::Skill;
pub use team::{CreatureRef, Team};
pub use types::{ElementType, Type};
