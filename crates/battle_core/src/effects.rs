//! The polymorphic `Effect` system: tagged variants with a uniform `apply`
//! contract, dispatched by pattern match rather than by a class hierarchy
//! (per spec.md §9's explicit re-architecture note).
//!
//! Shape grounded on the `other_examples` Pokémon-legends-backend
//! `EffectData` tagged enum (`#[serde(tag = "type", content = "parameters")]`),
//! scoped down to exactly the variant list spec.md §3 names. The
//! "apply mutates state, returns a plain outcome value" contract is grounded
//! on the teacher's `abilities/hooks.rs`/`moves/hooks.rs` hook functions,
//! which all return plain values rather than `Result`; `EffectOutcome`
//! widens that return so callers can tell exactly what changed and emit the
//! matching battle event instead of just a pass/fail bit.

use serde::{Deserialize, Serialize};

use crate::rng::BattleRng;
use crate::stats::StatKind;
use crate::status::StatusCondition;
use crate::team::{CreatureRef, Team};
use crate::types::ElementType;

/// Which of the two participants in a skill use an effect targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    SelfSide,
    Foe,
}

/// When a `Duration` effect's hook fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationTrigger {
    TurnStart,
    TurnEnd,
}

/// The closed set of parameterized duration-effect kinds, per spec.md §9's
/// note that a free-form function pointer is unnecessary here: a small,
/// named set of per-turn logics covers leech/burn-tick-override/field-aura/
/// immunity-marker/state-snapshot needs without reintroducing `dyn` hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationLogic {
    /// Drains a flat amount of HP from the target into the effect's source.
    Leech { amount: u32 },
    /// Marks the bearer as immune to new status conditions for its duration.
    ImmuneToStatus,
    /// Marks the bearer as immune to a specific element's damage.
    ImmuneToElement { element: ElementType },
    /// No per-turn action; the effect exists purely to mark presence (used
    /// by tags like "protected" that other code queries for, rather than
    /// acting on directly).
    Marker,
}

/// A single clearable/countdown effect living on a creature's
/// `active_duration_effects` list. Cloned from a skill's `Effect::Duration`
/// template at application time; `original_source` records which creature's
/// action created it (used by `Leech` to credit the right creature).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationEffect {
    pub id: u32,
    pub turns_remaining: u32,
    pub trigger: DurationTrigger,
    pub logic: DurationLogic,
    pub original_source: CreatureRef,
}

/// Well-known duration-effect ids queried directly by name rather than only
/// by logic kind, per spec.md §4.3 ("Immunity is implemented as a duration
/// effect with a well-known tag").
pub const IMMUNITY_TAG_ID: u32 = u32::MAX;

/// Which parts of a creature's transient battle state `ClearEffects` wipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClearFlags {
    pub positive_stages: bool,
    pub negative_stages: bool,
    pub status: bool,
    pub duration_effects: bool,
}

/// What an `Effect::apply` call actually did, reported back to the caller so
/// it can emit the matching `BattleEvent` instead of a generic log line.
/// `NoChange` covers both "the chance gate failed" and "the mutation was a
/// no-op" (status already set, stat stage already capped, already at full
/// HP) — callers don't need to tell those apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectOutcome {
    NoChange,
    StatusChanged {
        old: StatusCondition,
        new: StatusCondition,
    },
    StatStageChanged {
        stat: StatKind,
        old: i8,
        new: i8,
    },
    Healed {
        amount: u32,
    },
    Damaged {
        amount: u32,
    },
    Cleared,
    DurationApplied,
}

/// A single effect attached to a skill. Tagged by variant and dispatched by
/// pattern match in `apply`, never by trait object — spec.md §9 explicitly
/// asks for tagged variants over a class hierarchy here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Effect {
    StatusInflict {
        condition: StatusCondition,
        chance: u8,
        target: EffectTarget,
    },
    StatStageChange {
        stat: StatKind,
        delta: i8,
        chance: u8,
        target: EffectTarget,
    },
    Heal {
        amount: u32,
        is_percent: bool,
        chance: u8,
        target: EffectTarget,
    },
    FixedDamage {
        amount: u32,
        chance: u8,
        target: EffectTarget,
    },
    ClearEffects {
        flags: ClearFlags,
        target: EffectTarget,
        chance: u8,
    },
    Duration {
        id: u32,
        turns_remaining: u32,
        trigger: DurationTrigger,
        logic: DurationLogic,
        chance: u8,
        target: EffectTarget,
    },
    /// Realized as a `Duration` with a well-known tag per spec.md §3; kept
    /// as its own variant so catalog data can declare it directly instead
    /// of hand-assembling a `Duration` with `IMMUNITY_TAG_ID`.
    Immunity {
        duration: u32,
        immune_to_status: bool,
        immune_to_element: Option<ElementType>,
        chance: u8,
        target: EffectTarget,
    },
}

impl Effect {
    /// Applies this effect. `source`/`target` are the creature refs the
    /// skill that carries this effect was used by/against; `self_target`
    /// resolves `EffectTarget::SelfSide`/`Foe` to one of them. Returns a
    /// description of what actually changed, so the caller can emit the
    /// matching `BattleEvent` rather than only a generic log line — mirrors
    /// the teacher's hook functions, which return plain values rather than
    /// `Result`, widened from a bare `bool` to carry the before/after detail
    /// spec.md's event-payload section requires.
    pub fn apply(
        &self,
        team: &mut Team,
        source: CreatureRef,
        target: CreatureRef,
        rng: &mut BattleRng,
    ) -> EffectOutcome {
        let chance = self.chance();
        if !rng.roll_chance(chance) {
            return EffectOutcome::NoChange;
        }

        let resolved_target = self.resolve_target(source, target);

        match self {
            Effect::StatusInflict { condition, .. } => {
                let Some(creature) = team.get_mut(resolved_target) else {
                    return EffectOutcome::NoChange;
                };
                let old = creature.status;
                if creature.set_status(*condition) {
                    EffectOutcome::StatusChanged {
                        old,
                        new: *condition,
                    }
                } else {
                    EffectOutcome::NoChange
                }
            }
            Effect::StatStageChange { stat, delta, .. } => {
                let Some(creature) = team.get_mut(resolved_target) else {
                    return EffectOutcome::NoChange;
                };
                let (old, new) = creature.modify_stat_stage(*stat, *delta);
                if old != new {
                    EffectOutcome::StatStageChanged {
                        stat: *stat,
                        old,
                        new,
                    }
                } else {
                    EffectOutcome::NoChange
                }
            }
            Effect::Heal {
                amount, is_percent, ..
            } => {
                let Some(creature) = team.get_mut(resolved_target) else {
                    return EffectOutcome::NoChange;
                };
                let n = if *is_percent {
                    (creature.max_hp as u64 * *amount as u64 / 100) as u32
                } else {
                    *amount
                };
                let before = creature.current_hp;
                creature.heal(n);
                if creature.current_hp != before {
                    EffectOutcome::Healed {
                        amount: creature.current_hp - before,
                    }
                } else {
                    EffectOutcome::NoChange
                }
            }
            Effect::FixedDamage { amount, .. } => {
                let Some(creature) = team.get_mut(resolved_target) else {
                    return EffectOutcome::NoChange;
                };
                let before = creature.current_hp;
                creature.take_damage(*amount);
                if creature.current_hp != before {
                    EffectOutcome::Damaged {
                        amount: before - creature.current_hp,
                    }
                } else {
                    EffectOutcome::NoChange
                }
            }
            Effect::ClearEffects { flags, .. } => {
                let Some(creature) = team.get_mut(resolved_target) else {
                    return EffectOutcome::NoChange;
                };
                if creature.clear_effects(*flags) {
                    EffectOutcome::Cleared
                } else {
                    EffectOutcome::NoChange
                }
            }
            Effect::Duration {
                id,
                turns_remaining,
                trigger,
                logic,
                ..
            } => {
                let Some(creature) = team.get_mut(resolved_target) else {
                    return EffectOutcome::NoChange;
                };
                creature.active_duration_effects.push(DurationEffect {
                    id: *id,
                    turns_remaining: *turns_remaining,
                    trigger: *trigger,
                    logic: *logic,
                    original_source: source,
                });
                EffectOutcome::DurationApplied
            }
            Effect::Immunity {
                duration,
                immune_to_status,
                immune_to_element,
                ..
            } => {
                let Some(creature) = team.get_mut(resolved_target) else {
                    return EffectOutcome::NoChange;
                };
                let logic = if *immune_to_status {
                    DurationLogic::ImmuneToStatus
                } else if let Some(element) = immune_to_element {
                    DurationLogic::ImmuneToElement { element: *element }
                } else {
                    DurationLogic::Marker
                };
                creature.active_duration_effects.push(DurationEffect {
                    id: IMMUNITY_TAG_ID,
                    turns_remaining: *duration,
                    trigger: DurationTrigger::TurnStart,
                    logic,
                    original_source: source,
                });
                EffectOutcome::DurationApplied
            }
        }
    }

    fn chance(&self) -> u8 {
        match self {
            Effect::StatusInflict { chance, .. }
            | Effect::StatStageChange { chance, .. }
            | Effect::Heal { chance, .. }
            | Effect::FixedDamage { chance, .. }
            | Effect::ClearEffects { chance, .. }
            | Effect::Duration { chance, .. }
            | Effect::Immunity { chance, .. } => *chance,
        }
    }

    /// The side this effect resolves against (`SelfSide` or `Foe`),
    /// independent of whichever skill carries it.
    pub fn target_kind(&self) -> EffectTarget {
        self.target()
    }

    fn target(&self) -> EffectTarget {
        match self {
            Effect::StatusInflict { target, .. }
            | Effect::StatStageChange { target, .. }
            | Effect::Heal { target, .. }
            | Effect::FixedDamage { target, .. }
            | Effect::ClearEffects { target, .. }
            | Effect::Duration { target, .. }
            | Effect::Immunity { target, .. } => *target,
        }
    }

    fn resolve_target(&self, source: CreatureRef, target: CreatureRef) -> CreatureRef {
        match self.target() {
            EffectTarget::SelfSide => source,
            EffectTarget::Foe => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Creature;
    use crate::rng::BattleRng;
    use crate::stats::{BaseStats, Talent};
    use crate::team::Team;
    use crate::types::Type;

    fn sample_creature(name: &str) -> Creature {
        Creature::new(
            name,
            Type::mono(ElementType::Normal),
            10,
            BaseStats {
                hp: 100,
                attack: 30,
                defense: 30,
                sp_attack: 30,
                sp_defense: 30,
                speed: 30,
            },
            Talent::default(),
            vec![],
        )
    }

    #[test]
    fn chance_100_is_deterministic_success() {
        let mut team = Team::new(vec![sample_creature("a"), sample_creature("b")]).unwrap();
        let mut rng = BattleRng::seeded(1);
        let a = team.creature_ref_at(0);
        let b = team.creature_ref_at(1);
        let effect = Effect::FixedDamage {
            amount: 10,
            chance: 100,
            target: EffectTarget::Foe,
        };
        assert_eq!(
            effect.apply(&mut team, a, b, &mut rng),
            EffectOutcome::Damaged { amount: 10 }
        );
        assert_eq!(team.get(b).unwrap().current_hp, 90);
    }

    #[test]
    fn chance_0_always_no_ops() {
        let mut team = Team::new(vec![sample_creature("a"), sample_creature("b")]).unwrap();
        let mut rng = BattleRng::seeded(1);
        let a = team.creature_ref_at(0);
        let b = team.creature_ref_at(1);
        let effect = Effect::FixedDamage {
            amount: 10,
            chance: 0,
            target: EffectTarget::Foe,
        };
        assert_eq!(effect.apply(&mut team, a, b, &mut rng), EffectOutcome::NoChange);
        assert_eq!(team.get(b).unwrap().current_hp, 100);
    }

    #[test]
    fn clear_effects_twice_is_idempotent() {
        let mut team = Team::new(vec![sample_creature("a")]).unwrap();
        let mut rng = BattleRng::seeded(7);
        let a = team.creature_ref_at(0);
        team.get_mut(a).unwrap().modify_stat_stage(StatKind::Attack, 3);
        let flags = ClearFlags {
            positive_stages: true,
            negative_stages: true,
            status: true,
            duration_effects: true,
        };
        let effect = Effect::ClearEffects {
            flags,
            target: EffectTarget::SelfSide,
            chance: 100,
        };
        assert_eq!(effect.apply(&mut team, a, a, &mut rng), EffectOutcome::Cleared);
        let snapshot = team.get(a).unwrap().clone();
        assert_eq!(effect.apply(&mut team, a, a, &mut rng), EffectOutcome::NoChange);
        assert_eq!(team.get(a).unwrap(), &snapshot);
    }

    #[test]
    fn self_side_target_resolves_to_source() {
        let mut team = Team::new(vec![sample_creature("a"), sample_creature("b")]).unwrap();
        let mut rng = BattleRng::seeded(3);
        let a = team.creature_ref_at(0);
        let b = team.creature_ref_at(1);
        let effect = Effect::Heal {
            amount: 50,
            is_percent: false,
            chance: 100,
            target: EffectTarget::SelfSide,
        };
        team.get_mut(a).unwrap().take_damage(50);
        assert_eq!(
            effect.apply(&mut team, a, b, &mut rng),
            EffectOutcome::Healed { amount: 50 }
        );
        assert_eq!(team.get(a).unwrap().current_hp, 100);
        assert_eq!(team.get(b).unwrap().current_hp, 100);
    }
}
