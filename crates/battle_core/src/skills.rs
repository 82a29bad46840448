//! `Skill`: the executable unit a creature uses on its turn, plus the
//! signature-hook override points and the full `use_skill` procedure
//! (spec.md §4.4).
//!
//! The hook table (`SkillHooks`, `Option<fn(...)>` fields with a `NONE`
//! const) is grounded directly on the teacher's `moves/hooks.rs::MoveHooks`
//! — the same "most skills need no override, a few need a bespoke one"
//! shape, generalized from Pokémon move mechanics to this spec's
//! dynamic-power/forced-crit/usability-predicate hooks.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::damage;
use crate::effects::{Effect, EffectOutcome};
use crate::rng::BattleRng;
use crate::stats::StatKind;
use crate::team::{CreatureRef, Team};
use crate::types::ElementType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Physical,
    Special,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    Foe,
    SelfTarget,
    Field,
}

/// Sentinel accuracy value meaning "always hits" (spec.md §4.5: "sentinel
/// ≥101").
pub const ALWAYS_HIT: u8 = 101;

/// `power(user, target)` override — dynamic power by HP threshold, form
/// state, etc. Returns the effective base power.
pub type PowerHook = fn(user: &Creature, target: &Creature, base_power: u32) -> u32;

/// `force_critical(user, target)` override — returns `true` to force a
/// guaranteed critical hit regardless of the base crit roll.
pub type ForceCriticalHook = fn(user: &Creature, target: &Creature) -> bool;

/// The usability predicate signature skills may declare (e.g. "requires
/// HP < max/2").
pub type UsabilityHook = fn(user: &Creature) -> bool;

/// Optional per-skill behavioral overrides. Every field defaults to `None`;
/// a skill with no special behavior uses `SkillHooks::NONE` wholesale,
/// exactly as the teacher's `MoveHooks::NONE` does for ordinary moves.
#[derive(Debug, Clone, Copy)]
pub struct SkillHooks {
    pub power: Option<PowerHook>,
    pub force_critical: Option<ForceCriticalHook>,
    pub usable: Option<UsabilityHook>,
}

impl SkillHooks {
    pub const NONE: Self = Self {
        power: None,
        force_critical: None,
        usable: None,
    };
}

impl Default for SkillHooks {
    fn default() -> Self {
        Self::NONE
    }
}

impl PartialEq for SkillHooks {
    fn eq(&self, other: &Self) -> bool {
        self.power.map(|f| f as usize) == other.power.map(|f| f as usize)
            && self.force_critical.map(|f| f as usize) == other.force_critical.map(|f| f as usize)
            && self.usable.map(|f| f as usize) == other.usable.map(|f| f as usize)
    }
}

/// Multi-hit range; a skill with `None` here hits exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiHitRange {
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub element: ElementType,
    pub category: SkillCategory,
    pub power: u32,
    pub pp_cost: u32,
    /// 1-100, or `ALWAYS_HIT`.
    pub accuracy: u8,
    /// `[-7, 7]`.
    pub priority: i8,
    pub effects: Vec<Effect>,
    pub effect_chance: u8,
    pub target_type: TargetType,
    pub multi_hit: Option<MultiHitRange>,
    pub fixed_damage: Option<u32>,
    pub hooks: SkillHooks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleRejection {
    InsufficientPp,
    SignatureNotUsable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillOutcome {
    Missed,
    Succeeded {
        total_damage: u32,
        hits: u32,
        effects: Vec<EffectApplication>,
    },
    Failed(RuleRejection),
}

/// One attached effect's application result, paired with which creature it
/// landed on, so the battle engine can emit the matching event without
/// re-deriving target routing itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectApplication {
    pub target_in_own_team: bool,
    pub target_ref: CreatureRef,
    pub outcome: EffectOutcome,
}

impl Skill {
    /// Runs the full skill-use procedure against a single target, per
    /// spec.md §4.4. `own_team`/`user_ref` address the user; `foe_team`/
    /// `target_ref` address the opposing side's nominal target. For
    /// `TargetType::SelfTarget`/`Field` skills the target is redirected to
    /// the user within `own_team` and `foe_team` is never touched, matching
    /// §4.4's "status skills whose first effect is self-targeted redirect
    /// target to user before effect application" and avoiding the need to
    /// ever alias the same `Team` through two `&mut` parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn use_skill(
        &self,
        own_team: &mut Team,
        user_ref: CreatureRef,
        foe_team: &mut Team,
        target_ref: CreatureRef,
        rng: &mut BattleRng,
        base_crit_percent: u8,
    ) -> SkillOutcome {
        let target_in_own_team = matches!(self.target_type, TargetType::SelfTarget | TargetType::Field);
        let effective_target_ref = if target_in_own_team { user_ref } else { target_ref };

        let Some(user) = own_team.get(user_ref) else {
            return SkillOutcome::Failed(RuleRejection::InsufficientPp);
        };
        if user.current_pp < self.pp_cost {
            return SkillOutcome::Failed(RuleRejection::InsufficientPp);
        }
        if let Some(usable) = self.hooks.usable {
            if !usable(user) {
                return SkillOutcome::Failed(RuleRejection::SignatureNotUsable);
            }
        }

        own_team.get_mut(user_ref).unwrap().consume_pp(self.pp_cost);

        let (min_hits, max_hits) = match self.multi_hit {
            Some(range) => (range.min, range.max),
            None => (1, 1),
        };
        let hit_count = if min_hits == max_hits {
            min_hits as u32
        } else {
            min_hits as u32 + rng.pick_uniform_index((max_hits - min_hits + 1) as usize) as u32
        };

        let mut total_damage = 0u32;
        let mut hits_landed = 0u32;
        let mut any_hit = false;
        let mut effect_applications: Vec<EffectApplication> = Vec::new();

        for _ in 0..hit_count {
            let user = own_team.get(user_ref).expect("user slot is valid");
            let target = if target_in_own_team {
                own_team.get(effective_target_ref).expect("target slot is valid")
            } else {
                foe_team.get(effective_target_ref).expect("target slot is valid")
            };

            if !self.roll_hit(user, target, rng) {
                continue;
            }
            any_hit = true;
            hits_landed += 1;

            if matches!(self.category, SkillCategory::Physical | SkillCategory::Special) {
                let dmg = if let Some(fixed) = self.fixed_damage {
                    fixed
                } else {
                    damage::calculate_damage(self, user, target, rng, base_crit_percent)
                };
                let fainted = if target_in_own_team {
                    let Some(target_mut) = own_team.get_mut(effective_target_ref) else {
                        break;
                    };
                    target_mut.take_damage(dmg);
                    target_mut.is_fainted()
                } else {
                    let Some(target_mut) = foe_team.get_mut(effective_target_ref) else {
                        break;
                    };
                    target_mut.take_damage(dmg);
                    target_mut.is_fainted()
                };
                total_damage += dmg;
                if fainted {
                    break;
                }
            }

            effect_applications.extend(self.apply_effects(
                own_team,
                user_ref,
                foe_team,
                effective_target_ref,
                target_in_own_team,
                rng,
            ));

            let target_fainted = if target_in_own_team {
                own_team.get(effective_target_ref).map(|c| c.is_fainted())
            } else {
                foe_team.get(effective_target_ref).map(|c| c.is_fainted())
            };
            if target_fainted == Some(true) {
                break;
            }
        }

        if !any_hit {
            return SkillOutcome::Missed;
        }

        SkillOutcome::Succeeded {
            total_damage,
            hits: hits_landed,
            effects: effect_applications,
        }
    }

    fn roll_hit(&self, user: &Creature, target: &Creature, rng: &mut BattleRng) -> bool {
        if self.accuracy >= ALWAYS_HIT {
            return true;
        }
        let acc_stage_mod =
            crate::stats::stage_multiplier(StatKind::Accuracy, user.stat_stages.get(StatKind::Accuracy));
        let eva_stage_mod =
            crate::stats::stage_multiplier(StatKind::Evasion, target.stat_stages.get(StatKind::Evasion));
        let acc = self.accuracy as f64 * acc_stage_mod / eva_stage_mod;
        (rng.roll_hit_check() as f64) < acc
    }

    /// Applies this skill's attached effects, honoring the single
    /// secondary-roll-gates-all-effects rule for `effect_chance < 100`
    /// (spec.md §4.4 step 6). Each effect's own `EffectTarget` picks
    /// `own_team` (SelfSide) or `foe_team` (Foe, unless the skill itself
    /// already redirected the target into `own_team`). Returns one
    /// `EffectApplication` per attached effect so the caller can emit the
    /// matching event instead of only a generic skill-use log line.
    fn apply_effects(
        &self,
        own_team: &mut Team,
        user_ref: CreatureRef,
        foe_team: &mut Team,
        target_ref: CreatureRef,
        target_in_own_team: bool,
        rng: &mut BattleRng,
    ) -> Vec<EffectApplication> {
        if self.effect_chance < 100 && !rng.roll_chance(self.effect_chance) {
            return Vec::new();
        }

        let mut applications = Vec::with_capacity(self.effects.len());
        for effect in &self.effects {
            match effect.target_kind() {
                crate::effects::EffectTarget::SelfSide => {
                    let outcome = effect.apply(own_team, user_ref, user_ref, rng);
                    applications.push(EffectApplication {
                        target_in_own_team: true,
                        target_ref: user_ref,
                        outcome,
                    });
                }
                crate::effects::EffectTarget::Foe => {
                    if target_in_own_team {
                        let outcome = effect.apply(own_team, user_ref, target_ref, rng);
                        applications.push(EffectApplication {
                            target_in_own_team: true,
                            target_ref,
                            outcome,
                        });
                    } else {
                        let outcome = effect.apply(foe_team, user_ref, target_ref, rng);
                        applications.push(EffectApplication {
                            target_in_own_team: false,
                            target_ref,
                            outcome,
                        });
                    }
                }
            }
        }
        applications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{BaseStats, Talent};
    use crate::types::Type;

    fn creature(name: &str) -> Creature {
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

    fn tackle() -> Skill {
        Skill {
            name: "Tackle".into(),
            element: ElementType::Normal,
            category: SkillCategory::Physical,
            power: 40,
            pp_cost: 5,
            accuracy: 100,
            priority: 0,
            effects: vec![],
            effect_chance: 100,
            target_type: TargetType::Foe,
            multi_hit: None,
            fixed_damage: None,
            hooks: SkillHooks::NONE,
        }
    }

    #[test]
    fn insufficient_pp_fails_without_consuming() {
        let mut user_team = Team::new(vec![creature("a")]).unwrap();
        let mut target_team = Team::new(vec![creature("b")]).unwrap();
        let user_ref = user_team.creature_ref_at(0);
        let target_ref = target_team.creature_ref_at(0);
        user_team.get_mut(user_ref).unwrap().current_pp = 0;
        let mut rng = BattleRng::seeded(1);
        let skill = tackle();
        let outcome = skill.use_skill(&mut user_team, user_ref, &mut target_team, target_ref, &mut rng, 6);
        assert_eq!(outcome, SkillOutcome::Failed(RuleRejection::InsufficientPp));
    }

    #[test]
    fn always_hit_sentinel_never_misses() {
        let mut user_team = Team::new(vec![creature("a")]).unwrap();
        let mut target_team = Team::new(vec![creature("b")]).unwrap();
        let user_ref = user_team.creature_ref_at(0);
        let target_ref = target_team.creature_ref_at(0);
        let mut rng = BattleRng::seeded(99);
        let mut skill = tackle();
        skill.accuracy = ALWAYS_HIT;
        let outcome = skill.use_skill(&mut user_team, user_ref, &mut target_team, target_ref, &mut rng, 6);
        assert!(matches!(outcome, SkillOutcome::Succeeded { .. }));
    }

    #[test]
    fn multi_hit_consumes_pp_once() {
        let mut user_team = Team::new(vec![creature("a")]).unwrap();
        let mut target_team = Team::new(vec![creature("b")]).unwrap();
        let user_ref = user_team.creature_ref_at(0);
        let target_ref = target_team.creature_ref_at(0);
        let mut rng = BattleRng::seeded(5);
        let mut skill = tackle();
        skill.multi_hit = Some(MultiHitRange { min: 2, max: 5 });
        let pp_before = user_team.get(user_ref).unwrap().current_pp;
        skill.use_skill(&mut user_team, user_ref, &mut target_team, target_ref, &mut rng, 6);
        let pp_after = user_team.get(user_ref).unwrap().current_pp;
        assert_eq!(pp_before - pp_after, skill.pp_cost);
    }
}
