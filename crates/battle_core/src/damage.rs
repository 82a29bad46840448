//! The damage formula and critical-hit roll (spec.md §4.6).
//!
//! Grounded on `damage/formula.rs::get_base_damage` for the core formula
//! shape and `damage/pipeline.rs`'s staged-modifier ordering (stab, type
//! factor, crit, random roll applied as successive multipliers) — this
//! crate drops the teacher's generation-matrix variance (`Gen3/4/5Plus`
//! pipelines) since spec.md defines exactly one formula, not nine.

use crate::creature::Creature;
use crate::rng::BattleRng;
use crate::skills::{Skill, SkillCategory};
use crate::types;

/// Same-type-attack-bonus multiplier, applied when the skill's element
/// matches either of the user's type slots (SPEC_FULL.md §G.1).
const STAB_MULTIPLIER: f64 = 1.5;
const CRITICAL_MULTIPLIER: f64 = 1.8;

fn has_stab(user: &Creature, skill: &Skill) -> bool {
    user.creature_type.matches(skill.element)
}

/// Rolls whether this hit is critical: a signature `force_critical` hook
/// always wins; otherwise a flat `base_crit_percent` roll (default 6%,
/// spec.md §4.6).
fn roll_critical(skill: &Skill, user: &Creature, target: &Creature, rng: &mut BattleRng, base_crit_percent: u8) -> bool {
    if let Some(force_critical) = skill.hooks.force_critical {
        if force_critical(user, target) {
            return true;
        }
    }
    rng.roll_chance(base_crit_percent)
}

/// Computes the final damage dealt by `skill` from `user` to `target`,
/// implementing the full formula in spec.md §4.6. Callers only reach this
/// for `Physical`/`Special` category skills without a `fixed_damage`
/// override (that path is handled directly in `Skill::use_skill`).
pub fn calculate_damage(
    skill: &Skill,
    user: &Creature,
    target: &Creature,
    rng: &mut BattleRng,
    base_crit_percent: u8,
) -> u32 {
    let atk = match skill.category {
        SkillCategory::Physical => user.calculate_attack(),
        _ => user.calculate_sp_attack(),
    };
    let def = match skill.category {
        SkillCategory::Physical => target.calculate_defense(),
        _ => target.calculate_sp_defense(),
    };

    let effective_power = match skill.hooks.power {
        Some(power_hook) => power_hook(user, target, skill.power),
        None => skill.power,
    };

    let level = user.level as u64;
    let base = (((2 * level / 5 + 2) * effective_power as u64 * atk as u64 / def.max(1) as u64) / 50) + 2;

    let stab = if has_stab(user, skill) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let type_factor = types::skill_effectiveness(skill.element, target.creature_type) as f64;
    let is_crit = roll_critical(skill, user, target, rng, base_crit_percent);
    let crit = if is_crit { CRITICAL_MULTIPLIER } else { 1.0 };
    let random = rng.roll_damage_percent() as f64 / 100.0;

    if type_factor == 0.0 || target.has_element_immunity(skill.element) {
        return 0;
    }

    (base as f64 * stab * type_factor * crit * random).floor() as u32
}
