//! Example species and skills, expressed purely as data against
//! [`Creature`]/[`Skill`]. Demonstrates spec.md §1's central claim: a new
//! species or skill is authored here, never by touching `battle::engine` or
//! any other core-logic module.
//!
//! Grounded on the teacher's `entities.rs` convenience constructors
//! (`PokemonConfig::new` plus named preset functions), generalized from a
//! codegen-backed Pokédex lookup to a handful of hand-written examples.

use crate::creature::Creature;
use crate::effects::{Effect, EffectTarget};
use crate::skills::{MultiHitRange, Skill, SkillCategory, SkillHooks, TargetType, ALWAYS_HIT};
use crate::stats::{BaseStats, StatKind, Talent};
use crate::status::StatusCondition;
use crate::types::{ElementType, Type};

pub fn tackle() -> Skill {
    Skill {
        name: "Tackle".into(),
        element: ElementType::Normal,
        category: SkillCategory::Physical,
        power: 40,
        pp_cost: 10,
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

pub fn ember() -> Skill {
    Skill {
        name: "Ember".into(),
        element: ElementType::Fire,
        category: SkillCategory::Special,
        power: 45,
        pp_cost: 10,
        accuracy: 100,
        priority: 0,
        effects: vec![Effect::StatusInflict {
            condition: StatusCondition::Burn,
            chance: 10,
            target: EffectTarget::Foe,
        }],
        effect_chance: 100,
        target_type: TargetType::Foe,
        multi_hit: None,
        fixed_damage: None,
        hooks: SkillHooks::NONE,
    }
}

pub fn water_gun() -> Skill {
    Skill {
        name: "Water Gun".into(),
        element: ElementType::Water,
        category: SkillCategory::Special,
        power: 40,
        pp_cost: 15,
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

/// Five rapid weak hits, used to demonstrate `multi_hit`.
pub fn pin_missile() -> Skill {
    Skill {
        name: "Pin Missile".into(),
        element: ElementType::Bug,
        category: SkillCategory::Physical,
        power: 14,
        pp_cost: 10,
        accuracy: 85,
        priority: 0,
        effects: vec![],
        effect_chance: 100,
        target_type: TargetType::Foe,
        multi_hit: Some(MultiHitRange { min: 2, max: 5 }),
        fixed_damage: None,
        hooks: SkillHooks::NONE,
    }
}

/// A self-targeted buff, demonstrating `TargetType::SelfTarget`.
pub fn harden() -> Skill {
    Skill {
        name: "Harden".into(),
        element: ElementType::None,
        category: SkillCategory::Status,
        power: 0,
        pp_cost: 20,
        accuracy: ALWAYS_HIT,
        priority: 0,
        effects: vec![Effect::StatStageChange {
            stat: StatKind::Defense,
            delta: 1,
            chance: 100,
            target: EffectTarget::SelfSide,
        }],
        effect_chance: 100,
        target_type: TargetType::SelfTarget,
        multi_hit: None,
        fixed_damage: None,
        hooks: SkillHooks::NONE,
    }
}

/// A status move that inflicts Paralyze, demonstrating an `Effect` with no
/// direct damage component.
pub fn static_shock() -> Skill {
    Skill {
        name: "Static Shock".into(),
        element: ElementType::Machine,
        category: SkillCategory::Status,
        power: 0,
        pp_cost: 15,
        accuracy: 90,
        priority: 0,
        effects: vec![Effect::StatusInflict {
            condition: StatusCondition::Paralyze,
            chance: 100,
            target: EffectTarget::Foe,
        }],
        effect_chance: 100,
        target_type: TargetType::Foe,
        multi_hit: None,
        fixed_damage: None,
        hooks: SkillHooks::NONE,
    }
}

/// Power hook: 1.5x while the user is still above half HP ("high-HP
/// target" per spec.md §8 example 5: 90 power at 80% HP becomes 135).
fn phantom_power_hook(user: &Creature, _target: &Creature, base_power: u32) -> u32 {
    if user.current_hp * 2 >= user.max_hp {
        base_power * 3 / 2
    } else {
        base_power
    }
}

/// Force-critical hook: a guaranteed crit once the user drops to 20% HP or
/// below, independent of the power bracket above.
fn phantom_force_critical(user: &Creature, _target: &Creature) -> bool {
    user.current_hp * 5 <= user.max_hp
}

/// A desperate finisher signature skill: 1.5x power while the user is
/// healthy, a guaranteed critical once it is nearly spent. Grounded
/// literally on spec.md §8's worked example 5 (90 power -> 135 at 80% HP;
/// forced crit at 20% HP).
pub fn phantom_assassinate() -> Skill {
    Skill {
        name: "Phantom Assassinate".into(),
        element: ElementType::Shadow,
        category: SkillCategory::Physical,
        power: 90,
        pp_cost: 5,
        accuracy: 100,
        priority: 0,
        effects: vec![],
        effect_chance: 100,
        target_type: TargetType::Foe,
        multi_hit: None,
        fixed_damage: None,
        hooks: SkillHooks {
            power: Some(phantom_power_hook),
            force_critical: Some(phantom_force_critical),
            usable: None,
        },
    }
}

pub fn emberling() -> Creature {
    let mut c = Creature::new(
        "Emberling",
        Type::mono(ElementType::Fire),
        25,
        BaseStats {
            hp: 60,
            attack: 55,
            defense: 45,
            sp_attack: 65,
            sp_defense: 50,
            speed: 70,
        },
        Talent::default(),
        vec![tackle(), ember()],
    );
    c.signature_skill = Some(phantom_assassinate());
    c
}

pub fn tidalfin() -> Creature {
    Creature::new(
        "Tidalfin",
        Type::mono(ElementType::Water),
        25,
        BaseStats {
            hp: 70,
            attack: 50,
            defense: 55,
            sp_attack: 60,
            sp_defense: 60,
            speed: 55,
        },
        Talent::default(),
        vec![tackle(), water_gun(), harden()],
    )
}

pub fn creepling() -> Creature {
    Creature::new(
        "Creepling",
        Type::dual(ElementType::Bug, ElementType::Machine),
        25,
        BaseStats {
            hp: 55,
            attack: 60,
            defense: 50,
            sp_attack: 40,
            sp_defense: 40,
            speed: 85,
        },
        Talent::default(),
        vec![tackle(), pin_missile(), static_shock()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emberling_carries_a_signature_skill() {
        let c = emberling();
        assert!(c.signature_skill.is_some());
        assert_eq!(c.signature_skill.unwrap().name, "Phantom Assassinate");
    }

    #[test]
    fn phantom_assassinate_power_and_crit_brackets_match_spec_example() {
        let mut c = emberling();
        c.max_hp = 100;
        c.current_hp = 80;
        let skill = c.signature_skill.clone().unwrap();
        let power_hook = skill.hooks.power.unwrap();
        assert_eq!(power_hook(&c, &c, 90), 135);

        c.current_hp = 20;
        let crit_hook = skill.hooks.force_critical.unwrap();
        assert!(crit_hook(&c, &c));
    }

    #[test]
    fn creepling_is_dual_typed() {
        let c = creepling();
        assert!(c.creature_type.is_dual());
    }
}
