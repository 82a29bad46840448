//! Scenario 4 (spec.md §8): a higher-priority skill resolves before a
//! lower-priority one this turn, even when its user is slower.

use battle_core::battle::{Action, BattleConfig, BattleEngine};
use battle_core::creature::Creature;
use battle_core::skills::{Skill, SkillCategory, SkillHooks, TargetType, ALWAYS_HIT};
use battle_core::stats::{BaseStats, Talent};
use battle_core::types::{ElementType, Type};

fn fixed_damage_skill(name: &str, priority: i8, dmg: u32) -> Skill {
    Skill {
        name: name.into(),
        element: ElementType::Normal,
        category: SkillCategory::Physical,
        power: 0,
        pp_cost: 10,
        accuracy: ALWAYS_HIT,
        priority,
        effects: vec![],
        effect_chance: 100,
        target_type: TargetType::Foe,
        multi_hit: None,
        fixed_damage: Some(dmg),
        hooks: SkillHooks::NONE,
    }
}

fn creature(name: &str, speed: u32, skill: Skill) -> Creature {
    Creature::new(
        name,
        Type::mono(ElementType::Normal),
        25,
        BaseStats {
            hp: 200,
            attack: 50,
            defense: 50,
            sp_attack: 50,
            sp_defense: 50,
            speed,
        },
        Talent::default(),
        vec![skill],
    )
}

#[test]
fn higher_priority_acts_before_higher_speed() {
    let player = creature("PlayerMon", 50, fixed_damage_skill("Quickstrike", 1, 10));
    let foe = creature("FoeMon", 100, fixed_damage_skill("Slowhit", 0, 5));

    let mut engine = BattleEngine::new(BattleConfig::default());
    engine.init_battle(vec![player], vec![foe], true).unwrap();

    engine.submit_player_action(Action::UseSkill { index: 0 }).unwrap();
    engine.submit_foe_action(Action::UseSkill { index: 0 }).unwrap();

    let state = engine.current_state().unwrap();
    let player_pos = state
        .log
        .iter()
        .position(|e| e.text.contains("PlayerMon used"));
    let foe_pos = state.log.iter().position(|e| e.text.contains("FoeMon used"));
    assert!(player_pos.is_some(), "player's action never logged");
    assert!(foe_pos.is_some(), "foe's action never logged");
    assert!(player_pos < foe_pos, "priority did not override speed");
}

/// A priority-0 action from a slower creature resolves after a priority-0
/// action from a faster one (speed is the tiebreaker absent a priority gap).
#[test]
fn equal_priority_resolves_by_speed() {
    let player = creature("PlayerMon", 30, fixed_damage_skill("Jab", 0, 10));
    let foe = creature("FoeMon", 90, fixed_damage_skill("Slam", 0, 5));

    let mut engine = BattleEngine::new(BattleConfig::default());
    engine.init_battle(vec![player], vec![foe], true).unwrap();

    engine.submit_player_action(Action::UseSkill { index: 0 }).unwrap();
    engine.submit_foe_action(Action::UseSkill { index: 0 }).unwrap();

    let state = engine.current_state().unwrap();
    let player_pos = state
        .log
        .iter()
        .position(|e| e.text.contains("PlayerMon used"));
    let foe_pos = state.log.iter().position(|e| e.text.contains("FoeMon used"));
    assert!(foe_pos < player_pos, "faster foe should have acted first");
}
