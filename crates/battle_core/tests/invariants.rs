//! Universal engine invariants (spec.md §8): a fainted actor's queued action
//! is skipped rather than executed, and the action-ordering sort is stable
//! under exact ties.

use battle_core::battle::{Action, BattleConfig, BattleEngine, BattleResult};
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

fn creature(name: &str, hp: u32, speed: u32, skill: Skill) -> Creature {
    let mut c = Creature::new(
        name,
        Type::mono(ElementType::Normal),
        25,
        BaseStats {
            hp,
            attack: 50,
            defense: 50,
            sp_attack: 50,
            sp_defense: 50,
            speed,
        },
        Talent::default(),
        vec![skill],
    );
    c.max_hp = hp;
    c.current_hp = hp;
    c
}

/// A queued action belonging to a creature that faints earlier in the same
/// action phase never executes; it is logged as skipped instead.
#[test]
fn fainted_actors_queued_action_is_skipped() {
    let player = creature(
        "PlayerMon",
        100,
        100,
        fixed_damage_skill("Deathblow", 7, 1000),
    );
    let foe_active = creature("FoeFront", 10, 50, fixed_damage_skill("Jab", 0, 1));
    let foe_bench = creature("FoeBack", 100, 50, fixed_damage_skill("Jab", 0, 1));

    let mut engine = BattleEngine::new(BattleConfig::default());
    engine
        .init_battle(vec![player], vec![foe_active, foe_bench], false)
        .unwrap();

    engine.submit_player_action(Action::UseSkill { index: 0 }).unwrap();
    engine.submit_foe_action(Action::UseSkill { index: 0 }).unwrap();

    let state = engine.current_state().unwrap();
    assert!(
        state.log.iter().any(|e| e.text.contains("skipped")),
        "expected a skipped-action log entry, got: {:?}",
        state.log
    );
    assert_eq!(state.result, BattleResult::Ongoing);
    assert!(state.foe_team.needs_forced_switch());
}

/// Two actions with identical priority and speed resolve in submission
/// order, not some arbitrary or reversed order.
#[test]
fn equal_priority_and_speed_preserves_submission_order() {
    let player = creature("PlayerMon", 100, 50, fixed_damage_skill("Jab", 0, 1));
    let foe = creature("FoeMon", 100, 50, fixed_damage_skill("Jab", 0, 1));

    let mut engine = BattleEngine::new(BattleConfig::default());
    engine.init_battle(vec![player], vec![foe], true).unwrap();

    engine.submit_player_action(Action::RestorePP).unwrap();
    engine.submit_foe_action(Action::RestorePP).unwrap();

    let state = engine.current_state().unwrap();
    let player_pos = state
        .log
        .iter()
        .position(|e| e.text.contains("PlayerMon restored"));
    let foe_pos = state
        .log
        .iter()
        .position(|e| e.text.contains("FoeMon restored"));
    assert!(player_pos.is_some() && foe_pos.is_some());
    assert!(
        player_pos < foe_pos,
        "submission order should have been preserved under a tie"
    );
}
