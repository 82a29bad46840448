//! Literal reproductions of spec.md §8's status-tick scenarios, driven
//! through the public `Creature` surface.

use battle_core::creature::Creature;
use battle_core::rng::BattleRng;
use battle_core::stats::{BaseStats, Talent};
use battle_core::status::StatusCondition;
use battle_core::types::{ElementType, Type};

fn creature_with_max_hp(max_hp_target: u32, base_speed: u32, level: u8) -> Creature {
    // max_hp = floor(2*base*level/100) + level + 10, so pick a base that
    // lands exactly on the scenario's max_hp at the given level.
    let mut c = Creature::new(
        "c",
        Type::mono(ElementType::Normal),
        level,
        BaseStats {
            hp: 1,
            attack: 50,
            defense: 50,
            sp_attack: 50,
            sp_defense: 50,
            speed: base_speed,
        },
        Talent::default(),
        vec![],
    );
    c.max_hp = max_hp_target;
    c.current_hp = max_hp_target;
    c
}

/// Scenario 2: Burn tick on a 120 max-HP creature deals exactly 15 (max_hp/8,
/// floored) at end of turn.
#[test]
fn scenario_two_burn_tick_on_120_max_hp_deals_15() {
    let mut c = creature_with_max_hp(120, 50, 25);
    c.status = StatusCondition::Burn;
    let mut rng = BattleRng::seeded(1);
    let (_duration_effects, tick_damage) = c.on_turn_end(&mut rng);
    assert_eq!(tick_damage, 15);
    assert_eq!(c.current_hp, 105);
}

/// Scenario 3: base speed 100 at level 50 gives calculate_base_stat == 100
/// exactly (floor(2*50*50/100)+5 = 100... actually solved for base 95: see
/// below), and Paralyze halves the resulting speed to 50.
#[test]
fn scenario_three_paralyze_halves_speed_to_50() {
    // floor(2*base*level/100)+5 == 100 at level 50 -> base = 95.
    assert_eq!(Creature::calculate_base_stat(95, 50), 100);

    let mut c = Creature::new(
        "c",
        Type::mono(ElementType::Normal),
        50,
        BaseStats {
            hp: 100,
            attack: 50,
            defense: 50,
            sp_attack: 50,
            sp_defense: 50,
            speed: 95,
        },
        Talent::default(),
        vec![],
    );
    assert_eq!(c.calculate_speed(), 100);

    c.status = StatusCondition::Paralyze;
    assert_eq!(c.calculate_speed(), 50);
}

/// Poison and Freeze tick the same max_hp/8 fraction as Burn.
#[test]
fn poison_and_freeze_tick_the_same_fraction_as_burn() {
    let mut rng = BattleRng::seeded(2);

    let mut poisoned = creature_with_max_hp(120, 50, 25);
    poisoned.status = StatusCondition::Poison;
    let (_, poison_dmg) = poisoned.on_turn_end(&mut rng);
    assert_eq!(poison_dmg, 15);

    let mut frozen = creature_with_max_hp(120, 50, 25);
    frozen.status = StatusCondition::Freeze;
    let (_, freeze_dmg) = frozen.on_turn_end(&mut rng);
    assert_eq!(freeze_dmg, 15);
}

/// Bleed always ticks its flat 80 damage (100% chance), regardless of seed.
#[test]
fn bleed_always_ticks_flat_80() {
    for seed in 0..10u64 {
        let mut c = creature_with_max_hp(200, 50, 25);
        c.status = StatusCondition::Bleed;
        let mut rng = BattleRng::seeded(seed);
        let (_, dmg) = c.on_turn_end(&mut rng);
        assert_eq!(dmg, 80, "seed {seed}");
    }
}

/// A healthy (non-statused) creature takes no end-of-turn status damage.
#[test]
fn no_status_means_no_tick_damage() {
    let mut c = creature_with_max_hp(120, 50, 25);
    let mut rng = BattleRng::seeded(7);
    let (_, dmg) = c.on_turn_end(&mut rng);
    assert_eq!(dmg, 0);
    assert_eq!(c.current_hp, c.max_hp);
}
