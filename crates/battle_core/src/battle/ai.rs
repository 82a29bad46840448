//! PvE opponent action selection (spec.md §4.8). A deliberately simple,
//! uniform-random policy — the opponent-team *generator* is explicitly out
//! of scope (spec.md §1); this only decides what the foe does with the
//! team it already has.

use crate::rng::BattleRng;
use crate::team::Team;

use super::action::Action;

/// Chooses the foe's action for this turn, per spec.md §4.8:
/// 1. If active is fainted: switch to the first non-fainted teammate.
/// 2. Else if active cannot act: skip (signaled as `None`).
/// 3. Else: enumerate usable skills (sufficient PP); pick uniformly at
///    random. If none usable but current PP is below max, `RestorePP`;
///    else skip.
pub fn choose_foe_action(team: &Team, rng: &mut BattleRng) -> Option<Action> {
    if team.active().is_fainted() {
        return team.first_available_slot().map(Action::SwitchCreature);
    }

    let active = team.active();
    if !active.can_act() {
        return None;
    }

    let mut usable_indices: Vec<i8> = Vec::new();
    for (i, skill) in active.skills.iter().enumerate() {
        if active.current_pp >= skill.pp_cost {
            usable_indices.push(i as i8);
        }
    }
    if let Some(signature) = &active.signature_skill {
        let usable = signature
            .hooks
            .usable
            .map(|predicate| predicate(active))
            .unwrap_or(true);
        if usable && active.current_pp >= signature.pp_cost {
            usable_indices.push(-1);
        }
    }

    if !usable_indices.is_empty() {
        let choice = usable_indices[rng.pick_uniform_index(usable_indices.len())];
        return Some(Action::UseSkill { index: choice });
    }

    if active.current_pp < active.max_pp {
        return Some(Action::RestorePP);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Creature;
    use crate::stats::{BaseStats, Talent};
    use crate::types::{ElementType, Type};

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

    #[test]
    fn switches_to_first_available_when_active_fainted() {
        let mut c1 = creature("a");
        c1.take_damage(1000);
        let team = Team::new(vec![c1, creature("b")]).unwrap();
        let mut rng = BattleRng::seeded(1);
        assert_eq!(choose_foe_action(&team, &mut rng), Some(Action::SwitchCreature(1)));
    }

    #[test]
    fn skips_when_active_cannot_act() {
        let mut c1 = creature("a");
        c1.status = crate::status::StatusCondition::Sleep;
        let team = Team::new(vec![c1]).unwrap();
        let mut rng = BattleRng::seeded(1);
        assert_eq!(choose_foe_action(&team, &mut rng), None);
    }

    #[test]
    fn restores_pp_when_no_skill_usable() {
        let mut c1 = creature("a");
        c1.current_pp = 0;
        let team = Team::new(vec![c1]).unwrap();
        let mut rng = BattleRng::seeded(1);
        assert_eq!(choose_foe_action(&team, &mut rng), Some(Action::RestorePP));
    }
}
