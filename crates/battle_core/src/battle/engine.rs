//! `BattleEngine`: the turn state machine (spec.md §4.7), action ordering,
//! event emission, and the external API surface (spec.md §6).
//!
//! Grounded on the teacher's `state.rs::compare_turn_order`-style ordering
//! (generalized from the teacher's fixed priority bracket enum to the
//! spec's plain `i8` priority range) and on `abilities/hooks.rs`'s
//! hook-table style for the subscriber callback list.

use tracing::{info, warn};

use crate::creature::{Creature, PP_RESTORE_AMOUNT};
use crate::effects::{DurationLogic, EffectOutcome};
use crate::rng::BattleRng;
use crate::skills::{EffectApplication, Skill, SkillOutcome};
use crate::status::StatusCondition;
use crate::team::{CreatureRef, Team, TeamError};
use crate::types;

use super::action::{Action, QueuedAction};
use super::ai;
use super::config::BattleConfig;
use super::error::RuleRejection;
use super::error::UsageError;
use super::events::{BattleEvent, EffectivenessBucket, EventHandler, LogEntry, Side};
use super::state::{BattleResult, BattleState, BattleStateView};

pub struct BattleEngine {
    config: BattleConfig,
    rng: BattleRng,
    state: Option<BattleState>,
    subscribers: Vec<EventHandler>,
}

impl BattleEngine {
    pub fn new(config: BattleConfig) -> Self {
        let rng = BattleRng::seeded(config.rng_seed);
        Self {
            config,
            rng,
            state: None,
            subscribers: Vec::new(),
        }
    }

    /// `seed_rng(u64)` — optional determinism control (spec.md §6).
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    pub fn subscribe(&mut self, handler: EventHandler) {
        self.subscribers.push(handler);
    }

    fn emit(&mut self, event: BattleEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    fn turn_number(&self) -> u32 {
        self.state.as_ref().map(|s| s.turn).unwrap_or(0)
    }

    fn log(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(state) = &mut self.state {
            state.push_log(text.clone());
        }
        self.emit(BattleEvent::LogAppended(LogEntry::plain(self.turn_number(), text)));
    }

    /// `init_battle(player_team, foe_team, is_pvp) -> ()` (spec.md §6).
    /// Accepts raw rosters rather than pre-built `Team`s so the one
    /// `UsageError::EmptyTeam`/oversize check lives at this single entry
    /// point rather than duplicated at every caller.
    pub fn init_battle(
        &mut self,
        player_creatures: Vec<Creature>,
        foe_creatures: Vec<Creature>,
        is_pvp: bool,
    ) -> Result<(), UsageError> {
        let player_team = Team::new(player_creatures).map_err(team_error_to_usage)?;
        let foe_team = Team::new(foe_creatures).map_err(team_error_to_usage)?;

        self.state = Some(BattleState::new(player_team, foe_team, is_pvp));
        info!(is_pvp, "battle initialized");
        self.emit(BattleEvent::BattleStarted);
        self.begin_input_phase();
        Ok(())
    }

    pub fn current_state(&self) -> Option<BattleStateView<'_>> {
        self.state.as_ref()
    }

    pub fn submit_player_action(&mut self, action: Action) -> Result<(), UsageError> {
        self.submit_action(Side::Player, action)
    }

    pub fn submit_foe_action(&mut self, action: Action) -> Result<(), UsageError> {
        self.submit_action(Side::Foe, action)
    }

    /// Lets the PvE AI choose the foe's action and submits it, per
    /// spec.md §4.8. A host driving a PvE battle calls this instead of
    /// `submit_foe_action` directly.
    pub fn submit_ai_foe_action(&mut self) -> Result<(), UsageError> {
        let state = self.state.as_ref().ok_or(UsageError::BattleNotStarted)?;
        let action =
            ai::choose_foe_action(&state.foe_team, &mut self.rng).unwrap_or(Action::RestorePP);
        self.submit_foe_action(action)
    }

    fn submit_action(&mut self, side: Side, action: Action) -> Result<(), UsageError> {
        let state = self.state.as_mut().ok_or(UsageError::BattleNotStarted)?;
        if state.result != BattleResult::Ongoing {
            return Err(UsageError::BattleAlreadyEnded);
        }

        let already_submitted = match side {
            Side::Player => state.player_submitted,
            Side::Foe => state.foe_submitted,
        };
        if already_submitted {
            return Err(UsageError::DoubleSubmission);
        }

        let team = match side {
            Side::Player => &state.player_team,
            Side::Foe => &state.foe_team,
        };
        let actor = team.active_ref();
        let priority = validate_and_priority(team, &action)?;

        state.queue.push(QueuedAction {
            side,
            actor,
            action,
            priority,
        });
        match side {
            Side::Player => state.player_submitted = true,
            Side::Foe => state.foe_submitted = true,
        }

        if state.player_submitted && state.foe_submitted {
            self.execute_turn();
        }
        Ok(())
    }

    fn begin_input_phase(&mut self) {
        let Some(state) = &mut self.state else { return };
        state.turn += 1;
        state.player_submitted = false;
        state.foe_submitted = false;
        state.queue.clear();
        let player_awaiting_switch = state.player_team.needs_forced_switch();
        let foe_awaiting_switch = state.foe_team.needs_forced_switch();
        let turn = state.turn;
        self.emit(BattleEvent::TurnStarted {
            turn,
            player_awaiting_switch,
            foe_awaiting_switch,
        });
    }

    fn execute_turn(&mut self) {
        self.run_turn_start_hooks();
        if self.check_end_of_battle() {
            return;
        }

        self.sort_queue();
        self.run_action_phase();
        if self.check_end_of_battle() {
            return;
        }

        self.run_turn_end_hooks();
        let turn = self.turn_number();
        self.emit(BattleEvent::TurnEnded { turn });
        if self.check_end_of_battle() {
            return;
        }

        self.begin_input_phase();
    }

    /// Stable sort on `(priority desc, speed desc)`; ties keep submission
    /// order (spec.md §4.7/§8). Speed is snapshotted once at the start of
    /// the action phase rather than recomputed mid-turn.
    fn sort_queue(&mut self) {
        let Some(state) = &mut self.state else { return };
        let speeds: Vec<u32> = state
            .queue
            .iter()
            .map(|qa| {
                let team = match qa.side {
                    Side::Player => &state.player_team,
                    Side::Foe => &state.foe_team,
                };
                team.get(qa.actor).map(|c| c.calculate_speed()).unwrap_or(0)
            })
            .collect();
        let mut indices: Vec<usize> = (0..state.queue.len()).collect();
        indices.sort_by(|&a, &b| {
            state.queue[b]
                .priority
                .cmp(&state.queue[a].priority)
                .then(speeds[b].cmp(&speeds[a]))
        });
        state.queue = indices.into_iter().map(|i| state.queue[i]).collect();
    }

    fn run_turn_start_hooks(&mut self) {
        for side in [Side::Player, Side::Foe] {
            self.run_turn_start_for_side(side);
        }
    }

    fn run_turn_start_for_side(&mut self, side: Side) {
        let Some(state) = &mut self.state else { return };
        let team = match side {
            Side::Player => &mut state.player_team,
            Side::Foe => &mut state.foe_team,
        };
        let actor = team.active_ref();
        let Some(creature) = team.get_mut(actor) else { return };
        if creature.is_fainted() {
            return;
        }
        let old_status = creature.status;
        let (triggered, cleared) =
            creature.on_turn_start(&mut self.rng, self.config.wake_chance, self.config.thaw_chance);
        let species = creature.species.clone();

        if cleared {
            self.emit(BattleEvent::StatusChanged {
                target: (side, actor),
                old: old_status,
                new: StatusCondition::None,
            });
            self.log(format!("{species} is no longer {old_status:?}"));
        }

        self.run_duration_effects(side, actor, &triggered);
    }

    fn run_turn_end_hooks(&mut self) {
        for side in [Side::Player, Side::Foe] {
            self.run_turn_end_for_side(side);
        }
    }

    fn run_turn_end_for_side(&mut self, side: Side) {
        let Some(state) = &mut self.state else { return };
        let team = match side {
            Side::Player => &mut state.player_team,
            Side::Foe => &mut state.foe_team,
        };
        let actor = team.active_ref();
        let Some(creature) = team.get_mut(actor) else { return };
        if creature.is_fainted() {
            return;
        }
        let species = creature.species.clone();
        let (triggered, tick_damage) = creature.on_turn_end(&mut self.rng);

        if tick_damage > 0 {
            self.emit(BattleEvent::DamageDealt {
                target: (side, actor),
                amount: tick_damage,
                was_critical: false,
                effectiveness: EffectivenessBucket::Neutral,
            });
            self.log(format!("{species} took {tick_damage} status damage"));
        }

        self.run_duration_effects(side, actor, &triggered);
    }

    /// Executes duration-effect logic, restricted to same-team interactions
    /// (e.g. `Leech` crediting a same-side ally) — a deliberate scope
    /// simplification documented in DESIGN.md, since `CreatureRef` only
    /// addresses within one team.
    fn run_duration_effects(
        &mut self,
        side: Side,
        bearer: CreatureRef,
        effects: &[crate::effects::DurationEffect],
    ) {
        let Some(state) = &mut self.state else { return };
        let team = match side {
            Side::Player => &mut state.player_team,
            Side::Foe => &mut state.foe_team,
        };
        for effect in effects {
            if let DurationLogic::Leech { amount } = effect.logic {
                if let Some(bearer_creature) = team.get_mut(bearer) {
                    bearer_creature.take_damage(amount);
                }
                if let Some(source_creature) = team.get_mut(effect.original_source) {
                    source_creature.heal(amount);
                }
            }
        }
    }

    fn run_action_phase(&mut self) {
        let Some(state) = &mut self.state else { return };
        let queue = std::mem::take(&mut state.queue);

        for queued in queue {
            let ongoing = self
                .state
                .as_ref()
                .map(|s| s.result == BattleResult::Ongoing)
                .unwrap_or(false);
            if !ongoing {
                break;
            }
            self.run_one_action(queued);
            if self.check_end_of_battle() {
                break;
            }
        }
    }

    fn run_one_action(&mut self, queued: QueuedAction) {
        let Some(state) = &mut self.state else { return };
        let team = match queued.side {
            Side::Player => &state.player_team,
            Side::Foe => &state.foe_team,
        };
        let Some(actor_creature) = team.get(queued.actor) else { return };
        if actor_creature.is_fainted() {
            self.log("a fainted creature's action was skipped");
            return;
        }
        if !actor_creature.can_act() {
            let species = actor_creature.species.clone();
            self.log(format!("{species} could not act"));
            return;
        }

        match queued.action {
            Action::UseSkill { index } => self.run_skill_action(queued.side, queued.actor, index),
            Action::SwitchCreature(slot) => self.run_switch(queued.side, slot),
            Action::UseItem { .. } => {
                self.log(format!("rejected: {:?}", RuleRejection::ItemsNotSupported));
            }
            Action::RestorePP => self.run_restore_pp(queued.side, queued.actor),
            Action::Escape => self.run_escape(),
        }
    }

    /// Dispatches `Action::UseSkill`, including the confused-creature
    /// action-time 50% self-hit roll (spec.md §4.2's `can_act` note,
    /// SPEC_FULL.md §G.2) which sits in front of ordinary skill execution
    /// and, on a hit, replaces it outright — the queued skill does not
    /// execute and no PP is consumed.
    fn run_skill_action(&mut self, side: Side, actor: CreatureRef, index: i8) {
        let Some(state) = &mut self.state else { return };
        let own_team = match side {
            Side::Player => &mut state.player_team,
            Side::Foe => &mut state.foe_team,
        };
        let Some(user) = own_team.get(actor) else { return };

        if user.status == StatusCondition::Confusion
            && self.rng.roll_chance(self.config.confusion_self_hit_chance)
        {
            let species = user.species.clone();
            let dmg = self.config.confusion_self_hit_damage;
            let Some(state) = &mut self.state else { return };
            let own_team = match side {
                Side::Player => &mut state.player_team,
                Side::Foe => &mut state.foe_team,
            };
            if let Some(user_mut) = own_team.get_mut(actor) {
                user_mut.take_damage(dmg);
            }
            self.emit(BattleEvent::DamageDealt {
                target: (side, actor),
                amount: dmg,
                was_critical: false,
                effectiveness: EffectivenessBucket::Neutral,
            });
            self.log(format!("{species} hurt itself in its confusion"));
            return;
        }

        let Some(skill) = resolve_skill(user, index) else {
            self.log("no such skill");
            return;
        };
        let user_species = user.species.clone();

        let Some(state) = &mut self.state else { return };
        let (own_team, foe_team) = match side {
            Side::Player => (&mut state.player_team, &mut state.foe_team),
            Side::Foe => (&mut state.foe_team, &mut state.player_team),
        };
        let target_ref = foe_team.active_ref();
        let target_species_and_type = foe_team
            .get(target_ref)
            .map(|c| (c.species.clone(), c.creature_type));

        let outcome = skill.use_skill(
            own_team,
            actor,
            foe_team,
            target_ref,
            &mut self.rng,
            self.config.base_crit_percent,
        );

        let foe_side = side.opponent();
        match outcome {
            SkillOutcome::Missed => {
                self.log(format!("{user_species}'s {} missed", skill.name));
            }
            SkillOutcome::Succeeded { total_damage, hits, effects } => {
                if total_damage > 0 {
                    let effectiveness = target_species_and_type
                        .as_ref()
                        .map(|(_, t)| {
                            EffectivenessBucket::from_factor(types::skill_effectiveness(
                                skill.element,
                                t,
                            ))
                        })
                        .unwrap_or(EffectivenessBucket::Neutral);
                    self.emit(BattleEvent::DamageDealt {
                        target: (foe_side, target_ref),
                        amount: total_damage,
                        was_critical: false,
                        effectiveness,
                    });
                }
                let target_name = target_species_and_type
                    .map(|(name, _)| name)
                    .unwrap_or_default();
                self.log(format!(
                    "{user_species} used {} on {target_name} ({hits} hit(s), {total_damage} damage)",
                    skill.name
                ));

                for application in effects {
                    self.emit_effect_application(side, foe_side, application);
                }
            }
            SkillOutcome::Failed(rejection) => {
                self.log(format!("{user_species}'s {} failed: {rejection:?}", skill.name));
            }
        }
    }

    /// Emits the event (and log line) matching one attached effect's
    /// outcome, routing `target_ref` to whichever side it actually landed
    /// on (`application.target_in_own_team` is relative to the acting
    /// `side`, not always `side` itself — self-targeted skills redirect
    /// onto the user, which may still be "own team" from the foe's turn).
    fn emit_effect_application(&mut self, side: Side, foe_side: Side, application: EffectApplication) {
        let event_side = if application.target_in_own_team { side } else { foe_side };
        let target = (event_side, application.target_ref);
        let species = self
            .state
            .as_ref()
            .and_then(|state| {
                let team = match event_side {
                    Side::Player => &state.player_team,
                    Side::Foe => &state.foe_team,
                };
                team.get(application.target_ref).map(|c| c.species.clone())
            })
            .unwrap_or_default();

        match application.outcome {
            EffectOutcome::NoChange => {}
            EffectOutcome::StatusChanged { old, new } => {
                self.emit(BattleEvent::StatusChanged { target, old, new });
                self.log(format!("{species} is now {new:?}"));
            }
            EffectOutcome::StatStageChanged { stat, old, new } => {
                self.emit(BattleEvent::StatStageChanged { target, stat, old, new });
                let direction = if new > old { "rose" } else { "fell" };
                self.log(format!("{species}'s {stat:?} {direction} to {new}"));
            }
            EffectOutcome::Healed { amount } => {
                self.emit(BattleEvent::HealingDone { target, amount });
                self.log(format!("{species} recovered {amount} HP"));
            }
            EffectOutcome::Damaged { amount } => {
                self.emit(BattleEvent::DamageDealt {
                    target,
                    amount,
                    was_critical: false,
                    effectiveness: EffectivenessBucket::Neutral,
                });
                self.log(format!("{species} took {amount} damage"));
            }
            EffectOutcome::Cleared => {
                self.log(format!("{species}'s effects were cleared"));
            }
            EffectOutcome::DurationApplied => {
                self.log(format!("{species} is affected by a lingering effect"));
            }
        }
    }

    fn run_switch(&mut self, side: Side, slot: usize) {
        let Some(state) = &mut self.state else { return };
        let team = match side {
            Side::Player => &mut state.player_team,
            Side::Foe => &mut state.foe_team,
        };
        if team.switch_active(slot) {
            self.emit(BattleEvent::CreatureSwitched { side, slot });
            self.log(format!("switched in slot {slot}"));
        } else {
            self.log(format!("rejected: {:?}", RuleRejection::SwitchToFainted));
        }
    }

    fn run_restore_pp(&mut self, side: Side, actor: CreatureRef) {
        let Some(state) = &mut self.state else { return };
        let team = match side {
            Side::Player => &mut state.player_team,
            Side::Foe => &mut state.foe_team,
        };
        if let Some(creature) = team.get_mut(actor) {
            creature.restore_pp(PP_RESTORE_AMOUNT);
            self.log(format!("{} restored {PP_RESTORE_AMOUNT} PP", creature.species));
        }
    }

    /// Only meaningful for the player's side in a non-PvP battle: success
    /// ends the battle as `PlayerEscaped` (spec.md §4.7); the PvE AI never
    /// selects `Escape` (spec.md §4.8), so this runs with that assumption.
    fn run_escape(&mut self) {
        let Some(state) = &mut self.state else { return };
        if state.is_pvp {
            self.log(format!("rejected: {:?}", RuleRejection::EscapeForbiddenInPvp));
            return;
        }
        let succeeded = self.rng.roll_chance(self.config.escape_chance);
        let Some(state) = &mut self.state else { return };
        if succeeded {
            state.result = BattleResult::PlayerEscaped;
            self.log("the battle was escaped");
            // check_end_of_battle only emits BattleEnded for transitions it
            // detects itself (team-defeat outcomes); escape sets `result`
            // directly, so it must emit the event here instead.
            self.emit(BattleEvent::BattleEnded(BattleResult::PlayerEscaped));
        } else {
            self.log("escape attempt failed");
        }
    }

    /// Checks "team is defeated" end conditions and transitions `result`
    /// exactly once; returns whether the battle is now over.
    fn check_end_of_battle(&mut self) -> bool {
        let Some(state) = &mut self.state else { return true };
        if state.result != BattleResult::Ongoing {
            return true;
        }
        let player_defeated = state.player_team.is_defeated();
        let foe_defeated = state.foe_team.is_defeated();

        let result = if player_defeated && foe_defeated {
            Some(BattleResult::Draw)
        } else if player_defeated {
            Some(BattleResult::FoeWin)
        } else if foe_defeated {
            Some(BattleResult::PlayerWin)
        } else {
            None
        };

        if let Some(result) = result {
            state.result = result;
        }

        if state.result != BattleResult::Ongoing {
            let result = state.result;
            warn!(?result, "battle ended");
            self.emit(BattleEvent::BattleEnded(result));
            return true;
        }
        false
    }
}

impl Side {
    fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Foe,
            Side::Foe => Side::Player,
        }
    }
}

fn resolve_skill(user: &Creature, index: i8) -> Option<Skill> {
    if index == -1 {
        user.signature_skill.clone()
    } else if index >= 0 {
        user.skills.get(index as usize).cloned()
    } else {
        None
    }
}

fn team_error_to_usage(err: TeamError) -> UsageError {
    match err {
        TeamError::EmptyRoster => UsageError::EmptyTeam,
        TeamError::TooManyCreatures => UsageError::EmptyTeam,
    }
}

/// Non-skill actions (`SwitchCreature`/`RestorePP`/`Escape`/`UseItem`) carry
/// no spec-defined priority, so they are pinned to `+7`, the top of the
/// skill priority range — mirroring the common "switches resolve before
/// anything else this turn" convention (documented as an Open Question
/// decision in DESIGN.md).
const NON_SKILL_PRIORITY: i8 = 7;

fn validate_and_priority(team: &Team, action: &Action) -> Result<i8, UsageError> {
    match action {
        Action::UseSkill { index } => {
            let active = team.active();
            if *index == -1 {
                active
                    .signature_skill
                    .as_ref()
                    .map(|s| s.priority)
                    .ok_or(UsageError::InvalidSkillIndex)
            } else if *index >= 0 && (*index as usize) < active.skills.len() {
                Ok(active.skills[*index as usize].priority)
            } else {
                Err(UsageError::InvalidSkillIndex)
            }
        }
        Action::SwitchCreature(slot) => {
            if *slot < team.len() {
                Ok(NON_SKILL_PRIORITY)
            } else {
                Err(UsageError::InvalidSwitchTarget)
            }
        }
        Action::UseItem { .. } | Action::RestorePP | Action::Escape => Ok(NON_SKILL_PRIORITY),
    }
}
