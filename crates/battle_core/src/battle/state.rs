//! `BattleState`/`BattleResult` — the data the engine owns and the read-only
//! view a host UI consults via `current_state()` (spec.md §3/§6).

use super::action::QueuedAction;
use super::events::LogEntry;
use crate::team::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleResult {
    Ongoing,
    PlayerWin,
    FoeWin,
    Draw,
    PlayerEscaped,
}

#[derive(Debug)]
pub struct BattleState {
    pub turn: u32,
    pub player_team: Team,
    pub foe_team: Team,
    pub queue: Vec<QueuedAction>,
    pub player_submitted: bool,
    pub foe_submitted: bool,
    pub result: BattleResult,
    pub is_pvp: bool,
    pub log: Vec<LogEntry>,
}

impl BattleState {
    pub fn new(player_team: Team, foe_team: Team, is_pvp: bool) -> Self {
        Self {
            turn: 0,
            player_team,
            foe_team,
            queue: Vec::new(),
            player_submitted: false,
            foe_submitted: false,
            result: BattleResult::Ongoing,
            is_pvp,
            log: Vec::new(),
        }
    }

    pub fn push_log(&mut self, text: impl Into<String>) {
        self.log.push(LogEntry::plain(self.turn, text));
    }
}

/// Read-only snapshot handed to the host via `current_state()` — a borrow,
/// not a clone, since the engine already enforces single-threaded,
/// non-reentrant access (SPEC_FULL.md §H).
pub type BattleStateView<'a> = &'a BattleState;
