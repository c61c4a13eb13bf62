// Draft state: pick counter, team order, drafted-player exclusion set.
//
// Snake order is pure arithmetic over the 1-based global pick counter, so
// the state machine is testable without running a draft.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::config::LeagueConfig;
use crate::draft::roster::Team;
use crate::draft::scheduler::SimulationReport;

// ---------------------------------------------------------------------------
// Snake order
// ---------------------------------------------------------------------------

/// The 1-based round a global pick number falls in.
pub fn round_for_pick(pick: u32, num_teams: usize) -> u32 {
    (pick - 1) / num_teams as u32 + 1
}

/// The index into the team list that owns a global pick number.
///
/// Odd rounds run the team list forward, even rounds run it in reverse, so
/// no team is permanently stuck picking last.
pub fn team_index_for_pick(pick: u32, num_teams: usize) -> usize {
    let n = num_teams as u32;
    let within_round = (pick - 1) % n;
    if round_for_pick(pick, num_teams) % 2 == 1 {
        within_round as usize
    } else {
        (n - 1 - within_round) as usize
    }
}

// ---------------------------------------------------------------------------
// Draft state
// ---------------------------------------------------------------------------

/// The complete state of one draft. Mutated only by the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftState {
    /// Global pick counter, 1-based. Advances on every turn, including
    /// forfeited ones.
    pub current_pick: u32,
    /// Teams in draft-slot order; the order defines the snake sequence.
    pub teams: Vec<Team>,
    /// Ids of every player drafted so far, for fast exclusion.
    pub drafted: HashSet<u32>,
}

impl DraftState {
    pub fn new(teams: Vec<Team>) -> Self {
        DraftState {
            current_pick: 1,
            teams,
            drafted: HashSet::new(),
        }
    }

    /// Create one empty team per name, in slot order.
    pub fn from_names(names: &[String], league: &LeagueConfig) -> Self {
        let teams = names
            .iter()
            .enumerate()
            .map(|(i, name)| Team::new(i as u32 + 1, name.clone(), league))
            .collect();
        DraftState::new(teams)
    }

    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    /// The round the current pick falls in.
    pub fn round(&self) -> u32 {
        round_for_pick(self.current_pick, self.num_teams())
    }

    /// Index of the team on the clock.
    pub fn on_clock_index(&self) -> usize {
        team_index_for_pick(self.current_pick, self.num_teams())
    }

    /// The team on the clock, or `None` once the draft is complete.
    pub fn team_on_clock(&self) -> Option<&Team> {
        if self.is_complete() {
            return None;
        }
        self.teams.get(self.on_clock_index())
    }

    /// Total turns in the draft: one per roster slot per team.
    pub fn total_picks(&self) -> u32 {
        self.teams
            .iter()
            .map(|t| t.roster_limits.max_total_players as u32)
            .sum()
    }

    /// The draft ends when every roster is full or every turn is consumed.
    pub fn is_complete(&self) -> bool {
        self.teams.iter().all(|t| t.is_full()) || self.current_pick > self.total_picks()
    }

    pub fn is_drafted(&self, player_id: u32) -> bool {
        self.drafted.contains(&player_id)
    }

    /// Look up a team by id.
    pub fn team(&self, team_id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn team_mut(&mut self, team_id: u32) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == team_id)
    }
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Mock-draft state, fully independent of any manual draft in progress so a
/// simulation can be abandoned without side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub draft: DraftState,
    /// The draft slot the user occupies (1-based).
    pub user_draft_position: usize,
    /// Whether a simulation is in progress.
    pub active: bool,
    /// Display flag for the results surface; consumed by the UI layer.
    pub show_results: bool,
    /// Final report, populated only on completion.
    pub results: Option<SimulationReport>,
    /// When the simulation was started, for the report.
    pub started_at: Option<DateTime<Utc>>,
}

impl SimulationState {
    /// An inactive simulation with nothing in it.
    pub fn idle() -> Self {
        SimulationState {
            draft: DraftState::new(Vec::new()),
            user_draft_position: 1,
            active: false,
            show_results: false,
            results: None,
            started_at: None,
        }
    }

    /// Index into the team list of the user's team.
    pub fn user_team_index(&self) -> usize {
        self.user_draft_position - 1
    }

    /// Whether the user's team is on the clock.
    pub fn is_user_turn(&self) -> bool {
        self.active
            && !self.draft.is_complete()
            && self.draft.on_clock_index() == self.user_team_index()
    }

    /// Zero every piece of simulation state in one step. A reset must never
    /// be partial: a fresh `start` has to begin from a clean slate.
    pub fn reset(&mut self) {
        *self = SimulationState::idle();
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        SimulationState::idle()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
