// Snake-draft scheduling: pick transitions and the simulation loop.
//
// A pick is one atomic transition: validate, categorize, append, record,
// advance. Nothing else mutates draft state. The simulation loop drives AI
// turns and suspends at the user's slot; it never blocks.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info, warn};

use chrono::{DateTime, Utc};

use crate::catalog::Player;
use crate::config::LeagueConfig;
use crate::draft::pick::{Pick, Position, RosterCategory};
use crate::draft::roster::{determine_roster_category, validate_draft_move};
use crate::draft::state::{DraftState, SimulationState};
use crate::strategy::ai::ai_draft_player;
use crate::valuation::vorp::vorp;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DraftError {
    /// A human-initiated pick failed re-validation. The UI is expected to
    /// have pre-checked with the validator; this is the last-resort guard.
    #[error("Illegal draft pick: {0}")]
    IllegalPick(String),

    #[error("player '{0}' has already been drafted")]
    AlreadyDrafted(String),

    #[error("unknown team id {0}")]
    UnknownTeam(u32),

    #[error("the draft is already complete")]
    DraftComplete,

    #[error("no simulation in progress")]
    SimulationInactive,
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// A snapshot of where the draft stands, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftProgress {
    pub current_pick: u32,
    pub round: u32,
    pub total_picks: u32,
    pub on_clock_team: Option<String>,
    pub is_complete: bool,
}

/// What the simulation loop stopped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    /// The user's team is on the clock; supply a pick to resume.
    AwaitingUser,
    /// Every roster is full or every turn is consumed.
    Complete,
}

// ---------------------------------------------------------------------------
// Final report
// ---------------------------------------------------------------------------

/// Final standings and value analysis for a completed simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Teams sorted by projected points, best first.
    pub standings: Vec<TeamStanding>,
    /// The best value picks of the draft, by VORP.
    pub best_values: Vec<ValuePick>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: u32,
    pub team_name: String,
    pub total_points: f64,
    pub total_vorp: f64,
    pub position_counts: HashMap<Position, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuePick {
    pub team_name: String,
    pub player_name: String,
    pub round: u32,
    pub vorp: f64,
}

// ---------------------------------------------------------------------------
// Pick transitions
// ---------------------------------------------------------------------------

impl DraftState {
    /// Append a decided pick and advance the counter. Callers have already
    /// validated; this is the single mutation point for draft state.
    pub(crate) fn apply_pick(
        &mut self,
        team_index: usize,
        player: Player,
        round: u32,
        category: RosterCategory,
    ) {
        debug!(
            "pick {}: {} takes {} ({}, {})",
            self.current_pick, self.teams[team_index].name, player.name,
            player.position, category
        );
        self.drafted.insert(player.id);
        self.teams[team_index].picks.push(Pick {
            player,
            round,
            category,
        });
        self.current_pick += 1;
    }

    /// Forfeit the current turn: the counter advances, no player is placed.
    pub(crate) fn skip_turn(&mut self) {
        self.current_pick += 1;
    }

    /// Draft a player to the team on the clock.
    ///
    /// Re-validates before mutating and fails with `IllegalPick` on a
    /// contract violation; on success the whole transition (categorize,
    /// append, record, advance) is applied as one unit.
    pub fn draft_player_to_team(&mut self, player: &Player) -> Result<RosterCategory, DraftError> {
        if self.is_complete() {
            return Err(DraftError::DraftComplete);
        }
        if self.is_drafted(player.id) {
            return Err(DraftError::AlreadyDrafted(player.name.clone()));
        }

        let team_index = self.on_clock_index();
        let team = &self.teams[team_index];
        let validation = validate_draft_move(team, player);
        if !validation.is_valid {
            return Err(DraftError::IllegalPick(validation.errors.join("; ")));
        }

        let round = self.round();
        let category = determine_roster_category(team, player);
        self.apply_pick(team_index, player.clone(), round, category);
        Ok(category)
    }

    /// Snapshot of the draft's position for display.
    pub fn progress(&self) -> DraftProgress {
        let total_picks = self.total_picks();
        let round = if self.teams.is_empty() {
            0
        } else {
            // Clamp so a finished draft reports its final round.
            crate::draft::state::round_for_pick(
                self.current_pick.min(total_picks.max(1)),
                self.num_teams(),
            )
        };
        DraftProgress {
            current_pick: self.current_pick,
            round,
            total_picks,
            on_clock_team: self.team_on_clock().map(|t| t.name.clone()),
            is_complete: self.is_complete(),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation orchestration
// ---------------------------------------------------------------------------

impl SimulationState {
    /// Begin a fresh mock draft with one empty team per name.
    ///
    /// `user_position` is the 1-based slot the user's team occupies.
    pub fn start(
        user_position: usize,
        team_names: &[String],
        league: &LeagueConfig,
    ) -> SimulationState {
        info!(
            "starting simulation: {} teams, user at slot {}",
            team_names.len(),
            user_position
        );
        SimulationState {
            draft: DraftState::from_names(team_names, league),
            user_draft_position: user_position,
            active: true,
            show_results: false,
            results: None,
            started_at: Some(Utc::now()),
        }
    }

    /// Apply a human pick for `team_id`.
    ///
    /// `excluded_ids` is the caller's own exclusion list, checked on top of
    /// the simulation's drafted set. Fails with `IllegalPick` when the move
    /// violates roster rules; the UI should have pre-checked with the
    /// validator, so reaching that error is a contract violation.
    pub fn draft_player(
        &mut self,
        player: &Player,
        team_id: u32,
        excluded_ids: &HashSet<u32>,
    ) -> Result<RosterCategory, DraftError> {
        if !self.active {
            return Err(DraftError::SimulationInactive);
        }
        if excluded_ids.contains(&player.id) || self.draft.is_drafted(player.id) {
            return Err(DraftError::AlreadyDrafted(player.name.clone()));
        }

        let team_index = self
            .draft
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(DraftError::UnknownTeam(team_id))?;

        let team = &self.draft.teams[team_index];
        let validation = validate_draft_move(team, player);
        if !validation.is_valid {
            return Err(DraftError::IllegalPick(validation.errors.join("; ")));
        }

        let round = self.draft.round();
        let category = determine_roster_category(team, player);
        self.draft
            .apply_pick(team_index, player.clone(), round, category);
        Ok(category)
    }

    /// Drive AI turns until the user's team is on the clock or the draft
    /// completes. Suspending at the user's slot is a pure state-machine
    /// pause: the engine holds nothing across it.
    ///
    /// AI turns never fail: the engine self-filters to legal candidates, and
    /// a team with no legal candidate forfeits its slot.
    pub fn run_until_user_turn(
        &mut self,
        catalog: &[Player],
        replacement_levels: &HashMap<Position, f64>,
        league: &LeagueConfig,
    ) -> Result<SimulationStatus, DraftError> {
        if !self.active {
            return Err(DraftError::SimulationInactive);
        }

        loop {
            if self.draft.is_complete() {
                self.finish(replacement_levels);
                return Ok(SimulationStatus::Complete);
            }

            let team_index = self.draft.on_clock_index();
            let team = &self.draft.teams[team_index];

            if team_index == self.user_team_index() {
                if !team.is_full() {
                    return Ok(SimulationStatus::AwaitingUser);
                }
                // The user's roster is full; nothing to wait for.
                self.draft.skip_turn();
                continue;
            }

            if team.is_full() {
                self.draft.skip_turn();
                continue;
            }

            let round = self.draft.round();
            let available: Vec<Player> = catalog
                .iter()
                .filter(|p| !self.draft.is_drafted(p.id))
                .cloned()
                .collect();

            let choice = ai_draft_player(
                team,
                &available,
                replacement_levels,
                round,
                team_index + 1,
                &self.draft.drafted,
                self.draft.num_teams(),
                league,
            );

            match choice {
                Some(player) => {
                    let category = determine_roster_category(team, &player);
                    self.draft
                        .apply_pick(team_index, player, round, category);
                }
                None => {
                    warn!(
                        "{} found no legal pick in round {}; slot forfeited",
                        self.draft.teams[team_index].name, round
                    );
                    self.draft.skip_turn();
                }
            }
        }
    }

    /// Forfeit the user's turn without placing a player.
    pub fn skip_user_turn(&mut self) -> Result<(), DraftError> {
        if !self.active {
            return Err(DraftError::SimulationInactive);
        }
        self.draft.skip_turn();
        Ok(())
    }

    /// Build the final report and surface it.
    fn finish(&mut self, replacement_levels: &HashMap<Position, f64>) {
        if self.results.is_some() {
            return;
        }
        info!("simulation complete after {} picks", self.draft.current_pick - 1);
        let completed_at = Utc::now();
        let started_at = self.started_at.unwrap_or(completed_at);
        self.results = Some(build_report(
            &self.draft,
            replacement_levels,
            started_at,
            completed_at,
        ));
        self.show_results = true;
    }

    /// Snapshot of the simulation's position for display.
    pub fn progress(&self) -> DraftProgress {
        self.draft.progress()
    }
}

/// Assemble standings and value analysis from a finished draft.
fn build_report(
    draft: &DraftState,
    replacement_levels: &HashMap<Position, f64>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
) -> SimulationReport {
    let mut standings: Vec<TeamStanding> = draft
        .teams
        .iter()
        .map(|team| {
            let mut position_counts: HashMap<Position, usize> = HashMap::new();
            for pick in &team.picks {
                *position_counts.entry(pick.position()).or_insert(0) += 1;
            }
            TeamStanding {
                team_id: team.id,
                team_name: team.name.clone(),
                total_points: team.total_points(),
                total_vorp: team
                    .picks
                    .iter()
                    .map(|p| vorp(&p.player, replacement_levels))
                    .sum(),
                position_counts,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.total_points
            .partial_cmp(&a.total_points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut best_values: Vec<ValuePick> = draft
        .teams
        .iter()
        .flat_map(|team| {
            team.picks.iter().map(|pick| ValuePick {
                team_name: team.name.clone(),
                player_name: pick.player.name.clone(),
                round: pick.round,
                vorp: vorp(&pick.player, replacement_levels),
            })
        })
        .collect();
    best_values.sort_by(|a, b| {
        b.vorp
            .partial_cmp(&a.vorp)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    best_values.truncate(5);

    SimulationReport {
        standings,
        best_values,
        started_at,
        completed_at,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
