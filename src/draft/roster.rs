// Team rosters and draft-move legality.
//
// All validation here is pure: every operation returns a result value and
// none of them throws or mutates. The scheduler layer is the only place an
// already-decided pick can turn into a hard error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Player;
use crate::config::{LeagueConfig, PositionLimits, RosterLimits};
use crate::draft::pick::{Pick, Position, RosterCategory};

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// A draft team: its picks in draft order plus its own copy of the league
/// limits (allowing per-team overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    /// Picks in the order they were made. Order matters for display only;
    /// validation works off aggregate counts.
    pub picks: Vec<Pick>,
    pub position_limits: HashMap<Position, PositionLimits>,
    pub roster_limits: RosterLimits,
}

impl Team {
    /// Create an empty team with limits copied from the league config.
    pub fn new(id: u32, name: impl Into<String>, league: &LeagueConfig) -> Self {
        Team {
            id,
            name: name.into(),
            picks: Vec::new(),
            position_limits: league.positions.clone(),
            roster_limits: league.roster,
        }
    }

    /// Limits for a position. Positions without an entry get zeroed limits,
    /// making them undraftable rather than unbounded.
    pub fn limits(&self, pos: Position) -> PositionLimits {
        self.position_limits.get(&pos).copied().unwrap_or_default()
    }

    /// Total players drafted so far.
    pub fn total(&self) -> usize {
        self.picks.len()
    }

    /// Whether the roster has reached its total capacity.
    pub fn is_full(&self) -> bool {
        self.picks.len() >= self.roster_limits.max_total_players
    }

    /// Players at a position across all roster categories.
    pub fn position_total(&self, pos: Position) -> usize {
        self.picks.iter().filter(|p| p.position() == pos).count()
    }

    /// Whether a player id is already on this roster.
    pub fn has_player(&self, id: u32) -> bool {
        self.picks.iter().any(|p| p.player.id == id)
    }

    /// Sum of historical points across the roster.
    pub fn total_points(&self) -> f64 {
        self.picks.iter().map(|p| p.player.historical_points).sum()
    }
}

// ---------------------------------------------------------------------------
// Roster counts
// ---------------------------------------------------------------------------

/// Aggregate pick counts by roster category and position.
///
/// Pure aggregation over `picks`: computing it twice without a mutation in
/// between yields identical results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterCounts {
    slots: HashMap<(RosterCategory, Position), usize>,
    total: usize,
}

impl RosterCounts {
    pub fn for_team(team: &Team) -> Self {
        let mut counts = RosterCounts::default();
        for pick in &team.picks {
            *counts
                .slots
                .entry((pick.category, pick.position()))
                .or_insert(0) += 1;
            counts.total += 1;
        }
        counts
    }

    /// Players at a position within one category.
    pub fn count(&self, category: RosterCategory, pos: Position) -> usize {
        self.slots.get(&(category, pos)).copied().unwrap_or(0)
    }

    /// Players in a category across all positions.
    pub fn category_total(&self, category: RosterCategory) -> usize {
        Position::ALL
            .iter()
            .map(|&pos| self.count(category, pos))
            .sum()
    }

    /// Players at a position across all categories.
    pub fn position_total(&self, pos: Position) -> usize {
        RosterCategory::ALL
            .iter()
            .map(|&cat| self.count(cat, pos))
            .sum()
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

// ---------------------------------------------------------------------------
// Validation results
// ---------------------------------------------------------------------------

/// The outcome of checking a single candidate draft move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// The outcome of checking a whole roster against its caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// The outcome of checking starting-lineup legality.
///
/// Exceeding a maximum is a hard error; an unmet minimum is only a warning
/// while rounds remain to fix it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupValidation {
    pub is_valid: bool,
    pub is_complete: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Draft-move validation
// ---------------------------------------------------------------------------

/// Decide whether `candidate` may legally be drafted by `team`.
///
/// Fails when the roster is at total capacity or the candidate's position has
/// hit its total cap. Active/reserve capacity is not checked here; category
/// placement handles that side.
pub fn validate_draft_move(team: &Team, candidate: &Player) -> MoveValidation {
    let mut errors = Vec::new();

    if team.is_full() {
        errors.push(format!(
            "roster is full ({}/{})",
            team.total(),
            team.roster_limits.max_total_players
        ));
    }

    let pos = candidate.position;
    let limits = team.limits(pos);
    let at_position = team.position_total(pos);
    if at_position >= limits.total_max {
        errors.push(format!(
            "{} position is full ({at_position}/{})",
            pos.code(),
            limits.total_max
        ));
    }

    MoveValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Choose the roster category a newly drafted player lands in.
///
/// Greedy first-fit: active while both the position's active limit and the
/// global active limit have room, then reserve, then injured reserve. Purely
/// advisory placement; rejection is `validate_draft_move`'s job.
pub fn determine_roster_category(team: &Team, candidate: &Player) -> RosterCategory {
    let counts = RosterCounts::for_team(team);
    let pos = candidate.position;
    let limits = team.limits(pos);

    let active_at_position = counts.count(RosterCategory::Active, pos);
    let active_total = counts.category_total(RosterCategory::Active);
    if active_at_position < limits.max_active
        && active_total < team.roster_limits.max_active_players
    {
        return RosterCategory::Active;
    }

    let reserve_total = counts.category_total(RosterCategory::Reserve);
    if reserve_total < team.roster_limits.max_reserve_players {
        return RosterCategory::Reserve;
    }

    RosterCategory::InjuredReserve
}

/// Whole-roster sanity check: position totals and overall size within caps.
/// Used after a batch of picks, e.g. at the end of an AI round.
pub fn validate_roster(team: &Team) -> RosterValidation {
    let mut errors = Vec::new();

    for pos in Position::ALL {
        let limits = team.limits(pos);
        let at_position = team.position_total(pos);
        if at_position > limits.total_max {
            errors.push(format!(
                "{} position over limit ({at_position}/{})",
                pos.code(),
                limits.total_max
            ));
        }
    }

    if team.total() > team.roster_limits.max_total_players {
        errors.push(format!(
            "roster over limit ({}/{})",
            team.total(),
            team.roster_limits.max_total_players
        ));
    }

    RosterValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Check starting-lineup legality: active counts within `[min_active,
/// max_active]` per position and within the global active cap.
pub fn validate_lineup(team: &Team) -> LineupValidation {
    let counts = RosterCounts::for_team(team);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for pos in Position::ALL {
        let limits = team.limits(pos);
        let active = counts.count(RosterCategory::Active, pos);
        if active > limits.max_active {
            errors.push(format!(
                "too many active {}s ({active}/{})",
                pos.label(),
                limits.max_active
            ));
        } else if active < limits.min_active {
            warnings.push(format!(
                "needs {} more active {}",
                limits.min_active - active,
                pos.label()
            ));
        }
    }

    let active_total = counts.category_total(RosterCategory::Active);
    if active_total > team.roster_limits.max_active_players {
        errors.push(format!(
            "too many active players ({active_total}/{})",
            team.roster_limits.max_active_players
        ));
    }

    let is_valid = errors.is_empty();
    LineupValidation {
        is_valid,
        is_complete: is_valid && warnings.is_empty(),
        errors,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringRules;

    fn test_league() -> LeagueConfig {
        let mut positions = HashMap::new();
        positions.insert(
            Position::Goalkeeper,
            PositionLimits { min_active: 1, max_active: 1, total_max: 2 },
        );
        positions.insert(
            Position::Defender,
            PositionLimits { min_active: 3, max_active: 5, total_max: 5 },
        );
        positions.insert(
            Position::Midfielder,
            PositionLimits { min_active: 3, max_active: 5, total_max: 5 },
        );
        positions.insert(
            Position::Forward,
            PositionLimits { min_active: 1, max_active: 3, total_max: 4 },
        );
        LeagueConfig {
            name: "Test League".into(),
            num_teams: 10,
            positions,
            roster: RosterLimits {
                max_total_players: 14,
                max_active_players: 11,
                max_reserve_players: 2,
                max_injured_reserve_players: 1,
            },
            scoring: ScoringRules::default(),
        }
    }

    fn make_player(id: u32, position: Position, points: f64) -> Player {
        Player {
            id,
            name: format!("Player {id}"),
            club: "TST".into(),
            position,
            age: 25,
            historical_points: points,
        }
    }

    fn add_pick(team: &mut Team, player: Player, round: u32, category: RosterCategory) {
        team.picks.push(Pick { player, round, category });
    }

    #[test]
    fn new_team_is_empty() {
        let team = Team::new(1, "Team 1", &test_league());
        assert_eq!(team.total(), 0);
        assert!(!team.is_full());
        assert_eq!(team.position_total(Position::Forward), 0);
    }

    #[test]
    fn team_copies_league_limits() {
        let team = Team::new(1, "Team 1", &test_league());
        assert_eq!(team.limits(Position::Goalkeeper).total_max, 2);
        assert_eq!(team.roster_limits.max_total_players, 14);
    }

    #[test]
    fn roster_counts_aggregates_by_category_and_position() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        add_pick(&mut team, make_player(1, Position::Forward, 400.0), 1, RosterCategory::Active);
        add_pick(&mut team, make_player(2, Position::Forward, 350.0), 2, RosterCategory::Active);
        add_pick(&mut team, make_player(3, Position::Forward, 200.0), 3, RosterCategory::Reserve);
        add_pick(&mut team, make_player(4, Position::Defender, 300.0), 4, RosterCategory::Active);

        let counts = RosterCounts::for_team(&team);
        assert_eq!(counts.count(RosterCategory::Active, Position::Forward), 2);
        assert_eq!(counts.count(RosterCategory::Reserve, Position::Forward), 1);
        assert_eq!(counts.count(RosterCategory::Active, Position::Defender), 1);
        assert_eq!(counts.position_total(Position::Forward), 3);
        assert_eq!(counts.category_total(RosterCategory::Active), 3);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn roster_counts_idempotent() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        add_pick(&mut team, make_player(1, Position::Midfielder, 420.0), 1, RosterCategory::Active);

        let first = RosterCounts::for_team(&team);
        let second = RosterCounts::for_team(&team);
        assert_eq!(first, second);
    }

    #[test]
    fn validate_draft_move_accepts_open_position() {
        let league = test_league();
        let team = Team::new(1, "Team 1", &league);
        let result = validate_draft_move(&team, &make_player(1, Position::Forward, 400.0));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn validate_draft_move_rejects_full_position() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        // Forwards cap at total_max = 4.
        for i in 0..4 {
            add_pick(&mut team, make_player(i, Position::Forward, 300.0), i + 1, RosterCategory::Active);
        }
        let result = validate_draft_move(&team, &make_player(99, Position::Forward, 400.0));
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("position is full"));
        assert!(result.errors[0].starts_with("F "));
    }

    #[test]
    fn validate_draft_move_rejects_full_roster() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        team.roster_limits.max_total_players = 2;
        add_pick(&mut team, make_player(1, Position::Forward, 300.0), 1, RosterCategory::Active);
        add_pick(&mut team, make_player(2, Position::Defender, 300.0), 2, RosterCategory::Active);

        let result = validate_draft_move(&team, &make_player(3, Position::Midfielder, 400.0));
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("roster is full"));
    }

    #[test]
    fn validate_draft_move_second_goalkeeper_within_cap() {
        // total_max for G is 2, so a backup goalkeeper is legal.
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        add_pick(&mut team, make_player(1, Position::Goalkeeper, 300.0), 1, RosterCategory::Active);
        let result = validate_draft_move(&team, &make_player(2, Position::Goalkeeper, 250.0));
        assert!(result.is_valid);
    }

    #[test]
    fn determine_category_active_first() {
        let league = test_league();
        let team = Team::new(1, "Team 1", &league);
        let cat = determine_roster_category(&team, &make_player(1, Position::Forward, 400.0));
        assert_eq!(cat, RosterCategory::Active);
    }

    #[test]
    fn determine_category_reserve_when_position_active_full() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        // G max_active = 1, so the backup goalkeeper goes to reserve.
        add_pick(&mut team, make_player(1, Position::Goalkeeper, 300.0), 1, RosterCategory::Active);
        let cat = determine_roster_category(&team, &make_player(2, Position::Goalkeeper, 250.0));
        assert_eq!(cat, RosterCategory::Reserve);
    }

    #[test]
    fn determine_category_reserve_when_global_active_full() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        team.roster_limits.max_active_players = 2;
        add_pick(&mut team, make_player(1, Position::Forward, 300.0), 1, RosterCategory::Active);
        add_pick(&mut team, make_player(2, Position::Defender, 300.0), 2, RosterCategory::Active);
        // Position has active room but the global active cap is reached.
        let cat = determine_roster_category(&team, &make_player(3, Position::Midfielder, 400.0));
        assert_eq!(cat, RosterCategory::Reserve);
    }

    #[test]
    fn determine_category_injured_reserve_last() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        team.roster_limits.max_active_players = 1;
        team.roster_limits.max_reserve_players = 1;
        add_pick(&mut team, make_player(1, Position::Forward, 300.0), 1, RosterCategory::Active);
        add_pick(&mut team, make_player(2, Position::Defender, 300.0), 2, RosterCategory::Reserve);
        let cat = determine_roster_category(&team, &make_player(3, Position::Midfielder, 400.0));
        assert_eq!(cat, RosterCategory::InjuredReserve);
    }

    #[test]
    fn validate_roster_clean() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        add_pick(&mut team, make_player(1, Position::Forward, 400.0), 1, RosterCategory::Active);
        let result = validate_roster(&team);
        assert!(result.is_valid);
    }

    #[test]
    fn validate_roster_flags_position_over_limit() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        // Bypass move validation to plant an illegal state (5 forwards, cap 4).
        for i in 0..5 {
            add_pick(&mut team, make_player(i, Position::Forward, 300.0), i + 1, RosterCategory::Active);
        }
        let result = validate_roster(&team);
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("F position over limit"));
    }

    #[test]
    fn validate_roster_flags_total_over_limit() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        team.roster_limits.max_total_players = 1;
        add_pick(&mut team, make_player(1, Position::Forward, 300.0), 1, RosterCategory::Active);
        add_pick(&mut team, make_player(2, Position::Defender, 300.0), 2, RosterCategory::Active);
        let result = validate_roster(&team);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("roster over limit")));
    }

    #[test]
    fn validate_lineup_incomplete_is_warning_not_error() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        add_pick(&mut team, make_player(1, Position::Forward, 400.0), 1, RosterCategory::Active);
        let result = validate_lineup(&team);
        assert!(result.is_valid, "below-minimum is soft: {:?}", result.errors);
        assert!(!result.is_complete);
        assert!(result.warnings.iter().any(|w| w.contains("goalkeeper")));
        assert!(result.warnings.iter().any(|w| w.contains("defender")));
    }

    #[test]
    fn validate_lineup_over_max_is_error() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        // Two active goalkeepers against max_active = 1.
        add_pick(&mut team, make_player(1, Position::Goalkeeper, 300.0), 1, RosterCategory::Active);
        add_pick(&mut team, make_player(2, Position::Goalkeeper, 250.0), 2, RosterCategory::Active);
        let result = validate_lineup(&team);
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("too many active goalkeepers"));
    }

    #[test]
    fn validate_lineup_complete_when_minimums_met() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        let mut id = 0;
        let mut add_active = |team: &mut Team, pos: Position, n: usize| {
            for _ in 0..n {
                id += 1;
                add_pick(team, make_player(id, pos, 300.0), id, RosterCategory::Active);
            }
        };
        add_active(&mut team, Position::Goalkeeper, 1);
        add_active(&mut team, Position::Defender, 3);
        add_active(&mut team, Position::Midfielder, 3);
        add_active(&mut team, Position::Forward, 1);

        let result = validate_lineup(&team);
        assert!(result.is_valid);
        assert!(result.is_complete);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn validate_lineup_reserves_do_not_count() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        // Reserve goalkeeper does not satisfy the active minimum.
        add_pick(&mut team, make_player(1, Position::Goalkeeper, 300.0), 1, RosterCategory::Reserve);
        let result = validate_lineup(&team);
        assert!(result.warnings.iter().any(|w| w.contains("1 more active goalkeeper")));
    }

    #[test]
    fn total_points_sums_roster() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        add_pick(&mut team, make_player(1, Position::Forward, 400.0), 1, RosterCategory::Active);
        add_pick(&mut team, make_player(2, Position::Defender, 250.5), 2, RosterCategory::Active);
        assert!((team.total_points() - 650.5).abs() < 1e-9);
    }

    #[test]
    fn has_player_by_id() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        add_pick(&mut team, make_player(42, Position::Forward, 400.0), 1, RosterCategory::Active);
        assert!(team.has_player(42));
        assert!(!team.has_player(43));
    }
}
