// AI pick selection: the top-ranked legal candidate, or nothing.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::catalog::Player;
use crate::config::LeagueConfig;
use crate::draft::pick::Position;
use crate::draft::roster::{validate_draft_move, Team};
use crate::strategy::recommend::recommendations;

/// Select exactly one legal player for an AI-controlled team.
///
/// Candidates are filtered through `excluded_ids` (a defensive second layer
/// on top of whatever filtering the caller already did) and through
/// `validate_draft_move` against the team's current roster, then ranked by
/// the strategy scorer. Returns `None` when no legal candidate exists, an
/// expected outcome meaning the team forfeits this turn rather than an error.
pub fn ai_draft_player(
    team: &Team,
    available: &[Player],
    replacement_levels: &HashMap<Position, f64>,
    round: u32,
    draft_position: usize,
    excluded_ids: &HashSet<u32>,
    num_teams: usize,
    league: &LeagueConfig,
) -> Option<Player> {
    let legal: Vec<Player> = available
        .iter()
        .filter(|p| !excluded_ids.contains(&p.id))
        .filter(|p| validate_draft_move(team, p).is_valid)
        .cloned()
        .collect();

    if legal.is_empty() {
        debug!(
            "no legal candidate for {} in round {}; turn forfeited",
            team.name, round
        );
        return None;
    }

    let recs = recommendations(
        &team.picks,
        round,
        draft_position,
        &legal,
        replacement_levels,
        num_teams,
        league,
    );
    recs.ranked.first().map(|top| top.player.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PositionLimits, RosterLimits, ScoringRules};
    use crate::draft::pick::{Pick, RosterCategory};

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
            age: 26,
            historical_points: points,
        }
    }

    fn flat_replacement() -> HashMap<Position, f64> {
        Position::ALL.iter().map(|&p| (p, 200.0)).collect()
    }

    #[test]
    fn picks_the_top_candidate() {
        let league = test_league();
        let team = Team::new(1, "Team 1", &league);
        let available = vec![
            make_player(1, Position::Midfielder, 560.0),
            make_player(2, Position::Forward, 420.0),
            make_player(3, Position::Defender, 380.0),
        ];
        let pick = ai_draft_player(
            &team,
            &available,
            &flat_replacement(),
            1,
            1,
            &HashSet::new(),
            10,
            &league,
        );
        assert_eq!(pick.unwrap().id, 1);
    }

    #[test]
    fn respects_exclusion_list() {
        let league = test_league();
        let team = Team::new(1, "Team 1", &league);
        let available = vec![
            make_player(1, Position::Midfielder, 560.0),
            make_player(2, Position::Forward, 420.0),
        ];
        let excluded: HashSet<u32> = [1].into_iter().collect();
        let pick = ai_draft_player(
            &team,
            &available,
            &flat_replacement(),
            1,
            1,
            &excluded,
            10,
            &league,
        );
        assert_eq!(pick.unwrap().id, 2);
    }

    #[test]
    fn skips_illegal_positions() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        // Fill every forward slot (total_max = 4).
        for i in 0..4 {
            team.picks.push(Pick {
                player: make_player(100 + i, Position::Forward, 400.0),
                round: i + 1,
                category: RosterCategory::Active,
            });
        }
        // The best remaining player is a forward, but only defenders are legal.
        let available = vec![
            make_player(1, Position::Forward, 560.0),
            make_player(2, Position::Defender, 350.0),
        ];
        let pick = ai_draft_player(
            &team,
            &available,
            &flat_replacement(),
            5,
            1,
            &HashSet::new(),
            10,
            &league,
        );
        assert_eq!(pick.unwrap().id, 2);
    }

    #[test]
    fn none_when_team_full() {
        let league = test_league();
        let mut team = Team::new(1, "Team 1", &league);
        team.roster_limits.max_total_players = 1;
        team.picks.push(Pick {
            player: make_player(100, Position::Forward, 400.0),
            round: 1,
            category: RosterCategory::Active,
        });
        let available = vec![make_player(1, Position::Midfielder, 560.0)];
        let pick = ai_draft_player(
            &team,
            &available,
            &flat_replacement(),
            2,
            1,
            &HashSet::new(),
            10,
            &league,
        );
        assert!(pick.is_none());
    }

    #[test]
    fn none_when_pool_empty() {
        let league = test_league();
        let team = Team::new(1, "Team 1", &league);
        let pick = ai_draft_player(
            &team,
            &[],
            &flat_replacement(),
            1,
            1,
            &HashSet::new(),
            10,
            &league,
        );
        assert!(pick.is_none());
    }

    #[test]
    fn none_when_everything_excluded() {
        let league = test_league();
        let team = Team::new(1, "Team 1", &league);
        let available = vec![make_player(1, Position::Midfielder, 560.0)];
        let excluded: HashSet<u32> = [1].into_iter().collect();
        let pick = ai_draft_player(
            &team,
            &available,
            &flat_replacement(),
            1,
            1,
            &excluded,
            10,
            &league,
        );
        assert!(pick.is_none());
    }
}
