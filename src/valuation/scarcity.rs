// Positional scarcity: how many comparably good players remain available.
//
// A position is scarce for a given player when few same-position players of
// similar quality are left in the pool. The strategy layer turns this into a
// score bonus weighted by how scarcity-sensitive each position is.

use std::collections::HashMap;

use crate::catalog::Player;
use crate::draft::pick::Position;

/// A player counts as comparable when his points reach this fraction of the
/// reference player's points.
pub const COMPARABLE_THRESHOLD: f64 = 0.90;

/// Count the available same-position players comparable to `player`
/// (including the player himself when present in the pool).
pub fn comparable_remaining(player: &Player, available: &[Player]) -> usize {
    let floor = player.historical_points * COMPARABLE_THRESHOLD;
    available
        .iter()
        .filter(|p| p.position == player.position && p.historical_points >= floor)
        .count()
}

/// How strongly scarcity matters at each position.
///
/// Forwards are the scarcest high-value commodity; goalkeepers are scarce but
/// deliberately deferred; midfield runs deep.
pub fn position_weight(pos: Position) -> f64 {
    match pos {
        Position::Forward => 1.3,
        Position::Goalkeeper => 1.2,
        Position::Defender => 0.9,
        Position::Midfielder => 0.8,
    }
}

/// Count the available players at each position.
pub fn pool_counts(available: &[Player]) -> HashMap<Position, usize> {
    let mut counts: HashMap<Position, usize> = HashMap::new();
    for player in available {
        *counts.entry(player.position).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn comparable_counts_same_position_near_peers() {
        let target = make_player(1, Position::Forward, 400.0);
        let available = vec![
            target.clone(),
            make_player(2, Position::Forward, 390.0), // >= 360, comparable
            make_player(3, Position::Forward, 365.0), // >= 360, comparable
            make_player(4, Position::Forward, 340.0), // below 360
            make_player(5, Position::Midfielder, 500.0), // wrong position
        ];
        assert_eq!(comparable_remaining(&target, &available), 3);
    }

    #[test]
    fn comparable_excludes_weaker_players() {
        let target = make_player(1, Position::Defender, 300.0);
        let available = vec![
            target.clone(),
            make_player(2, Position::Defender, 100.0),
            make_player(3, Position::Defender, 200.0),
        ];
        assert_eq!(comparable_remaining(&target, &available), 1);
    }

    #[test]
    fn comparable_includes_better_players() {
        let target = make_player(1, Position::Midfielder, 300.0);
        let available = vec![
            make_player(2, Position::Midfielder, 550.0),
            make_player(3, Position::Midfielder, 450.0),
        ];
        assert_eq!(comparable_remaining(&target, &available), 2);
    }

    #[test]
    fn comparable_empty_pool() {
        let target = make_player(1, Position::Forward, 400.0);
        assert_eq!(comparable_remaining(&target, &[]), 0);
    }

    #[test]
    fn position_weights_ordering() {
        assert!(position_weight(Position::Forward) > position_weight(Position::Goalkeeper));
        assert!(position_weight(Position::Goalkeeper) > position_weight(Position::Defender));
        assert!(position_weight(Position::Defender) > position_weight(Position::Midfielder));
    }

    #[test]
    fn pool_counts_by_position() {
        let available = vec![
            make_player(1, Position::Forward, 400.0),
            make_player(2, Position::Forward, 300.0),
            make_player(3, Position::Goalkeeper, 250.0),
        ];
        let counts = pool_counts(&available);
        assert_eq!(counts.get(&Position::Forward), Some(&2));
        assert_eq!(counts.get(&Position::Goalkeeper), Some(&1));
        assert_eq!(counts.get(&Position::Defender), None);
    }
}
