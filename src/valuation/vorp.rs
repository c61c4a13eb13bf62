// Value Over Replacement Player (VORP) and talent tiers.
//
// VORP measures a player's points above the baseline freely available at the
// same position. Replacement levels can be supplied externally or derived
// from the catalog with `replacement_levels`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Player;
use crate::config::LeagueConfig;
use crate::draft::pick::Position;

// ---------------------------------------------------------------------------
// VORP
// ---------------------------------------------------------------------------

/// A player's points above the replacement level at his position.
///
/// A position missing from the table gets a 0.0 baseline, so the result is
/// defined for every player.
pub fn vorp(player: &Player, replacement_levels: &HashMap<Position, f64>) -> f64 {
    let baseline = replacement_levels
        .get(&player.position)
        .copied()
        .unwrap_or(0.0);
    player.historical_points - baseline
}

// ---------------------------------------------------------------------------
// Talent tiers
// ---------------------------------------------------------------------------

/// Discrete talent bands over historical points.
///
/// Ordering is derived, lowest band first, so `tier >= Tier::High` reads as
/// "high tier or better".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Deep,
    Low,
    Mid,
    High,
    Elite,
}

impl Tier {
    /// Band a points total into a tier.
    pub fn from_points(points: f64) -> Self {
        if points >= 500.0 {
            Tier::Elite
        } else if points >= 400.0 {
            Tier::High
        } else if points >= 300.0 {
            Tier::Mid
        } else if points >= 200.0 {
            Tier::Low
        } else {
            Tier::Deep
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Elite => "ELITE",
            Tier::High => "HIGH",
            Tier::Mid => "MID",
            Tier::Low => "LOW",
            Tier::Deep => "DEEP",
        }
    }
}

// ---------------------------------------------------------------------------
// Replacement level derivation
// ---------------------------------------------------------------------------

/// Derive the replacement level for every position from the player pool.
///
/// For each position, the replacement level is the points total of the
/// (starters + 1)-th best player, where starters = `max_active × num_teams`
/// (every team fields a full active lineup at that position). When the pool
/// is too shallow to fill all starting slots, the level sits one point below
/// the worst available player; an empty position yields 0.0.
pub fn replacement_levels(
    players: &[Player],
    league: &LeagueConfig,
) -> HashMap<Position, f64> {
    let mut levels = HashMap::new();

    for pos in Position::ALL {
        let starters = league.limits(pos).max_active * league.num_teams;

        let mut points: Vec<f64> = players
            .iter()
            .filter(|p| p.position == pos)
            .map(|p| p.historical_points)
            .collect();
        points.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        let level = if points.len() > starters {
            points[starters]
        } else if let Some(&last) = points.last() {
            last - 1.0
        } else {
            0.0
        };

        levels.insert(pos, level);
    }

    levels
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
