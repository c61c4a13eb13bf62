// Roster composition analysis: what the team still needs, and how urgently.

use serde::{Deserialize, Serialize};

use crate::config::LeagueConfig;
use crate::draft::pick::{Pick, Position};

/// Need assessment for one position on one roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionAnalysis {
    pub position: Position,
    /// Players currently rostered at this position (any category).
    pub current: usize,
    /// Active-lineup minimum still unmet.
    pub still_need: usize,
    /// 0.0-1.0 pressure to address this position now.
    pub urgency: f64,
    /// The position has hit its total cap.
    pub is_full: bool,
    /// Minimum met and plenty of open slots: extra picks here are a luxury.
    pub is_luxury: bool,
}

impl PositionAnalysis {
    pub fn is_urgent(&self) -> bool {
        self.urgency > 0.3
    }
}

/// Per-position analysis of a roster at a point in the draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterAnalysis {
    /// One entry per position, in display order.
    pub positions: Vec<PositionAnalysis>,
    /// Rounds left including the current one.
    pub remaining_rounds: u32,
}

impl RosterAnalysis {
    pub fn analyze(roster: &[Pick], round: u32, league: &LeagueConfig) -> Self {
        let total_rounds = league.total_rounds();
        let remaining_rounds = total_rounds.saturating_sub(round) + 1;

        let positions = Position::ALL
            .iter()
            .map(|&pos| {
                let limits = league.limits(pos);
                let current = roster.iter().filter(|p| p.position() == pos).count();
                let still_need = limits.min_active.saturating_sub(current);
                let urgency = position_urgency(pos, still_need, remaining_rounds);
                let is_full = current >= limits.total_max;
                let open_slots = limits.total_max.saturating_sub(current);
                let is_luxury =
                    still_need == 0 && open_slots as f64 > remaining_rounds as f64 / 2.0;
                PositionAnalysis {
                    position: pos,
                    current,
                    still_need,
                    urgency,
                    is_full,
                    is_luxury,
                }
            })
            .collect();

        RosterAnalysis {
            positions,
            remaining_rounds,
        }
    }

    pub fn for_position(&self, pos: Position) -> &PositionAnalysis {
        self.positions
            .iter()
            .find(|p| p.position == pos)
            .expect("analysis covers every position")
    }

    /// Positions whose minimum is unmet and urgent, most urgent first.
    pub fn urgent_positions(&self) -> Vec<&PositionAnalysis> {
        let mut urgent: Vec<&PositionAnalysis> =
            self.positions.iter().filter(|p| p.is_urgent()).collect();
        urgent.sort_by(|a, b| {
            b.urgency
                .partial_cmp(&a.urgency)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        urgent
    }
}

/// Urgency ladder for an unmet positional minimum.
///
/// Outfield positions escalate once six rounds remain and max out at three.
/// Goalkeeper urgency is pinned low until four rounds remain: a late
/// goalkeeper costs nothing, an early one costs a bench-rounds premium.
fn position_urgency(pos: Position, still_need: usize, remaining_rounds: u32) -> f64 {
    if still_need == 0 {
        return 0.0;
    }
    if pos == Position::Goalkeeper {
        return if remaining_rounds <= 2 {
            1.0
        } else if remaining_rounds <= 4 {
            0.85
        } else {
            0.1
        };
    }
    if remaining_rounds <= 3 {
        1.0
    } else if remaining_rounds <= 6 {
        0.85
    } else {
        (still_need as f64 / remaining_rounds as f64).min(0.6)
    }
}
