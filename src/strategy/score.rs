// Strategic scoring pipeline.
//
// Every candidate gets a four-term breakdown: talent, positional need,
// scarcity, and round timing. Each term is computed by its own stage so the
// stages can be tested independently and the final sum stays auditable.
// The whole pipeline is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::catalog::Player;
use crate::draft::pick::{Pick, Position};
use crate::strategy::analysis::{PositionAnalysis, RosterAnalysis};
use crate::valuation::scarcity::{comparable_remaining, position_weight};
use crate::valuation::vorp::{vorp, Tier};

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

/// The four scoring-term contributions for one candidate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub talent: f64,
    pub need: f64,
    pub scarcity: f64,
    pub timing: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.talent + self.need + self.scarcity + self.timing
    }
}

// ---------------------------------------------------------------------------
// Round weighting
// ---------------------------------------------------------------------------

/// Raw talent dominates early picks and fades as roster construction takes
/// over.
pub(crate) fn talent_weight(round: u32) -> f64 {
    if round <= 2 {
        0.85
    } else if round <= 4 {
        0.75
    } else {
        0.70
    }
}

/// Positional need barely registers early and dominates late.
fn need_round_weight(round: u32) -> f64 {
    if round <= 3 {
        0.1
    } else if round <= 6 {
        0.4
    } else if round <= 8 {
        0.6
    } else if round <= 10 {
        0.8
    } else {
        1.0
    }
}

/// Scarcity ramps up as the pool thins.
fn scarcity_round_multiplier(round: u32) -> f64 {
    if round <= 3 {
        0.3
    } else if round <= 8 {
        0.6
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

fn talent_score(player_vorp: f64, round: u32) -> f64 {
    player_vorp * talent_weight(round)
}

fn need_score(pa: &PositionAnalysis, remaining_rounds: u32, round: u32) -> f64 {
    let mut score = 0.0;
    if pa.is_urgent() {
        score += 50.0;
    }
    if pa.current == 0 {
        score += if pa.position == Position::Goalkeeper {
            30.0
        } else {
            100.0
        };
    }
    score += (pa.still_need as f64 / remaining_rounds.max(1) as f64).min(3.0) * 20.0;
    if pa.is_full {
        score -= 30.0;
    }
    if pa.is_luxury {
        score -= 10.0;
    }
    score * need_round_weight(round)
}

fn scarcity_score(player: &Player, available: &[Player], round: u32) -> f64 {
    let comparable = comparable_remaining(player, available);
    let raw = if comparable <= 2 {
        40.0
    } else if comparable <= 4 {
        25.0
    } else if comparable <= 6 {
        12.0
    } else {
        0.0
    };

    let mut weight = position_weight(player.position);
    if round <= 3 {
        // Early rounds: defender runs deep enough to wait on, forward talent
        // evaporates fastest.
        match player.position {
            Position::Defender => weight *= 0.3,
            Position::Forward => weight *= 1.3,
            _ => {}
        }
    }

    raw * weight * scarcity_round_multiplier(round)
}

/// Round-timing bonus for outfield players: elite early, upside late.
fn round_bonus(tier: Tier, pos: Position, age: u8, round: u32) -> f64 {
    match round {
        1 => match pos {
            Position::Forward | Position::Midfielder if tier >= Tier::Elite => 50.0,
            Position::Defender if tier >= Tier::Elite => -20.0,
            _ => 0.0,
        },
        2..=3 => match pos {
            Position::Forward | Position::Midfielder => match tier {
                Tier::Elite => 30.0,
                Tier::High => 15.0,
                _ => 0.0,
            },
            Position::Defender => match tier {
                Tier::Elite => 10.0,
                Tier::High => 5.0,
                _ => 0.0,
            },
            _ => 0.0,
        },
        4..=8 => {
            if tier >= Tier::High {
                15.0
            } else {
                0.0
            }
        }
        _ => {
            if age <= 24 && tier >= Tier::Mid {
                12.0
            } else {
                0.0
            }
        }
    }
}

/// Goalkeeper deferral rule.
///
/// A goalkeeper's week-to-week edge over a waiver-wire keeper never repays a
/// premium pick, so the position is hard-suppressed until round 10, penalized
/// once one is rostered, and nudged upward the longer a team goes without one.
fn goalkeeper_timing(round: u32, goalkeepers_rostered: usize) -> f64 {
    if round < 10 {
        -500.0
    } else if goalkeepers_rostered >= 1 {
        -300.0
    } else if round > 13 {
        50.0
    } else {
        30.0
    }
}

/// Opening-pick adjustment: pure best-player-available with scarce-value
/// positions pushed down the board.
fn opening_adjustment(tier: Tier, pos: Position) -> f64 {
    match pos {
        Position::Goalkeeper => -100.0,
        Position::Defender => -50.0,
        Position::Forward | Position::Midfielder if tier >= Tier::High => 30.0,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Pipeline entry point
// ---------------------------------------------------------------------------

/// Score one candidate for the team on the clock.
///
/// `roster` is the picking team's current picks, `available` the undrafted
/// pool the candidate is drawn from.
pub fn score_player(
    player: &Player,
    roster: &[Pick],
    analysis: &RosterAnalysis,
    round: u32,
    available: &[Player],
    replacement_levels: &HashMap<Position, f64>,
) -> ScoreBreakdown {
    let player_vorp = vorp(player, replacement_levels);
    let tier = Tier::from_points(player.historical_points);

    // The very first pick of a draft is a clean best-player-available call.
    if round == 1 && roster.is_empty() {
        return ScoreBreakdown {
            talent: player_vorp,
            need: 0.0,
            scarcity: 0.0,
            timing: opening_adjustment(tier, player.position),
        };
    }

    let pa = analysis.for_position(player.position);
    let timing = if player.position == Position::Goalkeeper {
        let goalkeepers_rostered = roster
            .iter()
            .filter(|p| p.position() == Position::Goalkeeper)
            .count();
        goalkeeper_timing(round, goalkeepers_rostered)
    } else {
        round_bonus(tier, player.position, player.age, round)
    };

    ScoreBreakdown {
        talent: talent_score(player_vorp, round),
        need: need_score(pa, analysis.remaining_rounds, round),
        scarcity: scarcity_score(player, available, round),
        timing,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
