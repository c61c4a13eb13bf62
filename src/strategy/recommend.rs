// Ranked draft recommendations and strategic insights.
//
// Wraps the scoring pipeline: score every available player for the team on
// the clock, rank them, and explain the top of the board in plain language.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Player;
use crate::config::LeagueConfig;
use crate::draft::pick::{Pick, Position};
use crate::strategy::analysis::RosterAnalysis;
use crate::strategy::score::{score_player, ScoreBreakdown};
use crate::valuation::scarcity::pool_counts;
use crate::valuation::vorp::{vorp, Tier};

/// How many ranked players a recommendation list carries.
pub const RECOMMENDATION_COUNT: usize = 15;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One ranked candidate with its score breakdown and a one-line rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPlayer {
    pub player: Player,
    pub vorp: f64,
    pub tier: Tier,
    pub breakdown: ScoreBreakdown,
    pub total_score: f64,
    pub recommendation: String,
}

/// Which part of the draft the team is in, for phase-appropriate advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftPhase {
    /// Rounds 1-3: take the best talent on the board.
    BestAvailable,
    /// Rounds 4-8: balance talent against roster shape.
    Balanced,
    /// Rounds 9 onward: fill what the lineup still lacks.
    NeedDriven,
    /// The last three rounds: plug every remaining hole.
    Closing,
}

impl DraftPhase {
    pub fn from_round(round: u32, total_rounds: u32) -> Self {
        if round <= 3 {
            DraftPhase::BestAvailable
        } else if round <= 8 {
            DraftPhase::Balanced
        } else if round + 3 > total_rounds {
            DraftPhase::Closing
        } else {
            DraftPhase::NeedDriven
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftPhase::BestAvailable => "best player available",
            DraftPhase::Balanced => "balanced",
            DraftPhase::NeedDriven => "need-driven",
            DraftPhase::Closing => "closing",
        }
    }
}

/// The full recommendation surface for one turn on the clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    /// Top candidates, best first.
    pub ranked: Vec<ScoredPlayer>,
    /// Display-only strategic notes.
    pub insights: Vec<String>,
    pub roster_analysis: RosterAnalysis,
    pub phase: DraftPhase,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Score and rank every available player for the team on the clock.
///
/// Pure in all arguments; identical inputs produce identical output.
pub fn recommendations(
    roster: &[Pick],
    round: u32,
    draft_position: usize,
    available: &[Player],
    replacement_levels: &HashMap<Position, f64>,
    num_teams: usize,
    league: &LeagueConfig,
) -> Recommendations {
    let analysis = RosterAnalysis::analyze(roster, round, league);
    let phase = DraftPhase::from_round(round, league.total_rounds());

    let mut ranked: Vec<ScoredPlayer> = available
        .iter()
        .map(|player| {
            let breakdown =
                score_player(player, roster, &analysis, round, available, replacement_levels);
            let player_vorp = vorp(player, replacement_levels);
            ScoredPlayer {
                player: player.clone(),
                vorp: player_vorp,
                tier: Tier::from_points(player.historical_points),
                total_score: breakdown.total(),
                recommendation: describe(player, player_vorp, &breakdown, &analysis),
                breakdown,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(RECOMMENDATION_COUNT);

    let insights = build_insights(&analysis, phase, draft_position, num_teams, available);

    Recommendations {
        ranked,
        insights,
        roster_analysis: analysis,
        phase,
    }
}

// ---------------------------------------------------------------------------
// Narrative assembly
// ---------------------------------------------------------------------------

/// One-line rationale built from whichever scoring terms dominate.
fn describe(
    player: &Player,
    player_vorp: f64,
    breakdown: &ScoreBreakdown,
    analysis: &RosterAnalysis,
) -> String {
    let mut reasons: Vec<String> = Vec::new();

    let tier = Tier::from_points(player.historical_points);
    if tier >= Tier::High {
        reasons.push(format!("{} talent ({:+.0} VORP)", tier.label(), player_vorp));
    } else if breakdown.talent >= breakdown.need && breakdown.talent > 0.0 {
        reasons.push(format!("{:+.0} VORP", player_vorp));
    }

    let pa = analysis.for_position(player.position);
    if pa.is_urgent() && pa.still_need > 0 {
        reasons.push(format!(
            "fills urgent {} need ({} short)",
            player.position.label(),
            pa.still_need
        ));
    } else if pa.current == 0 {
        reasons.push(format!("first {} on the roster", player.position.label()));
    }

    if breakdown.scarcity >= 20.0 {
        reasons.push(format!("few comparable {}s left", player.position.label()));
    }

    if breakdown.timing >= 10.0 {
        reasons.push("good value for this round".into());
    } else if breakdown.timing <= -300.0 {
        reasons.push("hold off on goalkeepers this early".into());
    }

    if reasons.is_empty() {
        reasons.push("depth option".into());
    }
    reasons.join("; ")
}

/// Display-only notes about the roster and the phase of the draft.
fn build_insights(
    analysis: &RosterAnalysis,
    phase: DraftPhase,
    draft_position: usize,
    num_teams: usize,
    available: &[Player],
) -> Vec<String> {
    let mut insights = Vec::new();
    let counts = pool_counts(available);

    for pa in analysis.urgent_positions() {
        if pa.still_need > 0 {
            insights.push(format!(
                "Urgent: {} more {} needed with {} rounds left",
                pa.still_need,
                pa.position.label(),
                analysis.remaining_rounds
            ));
            // A thin pool at an urgent position compounds the pressure.
            let remaining = counts.get(&pa.position).copied().unwrap_or(0);
            if remaining < num_teams {
                insights.push(format!(
                    "Only {remaining} {}s left in the pool",
                    pa.position.label()
                ));
            }
        }
    }

    for pa in &analysis.positions {
        if pa.is_full {
            insights.push(format!(
                "{} slots are full; skip {}s",
                pa.position.code(),
                pa.position.label()
            ));
        }
    }

    let advice = match phase {
        DraftPhase::BestAvailable => "take the best talent on the board",
        DraftPhase::Balanced => "weigh talent against roster shape",
        DraftPhase::NeedDriven => "prioritize unmet lineup minimums",
        DraftPhase::Closing => "fill every remaining hole",
    };
    insights.push(format!("Draft phase ({}): {advice}", phase.label()));

    // Teams at the turn pick twice in quick succession.
    if analysis.remaining_rounds > 1 && (draft_position == 1 || draft_position == num_teams) {
        insights.push("Picking at the turn: plan two picks at once".into());
    }

    insights
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
