// Player catalog loading and scoring-rule application.
//
// Reads a season-stats CSV (one row per player) and produces the immutable
// `Player` records the draft engine works with. Rows carrying a precomputed
// points total use it directly; rows without one get their points derived
// from the league's scoring rules.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::config::ScoringRules;
use crate::draft::pick::Position;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A catalog player. Immutable once loaded; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub club: String,
    pub position: Position,
    pub age: u8,
    /// The primary talent signal: fantasy points scored over the lookback
    /// window the catalog was built from.
    pub historical_points: f64,
}

/// A raw season stat line, as scraped from match data.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatLine {
    pub minutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub saves: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One catalog CSV row. The points column is optional; when empty the
/// scoring rules are applied to the raw stat line instead.
#[derive(Debug, Deserialize)]
struct RawCatalogRow {
    id: u32,
    name: String,
    #[serde(default)]
    club: String,
    position: String,
    age: u8,
    #[serde(default)]
    minutes: u32,
    #[serde(default)]
    goals: u32,
    #[serde(default)]
    assists: u32,
    #[serde(default)]
    clean_sheets: u32,
    #[serde(default)]
    saves: u32,
    #[serde(default)]
    yellow_cards: u32,
    #[serde(default)]
    red_cards: u32,
    #[serde(default)]
    points: Option<f64>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score a raw stat line with the league's per-position weights.
///
/// Statistics absent from the scoring table contribute zero, so a league
/// that doesn't reward saves simply ignores them.
pub fn score_stat_line(stats: &StatLine, position: Position, scoring: &ScoringRules) -> f64 {
    let counted: [(&str, u32); 6] = [
        ("goals", stats.goals),
        ("assists", stats.assists),
        ("clean_sheets", stats.clean_sheets),
        ("saves", stats.saves),
        ("yellow_cards", stats.yellow_cards),
        ("red_cards", stats.red_cards),
    ];

    let mut total = 0.0;
    for (stat, count) in counted {
        total += count as f64 * scoring.points_for(stat, position);
    }
    // Appearance points accrue per 90 minutes played.
    total += (stats.minutes as f64 / 90.0) * scoring.points_for("per_90_minutes", position);
    total
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_from_reader<R: Read>(rdr: R, scoring: &ScoringRules) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawCatalogRow>() {
        match result {
            Ok(raw) => {
                let Some(position) = Position::from_code(raw.position.trim()) else {
                    warn!(
                        "skipping player '{}': unknown position '{}'",
                        raw.name.trim(),
                        raw.position
                    );
                    continue;
                };
                let historical_points = match raw.points {
                    Some(points) if points.is_finite() => points,
                    _ => {
                        let stats = StatLine {
                            minutes: raw.minutes,
                            goals: raw.goals,
                            assists: raw.assists,
                            clean_sheets: raw.clean_sheets,
                            saves: raw.saves,
                            yellow_cards: raw.yellow_cards,
                            red_cards: raw.red_cards,
                        };
                        score_stat_line(&stats, position, scoring)
                    }
                };
                players.push(Player {
                    id: raw.id,
                    name: raw.name.trim().to_string(),
                    club: raw.club.trim().to_string(),
                    position,
                    age: raw.age,
                    historical_points,
                });
            }
            Err(e) => {
                warn!("skipping malformed catalog row: {}", e);
            }
        }
    }
    Ok(players)
}

/// Load the player catalog from a CSV file, applying `scoring` to any row
/// that lacks a precomputed points total.
pub fn load_catalog(path: &Path, scoring: &ScoringRules) -> Result<Vec<Player>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_from_reader(file, scoring).map_err(|e| CatalogError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
