// Configuration loading and parsing (league.toml, draft.toml).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::draft::pick::Position;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopy { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub draft: DraftConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

/// League rule set: position limits, roster size limits, scoring weights.
/// Immutable for the process lifetime once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub num_teams: usize,
    /// Per-position active/total slot limits, keyed by position code.
    pub positions: HashMap<Position, PositionLimits>,
    pub roster: RosterLimits,
    /// Per-statistic, per-position point weights.
    #[serde(default)]
    pub scoring: ScoringRules,
}

impl LeagueConfig {
    /// Limits for a position. Positions absent from the table get zeroed
    /// limits, which makes them undraftable rather than unbounded.
    pub fn limits(&self, pos: Position) -> PositionLimits {
        self.positions.get(&pos).copied().unwrap_or_default()
    }

    /// Number of draft rounds: one pick per roster slot.
    pub fn total_rounds(&self) -> u32 {
        self.roster.max_total_players as u32
    }
}

/// Active-lineup and total-count limits for a single position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLimits {
    /// Minimum active players required for a legal starting lineup.
    pub min_active: usize,
    /// Maximum active players allowed in the starting lineup.
    pub max_active: usize,
    /// Maximum players at this position across all roster categories.
    pub total_max: usize,
}

/// Roster capacity limits shared by every team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterLimits {
    pub max_total_players: usize,
    pub max_active_players: usize,
    pub max_reserve_players: usize,
    pub max_injured_reserve_players: usize,
}

/// Per-statistic, per-position point weights, e.g. a defender's goal is worth
/// more than a forward's. Unknown statistics and unlisted positions score 0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringRules(pub HashMap<String, HashMap<Position, f64>>);

impl ScoringRules {
    pub fn points_for(&self, stat: &str, pos: Position) -> f64 {
        self.0
            .get(stat)
            .and_then(|weights| weights.get(&pos))
            .copied()
            .unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[draft]` table in draft.toml.
#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    draft: DraftConfig,
}

/// Mock-draft settings: where the user picks, who the opponents are, and
/// where the player catalog lives.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
    /// The draft slot the user occupies (1-based).
    pub user_position: usize,
    /// Path to the player catalog CSV, relative to the working directory.
    pub catalog: String,
    /// Display names for all teams, in draft-slot order.
    pub team_names: Vec<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/draft.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::Parse {
            path: league_path.clone(),
            source: e,
        })?;

    let draft_path = config_dir.join("draft.toml");
    let draft_text = read_file(&draft_path)?;
    let draft_file: DraftFile = toml::from_str(&draft_text).map_err(|e| ConfigError::Parse {
        path: draft_path.clone(),
        source: e,
    })?;

    let config = Config {
        league: league_file.league,
        draft: draft_file.draft,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopy {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopy {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopy {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopy {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopy {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopy {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopy {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;

    if league.num_teams == 0 {
        return Err(ConfigError::Validation {
            field: "league.num_teams".into(),
            message: "must be greater than 0".into(),
        });
    }

    // Every position must be defined with internally consistent limits.
    for pos in Position::ALL {
        let Some(limits) = league.positions.get(&pos) else {
            return Err(ConfigError::Validation {
                field: format!("league.positions.{pos}"),
                message: "missing position limits".into(),
            });
        };
        if limits.min_active > limits.max_active {
            return Err(ConfigError::Validation {
                field: format!("league.positions.{pos}.min_active"),
                message: format!(
                    "min_active ({}) exceeds max_active ({})",
                    limits.min_active, limits.max_active
                ),
            });
        }
        if limits.max_active > limits.total_max {
            return Err(ConfigError::Validation {
                field: format!("league.positions.{pos}.max_active"),
                message: format!(
                    "max_active ({}) exceeds total_max ({})",
                    limits.max_active, limits.total_max
                ),
            });
        }
    }

    let roster = &league.roster;
    if roster.max_total_players == 0 {
        return Err(ConfigError::Validation {
            field: "league.roster.max_total_players".into(),
            message: "must be greater than 0".into(),
        });
    }
    if roster.max_active_players > roster.max_total_players {
        return Err(ConfigError::Validation {
            field: "league.roster.max_active_players".into(),
            message: "cannot exceed max_total_players".into(),
        });
    }

    // Joint satisfiability: the category capacities must be able to hold a
    // full roster, and the position caps must be able to host it.
    let category_capacity = roster.max_active_players
        + roster.max_reserve_players
        + roster.max_injured_reserve_players;
    if category_capacity < roster.max_total_players {
        return Err(ConfigError::Validation {
            field: "league.roster".into(),
            message: format!(
                "active+reserve+IR capacity ({category_capacity}) cannot hold \
                 max_total_players ({})",
                roster.max_total_players
            ),
        });
    }

    let total_position_capacity: usize = Position::ALL
        .iter()
        .map(|&p| league.limits(p).total_max)
        .sum();
    if total_position_capacity < roster.max_total_players {
        return Err(ConfigError::Validation {
            field: "league.positions".into(),
            message: format!(
                "sum of position total_max ({total_position_capacity}) cannot \
                 hold max_total_players ({})",
                roster.max_total_players
            ),
        });
    }

    let active_position_capacity: usize = Position::ALL
        .iter()
        .map(|&p| league.limits(p).max_active)
        .sum();
    if active_position_capacity < roster.max_active_players {
        return Err(ConfigError::Validation {
            field: "league.positions".into(),
            message: format!(
                "sum of position max_active ({active_position_capacity}) cannot \
                 fill max_active_players ({})",
                roster.max_active_players
            ),
        });
    }

    // Draft settings
    let draft = &config.draft;
    if draft.user_position == 0 || draft.user_position > league.num_teams {
        return Err(ConfigError::Validation {
            field: "draft.user_position".into(),
            message: format!(
                "must be between 1 and num_teams ({}), got {}",
                league.num_teams, draft.user_position
            ),
        });
    }
    if draft.team_names.len() != league.num_teams {
        return Err(ConfigError::Validation {
            field: "draft.team_names".into(),
            message: format!(
                "expected {} names (one per team), got {}",
                league.num_teams,
                draft.team_names.len()
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
