// Positions, roster categories, and pick records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Player;

/// Outfield and goalkeeper positions used for roster accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "G")]
    Goalkeeper,
    #[serde(rename = "D")]
    Defender,
    #[serde(rename = "M")]
    Midfielder,
    #[serde(rename = "F")]
    Forward,
}

impl Position {
    /// All positions in display order (goalkeeper first, forwards last).
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Parse a position code into a Position enum.
    ///
    /// Handles the single-letter codes used by the catalog ("F", "M", "D",
    /// "G") plus the spelled-out forms some feeds emit.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "G" | "GK" | "GOALKEEPER" => Some(Position::Goalkeeper),
            "D" | "DEF" | "DEFENDER" => Some(Position::Defender),
            "M" | "MID" | "MIDFIELDER" => Some(Position::Midfielder),
            "F" | "FWD" | "FORWARD" => Some(Position::Forward),
            _ => None,
        }
    }

    /// The single-letter code for this position.
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "G",
            Position::Defender => "D",
            Position::Midfielder => "M",
            Position::Forward => "F",
        }
    }

    /// Human-readable position name.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::Defender => "defender",
            Position::Midfielder => "midfielder",
            Position::Forward => "forward",
        }
    }

    /// Whether this is an outfield position (anything but goalkeeper).
    pub fn is_outfield(&self) -> bool {
        !matches!(self, Position::Goalkeeper)
    }

    /// Deterministic ordering index for roster display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Where a drafted player counts for lineup legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RosterCategory {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "reserve")]
    Reserve,
    #[serde(rename = "injured_reserve")]
    InjuredReserve,
}

impl RosterCategory {
    pub const ALL: [RosterCategory; 3] = [
        RosterCategory::Active,
        RosterCategory::Reserve,
        RosterCategory::InjuredReserve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RosterCategory::Active => "active",
            RosterCategory::Reserve => "reserve",
            RosterCategory::InjuredReserve => "injured_reserve",
        }
    }
}

impl fmt::Display for RosterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single draft pick: the drafted player plus where and when he landed.
///
/// Position and round are fixed at the moment of the pick; the roster
/// category may be changed later by roster management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub player: Player,
    /// The draft round this pick was made in (1-indexed).
    pub round: u32,
    pub category: RosterCategory,
}

impl Pick {
    pub fn position(&self) -> Position {
        self.player.position
    }
}
