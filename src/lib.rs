//! College basketball analytics
//!
//! Percentile rankings, competitive tiers, and head-to-head win probabilities
//! built from season-long team statistics.

pub mod data;
pub mod features;
pub mod model;
pub mod predict;
pub mod rankings;
pub mod summary;
pub mod tiers;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for a team
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TeamId(pub i64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team({})", self.0)
    }
}

/// Unique identifier for a conference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConferenceId(pub i64);

impl fmt::Display for ConferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conference({})", self.0)
    }
}

/// A conference and its display abbreviation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conference {
    pub id: ConferenceId,
    pub abbreviation: String,
}

/// Season-long statistics for one team.
///
/// Counting fields that are always present are plain integers; rate and
/// rating columns are nullable because a team may not have played enough
/// games for a metric to be computed yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub conference_id: ConferenceId,
    /// AP poll position, 0 = unranked
    pub ap_rank: u32,
    pub games: i64,
    pub wins: i64,
    pub losses: i64,

    pub win_percentage: Option<f64>,
    pub madness_rating: Option<f64>,
    pub strength_of_schedule: Option<f64>,
    pub offensive_srs: Option<f64>,
    pub defensive_srs: Option<f64>,
    pub simple_rating_system: Option<f64>,
    pub offensive_rating: Option<f64>,
    pub offensive_rating_adjusted: Option<f64>,
    pub defensive_rating_adjusted: Option<f64>,
    pub net_rating_adjusted: Option<f64>,
    pub pace: Option<f64>,
    pub free_throw_attempt_rate: Option<f64>,
    pub free_throws_per_field_goal: Option<f64>,
    pub three_point_attempt_rate: Option<f64>,
    pub team_rebound_percentage: Option<f64>,
    pub offensive_rebound_percentage: Option<f64>,
    pub assist_percentage: Option<f64>,
    pub steal_percentage: Option<f64>,
    pub block_percentage: Option<f64>,
    pub turnover_percentage: Option<f64>,
    pub effective_field_goal_percentage: Option<f64>,
    pub true_shooting_percentage: Option<f64>,

    pub margin_of_victory: Option<f64>,
    pub pts_per_game: Option<f64>,
    pub opp_points_per_game: Option<f64>,
    pub team_rebounds: Option<f64>,
    pub field_goal_percentage: Option<f64>,
    pub three_point_percentage: Option<f64>,
    pub free_throw_percentage: Option<f64>,
}

impl TeamRecord {
    /// Win-loss record as displayed ("12-3")
    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HoopsError {
    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Team not found with ID: {0}")]
    TeamNotFound(TeamId),

    #[error("Missing statistic {stat} for {team}")]
    MissingStat { team: String, stat: &'static str },

    #[error("{team} has no recorded games, per-game features are undefined")]
    NoGames { team: String },

    #[error("Classifier artifact error: {0}")]
    Model(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, HoopsError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub database_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub artifact_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                database_path: "data/hoops.db".to_string(),
            },
            model: ModelConfig {
                artifact_path: "model/win_classifier.json".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HoopsError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| HoopsError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HoopsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
