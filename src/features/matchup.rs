//! Matchup feature construction
//!
//! Builds the fixed feature vector the win classifier was trained on. Feature
//! names and order are a contract with the exported model artifact and must
//! not change between training and inference.
//!
//! The builder is stateless and symmetric: swapping the two teams negates
//! every `*_diff` feature and exchanges each raw home-side feature with its
//! `_Team1` away-side counterpart.

use crate::{HoopsError, Result, TeamRecord};
use serde_json::{Map, Value};

/// Model input columns, in artifact order. Plain names are home-side values,
/// the `_Team1` suffix marks the away side, `*_diff` is home minus away.
pub const FEATURE_NAMES: [&str; 33] = [
    "sos_diff",
    "net_diff",
    "srs_diff",
    "mov_diff",
    "pts_per_game",
    "opp_points_per_game_Team1",
    "pts_per_game_Team1",
    "opp_points_per_game",
    "assist_percentage",
    "team_rebound_percentage",
    "rebs_diff",
    "turnover_percentage",
    "steal_percentage_Team1",
    "block_percentage_Team1",
    "field_goal_percentage",
    "3_point_percentage",
    "free_throw_percentage",
    "pace_diff",
    "offensive_rating",
    "offensive_srs",
    "defensive_srs_Team1",
    "offensive_rating_adjusted",
    "defensive_rating_adjusted_Team1",
    "true_shooting_percentage",
    "offensive_rebound_percentage",
    "madness_diff",
    "off_srs_diff",
    "def_srs_diff",
    "ts_diff",
    "off_rating_diff",
    "def_rating_diff",
    "ft_rate_diff",
    "3pa_rate_diff",
];

/// A built feature row, aligned with [`FEATURE_NAMES`]
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupFeatures {
    values: [f64; 33],
}

impl MatchupFeatures {
    /// Dimension of the feature vector
    pub const DIM: usize = 33;

    /// Build the feature row for a matchup, from the home side's perspective.
    ///
    /// Fails rather than emitting NaN or infinity: a missing input statistic
    /// or a side with zero recorded games aborts the computation.
    pub fn build(home: &TeamRecord, away: &TeamRecord) -> Result<Self> {
        let rebs_per_game = |team: &TeamRecord| -> Result<f64> {
            if team.games == 0 {
                return Err(HoopsError::NoGames {
                    team: team.name.clone(),
                });
            }
            Ok(stat(team, "team_rebounds", team.team_rebounds)? / team.games as f64)
        };

        let values = [
            diff(home, away, "strength_of_schedule", |t| t.strength_of_schedule)?,
            diff(home, away, "net_rating_adjusted", |t| t.net_rating_adjusted)?,
            diff(home, away, "simple_rating_system", |t| t.simple_rating_system)?,
            diff(home, away, "margin_of_victory", |t| t.margin_of_victory)?,
            stat(home, "pts_per_game", home.pts_per_game)?,
            stat(away, "opp_points_per_game", away.opp_points_per_game)?,
            stat(away, "pts_per_game", away.pts_per_game)?,
            stat(home, "opp_points_per_game", home.opp_points_per_game)?,
            stat(home, "assist_percentage", home.assist_percentage)?,
            stat(home, "team_rebound_percentage", home.team_rebound_percentage)?,
            rebs_per_game(home)? - rebs_per_game(away)?,
            stat(home, "turnover_percentage", home.turnover_percentage)?,
            stat(away, "steal_percentage", away.steal_percentage)?,
            stat(away, "block_percentage", away.block_percentage)?,
            stat(home, "field_goal_percentage", home.field_goal_percentage)?,
            stat(home, "3_point_percentage", home.three_point_percentage)?,
            stat(home, "free_throw_percentage", home.free_throw_percentage)?,
            diff(home, away, "pace", |t| t.pace)?,
            stat(home, "offensive_rating", home.offensive_rating)?,
            stat(home, "offensive_srs", home.offensive_srs)?,
            stat(away, "defensive_srs", away.defensive_srs)?,
            stat(home, "offensive_rating_adjusted", home.offensive_rating_adjusted)?,
            stat(away, "defensive_rating_adjusted", away.defensive_rating_adjusted)?,
            stat(home, "true_shooting_percentage", home.true_shooting_percentage)?,
            stat(
                home,
                "offensive_rebound_percentage",
                home.offensive_rebound_percentage,
            )?,
            diff(home, away, "madness_rating", |t| t.madness_rating)?,
            diff(home, away, "offensive_srs", |t| t.offensive_srs)?,
            diff(home, away, "defensive_srs", |t| t.defensive_srs)?,
            diff(home, away, "true_shooting_percentage", |t| {
                t.true_shooting_percentage
            })?,
            diff(home, away, "offensive_rating_adjusted", |t| {
                t.offensive_rating_adjusted
            })?,
            diff(home, away, "defensive_rating_adjusted", |t| {
                t.defensive_rating_adjusted
            })?,
            diff(home, away, "free_throw_attempt_rate", |t| {
                t.free_throw_attempt_rate
            })?,
            diff(home, away, "3_point_attempt_rate", |t| t.three_point_attempt_rate)?,
        ];

        Ok(MatchupFeatures { values })
    }

    /// Look up a feature by model input name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.values[i])
    }

    /// The raw row in artifact column order
    pub fn to_row(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    /// Named values for diagnostics
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in FEATURE_NAMES.iter().zip(self.values.iter()) {
            map.insert(name.to_string(), Value::from(*value));
        }
        Value::Object(map)
    }
}

fn stat(team: &TeamRecord, name: &'static str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| HoopsError::MissingStat {
        team: team.name.clone(),
        stat: name,
    })
}

fn diff<F>(home: &TeamRecord, away: &TeamRecord, name: &'static str, key: F) -> Result<f64>
where
    F: Fn(&TeamRecord) -> Option<f64>,
{
    Ok(stat(home, name, key(home))? - stat(away, name, key(away))?)
}
