//! SQLite storage for team and conference data

use crate::predict::MatchupProbabilities;
use crate::{Conference, ConferenceId, HoopsError, Result, TeamId, TeamRecord};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const TEAM_COLUMNS: &str = "team_id, team_name, conference_id, ap_rank, games, wins, losses,
    win_percentage, madness_rating, strength_of_schedule, offensive_srs, defensive_srs,
    simple_rating_system, offensive_rating, offensive_rating_adjusted, defensive_rating_adjusted,
    net_rating_adjusted, pace, free_throw_attempt_rate, free_throws_per_field_goal,
    three_point_attempt_rate, team_rebound_percentage, offensive_rebound_percentage,
    assist_percentage, steal_percentage, block_percentage, turnover_percentage,
    effective_field_goal_percentage, true_shooting_percentage, margin_of_victory,
    pts_per_game, opp_points_per_game, team_rebounds, field_goal_percentage,
    three_point_percentage, free_throw_percentage";

/// Season data file accepted by `hoops data import`
#[derive(Debug, Deserialize)]
pub struct ImportFile {
    pub conferences: Vec<Conference>,
    pub teams: Vec<TeamRecord>,
}

/// A read-only view of the current team/conference state.
///
/// Built fresh per request; the analytical components never touch the
/// database directly.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub teams: Vec<TeamRecord>,
    pub conferences: HashMap<ConferenceId, String>,
}

impl Snapshot {
    /// Case-insensitive team lookup by display name
    pub fn find_team(&self, name: &str) -> Option<&TeamRecord> {
        self.teams.iter().find(|t| t.matches_name(name))
    }
}

/// Database connection and operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS conference (
                conference_id INTEGER PRIMARY KEY,
                conference_abbreviation TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS team (
                team_id INTEGER PRIMARY KEY,
                team_name TEXT NOT NULL UNIQUE,
                conference_id INTEGER NOT NULL REFERENCES conference(conference_id),
                ap_rank INTEGER NOT NULL DEFAULT 0,
                games INTEGER NOT NULL DEFAULT 0,
                wins INTEGER NOT NULL DEFAULT 0,
                losses INTEGER NOT NULL DEFAULT 0,
                win_percentage REAL,
                madness_rating REAL,
                strength_of_schedule REAL,
                offensive_srs REAL,
                defensive_srs REAL,
                simple_rating_system REAL,
                offensive_rating REAL,
                offensive_rating_adjusted REAL,
                defensive_rating_adjusted REAL,
                net_rating_adjusted REAL,
                pace REAL,
                free_throw_attempt_rate REAL,
                free_throws_per_field_goal REAL,
                three_point_attempt_rate REAL,
                team_rebound_percentage REAL,
                offensive_rebound_percentage REAL,
                assist_percentage REAL,
                steal_percentage REAL,
                block_percentage REAL,
                turnover_percentage REAL,
                effective_field_goal_percentage REAL,
                true_shooting_percentage REAL,
                margin_of_victory REAL,
                pts_per_game REAL,
                opp_points_per_game REAL,
                team_rebounds REAL,
                field_goal_percentage REAL,
                three_point_percentage REAL,
                free_throw_percentage REAL
            );

            CREATE TABLE IF NOT EXISTS prediction_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL,
                home_team_id INTEGER NOT NULL REFERENCES team(team_id),
                away_team_id INTEGER NOT NULL REFERENCES team(team_id),
                home_percentage REAL NOT NULL,
                away_percentage REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_team_name ON team(team_name);
            "#,
        )?;
        Ok(())
    }

    // ==================== Conference Operations ====================

    pub fn upsert_conference(&self, conference: &Conference) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO conference (conference_id, conference_abbreviation)
             VALUES (?1, ?2)",
            params![conference.id.0, conference.abbreviation],
        )?;
        Ok(())
    }

    pub fn get_conferences(&self) -> Result<HashMap<ConferenceId, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT conference_id, conference_abbreviation FROM conference")?;

        let conferences = stmt
            .query_map([], |row| {
                Ok((ConferenceId(row.get(0)?), row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;

        Ok(conferences)
    }

    // ==================== Team Operations ====================

    pub fn upsert_team(&self, team: &TeamRecord) -> Result<()> {
        let placeholders = (1..=36)
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT OR REPLACE INTO team ({}) VALUES ({})",
            TEAM_COLUMNS, placeholders
        );
        self.conn.execute(
            &sql,
            params![
                team.id.0,
                team.name,
                team.conference_id.0,
                team.ap_rank,
                team.games,
                team.wins,
                team.losses,
                team.win_percentage,
                team.madness_rating,
                team.strength_of_schedule,
                team.offensive_srs,
                team.defensive_srs,
                team.simple_rating_system,
                team.offensive_rating,
                team.offensive_rating_adjusted,
                team.defensive_rating_adjusted,
                team.net_rating_adjusted,
                team.pace,
                team.free_throw_attempt_rate,
                team.free_throws_per_field_goal,
                team.three_point_attempt_rate,
                team.team_rebound_percentage,
                team.offensive_rebound_percentage,
                team.assist_percentage,
                team.steal_percentage,
                team.block_percentage,
                team.turnover_percentage,
                team.effective_field_goal_percentage,
                team.true_shooting_percentage,
                team.margin_of_victory,
                team.pts_per_game,
                team.opp_points_per_game,
                team.team_rebounds,
                team.field_goal_percentage,
                team.three_point_percentage,
                team.free_throw_percentage,
            ],
        )?;
        Ok(())
    }

    /// Import a season data file. Returns (conferences, teams) written.
    pub fn import(&self, file: &ImportFile) -> Result<(usize, usize)> {
        for conference in &file.conferences {
            self.upsert_conference(conference)?;
        }
        for team in &file.teams {
            self.upsert_team(team)?;
        }
        Ok((file.conferences.len(), file.teams.len()))
    }

    /// Find a team by display name (case-insensitive)
    pub fn find_team_by_name(&self, name: &str) -> Result<Option<TeamRecord>> {
        let sql = format!(
            "SELECT {} FROM team WHERE LOWER(team_name) = LOWER(?1)",
            TEAM_COLUMNS
        );
        let team = self
            .conn
            .query_row(&sql, params![name], Self::row_to_team)
            .optional()?;
        Ok(team)
    }

    /// Get team by ID
    pub fn get_team(&self, id: TeamId) -> Result<TeamRecord> {
        let sql = format!("SELECT {} FROM team WHERE team_id = ?1", TEAM_COLUMNS);
        self.conn
            .query_row(&sql, params![id.0], Self::row_to_team)
            .map_err(|_| HoopsError::TeamNotFound(id))
    }

    /// Get all teams, in stable id order
    pub fn get_all_teams(&self) -> Result<Vec<TeamRecord>> {
        let sql = format!("SELECT {} FROM team ORDER BY team_id", TEAM_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let teams = stmt
            .query_map([], Self::row_to_team)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(teams)
    }

    /// Load the team/conference snapshot the analytical components consume
    pub fn load_snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            teams: self.get_all_teams()?,
            conferences: self.get_conferences()?,
        })
    }

    fn row_to_team(row: &rusqlite::Row) -> rusqlite::Result<TeamRecord> {
        Ok(TeamRecord {
            id: TeamId(row.get(0)?),
            name: row.get(1)?,
            conference_id: ConferenceId(row.get(2)?),
            ap_rank: row.get(3)?,
            games: row.get(4)?,
            wins: row.get(5)?,
            losses: row.get(6)?,
            win_percentage: row.get(7)?,
            madness_rating: row.get(8)?,
            strength_of_schedule: row.get(9)?,
            offensive_srs: row.get(10)?,
            defensive_srs: row.get(11)?,
            simple_rating_system: row.get(12)?,
            offensive_rating: row.get(13)?,
            offensive_rating_adjusted: row.get(14)?,
            defensive_rating_adjusted: row.get(15)?,
            net_rating_adjusted: row.get(16)?,
            pace: row.get(17)?,
            free_throw_attempt_rate: row.get(18)?,
            free_throws_per_field_goal: row.get(19)?,
            three_point_attempt_rate: row.get(20)?,
            team_rebound_percentage: row.get(21)?,
            offensive_rebound_percentage: row.get(22)?,
            assist_percentage: row.get(23)?,
            steal_percentage: row.get(24)?,
            block_percentage: row.get(25)?,
            turnover_percentage: row.get(26)?,
            effective_field_goal_percentage: row.get(27)?,
            true_shooting_percentage: row.get(28)?,
            margin_of_victory: row.get(29)?,
            pts_per_game: row.get(30)?,
            opp_points_per_game: row.get(31)?,
            team_rebounds: row.get(32)?,
            field_goal_percentage: row.get(33)?,
            three_point_percentage: row.get(34)?,
            free_throw_percentage: row.get(35)?,
        })
    }

    // ==================== Prediction Log ====================

    /// Record a computed matchup probability pair
    pub fn log_prediction(
        &self,
        home: TeamId,
        away: TeamId,
        probs: &MatchupProbabilities,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO prediction_log
                (created_at, home_team_id, away_team_id, home_percentage, away_percentage)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                chrono::Utc::now().to_rfc3339(),
                home.0,
                away.0,
                probs.home_percentage,
                probs.away_percentage,
            ],
        )?;
        Ok(())
    }

    // ==================== Statistics ====================

    /// Get database statistics
    pub fn get_stats(&self) -> Result<DatabaseStats> {
        let team_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM team", [], |row| row.get(0))?;

        let conference_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM conference", [], |row| row.get(0))?;

        let prediction_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM prediction_log", [], |row| row.get(0))?;

        Ok(DatabaseStats {
            team_count: team_count as usize,
            conference_count: conference_count as usize,
            prediction_count: prediction_count as usize,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub team_count: usize,
    pub conference_count: usize,
    pub prediction_count: usize,
}
