//! Read models for the presentation layer
//!
//! JSON-serializable shapes consumed directly by the frontend: the AP top-25
//! list, the madness-rating leaderboard, and the two-team matchup report with
//! per-category ranks attached.

use crate::data::Snapshot;
use crate::rankings::{self, compare_values, Polarity, StatRanks};
use crate::{HoopsError, Result, TeamRecord};
use serde::Serialize;

/// One row of the AP top-25 listing
#[derive(Debug, Clone, Serialize)]
pub struct Top25Entry {
    pub ap_rank: u32,
    pub team_name: String,
    pub record: String,
}

/// AP-ranked teams in poll order. Rank 0 means unranked and is skipped.
pub fn top_25(snapshot: &Snapshot) -> Vec<Top25Entry> {
    let mut ranked: Vec<&TeamRecord> = snapshot
        .teams
        .iter()
        .filter(|t| t.ap_rank != 0)
        .collect();
    ranked.sort_by_key(|t| t.ap_rank);

    ranked
        .iter()
        .map(|t| Top25Entry {
            ap_rank: t.ap_rank,
            team_name: t.name.clone(),
            record: t.record(),
        })
        .collect()
}

/// One row of the madness-rating leaderboard
#[derive(Debug, Clone, Serialize)]
pub struct MadnessEntry {
    pub position: u32,
    pub team_name: String,
    pub madness_rating: Option<f64>,
    pub conference: String,
}

/// All teams ordered by madness rating, best first, with 1-based positions.
/// Teams without a conference abbreviation are omitted.
pub fn madness_leaderboard(snapshot: &Snapshot) -> Vec<MadnessEntry> {
    let mut sorted: Vec<&TeamRecord> = snapshot.teams.iter().collect();
    sorted.sort_by(|a, b| {
        compare_values(a.madness_rating, b.madness_rating, Polarity::HigherIsBetter)
    });

    sorted
        .iter()
        .filter_map(|t| {
            snapshot
                .conferences
                .get(&t.conference_id)
                .map(|abbr| (t, abbr))
        })
        .enumerate()
        .map(|(i, (t, abbr))| MadnessEntry {
            position: i as u32 + 1,
            team_name: t.name.clone(),
            madness_rating: t.madness_rating,
            conference: abbr.clone(),
        })
        .collect()
}

/// All team names, alphabetical
pub fn team_names(snapshot: &Snapshot) -> Vec<String> {
    let mut names: Vec<String> = snapshot.teams.iter().map(|t| t.name.clone()).collect();
    names.sort();
    names
}

/// One side of a matchup report: the full stat profile plus every category
/// rank for this team.
#[derive(Debug, Clone, Serialize)]
pub struct TeamProfile {
    #[serde(flatten)]
    pub team: TeamRecord,
    pub conference: Option<String>,
    pub stat_ranks: StatRanks,
}

/// Both sides of a matchup, as served to the comparison page
#[derive(Debug, Clone, Serialize)]
pub struct MatchupReport {
    pub team1: TeamProfile,
    pub team2: TeamProfile,
}

/// Build the matchup report for two teams resolved by name.
///
/// Ranks are recomputed from the snapshot on every call; nothing is cached
/// between requests.
pub fn matchup_report(snapshot: &Snapshot, team1: &str, team2: &str) -> Result<MatchupReport> {
    let first = snapshot
        .find_team(team1)
        .ok_or_else(|| HoopsError::UnknownTeam(team1.to_string()))?;
    let second = snapshot
        .find_team(team2)
        .ok_or_else(|| HoopsError::UnknownTeam(team2.to_string()))?;

    let mut all_ranks = rankings::rank_all(&snapshot.teams);

    let profile = |team: &TeamRecord, ranks: StatRanks| TeamProfile {
        team: team.clone(),
        conference: snapshot.conferences.get(&team.conference_id).cloned(),
        stat_ranks: ranks,
    };

    let first_ranks = all_ranks.remove(&first.id).unwrap_or_default();
    let second_ranks = all_ranks.remove(&second.id).unwrap_or_default();

    Ok(MatchupReport {
        team1: profile(first, first_ranks),
        team2: profile(second, second_ranks),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConferenceId, TeamId};
    use std::collections::HashMap;

    fn team(id: i64, name: &str, ap_rank: u32, madness: Option<f64>) -> TeamRecord {
        TeamRecord {
            id: TeamId(id),
            name: name.to_string(),
            conference_id: ConferenceId(1),
            ap_rank,
            wins: 20,
            losses: 8,
            madness_rating: madness,
            ..Default::default()
        }
    }

    fn snapshot(teams: Vec<TeamRecord>) -> Snapshot {
        let mut conferences = HashMap::new();
        conferences.insert(ConferenceId(1), "WCC".to_string());
        Snapshot { teams, conferences }
    }

    #[test]
    fn test_top_25_skips_unranked_and_sorts() {
        let snap = snapshot(vec![
            team(1, "Unranked", 0, None),
            team(2, "Second", 2, None),
            team(3, "First", 1, None),
        ]);
        let top = top_25(&snap);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].team_name, "First");
        assert_eq!(top[0].record, "20-8");
        assert_eq!(top[1].team_name, "Second");
    }

    #[test]
    fn test_madness_leaderboard_positions() {
        let snap = snapshot(vec![
            team(1, "Mid", 0, Some(80.0)),
            team(2, "Best", 0, Some(95.0)),
            team(3, "NoRating", 0, None),
        ]);
        let board = madness_leaderboard(&snap);
        assert_eq!(board[0].team_name, "Best");
        assert_eq!(board[0].position, 1);
        assert_eq!(board[1].team_name, "Mid");
        // Unrated teams trail the board rather than disappearing
        assert_eq!(board[2].team_name, "NoRating");
        assert_eq!(board[2].position, 3);
    }

    #[test]
    fn test_team_names_alphabetical() {
        let snap = snapshot(vec![
            team(1, "Zaga", 0, None),
            team(2, "Auburn", 0, None),
        ]);
        assert_eq!(team_names(&snap), vec!["Auburn", "Zaga"]);
    }

    #[test]
    fn test_matchup_report_attaches_ranks() {
        let mut a = team(1, "A", 0, Some(90.0));
        a.net_rating_adjusted = Some(20.0);
        let mut b = team(2, "B", 0, Some(85.0));
        b.net_rating_adjusted = Some(10.0);

        let snap = snapshot(vec![a, b]);
        let report = matchup_report(&snap, "a", "B").unwrap();

        assert_eq!(report.team1.team.name, "A");
        assert_eq!(report.team1.stat_ranks["net_rating_adjusted"], 1);
        assert_eq!(report.team2.stat_ranks["net_rating_adjusted"], 2);
        assert_eq!(report.team1.conference.as_deref(), Some("WCC"));
    }

    #[test]
    fn test_matchup_report_unknown_team() {
        let snap = snapshot(vec![team(1, "A", 0, None)]);
        let err = matchup_report(&snap, "A", "Ghost").unwrap_err();
        assert!(matches!(err, HoopsError::UnknownTeam(name) if name == "Ghost"));
    }
}
