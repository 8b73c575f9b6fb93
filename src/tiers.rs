//! Competitive tier classification
//!
//! A tier is the intersection of three independent top-lists (offense,
//! defense, schedule strength), optionally restricted by conference, ordered
//! by adjusted net rating.

use crate::rankings::{compare_values, Polarity};
use crate::{ConferenceId, TeamId, TeamRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Conferences excluded from the mid-major tier
pub const POWER_CONFERENCES: [&str; 5] = ["Big Ten", "ACC", "Big 12", "Big East", "SEC"];

/// Selection thresholds for one tier
#[derive(Debug, Clone, Copy)]
pub struct TierSpec {
    pub name: &'static str,
    /// Top-N by adjusted offensive rating (descending)
    pub offense_count: usize,
    /// Top-M by adjusted defensive rating (ascending, lower is elite)
    pub defense_count: usize,
    /// Top-K by strength of schedule (descending)
    pub schedule_count: usize,
    /// Conference abbreviations filtered out before the top-lists are built
    pub excluded_conferences: &'static [&'static str],
}

const CONTENDERS: TierSpec = TierSpec {
    name: "contenders",
    offense_count: 20,
    defense_count: 20,
    schedule_count: 50,
    excluded_conferences: &[],
};

const NEXT_UP: TierSpec = TierSpec {
    name: "next-up",
    offense_count: 35,
    defense_count: 35,
    schedule_count: 100,
    excluded_conferences: &[],
};

const BEST_MID_MAJORS: TierSpec = TierSpec {
    name: "best-mid-majors",
    offense_count: 25,
    defense_count: 25,
    schedule_count: 50,
    excluded_conferences: &POWER_CONFERENCES,
};

/// The named tiers exposed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    Contenders,
    NextUp,
    BestMidMajors,
}

impl TierKind {
    pub fn spec(&self) -> TierSpec {
        match self {
            TierKind::Contenders => CONTENDERS,
            TierKind::NextUp => NEXT_UP,
            TierKind::BestMidMajors => BEST_MID_MAJORS,
        }
    }
}

/// One row of a tier listing
#[derive(Debug, Clone, Serialize)]
pub struct TierEntry {
    pub team_name: String,
    pub conference: String,
    pub wins: i64,
    pub losses: i64,
    pub ap_rank: u32,
    pub madness_rating: Option<f64>,
    pub net_rating_adjusted: Option<f64>,
    pub offensive_rating_adjusted: Option<f64>,
    pub defensive_rating_adjusted: Option<f64>,
    pub strength_of_schedule: Option<f64>,
    pub simple_rating_system: Option<f64>,
}

impl TierEntry {
    fn from_team(team: &TeamRecord, conference: &str) -> Self {
        TierEntry {
            team_name: team.name.clone(),
            conference: conference.to_string(),
            wins: team.wins,
            losses: team.losses,
            ap_rank: team.ap_rank,
            madness_rating: team.madness_rating,
            net_rating_adjusted: team.net_rating_adjusted,
            offensive_rating_adjusted: team.offensive_rating_adjusted,
            defensive_rating_adjusted: team.defensive_rating_adjusted,
            strength_of_schedule: team.strength_of_schedule,
            simple_rating_system: team.simple_rating_system,
        }
    }
}

/// First `count` team ids when sorted by `key` under `polarity`.
/// A universe smaller than `count` simply yields everyone.
fn top_ids<F>(teams: &[&TeamRecord], key: F, polarity: Polarity, count: usize) -> HashSet<TeamId>
where
    F: Fn(&TeamRecord) -> Option<f64>,
{
    let mut sorted: Vec<&&TeamRecord> = teams.iter().collect();
    sorted.sort_by(|a, b| compare_values(key(a), key(b), polarity));
    sorted.iter().take(count).map(|t| t.id).collect()
}

/// Teams that appear in all three of a spec's top-lists, keyed by stable id
fn membership(
    teams: &[TeamRecord],
    conferences: &HashMap<ConferenceId, String>,
    spec: &TierSpec,
) -> HashSet<TeamId> {
    let eligible: Vec<&TeamRecord> = teams
        .iter()
        .filter(|t| {
            if spec.excluded_conferences.is_empty() {
                return true;
            }
            match conferences.get(&t.conference_id) {
                Some(abbr) => !spec.excluded_conferences.contains(&abbr.as_str()),
                None => false,
            }
        })
        .collect();

    let offense = top_ids(
        &eligible,
        |t| t.offensive_rating_adjusted,
        Polarity::HigherIsBetter,
        spec.offense_count,
    );
    let defense = top_ids(
        &eligible,
        |t| t.defensive_rating_adjusted,
        Polarity::LowerIsBetter,
        spec.defense_count,
    );
    let schedule = top_ids(
        &eligible,
        |t| t.strength_of_schedule,
        Polarity::HigherIsBetter,
        spec.schedule_count,
    );

    offense
        .intersection(&defense)
        .filter(|id| schedule.contains(id))
        .copied()
        .collect()
}

/// Classify every team into the named tier.
///
/// The next-up tier subtracts the contender membership by team id before
/// ordering, so the two listings are disjoint even when display names
/// collide. Teams whose conference has no abbreviation row are omitted from
/// the output. An empty intersection is an empty tier, not an error.
pub fn classify(
    teams: &[TeamRecord],
    conferences: &HashMap<ConferenceId, String>,
    kind: TierKind,
) -> Vec<TierEntry> {
    let spec = kind.spec();
    let mut ids = membership(teams, conferences, &spec);

    if kind == TierKind::NextUp {
        let contenders = membership(teams, conferences, &CONTENDERS);
        ids.retain(|id| !contenders.contains(id));
    }

    let mut members: Vec<&TeamRecord> = teams.iter().filter(|t| ids.contains(&t.id)).collect();
    members.sort_by(|a, b| {
        compare_values(
            a.net_rating_adjusted,
            b.net_rating_adjusted,
            Polarity::HigherIsBetter,
        )
    });

    members
        .iter()
        .filter_map(|t| {
            conferences
                .get(&t.conference_id)
                .map(|abbr| TierEntry::from_team(t, abbr))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, name: &str, conf: i64, off: f64, def: f64, sos: f64, net: f64) -> TeamRecord {
        TeamRecord {
            id: TeamId(id),
            name: name.to_string(),
            conference_id: ConferenceId(conf),
            offensive_rating_adjusted: Some(off),
            defensive_rating_adjusted: Some(def),
            strength_of_schedule: Some(sos),
            net_rating_adjusted: Some(net),
            ..Default::default()
        }
    }

    fn conferences() -> HashMap<ConferenceId, String> {
        let mut map = HashMap::new();
        map.insert(ConferenceId(1), "ACC".to_string());
        map.insert(ConferenceId(2), "WCC".to_string());
        map
    }

    #[test]
    fn test_intersection_requires_all_three_lists() {
        // Strong offense and defense but weak schedule keeps a team out when
        // the schedule list is capped below it.
        let teams = vec![
            team(1, "A", 1, 120.0, 90.0, 9.0, 30.0),
            team(2, "B", 1, 118.0, 91.0, 8.0, 27.0),
            team(3, "C", 1, 116.0, 92.0, 7.0, 24.0),
        ];
        let spec = TierSpec {
            name: "test",
            offense_count: 3,
            defense_count: 3,
            schedule_count: 2,
            excluded_conferences: &[],
        };
        let ids = membership(&teams, &conferences(), &spec);
        assert!(ids.contains(&TeamId(1)));
        assert!(ids.contains(&TeamId(2)));
        assert!(!ids.contains(&TeamId(3)));
    }

    #[test]
    fn test_output_ordered_by_net_rating() {
        let teams = vec![
            team(1, "A", 1, 115.0, 93.0, 8.0, 12.0),
            team(2, "B", 1, 120.0, 90.0, 9.0, 30.0),
            team(3, "C", 1, 118.0, 91.0, 8.5, 21.0),
        ];
        let tier = classify(&teams, &conferences(), TierKind::Contenders);
        let names: Vec<&str> = tier.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_empty_intersection_is_empty_tier() {
        // Disjoint top-lists: no team is good at everything
        let teams = vec![
            team(1, "Offense", 1, 125.0, 110.0, 1.0, 10.0),
            team(2, "Defense", 1, 95.0, 85.0, 2.0, 8.0),
            team(3, "Schedule", 1, 96.0, 109.0, 12.0, -5.0),
        ];
        let spec = TierSpec {
            name: "test",
            offense_count: 1,
            defense_count: 1,
            schedule_count: 1,
            excluded_conferences: &[],
        };
        assert!(membership(&teams, &conferences(), &spec).is_empty());
    }

    #[test]
    fn test_next_up_disjoint_from_contenders() {
        // 30 teams, graded so the best 20ish land in contenders and the rest
        // of the top 35 land in next-up.
        let teams: Vec<TeamRecord> = (1..=30)
            .map(|i| {
                let q = (31 - i) as f64;
                team(i, &format!("T{}", i), 1, 100.0 + q, 110.0 - q, q, 2.0 * q)
            })
            .collect();
        let confs = conferences();

        let contenders = classify(&teams, &confs, TierKind::Contenders);
        let next_up = classify(&teams, &confs, TierKind::NextUp);

        let contender_names: HashSet<String> =
            contenders.iter().map(|e| e.team_name.clone()).collect();
        assert!(!contenders.is_empty());
        assert!(!next_up.is_empty());
        for entry in &next_up {
            assert!(!contender_names.contains(&entry.team_name));
        }
    }

    #[test]
    fn test_mid_majors_exclude_power_conferences() {
        let teams = vec![
            team(1, "PowerTeam", 1, 120.0, 90.0, 9.0, 30.0), // ACC
            team(2, "MidTeam", 2, 118.0, 91.0, 8.0, 27.0),   // WCC
        ];
        let tier = classify(&teams, &conferences(), TierKind::BestMidMajors);
        assert_eq!(tier.len(), 1);
        assert_eq!(tier[0].team_name, "MidTeam");
        assert_eq!(tier[0].conference, "WCC");
    }

    #[test]
    fn test_short_universe_does_not_error() {
        // Far fewer teams than any threshold: everyone qualifies
        let teams = vec![
            team(1, "A", 2, 110.0, 95.0, 5.0, 6.0),
            team(2, "B", 2, 108.0, 96.0, 4.0, 3.0),
        ];
        let tier = classify(&teams, &conferences(), TierKind::Contenders);
        assert_eq!(tier.len(), 2);
        assert_eq!(tier[0].team_name, "A");
    }

    #[test]
    fn test_unknown_conference_omitted() {
        let teams = vec![
            team(1, "Known", 2, 110.0, 95.0, 5.0, 6.0),
            team(2, "Orphan", 99, 108.0, 96.0, 4.0, 3.0),
        ];
        let tier = classify(&teams, &conferences(), TierKind::Contenders);
        let names: Vec<&str> = tier.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(names, vec!["Known"]);
    }
}
