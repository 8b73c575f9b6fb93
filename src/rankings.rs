//! Tie-aware statistical rankings
//!
//! Every team is ranked in each of the fixed statistical categories. Ties
//! share a rank and the next distinct value takes the rank of its 1-based
//! position, so three teams tied at rank 1 are followed by rank 4.

use crate::{TeamId, TeamRecord};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Sort direction for a statistical category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// The fixed set of ranked categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Games,
    Wins,
    WinPercentage,
    MadnessRating,
    StrengthOfSchedule,
    OffensiveSrs,
    DefensiveSrs,
    SimpleRatingSystem,
    OffensiveRatingAdjusted,
    DefensiveRatingAdjusted,
    NetRatingAdjusted,
    Pace,
    FreeThrowAttemptRate,
    FreeThrowsPerFieldGoal,
    ThreePointAttemptRate,
    TeamReboundPercentage,
    OffensiveReboundPercentage,
    AssistPercentage,
    StealPercentage,
    BlockPercentage,
    TurnoverPercentage,
    EffectiveFieldGoalPercentage,
    TrueShootingPercentage,
}

impl StatCategory {
    pub const ALL: [StatCategory; 23] = [
        StatCategory::Games,
        StatCategory::Wins,
        StatCategory::WinPercentage,
        StatCategory::MadnessRating,
        StatCategory::StrengthOfSchedule,
        StatCategory::OffensiveSrs,
        StatCategory::DefensiveSrs,
        StatCategory::SimpleRatingSystem,
        StatCategory::OffensiveRatingAdjusted,
        StatCategory::DefensiveRatingAdjusted,
        StatCategory::NetRatingAdjusted,
        StatCategory::Pace,
        StatCategory::FreeThrowAttemptRate,
        StatCategory::FreeThrowsPerFieldGoal,
        StatCategory::ThreePointAttemptRate,
        StatCategory::TeamReboundPercentage,
        StatCategory::OffensiveReboundPercentage,
        StatCategory::AssistPercentage,
        StatCategory::StealPercentage,
        StatCategory::BlockPercentage,
        StatCategory::TurnoverPercentage,
        StatCategory::EffectiveFieldGoalPercentage,
        StatCategory::TrueShootingPercentage,
    ];

    /// Serialized category name, matching the stat keys the frontend reads
    pub fn name(&self) -> &'static str {
        match self {
            StatCategory::Games => "games",
            StatCategory::Wins => "wins",
            StatCategory::WinPercentage => "win_percentage",
            StatCategory::MadnessRating => "madness_rating",
            StatCategory::StrengthOfSchedule => "strength_of_schedule",
            StatCategory::OffensiveSrs => "offensive_srs",
            StatCategory::DefensiveSrs => "defensive_srs",
            StatCategory::SimpleRatingSystem => "simple_rating_system",
            StatCategory::OffensiveRatingAdjusted => "offensive_rating_adjusted",
            StatCategory::DefensiveRatingAdjusted => "defensive_rating_adjusted",
            StatCategory::NetRatingAdjusted => "net_rating_adjusted",
            StatCategory::Pace => "pace",
            StatCategory::FreeThrowAttemptRate => "free_throw_attempt_rate",
            StatCategory::FreeThrowsPerFieldGoal => "free_throws_per_field_goal",
            StatCategory::ThreePointAttemptRate => "3_point_attempt_rate",
            StatCategory::TeamReboundPercentage => "team_rebound_percentage",
            StatCategory::OffensiveReboundPercentage => "offensive_rebound_percentage",
            StatCategory::AssistPercentage => "assist_percentage",
            StatCategory::StealPercentage => "steal_percentage",
            StatCategory::BlockPercentage => "block_percentage",
            StatCategory::TurnoverPercentage => "turnover_percentage",
            StatCategory::EffectiveFieldGoalPercentage => "effective_field_goal_percentage",
            StatCategory::TrueShootingPercentage => "true_shooting_percentage",
        }
    }

    /// Lower defensive rating and lower turnover rate are elite; everything
    /// else is higher-is-better.
    pub fn polarity(&self) -> Polarity {
        match self {
            StatCategory::DefensiveRatingAdjusted | StatCategory::TurnoverPercentage => {
                Polarity::LowerIsBetter
            }
            _ => Polarity::HigherIsBetter,
        }
    }

    /// Read this category's value from a team record
    pub fn value(&self, team: &TeamRecord) -> Option<f64> {
        match self {
            StatCategory::Games => Some(team.games as f64),
            StatCategory::Wins => Some(team.wins as f64),
            StatCategory::WinPercentage => team.win_percentage,
            StatCategory::MadnessRating => team.madness_rating,
            StatCategory::StrengthOfSchedule => team.strength_of_schedule,
            StatCategory::OffensiveSrs => team.offensive_srs,
            StatCategory::DefensiveSrs => team.defensive_srs,
            StatCategory::SimpleRatingSystem => team.simple_rating_system,
            StatCategory::OffensiveRatingAdjusted => team.offensive_rating_adjusted,
            StatCategory::DefensiveRatingAdjusted => team.defensive_rating_adjusted,
            StatCategory::NetRatingAdjusted => team.net_rating_adjusted,
            StatCategory::Pace => team.pace,
            StatCategory::FreeThrowAttemptRate => team.free_throw_attempt_rate,
            StatCategory::FreeThrowsPerFieldGoal => team.free_throws_per_field_goal,
            StatCategory::ThreePointAttemptRate => team.three_point_attempt_rate,
            StatCategory::TeamReboundPercentage => team.team_rebound_percentage,
            StatCategory::OffensiveReboundPercentage => team.offensive_rebound_percentage,
            StatCategory::AssistPercentage => team.assist_percentage,
            StatCategory::StealPercentage => team.steal_percentage,
            StatCategory::BlockPercentage => team.block_percentage,
            StatCategory::TurnoverPercentage => team.turnover_percentage,
            StatCategory::EffectiveFieldGoalPercentage => team.effective_field_goal_percentage,
            StatCategory::TrueShootingPercentage => team.true_shooting_percentage,
        }
    }
}

/// Per-category ranks for one team, keyed by serialized category name
pub type StatRanks = BTreeMap<&'static str, u32>;

/// Compare two nullable values under a polarity. Better values sort first;
/// nulls sort last regardless of direction.
pub fn compare_values(a: Option<f64>, b: Option<f64>, polarity: Polarity) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = match polarity {
                Polarity::HigherIsBetter => y.partial_cmp(&x),
                Polarity::LowerIsBetter => x.partial_cmp(&y),
            };
            ord.unwrap_or(Ordering::Equal)
        }
    }
}

/// Rank every team in a single category.
///
/// Dense tie handling: a tie group takes the rank of its first member's
/// 1-based sorted position. The sort is stable, so exact ties keep input
/// order. Teams with no value for the category all tie behind every team
/// with data (or at rank 1 if nobody has data).
pub fn rank_category(teams: &[TeamRecord], category: StatCategory) -> HashMap<TeamId, u32> {
    let polarity = category.polarity();
    let mut sorted: Vec<&TeamRecord> = teams.iter().collect();
    sorted.sort_by(|a, b| compare_values(category.value(a), category.value(b), polarity));

    let mut ranks = HashMap::with_capacity(sorted.len());
    let mut rank = 1u32;
    let mut prev_value: Option<Option<f64>> = None;

    for (i, team) in sorted.iter().enumerate() {
        let value = category.value(team);
        if prev_value != Some(value) {
            rank = i as u32 + 1;
            prev_value = Some(value);
        }
        ranks.insert(team.id, rank);
    }

    ranks
}

/// Rank every team in every category, merged into one map per team.
///
/// Each category is ranked independently; a team's rank in one category says
/// nothing about its rank in another.
pub fn rank_all(teams: &[TeamRecord]) -> HashMap<TeamId, StatRanks> {
    let mut all: HashMap<TeamId, StatRanks> = HashMap::with_capacity(teams.len());

    for category in StatCategory::ALL {
        for (team_id, rank) in rank_category(teams, category) {
            all.entry(team_id).or_default().insert(category.name(), rank);
        }
    }

    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, name: &str) -> TeamRecord {
        TeamRecord {
            id: TeamId(id),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rank_descending() {
        let mut x = team(1, "X");
        x.net_rating_adjusted = Some(15.0);
        let mut y = team(2, "Y");
        y.net_rating_adjusted = Some(10.0);

        let ranks = rank_category(&[y, x], StatCategory::NetRatingAdjusted);
        assert_eq!(ranks[&TeamId(1)], 1);
        assert_eq!(ranks[&TeamId(2)], 2);
    }

    #[test]
    fn test_lower_is_better_category() {
        let mut a = team(1, "A");
        a.defensive_rating_adjusted = Some(90.0);
        let mut b = team(2, "B");
        b.defensive_rating_adjusted = Some(95.0);

        let ranks = rank_category(&[b, a], StatCategory::DefensiveRatingAdjusted);
        assert_eq!(ranks[&TeamId(1)], 1);
        assert_eq!(ranks[&TeamId(2)], 2);
    }

    #[test]
    fn test_ties_share_rank_and_next_value_skips() {
        // Three teams tied on turnover rate at rank 1, a worse fourth at rank 4
        let mut teams = Vec::new();
        for i in 1..=3 {
            let mut t = team(i, &format!("T{}", i));
            t.turnover_percentage = Some(14.0);
            teams.push(t);
        }
        let mut worse = team(4, "T4");
        worse.turnover_percentage = Some(15.0);
        teams.push(worse);

        let ranks = rank_category(&teams, StatCategory::TurnoverPercentage);
        assert_eq!(ranks[&TeamId(1)], 1);
        assert_eq!(ranks[&TeamId(2)], 1);
        assert_eq!(ranks[&TeamId(3)], 1);
        assert_eq!(ranks[&TeamId(4)], 4);
    }

    #[test]
    fn test_nulls_rank_last_both_polarities() {
        let mut a = team(1, "A");
        a.pace = Some(70.0);
        a.turnover_percentage = Some(12.0);
        let b = team(2, "B"); // no pace, no turnover rate

        let teams = vec![b, a];
        let pace = rank_category(&teams, StatCategory::Pace);
        assert_eq!(pace[&TeamId(1)], 1);
        assert_eq!(pace[&TeamId(2)], 2);

        let tov = rank_category(&teams, StatCategory::TurnoverPercentage);
        assert_eq!(tov[&TeamId(1)], 1);
        assert_eq!(tov[&TeamId(2)], 2);
    }

    #[test]
    fn test_all_null_ties_at_rank_one() {
        let teams = vec![team(1, "A"), team(2, "B"), team(3, "C")];
        let ranks = rank_category(&teams, StatCategory::MadnessRating);
        assert!(ranks.values().all(|&r| r == 1));
    }

    #[test]
    fn test_rank_all_covers_every_category() {
        let mut a = team(1, "A");
        a.net_rating_adjusted = Some(5.0);
        let all = rank_all(&[a]);
        let ranks = &all[&TeamId(1)];
        assert_eq!(ranks.len(), StatCategory::ALL.len());
        assert_eq!(ranks["net_rating_adjusted"], 1);
        assert_eq!(ranks["3_point_attempt_rate"], 1);
    }

    #[test]
    fn test_categories_ranked_independently() {
        let mut a = team(1, "A");
        a.offensive_rating_adjusted = Some(120.0);
        a.defensive_rating_adjusted = Some(100.0);
        let mut b = team(2, "B");
        b.offensive_rating_adjusted = Some(110.0);
        b.defensive_rating_adjusted = Some(92.0);

        let all = rank_all(&[a, b]);
        assert_eq!(all[&TeamId(1)]["offensive_rating_adjusted"], 1);
        assert_eq!(all[&TeamId(1)]["defensive_rating_adjusted"], 2);
        assert_eq!(all[&TeamId(2)]["offensive_rating_adjusted"], 2);
        assert_eq!(all[&TeamId(2)]["defensive_rating_adjusted"], 1);
    }
}
