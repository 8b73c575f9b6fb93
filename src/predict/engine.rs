//! Win probability computation
//!
//! Builds the matchup feature row, runs the classifier, and converts the
//! positive-class probability into the user-facing percentage.

use std::sync::Arc;

use crate::data::Snapshot;
use crate::features::MatchupFeatures;
use crate::model::Classifier;
use crate::{HoopsError, Result, TeamRecord};
use serde::Serialize;

/// Independent win percentages for the two orientations of a matchup.
///
/// Each side's number comes from its own classifier call with that side as
/// home, so the pair is not constrained to sum to 100.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchupProbabilities {
    pub home_percentage: f64,
    pub away_percentage: f64,
}

/// Converts classifier output into win percentages
pub struct ProbabilityEngine {
    classifier: Arc<Classifier>,
}

impl ProbabilityEngine {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        ProbabilityEngine { classifier }
    }

    /// Win percentage for the home side, in [0, 100], one decimal place.
    ///
    /// Class 1 of the training labels denotes a home-side loss, so the
    /// reported percentage is `100 * (1 - P(class 1))`. This transform is a
    /// fixed contract with the exported model.
    pub fn predict(&self, home: &TeamRecord, away: &TeamRecord) -> Result<f64> {
        let features = MatchupFeatures::build(home, away)?;
        let probs = self.classifier.predict_proba(&[features.to_row()])?;
        let positive = probs[0][1];
        Ok(round_one_decimal(100.0 * (1.0 - positive)))
    }

    /// Both orientations of a matchup, computed independently
    pub fn predict_both(
        &self,
        home: &TeamRecord,
        away: &TeamRecord,
    ) -> Result<MatchupProbabilities> {
        Ok(MatchupProbabilities {
            home_percentage: self.predict(home, away)?,
            away_percentage: self.predict(away, home)?,
        })
    }

    /// Resolve both teams by name in a snapshot, then predict both sides
    pub fn predict_names(
        &self,
        snapshot: &Snapshot,
        home_name: &str,
        away_name: &str,
    ) -> Result<MatchupProbabilities> {
        let home = snapshot
            .find_team(home_name)
            .ok_or_else(|| HoopsError::UnknownTeam(home_name.to_string()))?;
        let away = snapshot
            .find_team(away_name)
            .ok_or_else(|| HoopsError::UnknownTeam(away_name.to_string()))?;
        self.predict_both(home, away)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_NAMES;
    use crate::model::classifier::ClassifierArtifact;

    fn full_team(id: i64, name: &str, base: f64) -> TeamRecord {
        use crate::TeamId;
        TeamRecord {
            id: TeamId(id),
            name: name.to_string(),
            games: 30,
            wins: 20,
            losses: 10,
            madness_rating: Some(base + 10.0),
            strength_of_schedule: Some(base / 10.0),
            offensive_srs: Some(base / 8.0),
            defensive_srs: Some(base / 12.0),
            simple_rating_system: Some(base / 5.0),
            offensive_rating: Some(base + 30.0),
            offensive_rating_adjusted: Some(base + 35.0),
            defensive_rating_adjusted: Some(base + 15.0),
            net_rating_adjusted: Some(base / 4.0),
            pace: Some(base - 10.0),
            free_throw_attempt_rate: Some(base / 200.0),
            three_point_attempt_rate: Some(base / 180.0),
            team_rebound_percentage: Some(base / 2.0),
            offensive_rebound_percentage: Some(base / 3.0),
            assist_percentage: Some(base / 1.5),
            steal_percentage: Some(base / 9.0),
            block_percentage: Some(base / 11.0),
            turnover_percentage: Some(base / 6.0),
            true_shooting_percentage: Some(base / 150.0),
            margin_of_victory: Some(base / 7.0),
            pts_per_game: Some(base - 5.0),
            opp_points_per_game: Some(base - 15.0),
            team_rebounds: Some(base * 12.0),
            field_goal_percentage: Some(base / 170.0),
            three_point_percentage: Some(base / 190.0),
            free_throw_percentage: Some(base / 110.0),
            ..Default::default()
        }
    }

    /// Model whose positive-class probability is a fixed constant
    fn constant_classifier(p1: f64) -> Arc<Classifier> {
        // sigmoid(intercept) = p1 when all coefficients are zero
        let intercept = (p1 / (1.0 - p1)).ln();
        let artifact = ClassifierArtifact {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coefficients: vec![0.0; FEATURE_NAMES.len()],
            intercept,
        };
        Arc::new(Classifier::from_artifact(artifact).unwrap())
    }

    #[test]
    fn test_probability_transform() {
        // P(class 1) = 0.7 must report 100 * (1 - 0.7) = 30.0
        let engine = ProbabilityEngine::new(constant_classifier(0.7));
        let home = full_team(1, "A", 85.0);
        let away = full_team(2, "B", 78.0);

        let pct = engine.predict(&home, &away).unwrap();
        assert_eq!(pct, 30.0);
    }

    #[test]
    fn test_two_sided_percentages_are_independent() {
        let engine = ProbabilityEngine::new(constant_classifier(0.7));
        let home = full_team(1, "A", 85.0);
        let away = full_team(2, "B", 78.0);

        let both = engine.predict_both(&home, &away).unwrap();
        // A constant model gives both sides the same number; they are two
        // independent calls and need not sum to 100.
        assert_eq!(both.home_percentage, 30.0);
        assert_eq!(both.away_percentage, 30.0);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        let engine = ProbabilityEngine::new(constant_classifier(0.666));
        let home = full_team(1, "A", 85.0);
        let away = full_team(2, "B", 78.0);

        let pct = engine.predict(&home, &away).unwrap();
        assert_eq!(pct, 33.4);
    }

    #[test]
    fn test_zero_games_propagates() {
        let engine = ProbabilityEngine::new(constant_classifier(0.5));
        let home = full_team(1, "A", 85.0);
        let mut away = full_team(2, "B", 78.0);
        away.games = 0;

        assert!(matches!(
            engine.predict(&home, &away),
            Err(HoopsError::NoGames { .. })
        ));
    }

    #[test]
    fn test_unknown_team_is_reported() {
        use crate::data::Snapshot;
        use std::collections::HashMap;

        let engine = ProbabilityEngine::new(constant_classifier(0.5));
        let snapshot = Snapshot {
            teams: vec![full_team(1, "Gonzaga", 85.0)],
            conferences: HashMap::new(),
        };

        let err = engine
            .predict_names(&snapshot, "Gonzaga", "Nowhere State")
            .unwrap_err();
        match err {
            HoopsError::UnknownTeam(name) => assert_eq!(name, "Nowhere State"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
