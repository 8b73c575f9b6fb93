//! Prediction and inference
//!
//! Builds matchup features and converts classifier output into win
//! probabilities.

pub mod engine;

pub use engine::{MatchupProbabilities, ProbabilityEngine};
