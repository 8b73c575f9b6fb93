//! Feature engineering
//!
//! Converts team records into model-ready matchup features.

pub mod matchup;

pub use matchup::{MatchupFeatures, FEATURE_NAMES};
