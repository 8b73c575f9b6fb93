//! Logistic win classifier loaded from an exported artifact
//!
//! The model is trained offline and exported to JSON as feature names,
//! per-feature coefficients, and an intercept. Class 1 is the positive class
//! of the training labels; probability semantics are interpreted by the
//! prediction engine, not here.

use crate::features::FEATURE_NAMES;
use crate::{HoopsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of the exported model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Immutable binary classifier over matchup feature rows.
///
/// Loaded once at startup and safe to share across concurrent inference
/// calls; it holds no mutable state.
#[derive(Debug, Clone)]
pub struct Classifier {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl Classifier {
    /// Load from a JSON artifact file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HoopsError::Model(format!("Failed to read artifact {}: {}", path.display(), e))
        })?;
        let artifact: ClassifierArtifact = serde_json::from_str(&content)
            .map_err(|e| HoopsError::Model(format!("Failed to parse artifact: {}", e)))?;
        Self::from_artifact(artifact)
    }

    /// Validate the artifact against the feature contract and build the model
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self> {
        if artifact.feature_names.len() != artifact.coefficients.len() {
            return Err(HoopsError::Model(format!(
                "Artifact has {} feature names but {} coefficients",
                artifact.feature_names.len(),
                artifact.coefficients.len()
            )));
        }

        if artifact.feature_names.len() != FEATURE_NAMES.len() {
            return Err(HoopsError::Model(format!(
                "Artifact expects {} features, builder produces {}",
                artifact.feature_names.len(),
                FEATURE_NAMES.len()
            )));
        }

        for (i, (artifact_name, builder_name)) in artifact
            .feature_names
            .iter()
            .zip(FEATURE_NAMES.iter())
            .enumerate()
        {
            if artifact_name != builder_name {
                return Err(HoopsError::Model(format!(
                    "Feature {} mismatch: artifact has {}, builder produces {}",
                    i, artifact_name, builder_name
                )));
            }
        }

        Ok(Classifier {
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
        })
    }

    /// Probability pairs `[P(class 0), P(class 1)]`, one per input row, in
    /// input order.
    pub fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<[f64; 2]>> {
        rows.iter()
            .map(|row| {
                if row.len() != self.coefficients.len() {
                    return Err(HoopsError::Model(format!(
                        "Expected {} features per row, got {}",
                        self.coefficients.len(),
                        row.len()
                    )));
                }
                let z: f64 = self
                    .coefficients
                    .iter()
                    .zip(row.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + self.intercept;
                let p1 = sigmoid(z);
                Ok([1.0 - p1, p1])
            })
            .collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
