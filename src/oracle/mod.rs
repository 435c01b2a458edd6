// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Strength Oracle
//!
//! The selector never predicts strength itself. It asks a [`StrengthOracle`]
//! for one scalar per feature vector, so the fitted regression model (or the
//! physics fallback in [`crate::science::strength`]) can be swapped without
//! touching the search.
//!
//! ```text
//! MixSelector --uses--> StrengthOracle (trait)
//!                              ^
//!              +---------------+----------------+
//!              |                                |
//!         ModelOracle                     PhysicsOracle
//!   (best_model.json artifact)     (Powers + Parrot, calibrated)
//! ```

pub mod artifact;
pub mod model;

pub use artifact::{sha256_hex, ModelArtifact, DIGEST_SUFFIX, LABEL_FILE, MODEL_FILE};
pub use model::{Aggregation, RegressionModel, RegressionTree, SplitRule, TreeNode};

use crate::error::OracleError;

/// Deterministic, side-effect free strength predictor.
pub trait StrengthOracle: Send + Sync {
    /// Predicted compressive strength (MPa) for one record's feature values.
    fn predict(&self, features: &[f64]) -> Result<f64, OracleError>;

    /// Human-readable name of the model behind the oracle.
    fn label(&self) -> &str;
}

/// A deserialized regression model bound to a catalog's feature layout.
#[derive(Clone, Debug)]
pub struct ModelOracle {
    label: String,
    feature_count: usize,
    model: RegressionModel,
}

impl ModelOracle {
    /// Bind a model to `feature_count` inputs, validating its structure.
    pub fn new(
        label: impl Into<String>,
        model: RegressionModel,
        feature_count: usize,
    ) -> Result<Self, crate::error::ModelError> {
        model.validate(feature_count)?;
        Ok(ModelOracle {
            label: label.into(),
            feature_count,
            model,
        })
    }

    pub fn model(&self) -> &RegressionModel {
        &self.model
    }
}

impl StrengthOracle for ModelOracle {
    fn predict(&self, features: &[f64]) -> Result<f64, OracleError> {
        if features.len() != self.feature_count {
            return Err(OracleError::FeatureCount {
                expected: self.feature_count,
                found: features.len(),
            });
        }
        let prediction = self.model.evaluate(features);
        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(OracleError::NonFinite(prediction))
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}
