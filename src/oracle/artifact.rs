// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Model artifact discovery
//!
//! The offline training pipeline leaves its winner in a directory:
//!
//! | file                      | required | content                               |
//! |---------------------------|----------|---------------------------------------|
//! | `best_model.json`         | yes      | [`ModelArtifact`]                     |
//! | `best_model_name.txt`     | no       | display label, overrides `name`       |
//! | `best_model.json.sha256`  | no       | hex SHA-256 of `best_model.json`      |
//!
//! When the digest file exists the artifact bytes must hash to it before
//! anything is deserialized.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::{ModelOracle, RegressionModel};
use crate::error::ModelError;

pub const MODEL_FILE: &str = "best_model.json";
pub const LABEL_FILE: &str = "best_model_name.txt";
pub const DIGEST_SUFFIX: &str = ".sha256";

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Serialized strength model plus the feature layout it was trained on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub name: String,
    /// Training column order. Empty means "count only".
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub model: RegressionModel,
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load the artifact left in `dir`, verifying its digest if one was shipped.
    pub fn discover(dir: &Path) -> Result<Self, ModelError> {
        let model_path = dir.join(MODEL_FILE);
        if !model_path.is_file() {
            return Err(ModelError::MissingArtifact(model_path));
        }
        let bytes = fs::read(&model_path)?;

        let digest_path = dir.join(format!("{MODEL_FILE}{DIGEST_SUFFIX}"));
        if digest_path.is_file() {
            let expected = fs::read_to_string(&digest_path)?
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase();
            let actual = sha256_hex(&bytes);
            if expected != actual {
                return Err(ModelError::DigestMismatch {
                    file: MODEL_FILE.to_string(),
                    expected,
                    actual,
                });
            }
        } else {
            warn!(path = %model_path.display(), "no digest file, model integrity not verified");
        }

        let mut artifact: ModelArtifact = serde_json::from_slice(&bytes)?;

        let label_path = dir.join(LABEL_FILE);
        if label_path.is_file() {
            let label = fs::read_to_string(&label_path)?;
            let label = label.trim();
            if !label.is_empty() {
                artifact.name = label.to_string();
            }
        }

        info!(model = %artifact.name, features = artifact.feature_names.len(), "model artifact loaded");
        Ok(artifact)
    }

    /// Bind to a catalog's feature columns. Names must match in order unless
    /// the artifact carries none.
    pub fn into_oracle(self, feature_names: &[String]) -> Result<ModelOracle, ModelError> {
        if !self.feature_names.is_empty() && self.feature_names.as_slice() != feature_names {
            return Err(ModelError::FeatureSchema {
                expected: self.feature_names,
                found: feature_names.to_vec(),
            });
        }
        let label = if self.name.is_empty() {
            "model".to_string()
        } else {
            self.name
        };
        ModelOracle::new(label, self.model, feature_names.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::StrengthOracle;

    const ARTIFACT: &str = r#"{
        "name": "Linear Regression",
        "feature_names": ["cement", "slag"],
        "model": { "kind": "linear", "intercept": 10.0, "coefficients": [0.1, 0.05] }
    }"#;

    fn columns() -> Vec<String> {
        vec!["cement".to_string(), "slag".to_string()]
    }

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_discover_without_digest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), ARTIFACT).unwrap();

        let artifact = ModelArtifact::discover(dir.path()).unwrap();
        assert_eq!(artifact.name, "Linear Regression");

        let oracle = artifact.into_oracle(&columns()).unwrap();
        assert!((oracle.predict(&[200.0, 100.0]).unwrap() - 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_label_file_overrides_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), ARTIFACT).unwrap();
        fs::write(dir.path().join(LABEL_FILE), "Voting Regressor\n").unwrap();

        let artifact = ModelArtifact::discover(dir.path()).unwrap();
        assert_eq!(artifact.name, "Voting Regressor");
    }

    #[test]
    fn test_matching_digest_accepted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), ARTIFACT).unwrap();
        let digest = sha256_hex(ARTIFACT.as_bytes());
        fs::write(
            dir.path().join(format!("{MODEL_FILE}{DIGEST_SUFFIX}")),
            format!("{}  {MODEL_FILE}\n", digest.to_uppercase()),
        )
        .unwrap();

        assert!(ModelArtifact::discover(dir.path()).is_ok());
    }

    #[test]
    fn test_tampered_artifact_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), ARTIFACT).unwrap();
        fs::write(
            dir.path().join(format!("{MODEL_FILE}{DIGEST_SUFFIX}")),
            sha256_hex(b"something else"),
        )
        .unwrap();

        let err = ModelArtifact::discover(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::DigestMismatch { .. }));
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifact::discover(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::MissingArtifact(_)));
    }

    #[test]
    fn test_feature_order_must_match() {
        let artifact = ModelArtifact::from_json(ARTIFACT).unwrap();
        let swapped = vec!["slag".to_string(), "cement".to_string()];
        let err = artifact.into_oracle(&swapped).unwrap_err();
        assert!(matches!(err, ModelError::FeatureSchema { .. }));
    }

    #[test]
    fn test_unnamed_features_check_count_only() {
        let artifact = ModelArtifact::from_json(
            r#"{ "model": { "kind": "linear", "intercept": 1.0, "coefficients": [1.0, 1.0] } }"#,
        )
        .unwrap();
        let oracle = artifact.clone().into_oracle(&columns()).unwrap();
        assert_eq!(oracle.label(), "model");

        let three = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(matches!(
            artifact.into_oracle(&three),
            Err(ModelError::Invalid(_))
        ));
    }
}
