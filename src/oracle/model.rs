// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Serialized regression models
//!
//! One family per estimator the offline pipeline can export:
//! - `linear`: intercept + one coefficient per feature
//! - `tree_ensemble`: regression trees, averaged (random forest) or summed
//!   onto a base score with a learning rate (gradient boosting)
//! - `svr`: RBF-kernel support vector regression
//! - `knn`: k nearest stored rows, uniform weights, Euclidean distance
//! - `voting`: mean of member models (voting ensemble)
//!
//! Trees are flat node arrays rooted at index 0. A split sends
//! `x <= threshold` left, or `x < threshold` for ensembles exported with
//! `"split": "lt"` (XGBoost). Children must come after their parent, which
//! rules out cycles.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// How tree outputs are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// `mean(trees)`
    Mean,
    /// `base_score + learning_rate * sum(trees)`
    Sum,
}

/// Comparison a split node applies to send a value left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// `x <= threshold` (scikit-learn)
    #[default]
    Le,
    /// `x < threshold` (XGBoost)
    Lt,
}

impl SplitRule {
    fn goes_left(self, x: f64, threshold: f64) -> bool {
        match self {
            SplitRule::Le => x <= threshold,
            SplitRule::Lt => x < threshold,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, feature_count: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Invalid("tree has no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= feature_count {
                        return Err(ModelError::Invalid(format!(
                            "node {i} splits on feature {feature}, model has {feature_count}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "node {i} has a non-finite threshold"
                        )));
                    }
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(ModelError::Invalid(format!(
                                "node {i} points to invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "leaf {i} has a non-finite value"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Assumes a validated tree.
    pub fn evaluate(&self, features: &[f64], split: SplitRule) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if split.goes_left(features[feature], threshold) {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn default_learning_rate() -> f64 {
    1.0
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn check_rows(what: &str, rows: &[Vec<f64>], feature_count: usize) -> Result<(), ModelError> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != feature_count {
            return Err(ModelError::Invalid(format!(
                "{what} {i} has {} values for {feature_count} features",
                row.len()
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::Invalid(format!("{what} {i} has non-finite values")));
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    TreeEnsemble {
        aggregation: Aggregation,
        #[serde(default)]
        base_score: f64,
        #[serde(default = "default_learning_rate")]
        learning_rate: f64,
        #[serde(default)]
        split: SplitRule,
        trees: Vec<RegressionTree>,
    },
    /// `intercept + sum(dual_coef[i] * exp(-gamma * |x - sv[i]|^2))`
    Svr {
        gamma: f64,
        intercept: f64,
        support_vectors: Vec<Vec<f64>>,
        dual_coef: Vec<f64>,
    },
    /// Mean target of the `k` nearest stored rows; distance ties keep the
    /// earlier row.
    Knn {
        k: usize,
        rows: Vec<Vec<f64>>,
        targets: Vec<f64>,
    },
    Voting {
        members: Vec<RegressionModel>,
    },
}

impl RegressionModel {
    /// Structural checks against the number of input features.
    pub fn validate(&self, feature_count: usize) -> Result<(), ModelError> {
        match self {
            RegressionModel::Linear {
                intercept,
                coefficients,
            } => {
                if coefficients.len() != feature_count {
                    return Err(ModelError::Invalid(format!(
                        "linear model has {} coefficients for {feature_count} features",
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ModelError::Invalid(
                        "linear model has non-finite parameters".into(),
                    ));
                }
                Ok(())
            }
            RegressionModel::TreeEnsemble {
                base_score,
                learning_rate,
                trees,
                ..
            } => {
                if trees.is_empty() {
                    return Err(ModelError::Invalid("tree ensemble has no trees".into()));
                }
                if !base_score.is_finite() || !learning_rate.is_finite() {
                    return Err(ModelError::Invalid(
                        "tree ensemble has non-finite base score or learning rate".into(),
                    ));
                }
                trees.iter().try_for_each(|t| t.validate(feature_count))
            }
            RegressionModel::Svr {
                gamma,
                intercept,
                support_vectors,
                dual_coef,
            } => {
                if !(gamma.is_finite() && *gamma > 0.0) {
                    return Err(ModelError::Invalid(format!(
                        "svr gamma must be positive, got {gamma}"
                    )));
                }
                if support_vectors.is_empty() || support_vectors.len() != dual_coef.len() {
                    return Err(ModelError::Invalid(format!(
                        "svr has {} support vectors and {} dual coefficients",
                        support_vectors.len(),
                        dual_coef.len()
                    )));
                }
                if !intercept.is_finite() || dual_coef.iter().any(|c| !c.is_finite()) {
                    return Err(ModelError::Invalid("svr has non-finite parameters".into()));
                }
                check_rows("support vector", support_vectors, feature_count)
            }
            RegressionModel::Knn { k, rows, targets } => {
                if rows.len() != targets.len() {
                    return Err(ModelError::Invalid(format!(
                        "knn has {} rows and {} targets",
                        rows.len(),
                        targets.len()
                    )));
                }
                if *k == 0 || *k > rows.len() {
                    return Err(ModelError::Invalid(format!(
                        "knn k = {k} needs between 1 and {} stored rows",
                        rows.len()
                    )));
                }
                if targets.iter().any(|t| !t.is_finite()) {
                    return Err(ModelError::Invalid("knn has non-finite targets".into()));
                }
                check_rows("knn row", rows, feature_count)
            }
            RegressionModel::Voting { members } => {
                if members.is_empty() {
                    return Err(ModelError::Invalid("voting model has no members".into()));
                }
                members.iter().try_for_each(|m| m.validate(feature_count))
            }
        }
    }

    /// Raw model output. Assumes [`validate`](Self::validate) passed for
    /// `features.len()`.
    pub fn evaluate(&self, features: &[f64]) -> f64 {
        match self {
            RegressionModel::Linear {
                intercept,
                coefficients,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(features)
                        .map(|(c, x)| c * x)
                        .sum::<f64>()
            }
            RegressionModel::TreeEnsemble {
                aggregation,
                base_score,
                learning_rate,
                split,
                trees,
            } => {
                let total: f64 = trees.iter().map(|t| t.evaluate(features, *split)).sum();
                match aggregation {
                    Aggregation::Mean => total / trees.len() as f64,
                    Aggregation::Sum => base_score + learning_rate * total,
                }
            }
            RegressionModel::Svr {
                gamma,
                intercept,
                support_vectors,
                dual_coef,
            } => {
                intercept
                    + support_vectors
                        .iter()
                        .zip(dual_coef)
                        .map(|(sv, c)| c * (-gamma * squared_distance(sv, features)).exp())
                        .sum::<f64>()
            }
            RegressionModel::Knn { k, rows, targets } => {
                let mut order: Vec<(f64, usize)> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| (squared_distance(row, features), i))
                    .collect();
                // stable: equal distances stay in row order
                order.sort_by(|a, b| a.0.total_cmp(&b.0));
                order.iter().take(*k).map(|&(_, i)| targets[i]).sum::<f64>() / *k as f64
            }
            RegressionModel::Voting { members } => {
                members.iter().map(|m| m.evaluate(features)).sum::<f64>() / members.len() as f64
            }
        }
    }
}
