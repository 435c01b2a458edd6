// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//! Embodied Carbon Estimation
//!
//! A mix's embodied carbon is the sum over its columns of
//! `quantity * factor`, where each column's factor comes from a keyword table
//! (kg CO2e per kg of material). Matching happens once when the table is bound
//! to a catalog's column names; estimating a record is then a dot product.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::MixRecord;

/// Emissions below this are `Low` (kg CO2e / m3).
pub const LOW_RISK_CEILING: f64 = 200.0;
/// Emissions at or above this are `High` (kg CO2e / m3).
pub const HIGH_RISK_FLOOR: f64 = 300.0;

/// Three-level classification of a selected mix's embodied carbon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Half-open bands: `[0, 200)` low, `[200, 300)` moderate, `[300, ..)` high.
    pub fn classify(emissions: f64) -> Self {
        if emissions < LOW_RISK_CEILING {
            RiskTier::Low
        } else if emissions < HIGH_RISK_FLOOR {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
        }
    }

    /// Label shown on the result surface.
    pub const fn description(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW CO₂ (SUSTAINABLE)",
            RiskTier::Moderate => "MODERATE CO₂",
            RiskTier::High => "HIGH CO₂",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens when one column matches several factor keywords.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Every matching entry contributes (a column can be counted twice)
    #[default]
    Cumulative,
    /// Only the first matching entry, in table order, contributes
    ExclusiveFirst,
}

/// One row of the factor table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Case-insensitive substring of the column name
    pub keyword: String,
    /// kg CO2e per kg of material
    pub factor: f64,
    /// Exact column names; when present they replace keyword matching
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl EmissionFactor {
    pub fn keyword(keyword: &str, factor: f64) -> Self {
        EmissionFactor {
            keyword: keyword.to_string(),
            factor,
            columns: Vec::new(),
        }
    }

    fn matches(&self, column: &str) -> bool {
        if self.columns.is_empty() {
            column
                .to_lowercase()
                .contains(&self.keyword.to_lowercase())
        } else {
            let column = column.trim();
            self.columns
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(column))
        }
    }
}

/// Ordered keyword → factor table plus the multi-match rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactorTable {
    pub rule: MatchRule,
    pub factors: Vec<EmissionFactor>,
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        EmissionFactorTable {
            rule: MatchRule::Cumulative,
            factors: vec![
                EmissionFactor::keyword("cement", 0.90),
                EmissionFactor::keyword("slag", 0.07),
                EmissionFactor::keyword("fly", 0.02),
                EmissionFactor::keyword("water", 0.0003),
                EmissionFactor::keyword("coarse", 0.005),
                EmissionFactor::keyword("fine", 0.005),
                EmissionFactor::keyword("superplasticizer", 0.50),
            ],
        }
    }
}

impl EmissionFactorTable {
    /// Effective factor of a single column under this table's rule.
    pub fn column_factor(&self, column: &str) -> f64 {
        let mut matching = self.factors.iter().filter(|f| f.matches(column));
        match self.rule {
            MatchRule::Cumulative => matching.map(|f| f.factor).sum(),
            MatchRule::ExclusiveFirst => matching.next().map_or(0.0, |f| f.factor),
        }
    }

    /// Resolve the table against a catalog's feature columns.
    pub fn bind(&self, feature_names: &[String]) -> EmissionsEstimator {
        EmissionsEstimator {
            factors: feature_names
                .iter()
                .map(|name| self.column_factor(name))
                .collect(),
        }
    }
}

/// Emission factors resolved per feature column.
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionsEstimator {
    factors: Vec<f64>,
}

impl EmissionsEstimator {
    pub fn from_factors(factors: Vec<f64>) -> Self {
        EmissionsEstimator { factors }
    }

    /// Effective factor per feature column, in column order.
    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    /// Total embodied carbon of a record (kg CO2e per m3 of mix).
    pub fn estimate(&self, record: &MixRecord) -> f64 {
        record
            .values()
            .iter()
            .zip(&self.factors)
            .map(|(quantity, factor)| quantity * factor)
            .sum()
    }
}
