// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Oracle accuracy against the catalog's measured strengths.
//!
//! Read-only diagnostic: no fitting happens here. Rows without a measured
//! strength are skipped.

use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::SelectError;
use crate::oracle::StrengthOracle;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub oracle: String,
    pub samples: usize,
    /// Mean absolute error (MPa)
    pub mae: f64,
    /// Root mean squared error (MPa)
    pub rmse: f64,
    /// Coefficient of determination; undefined for a constant target
    pub r2: Option<f64>,
}

/// Score `oracle` on every row with a measured strength. The first row the
/// oracle cannot score aborts the pass with [`SelectError::Oracle`].
pub fn evaluate(catalog: &Catalog, oracle: &dyn StrengthOracle) -> Result<EvaluationReport, SelectError> {
    let mut pairs = Vec::with_capacity(catalog.len());
    for (row, record) in catalog.records().iter().enumerate() {
        let Some(measured) = record.measured_strength() else {
            continue;
        };
        let predicted = oracle
            .predict(record.values())
            .map_err(|source| SelectError::Oracle { row, source })?;
        pairs.push((measured, predicted));
    }

    let n = pairs.len();
    let report = if n == 0 {
        EvaluationReport {
            oracle: oracle.label().to_string(),
            samples: 0,
            mae: 0.0,
            rmse: 0.0,
            r2: None,
        }
    } else {
        let count = n as f64;
        let mean = pairs.iter().map(|(m, _)| m).sum::<f64>() / count;
        let abs_err = pairs.iter().map(|(m, p)| (m - p).abs()).sum::<f64>();
        let ss_res = pairs.iter().map(|(m, p)| (m - p).powi(2)).sum::<f64>();
        let ss_tot = pairs.iter().map(|(m, _)| (m - mean).powi(2)).sum::<f64>();

        EvaluationReport {
            oracle: oracle.label().to_string(),
            samples: n,
            mae: abs_err / count,
            rmse: (ss_res / count).sqrt(),
            r2: (ss_tot > 0.0).then(|| 1.0 - ss_res / ss_tot),
        }
    };

    info!(
        oracle = %report.oracle,
        samples = report.samples,
        mae = report.mae,
        r2 = ?report.r2,
        "oracle evaluated"
    );
    Ok(report)
}
