// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Mix Selector
//!
//! Exhaustive single-pass scan of the candidate catalog:
//!
//! 1. reject records the constraint filter turns away
//! 2. predict strength and estimate emissions for the rest
//! 3. keep the strictly lowest fitness; ties keep the earlier row
//!
//! The catalog is scanned exactly once with no early exit. An empty feasible
//! set is a normal outcome (`selection == None`); an oracle failure aborts
//! the whole search.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::scoring::CandidateScorer;
use crate::catalog::{Catalog, FeatureValue};
use crate::error::SelectError;
use crate::oracle::StrengthOracle;
use crate::science::constraints::{ConstraintFilter, Rejection};
use crate::science::sustainability::{EmissionsEstimator, RiskTier};

/// The winning catalog record with everything the result surface shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection {
    /// Zero-based catalog row
    pub row: usize,
    pub predicted_strength: f64,
    pub emissions: f64,
    pub fitness: f64,
    pub risk: RiskTier,
    pub mix: Vec<FeatureValue>,
}

/// Per-reason rejection tally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    pub zero_binder: usize,
    pub cement_ratio: usize,
    pub slag_ratio: usize,
    pub fly_ash_ratio: usize,
    pub age: usize,
}

impl RejectionCounts {
    pub fn record(&mut self, reason: Rejection) {
        match reason {
            Rejection::ZeroBinder => self.zero_binder += 1,
            Rejection::CementRatio => self.cement_ratio += 1,
            Rejection::SlagRatio => self.slag_ratio += 1,
            Rejection::FlyAshRatio => self.fly_ash_ratio += 1,
            Rejection::AgeExceeded => self.age += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.zero_binder + self.cement_ratio + self.slag_ratio + self.fly_ash_ratio + self.age
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub scanned: usize,
    pub feasible: usize,
    pub rejected: RejectionCounts,
}

/// Outcome of one search invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    pub target_strength: f64,
    /// Label of the strength oracle used
    pub oracle: String,
    pub selection: Option<Selection>,
    pub stats: ScanStats,
    pub elapsed_ms: f64,
}

impl SearchResult {
    pub fn is_feasible(&self) -> bool {
        self.selection.is_some()
    }

    pub fn risk(&self) -> Option<RiskTier> {
        self.selection.as_ref().map(|s| s.risk)
    }
}

/// Borrowed view over everything a search reads. Holds no mutable state, so
/// any number of selectors can scan the same catalog at once.
pub struct MixSelector<'a> {
    pub catalog: &'a Catalog,
    pub filter: &'a ConstraintFilter,
    pub estimator: &'a EmissionsEstimator,
    pub oracle: &'a dyn StrengthOracle,
}

struct Best {
    row: usize,
    predicted: f64,
    emissions: f64,
    fitness: f64,
}

impl<'a> MixSelector<'a> {
    pub fn select(&self, target_strength: f64) -> Result<SearchResult, SelectError> {
        let start = instant::Instant::now();
        let mut stats = ScanStats::default();
        let mut best_score = f64::INFINITY;
        let mut best: Option<Best> = None;

        for (row, record) in self.catalog.records().iter().enumerate() {
            stats.scanned += 1;

            if let Err(reason) = self.filter.check(record) {
                debug!(row, reason = reason.as_str(), "candidate rejected");
                stats.rejected.record(reason);
                continue;
            }
            stats.feasible += 1;

            let predicted = self
                .oracle
                .predict(record.values())
                .map_err(|source| SelectError::Oracle { row, source })?;
            let emissions = self.estimator.estimate(record);
            let fitness = CandidateScorer::score(predicted, target_strength, emissions);

            if fitness < best_score {
                debug!(row, predicted, emissions, fitness, "new best candidate");
                best_score = fitness;
                best = Some(Best {
                    row,
                    predicted,
                    emissions,
                    fitness,
                });
            }
        }

        let selection = best.map(|b| Selection {
            row: b.row,
            predicted_strength: b.predicted,
            emissions: b.emissions,
            fitness: b.fitness,
            risk: RiskTier::classify(b.emissions),
            mix: self.catalog.named_values(&self.catalog.records()[b.row]),
        });

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        match &selection {
            Some(s) => info!(
                target_mpa = target_strength,
                row = s.row,
                fitness = s.fitness,
                risk = %s.risk,
                scanned = stats.scanned,
                feasible = stats.feasible,
                "mix selected"
            ),
            None => warn!(
                target_mpa = target_strength,
                scanned = stats.scanned,
                rejected = stats.rejected.total(),
                "no feasible mix"
            ),
        }

        Ok(SearchResult {
            target_strength,
            oracle: self.oracle.label().to_string(),
            selection,
            stats,
            elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SchemaMapping;
    use crate::error::OracleError;
    use crate::science::constraints::ConstraintBounds;
    use crate::science::sustainability::EmissionFactorTable;

    /// Reads strength straight out of the last feature column.
    struct ColumnOracle(usize);

    impl StrengthOracle for ColumnOracle {
        fn predict(&self, features: &[f64]) -> Result<f64, OracleError> {
            Ok(features[self.0])
        }
        fn label(&self) -> &str {
            "column"
        }
    }

    fn catalog(rows: Vec<Vec<f64>>) -> Catalog {
        Catalog::from_rows(
            &["cement", "slag", "fly", "age", "hint", "compressive"],
            rows,
            &SchemaMapping::default(),
        )
        .unwrap()
    }

    fn run(catalog: &Catalog, target: f64) -> SearchResult {
        let filter = ConstraintFilter::new(
            ConstraintBounds::default(),
            catalog.schema().binder_columns(),
        );
        let estimator = EmissionFactorTable::default().bind(catalog.feature_names());
        let oracle = ColumnOracle(4);
        MixSelector {
            catalog,
            filter: &filter,
            estimator: &estimator,
            oracle: &oracle,
        }
        .select(target)
        .unwrap()
    }

    #[test]
    fn test_prefers_closer_strength() {
        let catalog = catalog(vec![
            vec![200.0, 170.0, 110.0, 28.0, 20.0, 0.0],
            vec![200.0, 170.0, 110.0, 28.0, 30.0, 0.0],
        ]);
        let result = run(&catalog, 30.0);
        let selection = result.selection.unwrap();
        assert_eq!(selection.row, 1);
        assert_eq!(selection.predicted_strength, 30.0);
        assert_eq!(selection.mix.len(), 5);
    }

    #[test]
    fn test_stats_count_every_row() {
        let catalog = catalog(vec![
            vec![0.0, 0.0, 0.0, 28.0, 30.0, 0.0],
            vec![300.0, 120.0, 60.0, 28.0, 30.0, 0.0],
            vec![200.0, 170.0, 110.0, 90.0, 30.0, 0.0],
            vec![200.0, 170.0, 110.0, 28.0, 30.0, 0.0],
        ]);
        let result = run(&catalog, 30.0);
        assert_eq!(result.stats.scanned, 4);
        assert_eq!(result.stats.feasible, 1);
        assert_eq!(result.stats.rejected.zero_binder, 1);
        assert_eq!(result.stats.rejected.cement_ratio, 1);
        assert_eq!(result.stats.rejected.age, 1);
        assert_eq!(result.stats.rejected.total(), 3);
        assert_eq!(result.selection.unwrap().row, 3);
    }

    #[test]
    fn test_empty_catalog_has_no_selection() {
        let result = run(&catalog(Vec::new()), 30.0);
        assert!(!result.is_feasible());
        assert_eq!(result.risk(), None);
        assert_eq!(result.oracle, "column");
    }
}
