// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! End-to-end selection scenarios
//!
//! Catalog → constraint filter → oracle → emissions → scorer → winner.

use crate::catalog::{Catalog, SchemaMapping};
use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::error::{OracleError, SelectError};
use crate::optimization::MixSelector;
use crate::oracle::{ModelOracle, RegressionModel, StrengthOracle};
use crate::science::constraints::{ConstraintBounds, ConstraintFilter, RatioBounds};
use crate::science::sustainability::{EmissionFactorTable, EmissionsEstimator, RiskTier};

const HEADERS: [&str; 5] = ["Cement", "Slag", "Fly Ash", "Age (day)", "Compressive Strength"];

struct FixedOracle(f64);

impl StrengthOracle for FixedOracle {
    fn predict(&self, _features: &[f64]) -> Result<f64, OracleError> {
        Ok(self.0)
    }
    fn label(&self) -> &str {
        "fixed"
    }
}

/// Fails on any record whose cement content equals the poisoned value.
struct PoisonedOracle(f64);

impl StrengthOracle for PoisonedOracle {
    fn predict(&self, features: &[f64]) -> Result<f64, OracleError> {
        if features[0] == self.0 {
            Err(OracleError::NonFinite(f64::NAN))
        } else {
            Ok(30.0)
        }
    }
    fn label(&self) -> &str {
        "poisoned"
    }
}

fn catalog(rows: Vec<[f64; 4]>) -> Catalog {
    let rows = rows
        .into_iter()
        .map(|r| vec![r[0], r[1], r[2], r[3], 0.0])
        .collect();
    Catalog::from_rows(&HEADERS, rows, &SchemaMapping::default()).unwrap()
}

/// Default limits with the cement window opened to 0.70.
fn relaxed_filter(catalog: &Catalog) -> ConstraintFilter {
    ConstraintFilter::new(
        ConstraintBounds {
            cement_ratio: RatioBounds::new(0.30, 0.70),
            ..ConstraintBounds::default()
        },
        catalog.schema().binder_columns(),
    )
}

fn default_filter(catalog: &Catalog) -> ConstraintFilter {
    ConstraintFilter::new(ConstraintBounds::default(), catalog.schema().binder_columns())
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn test_reference_scenario_with_rounded_cement_factor() {
    // 300*0.906 + 120*0.07 + 60*0.02 = 271.8 + 8.4 + 1.2 = 281.4
    let catalog = catalog(vec![[300.0, 120.0, 60.0, 28.0]]);
    let filter = relaxed_filter(&catalog);
    let estimator = EmissionsEstimator::from_factors(vec![0.906, 0.07, 0.02, 0.0]);
    let oracle = FixedOracle(29.5);

    let result = MixSelector {
        catalog: &catalog,
        filter: &filter,
        estimator: &estimator,
        oracle: &oracle,
    }
    .select(30.0)
    .unwrap();

    let selection = result.selection.unwrap();
    assert_eq!(selection.row, 0);
    assert!(close(selection.emissions, 281.4));
    assert!(close(selection.fitness, 331.4));
    assert_eq!(selection.risk, RiskTier::Moderate);
    assert_eq!(selection.predicted_strength, 29.5);
}

#[test]
fn test_reference_scenario_with_default_factors() {
    // 300*0.90 + 8.4 + 1.2 = 279.6; fitness 50 + 279.6
    let catalog = catalog(vec![[300.0, 120.0, 60.0, 28.0]]);
    let filter = relaxed_filter(&catalog);
    let estimator = EmissionFactorTable::default().bind(catalog.feature_names());
    let oracle = FixedOracle(29.5);

    let selection = MixSelector {
        catalog: &catalog,
        filter: &filter,
        estimator: &estimator,
        oracle: &oracle,
    }
    .select(30.0)
    .unwrap()
    .selection
    .unwrap();

    assert!(close(selection.emissions, 279.6));
    assert!(close(selection.fitness, 329.6));
    assert_eq!(selection.risk, RiskTier::Moderate);
}

#[test]
fn test_reference_mix_infeasible_under_default_limits() {
    let catalog = catalog(vec![[300.0, 120.0, 60.0, 28.0]]);
    let filter = default_filter(&catalog);
    let estimator = EmissionFactorTable::default().bind(catalog.feature_names());
    let oracle = FixedOracle(29.5);

    let result = MixSelector {
        catalog: &catalog,
        filter: &filter,
        estimator: &estimator,
        oracle: &oracle,
    }
    .select(30.0)
    .unwrap();
    assert!(!result.is_feasible());
    assert_eq!(result.stats.rejected.cement_ratio, 1);
}

#[test]
fn test_no_feasible_solution_is_not_an_error() {
    let empty = catalog(Vec::new());
    let zero_binder = catalog(vec![[0.0, 0.0, 0.0, 28.0], [0.0, 0.0, 0.0, 7.0]]);

    for catalog in [&empty, &zero_binder] {
        let filter = default_filter(catalog);
        let estimator = EmissionFactorTable::default().bind(catalog.feature_names());
        let result = MixSelector {
            catalog,
            filter: &filter,
            estimator: &estimator,
            oracle: &FixedOracle(30.0),
        }
        .select(30.0)
        .unwrap();
        assert!(result.selection.is_none());
        assert_eq!(result.risk(), None);
    }
}

#[test]
fn test_tie_keeps_first_row() {
    let catalog = catalog(vec![
        [200.0, 170.0, 110.0, 28.0],
        [200.0, 170.0, 110.0, 28.0],
    ]);
    let filter = default_filter(&catalog);
    let estimator = EmissionFactorTable::default().bind(catalog.feature_names());

    let result = MixSelector {
        catalog: &catalog,
        filter: &filter,
        estimator: &estimator,
        oracle: &FixedOracle(30.0),
    }
    .select(30.0)
    .unwrap();
    assert_eq!(result.stats.feasible, 2);
    assert_eq!(result.selection.unwrap().row, 0);
}

#[test]
fn test_lower_carbon_wins_at_equal_strength() {
    // same ratios, less binder overall
    let catalog = catalog(vec![
        [200.0, 170.0, 110.0, 28.0],
        [150.0, 127.5, 82.5, 28.0],
    ]);
    let filter = default_filter(&catalog);
    let estimator = EmissionFactorTable::default().bind(catalog.feature_names());

    let selection = MixSelector {
        catalog: &catalog,
        filter: &filter,
        estimator: &estimator,
        oracle: &FixedOracle(30.0),
    }
    .select(30.0)
    .unwrap()
    .selection
    .unwrap();
    assert_eq!(selection.row, 1);
    assert_eq!(selection.risk, RiskTier::Low);
}

#[test]
fn test_oracle_failure_aborts_with_row() {
    let catalog = catalog(vec![
        [200.0, 170.0, 110.0, 28.0],
        // poisoned but infeasible: never reaches the oracle
        [999.0, 0.0, 0.0, 28.0],
        [190.0, 170.0, 110.0, 28.0],
        [190.0, 160.0, 110.0, 28.0],
    ]);
    let filter = default_filter(&catalog);
    let estimator = EmissionFactorTable::default().bind(catalog.feature_names());

    let selector = MixSelector {
        catalog: &catalog,
        filter: &filter,
        estimator: &estimator,
        oracle: &PoisonedOracle(999.0),
    };
    assert!(selector.select(30.0).is_ok());

    let selector = MixSelector {
        oracle: &PoisonedOracle(190.0),
        ..selector
    };
    let err = selector.select(30.0).unwrap_err();
    assert!(matches!(
        err,
        SelectError::Oracle {
            row: 2,
            source: OracleError::NonFinite(_)
        }
    ));
}

#[test]
fn test_selection_is_deterministic() {
    let catalog = catalog(vec![
        [200.0, 170.0, 110.0, 28.0],
        [180.0, 150.0, 100.0, 14.0],
        [220.0, 150.0, 90.0, 56.0],
        [150.0, 127.5, 82.5, 7.0],
    ]);
    let oracle = ModelOracle::new(
        "linear",
        RegressionModel::Linear {
            intercept: 5.0,
            coefficients: vec![0.08, 0.03, 0.02, 0.2],
        },
        4,
    )
    .unwrap();
    let context = SearchContext::new(catalog, &SearchConfig::default(), Box::new(oracle));

    let first = context.select(32.0).unwrap();
    for _ in 0..5 {
        let again = context.select(32.0).unwrap();
        assert_eq!(again.selection, first.selection);
        assert_eq!(again.stats, first.stats);
    }
}

#[test]
fn test_concurrent_searches_share_context() {
    let catalog = catalog(vec![
        [200.0, 170.0, 110.0, 28.0],
        [180.0, 150.0, 100.0, 14.0],
        [150.0, 127.5, 82.5, 7.0],
    ]);
    let oracle = ModelOracle::new(
        "linear",
        RegressionModel::Linear {
            intercept: 0.0,
            coefficients: vec![0.1, 0.05, 0.0, 0.5],
        },
        4,
    )
    .unwrap();
    let context = SearchContext::new(catalog, &SearchConfig::default(), Box::new(oracle));
    let expected = context.select(40.0).unwrap().selection;

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| context.select(40.0))).collect();
        for handle in handles {
            let result = handle.join().unwrap().unwrap();
            assert_eq!(result.selection, expected);
        }
    });
}
