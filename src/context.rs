// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Immutable search context
//!
//! Built once at startup from a catalog, a configuration and a strength
//! oracle. Searches borrow it read-only, so a single context can serve any
//! number of concurrent searches.

use tracing::debug;

use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::error::SelectError;
use crate::optimization::{MixSelector, SearchResult};
use crate::oracle::StrengthOracle;
use crate::science::constraints::ConstraintFilter;
use crate::science::sustainability::EmissionsEstimator;

pub struct SearchContext {
    catalog: Catalog,
    filter: ConstraintFilter,
    estimator: EmissionsEstimator,
    oracle: Box<dyn StrengthOracle>,
}

impl SearchContext {
    /// Bind the configured constraints and emission factors to the catalog's
    /// column layout.
    pub fn new(catalog: Catalog, config: &SearchConfig, oracle: Box<dyn StrengthOracle>) -> Self {
        let filter = ConstraintFilter::new(
            config.constraints.clone(),
            catalog.schema().binder_columns(),
        );
        let estimator = config.emissions.bind(catalog.feature_names());
        debug!(
            oracle = oracle.label(),
            factors = ?estimator.factors(),
            "search context ready"
        );
        SearchContext {
            catalog,
            filter,
            estimator,
            oracle,
        }
    }

    pub fn selector(&self) -> MixSelector<'_> {
        MixSelector {
            catalog: &self.catalog,
            filter: &self.filter,
            estimator: &self.estimator,
            oracle: self.oracle.as_ref(),
        }
    }

    pub fn select(&self, target_strength: f64) -> Result<SearchResult, SelectError> {
        self.selector().select(target_strength)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &ConstraintFilter {
        &self.filter
    }

    pub fn estimator(&self) -> &EmissionsEstimator {
        &self.estimator
    }

    pub fn oracle(&self) -> &dyn StrengthOracle {
        self.oracle.as_ref()
    }
}
