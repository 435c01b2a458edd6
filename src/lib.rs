// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// EcoMix: Sustainable Concrete Mix Selection Core
//
// Scans a catalog of historical mixes, keeps the ones inside the binder
// composition limits, and picks the one whose predicted strength is closest
// to the target at the lowest embodied carbon.
//

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluation;
pub mod optimization;
pub mod oracle;
pub mod presentation;
pub mod science; // Constraints, emissions, physics strength
pub mod wasm;
#[cfg(test)]
mod tests_selection;

// Re-export core types
pub use catalog::{load_catalog, parse_catalog, Catalog, FeatureValue, MixRecord, SchemaMapping};
pub use config::SearchConfig;
pub use context::SearchContext;
pub use error::{CatalogError, ConfigError, InputError, ModelError, OracleError, SelectError, SetupError};
pub use evaluation::{evaluate, EvaluationReport};
pub use optimization::{CandidateScorer, MixSelector, ScanStats, SearchResult, Selection};
pub use oracle::{ModelArtifact, ModelOracle, StrengthOracle};
pub use science::constraints::{ConstraintBounds, ConstraintFilter, Rejection};
pub use science::strength::{PhysicsCalibration, PhysicsOracle};
pub use science::sustainability::{EmissionFactorTable, EmissionsEstimator, MatchRule, RiskTier};
pub use wasm::MixDesigner;
