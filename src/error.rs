// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Typed errors for catalog loading, model discovery and mix selection.
//!
//! Each stage of the pipeline owns one enum so callers can tell an unusable
//! input file apart from a model that cannot score a record. The only
//! recoverable outcome of a search, "no feasible mix", is not an error at
//! all: it is `SearchResult::selection == None`.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::FieldRole;

/// Rejected target-strength input at the presentation boundary.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("target strength is empty")]
    Empty,
    #[error("target strength '{0}' is not a number")]
    NotNumeric(String),
    #[error("target strength '{0}' is not a finite value")]
    NotFinite(String),
}

/// Failures while reading a mix catalog or resolving its column roles.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog has no header row")]
    MissingHeader,
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },
    #[error("line {line}, column '{column}': quantity {value} must be finite and non-negative")]
    InvalidQuantity {
        line: usize,
        column: String,
        value: f64,
    },
    #[error("no column matches role '{role}' (keyword '{keyword}')")]
    MissingColumn { role: FieldRole, keyword: String },
    #[error("column '{column}' configured for role '{role}' does not exist")]
    UnknownColumn { role: FieldRole, column: String },
    #[error("row {row} has {found} feature values, catalog has {expected} feature columns")]
    FeatureCount {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A strength oracle could not score one feature vector.
#[derive(Debug, Error, PartialEq)]
pub enum OracleError {
    #[error("expected {expected} features, got {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

/// Failures while discovering, verifying or binding a strength model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed model artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model artifact not found: {0}")]
    MissingArtifact(PathBuf),
    #[error("hash mismatch for {file}: expected {expected}, got {actual}")]
    DigestMismatch {
        file: String,
        expected: String,
        actual: String,
    },
    #[error("model expects features {expected:?} but catalog provides {found:?}")]
    FeatureSchema {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("invalid model: {0}")]
    Invalid(String),
    #[error("physics oracle needs a '{0}' column")]
    MissingRole(FieldRole),
}

/// Fatal failure of a pass over the catalog.
///
/// Shared by mix selection and oracle evaluation: both score every row with
/// the same oracle and abort on the first row it cannot score.
#[derive(Debug, Error, PartialEq)]
pub enum SelectError {
    #[error("strength oracle failed on catalog row {row}: {source}")]
    Oracle {
        row: usize,
        #[source]
        source: OracleError,
    },
}

/// Failures while loading or validating a search configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure to assemble a search context from text inputs.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
