// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! CSV catalog loading
//!
//! Reads a comma-separated mix table with one header row through the `csv`
//! crate. Cells may be double-quoted and may span lines (the UCI strength
//! column is `"Concrete compressive strength(MPa, megapascals)"`). Blank
//! lines are skipped. Every data cell must parse as a number; feature
//! quantities must be finite and non-negative.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use super::{Catalog, MixRecord, SchemaMapping};
use crate::error::CatalogError;

/// Load a catalog file from disk.
pub fn load_catalog(path: &Path, mapping: &SchemaMapping) -> Result<Catalog, CatalogError> {
    let catalog = read_catalog(File::open(path)?, mapping)?;
    info!(
        path = %path.display(),
        records = catalog.len(),
        features = catalog.feature_names().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Parse a catalog held in memory (wasm callers hand over the file text).
pub fn parse_catalog(text: &str, mapping: &SchemaMapping) -> Result<Catalog, CatalogError> {
    read_catalog(text.as_bytes(), mapping)
}

pub fn read_catalog<R: Read>(reader: R, mapping: &SchemaMapping) -> Result<Catalog, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if is_blank(&headers) {
        return Err(CatalogError::MissingHeader);
    }
    if let Some(first) = headers.first_mut() {
        *first = first.trim_start_matches('\u{feff}').trim().to_string();
    }

    let schema = mapping.resolve(&headers)?;
    let target = schema.target_column();
    debug!(
        target = %schema.target_name(),
        binder = ?schema.binder_columns(),
        water = ?schema.water_column(),
        "schema resolved"
    );

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        let line_no = line_of(&row);
        if row.len() != headers.len() {
            return Err(CatalogError::RaggedRow {
                line: line_no,
                expected: headers.len(),
                found: row.len(),
            });
        }

        let mut values = Vec::with_capacity(headers.len() - 1);
        let mut strength = 0.0;
        for (col, cell) in row.iter().enumerate() {
            let value: f64 = cell.parse().map_err(|_| CatalogError::InvalidValue {
                line: line_no,
                column: headers[col].clone(),
                value: cell.to_string(),
            })?;

            if col == target {
                if !value.is_finite() {
                    return Err(CatalogError::InvalidQuantity {
                        line: line_no,
                        column: headers[col].clone(),
                        value,
                    });
                }
                strength = value;
                continue;
            }

            if !value.is_finite() || value < 0.0 {
                return Err(CatalogError::InvalidQuantity {
                    line: line_no,
                    column: headers[col].clone(),
                    value,
                });
            }
            values.push(value);
        }
        records.push(MixRecord::new(values).with_measured_strength(strength));
    }

    Catalog::new(schema, records)
}

fn is_blank(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim_start_matches('\u{feff}').trim().is_empty())
}

/// 1-based file line where the record starts.
fn line_of(row: &StringRecord) -> usize {
    row.position().map_or(0, |p| p.line() as usize)
}
