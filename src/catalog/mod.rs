// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Candidate catalog: the immutable table of historical mixes a search scans.

pub mod loader;
pub mod record;
pub mod schema;

pub use loader::{load_catalog, parse_catalog, read_catalog};
pub use record::MixRecord;
pub use schema::{ColumnRule, FieldRole, ResolvedSchema, SchemaMapping};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A named quantity of a mix, as shown on the result surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureValue {
    pub name: String,
    pub value: f64,
}

/// Ordered, read-only sequence of mix records sharing one resolved schema.
#[derive(Clone, Debug)]
pub struct Catalog {
    schema: ResolvedSchema,
    records: Vec<MixRecord>,
}

impl Catalog {
    /// Build a catalog from already-resolved parts.
    ///
    /// Every record must carry exactly one value per feature column.
    pub fn new(schema: ResolvedSchema, records: Vec<MixRecord>) -> Result<Self, CatalogError> {
        let expected = schema.feature_count();
        if let Some((row, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.values().len() != expected)
        {
            return Err(CatalogError::FeatureCount {
                row,
                expected,
                found: record.values().len(),
            });
        }
        Ok(Catalog { schema, records })
    }

    /// Build a catalog from a header row and raw numeric rows that still
    /// contain the target column.
    pub fn from_rows<S: AsRef<str>>(
        headers: &[S],
        rows: Vec<Vec<f64>>,
        mapping: &SchemaMapping,
    ) -> Result<Self, CatalogError> {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let schema = mapping.resolve(&headers)?;
        let target = schema.target_column();

        let mut records = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(CatalogError::RaggedRow {
                    line: i + 2,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            let strength = row.remove(target);
            records.push(MixRecord::new(row).with_measured_strength(strength));
        }
        Catalog::new(schema, records)
    }

    pub fn schema(&self) -> &ResolvedSchema {
        &self.schema
    }

    pub fn feature_names(&self) -> &[String] {
        self.schema.feature_names()
    }

    pub fn records(&self) -> &[MixRecord] {
        &self.records
    }

    pub fn get(&self, row: usize) -> Option<&MixRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature name / quantity pairs of one record, in column order.
    pub fn named_values(&self, record: &MixRecord) -> Vec<FeatureValue> {
        self.feature_names()
            .iter()
            .zip(record.values())
            .map(|(name, &value)| FeatureValue {
                name: name.clone(),
                value,
            })
            .collect()
    }
}
