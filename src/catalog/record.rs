// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

/// One historical mix: feature quantities in catalog column order plus the
/// measured strength it achieved, when the file carried one.
///
/// Column names live once on the [`Catalog`](super::Catalog); a record is
/// just the row of numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MixRecord {
    values: Vec<f64>,
    measured_strength: Option<f64>,
}

impl MixRecord {
    pub fn new(values: Vec<f64>) -> Self {
        MixRecord {
            values,
            measured_strength: None,
        }
    }

    pub fn with_measured_strength(mut self, strength: f64) -> Self {
        self.measured_strength = Some(strength);
        self
    }

    /// Feature vector handed to the strength oracle.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, column: usize) -> f64 {
        self.values[column]
    }

    pub fn measured_strength(&self) -> Option<f64> {
        self.measured_strength
    }

    /// Same mix with every quantity multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> MixRecord {
        MixRecord {
            values: self.values.iter().map(|v| v * factor).collect(),
            measured_strength: self.measured_strength,
        }
    }
}
