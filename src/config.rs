// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Search configuration
//!
//! Everything tunable about a search lives in one JSON document. Every
//! section is optional; omitted sections keep the built-in defaults.
//!
//! ```json
//! {
//!   "schema": { "target": { "keyword": "compressive" } },
//!   "emissions": { "rule": "exclusive_first" },
//!   "constraints": { "max_age_days": 90 },
//!   "physics": { "temperature_c": 25 }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{ColumnRule, FieldRole, SchemaMapping};
use crate::error::ConfigError;
use crate::science::constraints::{ConstraintBounds, RatioBounds};
use crate::science::strength::PhysicsCalibration;
use crate::science::sustainability::EmissionFactorTable;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub schema: SchemaMapping,
    pub emissions: EmissionFactorTable,
    pub constraints: ConstraintBounds,
    pub physics: PhysicsCalibration,
}

impl SearchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let config: SearchConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // a blank keyword is a substring of every header
        for role in std::iter::once(FieldRole::Target).chain(FieldRole::FEATURES) {
            let blank = match self.schema.rule(role) {
                ColumnRule::Keyword(v) | ColumnRule::Column(v) => v.trim().is_empty(),
            };
            if blank {
                return Err(ConfigError::Invalid(format!(
                    "schema.{role} names no keyword or column"
                )));
            }
        }

        let c = &self.constraints;
        for (name, bounds) in [
            ("cement_ratio", &c.cement_ratio),
            ("slag_ratio", &c.slag_ratio),
            ("fly_ash_ratio", &c.fly_ash_ratio),
        ] {
            check_ratio(name, bounds)?;
        }
        if !(c.max_age_days.is_finite() && c.max_age_days >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_age_days must be finite and non-negative, got {}",
                c.max_age_days
            )));
        }

        if let Some(f) = self
            .emissions
            .factors
            .iter()
            .find(|f| !(f.factor.is_finite() && f.factor >= 0.0))
        {
            return Err(ConfigError::Invalid(format!(
                "emission factor for '{}' must be finite and non-negative, got {}",
                f.keyword, f.factor
            )));
        }
        if let Some(f) = self
            .emissions
            .factors
            .iter()
            .find(|f| f.keyword.trim().is_empty() && f.columns.is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "emission factor {} has neither a keyword nor columns",
                f.factor
            )));
        }

        let p = &self.physics;
        let positive = [
            ("s_intrinsic", p.s_intrinsic),
            ("k_slag", p.k_slag),
            ("k_fly_ash", p.k_fly_ash),
            ("k_ref", p.k_ref),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "physics.{name} must be positive, got {value}"
            )));
        }
        // below absolute zero the Arrhenius term blows up
        if !(p.temperature_c.is_finite() && p.temperature_c > -273.15) {
            return Err(ConfigError::Invalid(format!(
                "physics.temperature_c out of range: {}",
                p.temperature_c
            )));
        }
        Ok(())
    }
}

fn check_ratio(name: &str, bounds: &RatioBounds) -> Result<(), ConfigError> {
    let ok = bounds.min.is_finite()
        && bounds.max.is_finite()
        && 0.0 <= bounds.min
        && bounds.min <= bounds.max
        && bounds.max <= 1.0;
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must satisfy 0 <= min <= max <= 1, got [{}, {}]",
            bounds.min, bounds.max
        )))
    }
}
