// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Physics strength oracle
//!
//! Fallback predictor used when no trained model artifact is available.
//! Age-dependent hydration (Parrot) feeds the Powers gel-space ratio:
//!
//! ```text
//! alpha(t) = alpha_max * (1 - exp(-k * sqrt(t)))
//! x        = 0.68 a / (0.68 a + max(w/c_eff - 0.36 a, 0) + air)
//! fc       = S * x^3
//! ```
//!
//! Slag and fly ash count toward the effective cement content through
//! efficiency factors fitted on the UCI concrete dataset.

use serde::{Deserialize, Serialize};

use crate::catalog::{FieldRole, ResolvedSchema};
use crate::error::{ModelError, OracleError};
use crate::oracle::StrengthOracle;

const REFERENCE_TEMP_K: f64 = 293.15;
/// Activation energy over gas constant for OPC (~41.5 kJ/mol).
const E_OVER_R: f64 = 5000.0;
const ENTRAPPED_AIR: f64 = 0.02;
const MAX_STRENGTH_MPA: f64 = 150.0;

/// Calibrated constants of the physics oracle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsCalibration {
    /// Intrinsic gel strength (MPa)
    pub s_intrinsic: f64,
    /// Slag efficiency factor
    pub k_slag: f64,
    /// Fly ash efficiency factor
    pub k_fly_ash: f64,
    /// Hydration rate at 20 C
    pub k_ref: f64,
    /// Curing temperature (C)
    pub temperature_c: f64,
}

impl Default for PhysicsCalibration {
    fn default() -> Self {
        // L-BFGS-B fit on UCI concrete
        PhysicsCalibration {
            s_intrinsic: 79.98,
            k_slag: 1.18,
            k_fly_ash: 1.15,
            k_ref: 0.46,
            temperature_c: 20.0,
        }
    }
}

/// Degree of hydration (0..1) after `age_days` of curing.
pub fn hydration_degree(age_days: f64, temperature_c: f64, scm_ratio: f64, k_ref: f64) -> f64 {
    // SCMs never fully react
    let alpha_max = 0.95 - 0.15 * scm_ratio;
    let temp_factor = (E_OVER_R * (1.0 / REFERENCE_TEMP_K - 1.0 / (temperature_c + 273.15))).exp();
    let k = k_ref * temp_factor * (1.0 - 0.4 * scm_ratio);
    let alpha = alpha_max * (1.0 - (-k * age_days.max(0.0).sqrt()).exp());
    alpha.clamp(0.0, 1.0)
}

/// Powers gel-space strength (MPa) for a water/cement ratio and hydration degree.
pub fn powers_strength(wc_ratio: f64, alpha: f64, s_intrinsic: f64) -> f64 {
    let gel = 0.68 * alpha;
    let capillary = (wc_ratio - 0.36 * alpha).max(0.0);
    let space = gel + capillary + ENTRAPPED_AIR;
    if space <= 0.001 {
        return 0.0;
    }
    let x = gel / space;
    (s_intrinsic * x.powi(3)).clamp(0.0, MAX_STRENGTH_MPA)
}

/// Strength oracle driven by the catalog's binder, water and age columns.
#[derive(Clone, Debug)]
pub struct PhysicsOracle {
    calibration: PhysicsCalibration,
    feature_count: usize,
    cement: usize,
    slag: usize,
    fly_ash: usize,
    water: usize,
    age: usize,
}

impl PhysicsOracle {
    pub fn new(calibration: PhysicsCalibration, schema: &ResolvedSchema) -> Result<Self, ModelError> {
        let water = schema
            .water_column()
            .ok_or(ModelError::MissingRole(FieldRole::Water))?;
        let binder = schema.binder_columns();
        Ok(PhysicsOracle {
            calibration,
            feature_count: schema.feature_count(),
            cement: binder.cement,
            slag: binder.slag,
            fly_ash: binder.fly_ash,
            water,
            age: binder.age,
        })
    }

    pub fn calibration(&self) -> &PhysicsCalibration {
        &self.calibration
    }

    fn strength(&self, cement: f64, slag: f64, fly_ash: f64, water: f64, age: f64) -> f64 {
        let c = &self.calibration;
        let binder = cement + slag + fly_ash;
        let effective_cement = cement + c.k_slag * slag + c.k_fly_ash * fly_ash;
        if binder <= 0.0 || effective_cement <= 0.0 {
            return 0.0;
        }
        let scm_ratio = (slag + fly_ash) / binder;
        let alpha = hydration_degree(age, c.temperature_c, scm_ratio, c.k_ref);
        powers_strength(water / effective_cement, alpha, c.s_intrinsic)
    }
}

impl StrengthOracle for PhysicsOracle {
    fn predict(&self, features: &[f64]) -> Result<f64, OracleError> {
        if features.len() != self.feature_count {
            return Err(OracleError::FeatureCount {
                expected: self.feature_count,
                found: features.len(),
            });
        }
        let fc = self.strength(
            features[self.cement],
            features[self.slag],
            features[self.fly_ash],
            features[self.water],
            features[self.age],
        );
        if fc.is_finite() {
            Ok(fc)
        } else {
            Err(OracleError::NonFinite(fc))
        }
    }

    fn label(&self) -> &str {
        "Physics (Powers-Parrot)"
    }
}
