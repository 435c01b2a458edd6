// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//! Binder Composition Constraints
//!
//! Hard compositional limits a catalog mix must satisfy before it is even
//! scored. The binder is cement + slag + fly ash; each constituent's share of
//! the binder must sit inside an inclusive window, and the test age may not
//! exceed the ceiling.

use serde::{Deserialize, Serialize};

use crate::catalog::MixRecord;

/// Inclusive `[min, max]` window on a binder fraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatioBounds {
    pub min: f64,
    pub max: f64,
}

impl RatioBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        RatioBounds { min, max }
    }

    pub fn contains(&self, ratio: f64) -> bool {
        self.min <= ratio && ratio <= self.max
    }
}

/// Composition limits applied to every candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintBounds {
    pub cement_ratio: RatioBounds,  // cement / binder
    pub slag_ratio: RatioBounds,    // slag / binder
    pub fly_ash_ratio: RatioBounds, // fly ash / binder
    pub max_age_days: f64,          // rejected when age > max
}

impl Default for ConstraintBounds {
    fn default() -> Self {
        ConstraintBounds {
            cement_ratio: RatioBounds::new(0.30, 0.50),
            slag_ratio: RatioBounds::new(0.20, 0.40),
            fly_ash_ratio: RatioBounds::new(0.10, 0.30),
            max_age_days: 56.0,
        }
    }
}

/// Why a candidate was turned away. Checks run in declaration order and the
/// first failure wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    ZeroBinder,
    CementRatio,
    SlagRatio,
    FlyAshRatio,
    AgeExceeded,
}

impl Rejection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Rejection::ZeroBinder => "zero_binder",
            Rejection::CementRatio => "cement_ratio",
            Rejection::SlagRatio => "slag_ratio",
            Rejection::FlyAshRatio => "fly_ash_ratio",
            Rejection::AgeExceeded => "age_exceeded",
        }
    }
}

/// Feature-vector positions of the constrained quantities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinderColumns {
    pub cement: usize,
    pub slag: usize,
    pub fly_ash: usize,
    pub age: usize,
}

/// The four quantities the filter looks at, pulled out of a record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Composition {
    pub cement: f64,
    pub slag: f64,
    pub fly_ash: f64,
    pub age_days: f64,
}

impl Composition {
    pub fn from_record(record: &MixRecord, columns: &BinderColumns) -> Self {
        Composition {
            cement: record.value(columns.cement),
            slag: record.value(columns.slag),
            fly_ash: record.value(columns.fly_ash),
            age_days: record.value(columns.age),
        }
    }

    pub fn binder(&self) -> f64 {
        self.cement + self.slag + self.fly_ash
    }
}

/// Feasibility gate bound to one catalog layout.
#[derive(Clone, Debug)]
pub struct ConstraintFilter {
    bounds: ConstraintBounds,
    columns: BinderColumns,
}

impl ConstraintFilter {
    pub fn new(bounds: ConstraintBounds, columns: BinderColumns) -> Self {
        ConstraintFilter { bounds, columns }
    }

    pub fn bounds(&self) -> &ConstraintBounds {
        &self.bounds
    }

    pub fn is_feasible(&self, record: &MixRecord) -> bool {
        self.check(record).is_ok()
    }

    pub fn check(&self, record: &MixRecord) -> Result<(), Rejection> {
        self.check_composition(&Composition::from_record(record, &self.columns))
    }

    pub fn check_composition(&self, mix: &Composition) -> Result<(), Rejection> {
        let binder = mix.binder();
        if binder == 0.0 {
            return Err(Rejection::ZeroBinder);
        }
        if !self.bounds.cement_ratio.contains(mix.cement / binder) {
            return Err(Rejection::CementRatio);
        }
        if !self.bounds.slag_ratio.contains(mix.slag / binder) {
            return Err(Rejection::SlagRatio);
        }
        if !self.bounds.fly_ash_ratio.contains(mix.fly_ash / binder) {
            return Err(Rejection::FlyAshRatio);
        }
        if mix.age_days > self.bounds.max_age_days {
            return Err(Rejection::AgeExceeded);
        }
        Ok(())
    }
}
