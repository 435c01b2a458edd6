// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//! Candidate Scoring
//!
//! Single scalar fitness trading strength accuracy against embodied carbon.
//! Lower is better:
//!
//! ```text
//! fitness = 100 * |predicted - target| + emissions
//! ```
//!
//! One MPa of deviation weighs as much as 100 kg CO2e/m3.

/// Weight on the absolute strength deviation (MPa).
pub const STRENGTH_DEVIATION_WEIGHT: f64 = 100.0;

pub struct CandidateScorer;

impl CandidateScorer {
    pub fn score(predicted: f64, target: f64, emissions: f64) -> f64 {
        (predicted - target).abs() * STRENGTH_DEVIATION_WEIGHT + emissions
    }
}
