// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
pub mod scoring;
pub mod selector;

pub use scoring::{CandidateScorer, STRENGTH_DEVIATION_WEIGHT};
pub use selector::{MixSelector, RejectionCounts, ScanStats, SearchResult, Selection};
