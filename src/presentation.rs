// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Presentation boundary
//!
//! Parses the user's target strength before the core ever sees it and turns a
//! [`SearchResult`] into the text report or a JSON document.

use serde_json::json;

use crate::error::InputError;
use crate::optimization::SearchResult;

/// Shown when no catalog record passes the constraints.
pub const NO_SOLUTION_MESSAGE: &str = "No sustainable mix satisfies the given constraints.";
/// Shown when the target strength does not parse.
pub const INPUT_ERROR_MESSAGE: &str = "Please enter a valid MPa value";

const RULE_WIDTH: usize = 60;

/// Parse a target strength (MPa) typed by a user.
pub fn parse_target_strength(text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    let value: f64 = text
        .parse()
        .map_err(|_| InputError::NotNumeric(text.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::NotFinite(text.to_string()));
    }
    Ok(value)
}

/// Fixed-layout text report.
pub fn render_text(result: &SearchResult) -> String {
    let Some(selection) = &result.selection else {
        return format!("{NO_SOLUTION_MESSAGE}\n");
    };

    let mut out = String::new();
    out.push_str(&format!("TARGET MPa       : {:?}\n", result.target_strength));
    out.push_str(&format!(
        "ACHIEVED MPa     : {:.2}\n",
        selection.predicted_strength
    ));
    out.push_str(&format!(
        "TOTAL CO₂       : {:.2} kg CO₂/m³\n",
        selection.emissions
    ));
    out.push_str(&format!(
        "CO₂ RISK LEVEL  : {}\n\n",
        selection.risk.description()
    ));
    out.push_str("BALANCED SUSTAINABLE MIX PROPORTIONS\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for feature in &selection.mix {
        out.push_str(&format!("{}: {:.2}\n", feature.name, feature.value));
    }
    out
}

/// JSON document of the whole result. A missing selection carries the
/// no-solution message.
pub fn render_json(result: &SearchResult) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(result)?;
    if result.selection.is_none() {
        value["message"] = json!(NO_SOLUTION_MESSAGE);
    }
    serde_json::to_string_pretty(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FeatureValue;
    use crate::optimization::{ScanStats, Selection};
    use crate::science::sustainability::RiskTier;

    fn result(selection: Option<Selection>) -> SearchResult {
        SearchResult {
            target_strength: 30.0,
            oracle: "Random Forest".into(),
            selection,
            stats: ScanStats::default(),
            elapsed_ms: 0.1,
        }
    }

    fn winner() -> Selection {
        Selection {
            row: 4,
            predicted_strength: 29.5,
            emissions: 281.4,
            fitness: 331.4,
            risk: RiskTier::Moderate,
            mix: vec![
                FeatureValue {
                    name: "Cement".into(),
                    value: 300.0,
                },
                FeatureValue {
                    name: "Age (day)".into(),
                    value: 28.0,
                },
            ],
        }
    }

    #[test]
    fn test_parse_target_strength() {
        assert_eq!(parse_target_strength(" 35 "), Ok(35.0));
        assert_eq!(parse_target_strength("42.5"), Ok(42.5));
        assert_eq!(parse_target_strength(""), Err(InputError::Empty));
        assert_eq!(
            parse_target_strength("strong"),
            Err(InputError::NotNumeric("strong".into()))
        );
        assert_eq!(
            parse_target_strength("inf"),
            Err(InputError::NotFinite("inf".into()))
        );
        assert!(matches!(
            parse_target_strength("NaN"),
            Err(InputError::NotFinite(_))
        ));
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&result(Some(winner())));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "TARGET MPa       : 30.0");
        assert_eq!(lines[1], "ACHIEVED MPa     : 29.50");
        assert_eq!(lines[2], "TOTAL CO₂       : 281.40 kg CO₂/m³");
        assert_eq!(lines[3], "CO₂ RISK LEVEL  : MODERATE CO₂");
        assert_eq!(lines[5], "BALANCED SUSTAINABLE MIX PROPORTIONS");
        assert_eq!(lines[6], "-".repeat(60));
        assert_eq!(lines[7], "Cement: 300.00");
        assert_eq!(lines[8], "Age (day): 28.00");
    }

    #[test]
    fn test_render_text_no_solution() {
        assert_eq!(render_text(&result(None)).trim(), NO_SOLUTION_MESSAGE);
    }

    #[test]
    fn test_render_json() {
        let text = render_json(&result(Some(winner()))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["selection"]["risk"], "MODERATE");
        assert_eq!(value["selection"]["row"], 4);
        assert_eq!(value["selection"]["mix"][0]["name"], "Cement");
        assert_eq!(value["oracle"], "Random Forest");
        assert!(value.get("message").is_none());

        let empty: serde_json::Value =
            serde_json::from_str(&render_json(&result(None)).unwrap()).unwrap();
        assert!(empty["selection"].is_null());
        assert_eq!(empty["message"], NO_SOLUTION_MESSAGE);
    }
}
