// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Browser surface
//!
//! All marshalling happens in Rust: the host hands over the catalog CSV text,
//! optional model artifact JSON and optional configuration JSON, then asks
//! for selections with the raw text of the target input.

use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::catalog::parse_catalog;
use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::error::SetupError;
use crate::oracle::{ModelArtifact, StrengthOracle};
use crate::presentation::{parse_target_strength, render_json, INPUT_ERROR_MESSAGE};
use crate::science::strength::PhysicsOracle;

#[wasm_bindgen]
pub struct MixDesigner {
    context: SearchContext,
}

impl MixDesigner {
    /// Without a model artifact the physics oracle is used.
    pub fn build(
        catalog_csv: &str,
        model_json: Option<&str>,
        config_json: Option<&str>,
    ) -> Result<Self, SetupError> {
        let config = match config_json {
            Some(text) => SearchConfig::from_json(text)?,
            None => SearchConfig::default(),
        };
        let catalog = parse_catalog(catalog_csv, &config.schema)?;
        let oracle: Box<dyn StrengthOracle> = match model_json {
            Some(text) => Box::new(ModelArtifact::from_json(text)?.into_oracle(catalog.feature_names())?),
            None => Box::new(PhysicsOracle::new(config.physics.clone(), catalog.schema())?),
        };
        Ok(MixDesigner {
            context: SearchContext::new(catalog, &config, oracle),
        })
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }
}

#[wasm_bindgen]
impl MixDesigner {
    #[wasm_bindgen(constructor)]
    pub fn new(
        catalog_csv: &str,
        model_json: Option<String>,
        config_json: Option<String>,
    ) -> Result<MixDesigner, JsValue> {
        Self::build(catalog_csv, model_json.as_deref(), config_json.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Selection as a JSON string; failures come back as `{"error": ...}`.
    pub fn select_json(&self, target_text: &str) -> String {
        let target = match parse_target_strength(target_text) {
            Ok(t) => t,
            Err(e) => {
                return json!({ "error": INPUT_ERROR_MESSAGE, "detail": e.to_string() }).to_string();
            }
        };
        match self.context.select(target) {
            Ok(result) => render_json(&result).unwrap_or_else(error_json),
            Err(e) => error_json(e),
        }
    }

    pub fn select_value(&self, target_text: &str) -> Result<JsValue, JsValue> {
        let target = parse_target_strength(target_text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let result = self
            .context
            .select(target)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    pub fn record_count(&self) -> usize {
        self.context.catalog().len()
    }

    pub fn oracle_label(&self) -> String {
        self.context.oracle().label().to_string()
    }
}

fn error_json(err: impl std::fmt::Display) -> String {
    json!({ "error": err.to_string() }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "cement,slag,fly ash,water,age,compressive strength\n\
                       200,170,110,180,28,38.2\n\
                       540,0,0,162,28,79.9\n";

    const MODEL: &str = r#"{
        "name": "Linear Regression",
        "feature_names": ["cement", "slag", "fly ash", "water", "age"],
        "model": { "kind": "linear", "intercept": 5.0, "coefficients": [0.1, 0.05, 0.02, -0.05, 0.1] }
    }"#;

    #[test]
    fn test_select_json_with_model() {
        let designer = MixDesigner::build(CSV, Some(MODEL), None).unwrap();
        assert_eq!(designer.record_count(), 2);
        assert_eq!(designer.oracle_label(), "Linear Regression");

        let value: serde_json::Value =
            serde_json::from_str(&designer.select_json("30")).unwrap();
        // only the first row is feasible
        assert_eq!(value["selection"]["row"], 0);
        assert_eq!(value["stats"]["rejected"]["cement_ratio"], 1);
    }

    #[test]
    fn test_physics_fallback() {
        let designer = MixDesigner::build(CSV, None, None).unwrap();
        assert!(designer.oracle_label().starts_with("Physics"));
        let value: serde_json::Value =
            serde_json::from_str(&designer.select_json("40")).unwrap();
        assert!(value["selection"]["predicted_strength"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_bad_target_is_reported() {
        let designer = MixDesigner::build(CSV, Some(MODEL), None).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&designer.select_json("forty")).unwrap();
        assert_eq!(value["error"], INPUT_ERROR_MESSAGE);
    }

    #[test]
    fn test_render_failure_becomes_error_object() {
        let err = serde_json::from_str::<u8>("x").unwrap_err();
        let value: serde_json::Value = serde_json::from_str(&error_json(&err)).unwrap();
        assert_eq!(value["error"], err.to_string());
        assert!(!value["error"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_config_applies() {
        let config = r#"{ "constraints": { "cement_ratio": { "min": 0.3, "max": 1.0 },
                                         "slag_ratio": { "min": 0.0, "max": 0.4 },
                                         "fly_ash_ratio": { "min": 0.0, "max": 0.3 } } }"#;
        let designer = MixDesigner::build(CSV, Some(MODEL), Some(config)).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&designer.select_json("30")).unwrap();
        assert_eq!(value["stats"]["feasible"], 2);
    }

    #[test]
    fn test_schema_mismatch_fails_build() {
        let model = MODEL.replace("\"fly ash\"", "\"fly_ash\"");
        assert!(matches!(
            MixDesigner::build(CSV, Some(&model), None),
            Err(SetupError::Model(_))
        ));
    }
}
