// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Column role mapping
//!
//! Catalog files name their columns freely ("Cement (component 1)(kg in a m^3
//! mixture)", "Fly Ash", "Age (day)"). The mapping below ties each logical
//! role to a physical column once, at load time, so the search loop only
//! ever deals with indices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::science::constraints::BinderColumns;

/// Logical role a catalog column can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Measured compressive strength (ground truth, never a feature)
    Target,
    Cement,
    Slag,
    FlyAsh,
    Age,
    Water,
}

impl FieldRole {
    /// Roles bound to feature columns, in lookup order.
    pub const FEATURES: [FieldRole; 5] = [
        FieldRole::Cement,
        FieldRole::Slag,
        FieldRole::FlyAsh,
        FieldRole::Age,
        FieldRole::Water,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldRole::Target => "target",
            FieldRole::Cement => "cement",
            FieldRole::Slag => "slag",
            FieldRole::FlyAsh => "fly_ash",
            FieldRole::Age => "age",
            FieldRole::Water => "water",
        }
    }

    /// Case-insensitive substring used when no explicit column is configured.
    pub const fn default_keyword(self) -> &'static str {
        match self {
            FieldRole::Target => "compressive",
            FieldRole::Cement => "cement",
            FieldRole::Slag => "slag",
            FieldRole::FlyAsh => "fly",
            FieldRole::Age => "age",
            FieldRole::Water => "water",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a role finds its column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRule {
    /// First column (in file order) whose lowercase name contains the keyword
    Keyword(String),
    /// Exact column name (surrounding whitespace and ASCII case ignored)
    Column(String),
}

impl ColumnRule {
    fn keyword(role: FieldRole) -> Self {
        ColumnRule::Keyword(role.default_keyword().to_string())
    }

    fn find(&self, names: &[String]) -> Option<usize> {
        match self {
            ColumnRule::Keyword(keyword) => {
                let keyword = keyword.to_lowercase();
                names
                    .iter()
                    .position(|name| name.to_lowercase().contains(&keyword))
            }
            ColumnRule::Column(column) => {
                let column = column.trim();
                names
                    .iter()
                    .position(|name| name.trim().eq_ignore_ascii_case(column))
            }
        }
    }

    fn not_found(&self, role: FieldRole) -> CatalogError {
        match self {
            ColumnRule::Keyword(keyword) => CatalogError::MissingColumn {
                role,
                keyword: keyword.clone(),
            },
            ColumnRule::Column(column) => CatalogError::UnknownColumn {
                role,
                column: column.clone(),
            },
        }
    }
}

/// Injectable table from logical role to physical column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaMapping {
    pub target: ColumnRule,
    pub cement: ColumnRule,
    pub slag: ColumnRule,
    pub fly_ash: ColumnRule,
    pub age: ColumnRule,
    pub water: ColumnRule,
}

impl Default for SchemaMapping {
    fn default() -> Self {
        Self {
            target: ColumnRule::keyword(FieldRole::Target),
            cement: ColumnRule::keyword(FieldRole::Cement),
            slag: ColumnRule::keyword(FieldRole::Slag),
            fly_ash: ColumnRule::keyword(FieldRole::FlyAsh),
            age: ColumnRule::keyword(FieldRole::Age),
            water: ColumnRule::keyword(FieldRole::Water),
        }
    }
}

impl SchemaMapping {
    pub fn rule(&self, role: FieldRole) -> &ColumnRule {
        match role {
            FieldRole::Target => &self.target,
            FieldRole::Cement => &self.cement,
            FieldRole::Slag => &self.slag,
            FieldRole::FlyAsh => &self.fly_ash,
            FieldRole::Age => &self.age,
            FieldRole::Water => &self.water,
        }
    }

    /// Resolve every role against a header row.
    ///
    /// The target column is located among all headers and removed; the
    /// remaining headers become the feature columns, in file order. Binder
    /// and age roles are required, water is optional (only the physics
    /// oracle needs it).
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedSchema, CatalogError> {
        let target_column = self
            .target
            .find(headers)
            .ok_or_else(|| self.target.not_found(FieldRole::Target))?;

        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target_column)
            .map(|(_, name)| name.clone())
            .collect();

        let required = |role: FieldRole| {
            let rule = self.rule(role);
            rule.find(&feature_names)
                .ok_or_else(|| rule.not_found(role))
        };

        let binder = BinderColumns {
            cement: required(FieldRole::Cement)?,
            slag: required(FieldRole::Slag)?,
            fly_ash: required(FieldRole::FlyAsh)?,
            age: required(FieldRole::Age)?,
        };
        let water = self.water.find(&feature_names);

        Ok(ResolvedSchema {
            target_name: headers[target_column].clone(),
            target_column,
            feature_names: feature_names.into(),
            binder,
            water,
        })
    }
}

/// Role-to-index table produced by [`SchemaMapping::resolve`].
///
/// Feature indices refer to positions in the feature vector (target removed);
/// `target_column` refers to the position in the raw header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSchema {
    target_name: String,
    target_column: usize,
    feature_names: Arc<[String]>,
    binder: BinderColumns,
    water: Option<usize>,
}

impl ResolvedSchema {
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn target_column(&self) -> usize {
        self.target_column
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn binder_columns(&self) -> BinderColumns {
        self.binder
    }

    pub fn water_column(&self) -> Option<usize> {
        self.water
    }

    /// Feature column bound to `role`, if any. `Target` is never a feature.
    pub fn column(&self, role: FieldRole) -> Option<usize> {
        match role {
            FieldRole::Target => None,
            FieldRole::Cement => Some(self.binder.cement),
            FieldRole::Slag => Some(self.binder.slag),
            FieldRole::FlyAsh => Some(self.binder.fly_ash),
            FieldRole::Age => Some(self.binder.age),
            FieldRole::Water => self.water,
        }
    }

    /// Role played by feature column `column`, if it has one.
    pub fn role_of(&self, column: usize) -> Option<FieldRole> {
        FieldRole::FEATURES
            .into_iter()
            .find(|&role| self.column(role) == Some(column))
    }
}
