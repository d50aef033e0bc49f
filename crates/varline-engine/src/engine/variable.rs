//! Variable and formula records.
//!
//! This module provides the data types the resolver and executor read:
//! - [`VariableKind`] - Whether a variable holds a literal or a derived expression
//! - [`Variable`] - A named variable definition
//! - [`Formula`] - A named formula that may use contextual placeholders
//! - [`ResolutionResult`] - Resolved values and per-name errors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::deps::extract_dependencies;

/// How a variable's value is obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VariableKind {
    /// A literal number such as `10000`.
    Constant,
    /// An arithmetic expression over other variables such as `BASIC + DA`.
    Dynamic,
}

impl VariableKind {
    pub fn label(self) -> &'static str {
        match self {
            VariableKind::Constant => "Constant",
            VariableKind::Dynamic => "Dynamic",
        }
    }
}

/// A named variable definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
    pub expression: String,
}

impl Variable {
    pub fn new(name: &str, kind: VariableKind, expression: &str) -> Variable {
        Variable {
            name: name.to_string(),
            kind,
            expression: expression.to_string(),
        }
    }

    pub fn constant(name: &str, value: &str) -> Variable {
        Variable::new(name, VariableKind::Constant, value)
    }

    pub fn dynamic(name: &str, expression: &str) -> Variable {
        Variable::new(name, VariableKind::Dynamic, expression)
    }

    /// Names this variable references. Constants never reference anything.
    pub fn depends_on(&self) -> Vec<String> {
        match self.kind {
            VariableKind::Constant => Vec::new(),
            VariableKind::Dynamic => extract_dependencies(&self.expression),
        }
    }
}

/// A named formula. Its expression may reference variables and `{{#name}}`
/// contextual placeholders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub name: String,
    pub expression: String,
}

impl Formula {
    pub fn new(name: &str, expression: &str) -> Formula {
        Formula {
            name: name.to_string(),
            expression: expression.to_string(),
        }
    }
}

/// Outcome of resolving a set of variables.
///
/// Every input name appears in exactly one of `values` or `errors`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub values: BTreeMap<String, f64>,
    pub errors: BTreeMap<String, String>,
}

impl ResolutionResult {
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total number of names covered by the result.
    pub fn len(&self) -> usize {
        self.values.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.errors.is_empty()
    }
}
