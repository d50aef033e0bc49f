//! Parser for TOML definitions files
//!
//! ```toml
//! [[variables]]
//! name = "BASIC"
//! kind = "CONSTANT"
//! expression = "10000"
//!
//! [[formulas]]
//! name = "NET_SALARY"
//! expression = "GROSS - DEDUCTIONS"
//! ```

use crate::book::Book;
use crate::error::Result;
use serde::Deserialize;
use varline_engine::engine::{Formula, Variable};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionsFile {
    #[serde(default)]
    variables: Vec<Variable>,
    #[serde(default)]
    formulas: Vec<Formula>,
}

/// Parse TOML definitions from a string. Every record goes through the same
/// validation as an interactive edit.
pub fn parse_toml_content(content: &str) -> Result<Book> {
    let file: DefinitionsFile = toml::from_str(content)?;
    let mut book = Book::new();
    for variable in &file.variables {
        book.add_variable(&variable.name, variable.kind, &variable.expression)?;
    }
    for formula in &file.formulas {
        book.add_formula(&formula.name, &formula.expression)?;
    }
    Ok(book)
}
