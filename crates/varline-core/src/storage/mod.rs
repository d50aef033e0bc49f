//! Read-only loading of variable and formula definitions.
//!
//! Two formats are accepted:
//! - `.toml`: `[[variables]]` and `[[formulas]]` tables
//! - anything else: one `const|dynamic|formula NAME = expression` per line

mod parser;
mod toml_file;

pub use parser::{parse_definitions, parse_vars_content};
pub use toml_file::parse_toml_content;
