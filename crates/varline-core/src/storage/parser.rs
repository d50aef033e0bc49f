//! Parser for the line-oriented definitions format
//!
//! ```text
//! # payroll
//! const BASIC = 10000
//! dynamic GROSS = BASIC + DA + HRA
//! formula MONTHLY_SALARY = (GROSS / 30) * {{#num_of_days}}
//! ```

use crate::book::Book;
use crate::error::{Result, VarlineError};
use std::fs;
use std::path::Path;
use varline_engine::engine::VariableKind;

const MAX_DEFINITIONS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Read a definitions file, choosing the format from its extension.
pub fn parse_definitions(path: &Path) -> Result<Book> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_DEFINITIONS_FILE_BYTES {
        return Err(VarlineError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: definitions file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_DEFINITIONS_FILE_BYTES
            ),
        )));
    }
    let content = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        super::parse_toml_content(&content)
    } else {
        parse_vars_content(&content)
    }
}

enum Record {
    Variable(VariableKind),
    Formula,
}

/// Parse line-oriented definitions from a string.
pub fn parse_vars_content(content: &str) -> Result<Book> {
    let mut book = Book::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parse_error = |message: String| VarlineError::Parse {
            line: line_num + 1,
            message,
        };

        let Some((keyword, rest)) = line.split_once(char::is_whitespace) else {
            return Err(parse_error(
                "Expected 'const|dynamic|formula NAME = EXPRESSION' format".to_string(),
            ));
        };
        let record = match keyword {
            "const" | "constant" => Record::Variable(VariableKind::Constant),
            "dynamic" | "dyn" => Record::Variable(VariableKind::Dynamic),
            "formula" => Record::Formula,
            other => return Err(parse_error(format!("Unknown record type: {}", other))),
        };

        let Some((name, expression)) = rest.split_once('=') else {
            return Err(parse_error("Expected 'NAME = EXPRESSION'".to_string()));
        };

        let added = match record {
            Record::Variable(kind) => book.add_variable(name, kind, expression),
            Record::Formula => book.add_formula(name, expression),
        };
        added.map_err(|err| parse_error(err.to_string()))?;
    }

    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use varline_engine::engine::{Formula, Variable};

    #[test]
    fn test_parse_vars_content() {
        let content = "\
# payroll
const BASIC = 10000
constant DA = 2000

dynamic GROSS = BASIC + DA
formula NET = GROSS - {{#deductions}}
";
        let book = parse_vars_content(content).unwrap();
        assert_eq!(
            book.variables(),
            &[
                Variable::constant("BASIC", "10000"),
                Variable::constant("DA", "2000"),
                Variable::dynamic("GROSS", "BASIC + DA"),
            ]
        );
        assert_eq!(
            book.formula("NET"),
            Some(&Formula::new("NET", "GROSS - {{#deductions}}"))
        );
    }

    #[test]
    fn test_parse_lowercase_names_are_uppercased() {
        let book = parse_vars_content("dyn total = A*2").unwrap();
        assert_eq!(book.variables()[0], Variable::dynamic("TOTAL", "A*2"));
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = parse_vars_content("const A = 1\nvar B = 2").unwrap_err();
        assert_eq!(err.to_string(), "Parse error at line 2: Unknown record type: var");

        let err = parse_vars_content("\n\nconst A 1").unwrap_err();
        assert_eq!(err.to_string(), "Parse error at line 3: Expected 'NAME = EXPRESSION'");

        let err = parse_vars_content("const").unwrap_err();
        assert!(matches!(err, VarlineError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_validation_errors_become_parse_errors() {
        let err = parse_vars_content("const A = 1\nconst A = 2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 2: Variable name already exists."
        );

        let err = parse_vars_content("const A = ten").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1: Expression contains invalid characters."
        );
    }

    #[test]
    fn test_parse_definitions_missing_file() {
        let err = parse_definitions(Path::new("/nonexistent/varline/defs.vars")).unwrap_err();
        assert!(matches!(err, VarlineError::Io(_)));
    }

    #[test]
    fn test_parse_definitions_rejects_oversized_file() {
        let temp_path = std::env::temp_dir().join("varline_defs_large.vars");
        let line = "const A = 1\n";
        let oversized = line.repeat(MAX_DEFINITIONS_FILE_BYTES as usize / line.len() + 1);
        std::fs::write(&temp_path, oversized).expect("write oversized definitions");

        let err = parse_definitions(&temp_path).unwrap_err();
        assert!(matches!(err, VarlineError::Io(_)));
        let message = err.to_string();
        assert!(message.starts_with("Refusing to read"));
        assert!(message.contains("definitions file too large"));
        // The message is carried once, not repeated by a wrapped source.
        assert!(std::error::Error::source(&err).is_none());

        let _ = std::fs::remove_file(&temp_path);
    }
}
