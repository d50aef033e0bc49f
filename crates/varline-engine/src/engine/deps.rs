//! Dependency extraction from expression text.
//!
//! Finds the variable names an expression refers to (used for dependency
//! resolution) and the contextual placeholders a formula needs at execution
//! time.

use regex::Regex;
use std::sync::OnceLock;

use super::template::{TemplateToken, lex_template};

/// Returns true when `name` is a valid variable or formula name
/// (`^[A-Z][A-Z0-9_]*$`).
pub fn is_valid_name(name: &str) -> bool {
    name_re().is_match(name)
}

/// Distinct variable names referenced by an expression, in order of first
/// appearance.
pub fn extract_dependencies(expression: &str) -> Vec<String> {
    let mut deps: Vec<String> = Vec::new();
    for token in lex_template(expression) {
        if let TemplateToken::Identifier(name) = token
            && !deps.iter().any(|d| d == name)
        {
            deps.push(name.to_string());
        }
    }
    deps
}

/// Distinct `{{#name}}` placeholder names in an expression, in order of first
/// appearance.
pub fn extract_context_names(expression: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for token in lex_template(expression) {
        if let TemplateToken::Placeholder(name) = token
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    names
}

fn name_re() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("name regex must compile"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("GROSS"));
        assert!(is_valid_name("PF_2"));
        assert!(is_valid_name("A"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("2A"));
        assert!(!is_valid_name("_A"));
        assert!(!is_valid_name("Gross"));
        assert!(!is_valid_name("NET SALARY"));
    }

    #[test]
    fn test_extract_dependencies_dedups_in_order() {
        assert_eq!(
            extract_dependencies("HRA + BASIC * 2 + HRA"),
            vec!["HRA".to_string(), "BASIC".to_string()]
        );
    }

    #[test]
    fn test_extract_dependencies_ignores_placeholders_and_literals() {
        assert!(extract_dependencies("10 + 20").is_empty());
        assert_eq!(
            extract_dependencies("GROSS * {{#BONUS}} / 100"),
            vec!["GROSS".to_string()]
        );
    }

    #[test]
    fn test_extract_context_names() {
        assert_eq!(
            extract_context_names("{{#days}} * GROSS / {{#days}} + {{#rate}}"),
            vec!["days".to_string(), "rate".to_string()]
        );
        assert!(extract_context_names("GROSS - DEDUCTIONS").is_empty());
    }
}
