use super::Book;
use crate::error::{Result, VarlineError};
use log::debug;
use regex::Regex;
use std::sync::OnceLock;
use varline_engine::engine::{Formula, Variable, VariableKind, is_valid_name};

/// Normalize and validate a variable record. Returns the upper-cased name and
/// trimmed expression.
pub(crate) fn validate_variable(
    name: &str,
    kind: VariableKind,
    expression: &str,
) -> Result<(String, String)> {
    let name = name.trim().to_uppercase();
    let expression = expression.trim();

    if name.is_empty() {
        return Err(VarlineError::VariableNameRequired);
    }
    if !is_valid_name(&name) {
        return Err(VarlineError::InvalidVariableName(name));
    }
    if expression.is_empty() {
        return Err(VarlineError::VariableExpressionRequired);
    }
    let allowed = match kind {
        VariableKind::Constant => constant_chars_re(),
        VariableKind::Dynamic => dynamic_chars_re(),
    };
    if !allowed.is_match(expression) {
        return Err(VarlineError::InvalidExpressionCharacters);
    }

    Ok((name, expression.to_string()))
}

/// Normalize and validate a formula record.
pub(crate) fn validate_formula(name: &str, expression: &str) -> Result<(String, String)> {
    let name = name.trim().to_uppercase();
    let expression = expression.trim();

    if name.is_empty() {
        return Err(VarlineError::FormulaNameRequired);
    }
    if !is_valid_name(&name) {
        return Err(VarlineError::InvalidFormulaName(name));
    }
    if expression.is_empty() {
        return Err(VarlineError::FormulaExpressionRequired);
    }
    if !formula_chars_re().is_match(expression) {
        return Err(VarlineError::InvalidExpressionCharacters);
    }

    Ok((name, expression.to_string()))
}

impl Book {
    /// Add a new variable. The name is upper-cased and must be unique.
    pub fn add_variable(&mut self, name: &str, kind: VariableKind, expression: &str) -> Result<()> {
        let (name, expression) = validate_variable(name, kind, expression)?;
        if self.variable(&name).is_some() {
            return Err(VarlineError::DuplicateVariable(name));
        }
        debug!("adding {} variable {}", kind.label(), name);
        self.variables.push(Variable::new(&name, kind, &expression));
        Ok(())
    }

    /// Replace the variable currently named `current`, possibly renaming it.
    /// The variable keeps its position.
    pub fn update_variable(
        &mut self,
        current: &str,
        name: &str,
        kind: VariableKind,
        expression: &str,
    ) -> Result<()> {
        let (name, expression) = validate_variable(name, kind, expression)?;
        let Some(index) = self.variables.iter().position(|v| v.name == current) else {
            return Err(VarlineError::VariableNotFound(current.to_string()));
        };
        if self
            .variables
            .iter()
            .enumerate()
            .any(|(i, v)| i != index && v.name == name)
        {
            return Err(VarlineError::DuplicateVariable(name));
        }
        debug!("updating variable {} -> {}", current, name);
        self.variables[index] = Variable::new(&name, kind, &expression);
        Ok(())
    }

    /// Remove a variable. Variables and formulas that reference it will fail
    /// on their next resolution or execution.
    pub fn remove_variable(&mut self, name: &str) -> Result<Variable> {
        let index = self
            .variables
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| VarlineError::VariableNotFound(name.to_string()))?;
        debug!("removing variable {}", name);
        Ok(self.variables.remove(index))
    }

    /// Add a new formula. The name is upper-cased and must be unique among
    /// formulas.
    pub fn add_formula(&mut self, name: &str, expression: &str) -> Result<()> {
        let (name, expression) = validate_formula(name, expression)?;
        if self.formula(&name).is_some() {
            return Err(VarlineError::DuplicateFormula(name));
        }
        debug!("adding formula {}", name);
        self.formulas.push(Formula::new(&name, &expression));
        Ok(())
    }

    pub fn remove_formula(&mut self, name: &str) -> Result<Formula> {
        let index = self
            .formulas
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| VarlineError::FormulaNotFound(name.to_string()))?;
        debug!("removing formula {}", name);
        Ok(self.formulas.remove(index))
    }
}

fn constant_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9.\s]+$").expect("constant charset regex must compile"))
}

fn dynamic_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9A-Z_+\-*/().\s]+$").expect("dynamic charset regex must compile")
    })
}

fn formula_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9A-Za-z_+\-*/(){}#\s.]+$").expect("formula charset regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_variable_normalizes_name_and_expression() {
        let mut book = Book::new();
        book.add_variable("  basic ", VariableKind::Constant, " 10000 ").unwrap();
        assert_eq!(
            book.variables(),
            &[Variable::constant("BASIC", "10000")]
        );
    }

    #[test]
    fn test_variable_validation_messages() {
        let mut book = Book::new();
        let cases = [
            ("", VariableKind::Constant, "1", "Variable name is required."),
            (
                "1ST",
                VariableKind::Constant,
                "1",
                "Name must start with a letter and contain only A–Z, 0–9, and underscore.",
            ),
            ("A", VariableKind::Constant, "   ", "Expression / value is required."),
            ("A", VariableKind::Constant, "-5", "Expression contains invalid characters."),
            ("A", VariableKind::Dynamic, "b + 1", "Expression contains invalid characters."),
            ("A", VariableKind::Dynamic, "B ^ 2", "Expression contains invalid characters."),
        ];
        for (name, kind, expr, message) in cases {
            let err = book.add_variable(name, kind, expr).unwrap_err();
            assert_eq!(err.to_string(), message, "input {:?} {:?}", name, expr);
        }
        assert!(book.variables().is_empty());
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let mut book = Book::new();
        book.add_variable("A", VariableKind::Constant, "1").unwrap();
        let err = book.add_variable("a", VariableKind::Constant, "2").unwrap_err();
        assert_eq!(err.to_string(), "Variable name already exists.");
    }

    #[test]
    fn test_update_variable_in_place() {
        let mut book = Book::new();
        book.add_variable("A", VariableKind::Constant, "1").unwrap();
        book.add_variable("B", VariableKind::Constant, "2").unwrap();

        // Keeping its own name is not a duplicate.
        book.update_variable("A", "A", VariableKind::Dynamic, "B * 3").unwrap();
        assert_eq!(book.variables()[0], Variable::dynamic("A", "B * 3"));

        book.update_variable("A", "C", VariableKind::Constant, "9").unwrap();
        assert_eq!(book.variables()[0].name, "C");

        assert!(matches!(
            book.update_variable("C", "B", VariableKind::Constant, "1"),
            Err(VarlineError::DuplicateVariable(_))
        ));
        assert!(matches!(
            book.update_variable("Z", "Z", VariableKind::Constant, "1"),
            Err(VarlineError::VariableNotFound(_))
        ));
    }

    #[test]
    fn test_remove_variable() {
        let mut book = Book::payroll_sample();
        let removed = book.remove_variable("TAX").unwrap();
        assert_eq!(removed.name, "TAX");
        assert!(book.variable("TAX").is_none());
        assert!(book.remove_variable("TAX").is_err());
    }

    #[test]
    fn test_formula_validation() {
        let mut book = Book::new();
        book.add_formula("net", "GROSS - {{#days}} * rate").unwrap();
        assert_eq!(book.formula("NET").unwrap().expression, "GROSS - {{#days}} * rate");

        let cases = [
            ("", "1", "Formula name is required."),
            (
                "A-B",
                "1",
                "Formula name must start with a letter and contain only A–Z, 0–9, and underscore.",
            ),
            ("X", " ", "Expression is required."),
            ("X", "A % 2", "Expression contains invalid characters."),
            ("NET", "1", "Formula name already exists."),
        ];
        for (name, expr, message) in cases {
            let err = book.add_formula(name, expr).unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_formulas_sorted_by_name() {
        let book = Book::payroll_sample();
        let names: Vec<&str> = book.formulas().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["BONUS", "MONTHLY_SALARY", "NET_SALARY"]);
    }

    #[test]
    fn test_remove_formula() {
        let mut book = Book::payroll_sample();
        book.remove_formula("BONUS").unwrap();
        assert!(book.formula("BONUS").is_none());
        assert!(matches!(
            book.remove_formula("BONUS"),
            Err(VarlineError::FormulaNotFound(_))
        ));
    }
}
