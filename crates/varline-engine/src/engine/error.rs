//! Error types for expression evaluation, resolution and formula execution.

use std::fmt;
use thiserror::Error;

/// Where an unknown variable name was referenced from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceSite {
    /// The expression of another variable.
    Variable(String),
    /// A formula expression.
    Formula,
}

impl fmt::Display for ReferenceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSite::Variable(name) => write!(f, "expression of \"{}\"", name),
            ReferenceSite::Formula => write!(f, "formula"),
        }
    }
}

/// Errors produced while evaluating an expression, resolving a variable or
/// executing a formula.
///
/// The messages are shown verbatim to the user next to the offending
/// variable or formula.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    #[error("Expression contains invalid characters.")]
    InvalidCharacter(char),

    #[error("Mismatched parentheses.")]
    MismatchedParentheses,

    #[error("Invalid expression.")]
    InvalidExpression,

    #[error("Invalid number \"{0}\".")]
    InvalidNumber(String),

    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Invalid constant value for \"{0}\". Expected numeric.")]
    InvalidConstant(String),

    #[error("Unknown variable \"{name}\" in {site}.")]
    UnknownVariable { name: String, site: ReferenceSite },

    #[error("Circular dependency detected at \"{0}\".")]
    CircularDependency(String),

    #[error("Context value for \"{0}\" is required.")]
    MissingContextValue(String),

    #[error("Context value for \"{0}\" must be numeric.")]
    InvalidContextValue(String),

    #[error("Variable \"{name}\" has error: {message}")]
    VariableHasError { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, EvalError>;
