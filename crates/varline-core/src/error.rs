//! Error types for Varline core.

use thiserror::Error;

use varline_engine::engine::EvalError;

/// Errors that can occur while editing a book or loading definitions.
///
/// Validation messages are meant to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum VarlineError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("Variable name is required.")]
    VariableNameRequired,

    #[error("Name must start with a letter and contain only A–Z, 0–9, and underscore.")]
    InvalidVariableName(String),

    #[error("Expression / value is required.")]
    VariableExpressionRequired,

    #[error("Variable name already exists.")]
    DuplicateVariable(String),

    #[error("Variable \"{0}\" does not exist.")]
    VariableNotFound(String),

    #[error("Formula name is required.")]
    FormulaNameRequired,

    #[error("Formula name must start with a letter and contain only A–Z, 0–9, and underscore.")]
    InvalidFormulaName(String),

    #[error("Expression is required.")]
    FormulaExpressionRequired,

    #[error("Formula name already exists.")]
    DuplicateFormula(String),

    #[error("Formula \"{0}\" does not exist.")]
    FormulaNotFound(String),

    #[error("Expression contains invalid characters.")]
    InvalidExpressionCharacters,

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, VarlineError>;
