//! Calculation engine API.
//!
//! This module provides the computation core behind variables and formulas:
//!
//! - [`Variable`], [`VariableKind`], [`Formula`] - Record types supplied by the caller
//! - [`evaluate`] - Arithmetic evaluation (`+ - * /`, parentheses, precedence)
//! - [`lex_template`] - Classify expression text into text, names and placeholders
//! - [`extract_dependencies`] - Variable names an expression references
//! - [`resolve`] - Dependency-aware resolution with cycle detection
//! - [`execute`] - Formula execution with contextual placeholders
//! - [`format_number`] - Format values for display

mod deps;
mod error;
mod eval;
mod execute;
mod format;
mod resolve;
mod template;
mod variable;

pub use deps::{extract_context_names, extract_dependencies, is_valid_name};
pub use error::{EvalError, ReferenceSite, Result};
pub use eval::{Piece, evaluate, evaluate_pieces};
pub use execute::{ContextBindings, execute};
pub use format::format_number;
pub use resolve::resolve;
pub use template::{TemplateToken, lex_template};
pub use variable::{Formula, ResolutionResult, Variable, VariableKind};
