//! Formula execution.
//!
//! A formula is executed against a [`ResolutionResult`] and a set of
//! contextual bindings supplied at execution time:
//!
//! 1. Every `{{#name}}` placeholder must have a non-blank, numeric binding
//! 2. Every variable name must have resolved cleanly
//! 3. The substituted expression is evaluated
//!
//! Placeholders are checked before variables. Any failure aborts the whole
//! execution; there is no partial result.

use log::debug;
use std::collections::HashMap;

use super::error::{EvalError, ReferenceSite, Result};
use super::eval::{Piece, evaluate_pieces};
use super::template::{TemplateToken, lex_template};
use super::variable::ResolutionResult;

/// Placeholder name -> user-supplied text, built per execution attempt.
pub type ContextBindings = HashMap<String, String>;

/// Execute a formula expression.
pub fn execute(
    expression: &str,
    context: &ContextBindings,
    resolved: &ResolutionResult,
) -> Result<f64> {
    let tokens = lex_template(expression);

    let mut bindings: HashMap<&str, &str> = HashMap::new();
    for token in &tokens {
        if let TemplateToken::Placeholder(name) = *token {
            let value = context_value(context, name)?;
            bindings.insert(name, value);
        }
    }

    let mut pieces = Vec::with_capacity(tokens.len());
    for token in &tokens {
        match *token {
            TemplateToken::Text(text) => pieces.push(Piece::Text(text)),
            TemplateToken::Placeholder(name) => {
                let value = bindings
                    .get(name)
                    .copied()
                    .ok_or_else(|| EvalError::MissingContextValue(name.to_string()))?;
                pieces.push(Piece::Text(value));
            }
            TemplateToken::Identifier(name) => {
                pieces.push(Piece::Number(variable_value(resolved, name)?));
            }
        }
    }

    let result = evaluate_pieces(&pieces);
    debug!("executed {:?}: {:?}", expression, result);
    result
}

fn context_value<'c>(context: &'c ContextBindings, name: &str) -> Result<&'c str> {
    let value = context.get(name).map(|v| v.trim()).unwrap_or_default();
    if value.is_empty() {
        return Err(EvalError::MissingContextValue(name.to_string()));
    }
    if !value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(EvalError::InvalidContextValue(name.to_string()));
    }
    Ok(value)
}

fn variable_value(resolved: &ResolutionResult, name: &str) -> Result<f64> {
    if let Some(message) = resolved.error(name) {
        return Err(EvalError::VariableHasError {
            name: name.to_string(),
            message: message.to_string(),
        });
    }
    resolved
        .value(name)
        .ok_or_else(|| EvalError::UnknownVariable {
            name: name.to_string(),
            site: ReferenceSite::Formula,
        })
}
