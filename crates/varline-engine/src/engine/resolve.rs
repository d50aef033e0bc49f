//! Dependency-aware variable resolution.
//!
//! Each variable is resolved depth-first on demand. A Dynamic variable first
//! resolves every name its expression references, then the substituted
//! expression is handed to the evaluator.
//!
//! The walk keeps its own stack of partially substituted expressions rather
//! than recursing, so chain depth is bounded by memory, not the thread stack.
//! A per-call "resolving" set detects circular dependencies (e.g. `A = B + 1`,
//! `B = A + 1`) and outcomes are memoized so shared dependencies are computed
//! once. Both live only for the duration of one [`resolve`] call.

use log::{debug, trace};
use std::collections::{HashMap, HashSet};

use super::error::{EvalError, ReferenceSite, Result};
use super::eval::{Piece, evaluate_pieces};
use super::template::{TemplateToken, lex_template};
use super::variable::{ResolutionResult, Variable, VariableKind};

/// Resolve every variable in `variables`.
///
/// Failures are contained per variable: a name that cannot be resolved gets
/// an entry in `errors` and resolution carries on with the rest. When a name
/// is defined more than once the last definition wins.
pub fn resolve(variables: &[Variable]) -> ResolutionResult {
    let definitions: HashMap<&str, &Variable> = variables
        .iter()
        .map(|variable| (variable.name.as_str(), variable))
        .collect();

    let mut resolver = Resolver {
        definitions,
        values: HashMap::new(),
        failures: HashMap::new(),
        resolving: HashSet::new(),
    };
    let mut result = ResolutionResult::default();

    for variable in variables {
        let name = variable.name.as_str();
        if result.values.contains_key(name) || result.errors.contains_key(name) {
            continue;
        }
        let Some(definition) = resolver.definitions.get(name).copied() else {
            continue;
        };
        match resolver.resolve(definition) {
            Ok(value) => {
                result.values.insert(name.to_string(), value);
            }
            Err(err) => {
                debug!("variable {} failed to resolve: {}", name, err);
                result.errors.insert(name.to_string(), err.to_string());
            }
        }
    }

    debug!(
        "resolved {} variable(s), {} error(s)",
        result.values.len(),
        result.errors.len()
    );
    result
}

/// A Dynamic variable whose expression is partway through substitution.
struct Frame<'a> {
    variable: &'a Variable,
    tokens: Vec<TemplateToken<'a>>,
    next: usize,
    pieces: Vec<Piece<'a>>,
}

impl<'a> Frame<'a> {
    fn new(variable: &'a Variable) -> Frame<'a> {
        Frame {
            variable,
            tokens: lex_template(&variable.expression),
            next: 0,
            pieces: Vec::new(),
        }
    }
}

enum Step<'a> {
    Done(Result<f64>),
    Descend(Frame<'a>),
}

struct Resolver<'a> {
    definitions: HashMap<&'a str, &'a Variable>,
    values: HashMap<&'a str, f64>,
    /// Failures that do not depend on the path they were reached by.
    failures: HashMap<&'a str, EvalError>,
    resolving: HashSet<&'a str>,
}

impl<'a> Resolver<'a> {
    fn resolve(&mut self, root: &'a Variable) -> Result<f64> {
        let mut current = match self.enter(root) {
            Step::Done(outcome) => return outcome,
            Step::Descend(frame) => frame,
        };
        let mut parents: Vec<Frame<'a>> = Vec::new();

        loop {
            match self.advance(&mut current) {
                Step::Descend(child) => parents.push(std::mem::replace(&mut current, child)),
                Step::Done(outcome) => {
                    let variable = current.variable;
                    let name = variable.name.as_str();
                    self.resolving.remove(name);
                    let value = match outcome {
                        Ok(value) => value,
                        Err(err) => {
                            // Every open ancestor fails with the same error.
                            self.record_failure(name, &err);
                            for parent in parents.drain(..) {
                                let parent_variable: &'a Variable = parent.variable;
                                let parent_name = parent_variable.name.as_str();
                                self.resolving.remove(parent_name);
                                self.record_failure(parent_name, &err);
                            }
                            return Err(err);
                        }
                    };
                    trace!("{} = {}", name, value);
                    self.values.insert(name, value);

                    let Some(parent) = parents.pop() else {
                        return Ok(value);
                    };
                    current = parent;
                    current.pieces.push(Piece::Number(value));
                }
            }
        }
    }

    /// Start resolving `variable`: settle it from the memo or a constant, or
    /// open a frame for its expression.
    fn enter(&mut self, variable: &'a Variable) -> Step<'a> {
        let name = variable.name.as_str();
        if let Some(value) = self.values.get(name) {
            return Step::Done(Ok(*value));
        }
        if let Some(err) = self.failures.get(name) {
            return Step::Done(Err(err.clone()));
        }
        if self.resolving.contains(name) {
            debug!("circular dependency detected at {}", name);
            return Step::Done(Err(EvalError::CircularDependency(name.to_string())));
        }

        match variable.kind {
            VariableKind::Constant => {
                let outcome = parse_constant(variable);
                match &outcome {
                    Ok(value) => {
                        self.values.insert(name, *value);
                    }
                    Err(err) => self.record_failure(name, err),
                }
                Step::Done(outcome)
            }
            VariableKind::Dynamic => {
                self.resolving.insert(name);
                Step::Descend(Frame::new(variable))
            }
        }
    }

    /// Substitute tokens until the frame is evaluated or a dependency needs
    /// its own frame.
    fn advance(&mut self, frame: &mut Frame<'a>) -> Step<'a> {
        while let Some(&token) = frame.tokens.get(frame.next) {
            frame.next += 1;
            match token {
                TemplateToken::Text(text) => frame.pieces.push(Piece::Text(text)),
                TemplateToken::Identifier(dep) => {
                    let Some(definition) = self.definitions.get(dep).copied() else {
                        return Step::Done(Err(EvalError::UnknownVariable {
                            name: dep.to_string(),
                            site: ReferenceSite::Variable(frame.variable.name.clone()),
                        }));
                    };
                    match self.enter(definition) {
                        Step::Done(Ok(value)) => frame.pieces.push(Piece::Number(value)),
                        other => return other,
                    }
                }
                // Placeholders are formula-only; the evaluator rejects the brace.
                TemplateToken::Placeholder(_) => frame.pieces.push(Piece::Text("{")),
            }
        }
        Step::Done(evaluate_pieces(&frame.pieces))
    }

    /// Remember a failure unless it came from a cycle, whose message names the
    /// entry point and so differs by path.
    fn record_failure(&mut self, name: &'a str, err: &EvalError) {
        if !matches!(err, EvalError::CircularDependency(_)) {
            self.failures.insert(name, err.clone());
        }
    }
}

fn parse_constant(variable: &Variable) -> Result<f64> {
    variable
        .expression
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| EvalError::InvalidConstant(variable.name.clone()))
}
