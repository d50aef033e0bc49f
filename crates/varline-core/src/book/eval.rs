use super::Book;
use crate::error::{Result, VarlineError};
use log::debug;
use varline_engine::engine::{
    ContextBindings, ResolutionResult, execute, extract_context_names, resolve,
};

impl Book {
    /// Resolve every variable. Recomputed from scratch on each call.
    pub fn resolve(&self) -> ResolutionResult {
        resolve(&self.variables)
    }

    /// Whether any variable currently fails to resolve.
    pub fn has_variable_errors(&self) -> bool {
        self.resolve().has_errors()
    }

    /// Contextual placeholder names a formula needs at execution time, in
    /// order of first appearance.
    pub fn context_names(&self, formula_name: &str) -> Result<Vec<String>> {
        let formula = self
            .formula(formula_name)
            .ok_or_else(|| VarlineError::FormulaNotFound(formula_name.to_string()))?;
        Ok(extract_context_names(&formula.expression))
    }

    /// Execute a formula against freshly resolved variables.
    pub fn execute_formula(&self, formula_name: &str, context: &ContextBindings) -> Result<f64> {
        let formula = self
            .formula(formula_name)
            .ok_or_else(|| VarlineError::FormulaNotFound(formula_name.to_string()))?;
        let resolved = self.resolve();
        debug!("executing formula {}", formula.name);
        Ok(execute(&formula.expression, context, &resolved)?)
    }
}
