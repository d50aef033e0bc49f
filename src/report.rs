//! Plain-text rendering of a book and its resolved values.

use std::fmt::Write;
use varline_core::Book;
use varline_engine::engine::{ResolutionResult, extract_context_names, format_number};

/// Render every variable (with its value or error) followed by the formulas.
pub fn render_book(book: &Book, resolved: &ResolutionResult) -> String {
    let mut out = String::new();
    let width = book
        .variables()
        .iter()
        .map(|v| v.name.len())
        .chain(book.formulas().iter().map(|f| f.name.len()))
        .max()
        .unwrap_or(0);

    if let Some(path) = &book.source_path {
        let _ = writeln!(out, "Definitions: {}\n", path.display());
    }

    out.push_str("Variables\n");
    let mut variables: Vec<_> = book.variables().iter().collect();
    variables.sort_by(|a, b| a.name.cmp(&b.name));
    for variable in variables {
        let outcome = match (resolved.value(&variable.name), resolved.error(&variable.name)) {
            (_, Some(err)) => format!("#ERR {}", err),
            (Some(value), None) => format_number(value),
            (None, None) => String::new(),
        };
        let _ = writeln!(
            out,
            "  {:<width$}  {:<8}  {:<24}  {}",
            variable.name,
            variable.kind.label(),
            variable.expression,
            outcome,
            width = width
        );
    }

    let formulas = book.formulas();
    if !formulas.is_empty() {
        out.push_str("Formulas\n");
        for formula in formulas {
            let context = extract_context_names(&formula.expression);
            let _ = write!(
                out,
                "  {:<width$}  {}",
                formula.name,
                formula.expression,
                width = width
            );
            if !context.is_empty() {
                let _ = write!(out, "  [context: {}]", context.join(", "));
            }
            out.push('\n');
        }
    }

    out
}
