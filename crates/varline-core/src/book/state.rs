use std::path::PathBuf;
use varline_engine::engine::{Formula, Variable};

/// UI-agnostic collection of variables and formulas.
///
/// The book owns the records; resolution and execution only ever read them.
#[derive(Clone, Debug, Default)]
pub struct Book {
    /// Variables in insertion order
    pub(crate) variables: Vec<Variable>,
    /// Formulas in insertion order
    pub(crate) formulas: Vec<Formula>,
    /// File the definitions were loaded from, if any
    pub source_path: Option<PathBuf>,
}

impl Book {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// A small payroll book: basic pay, allowances and deductions, with
    /// formulas for net salary, pro-rated monthly salary and bonus.
    pub fn payroll_sample() -> Self {
        Book {
            variables: vec![
                Variable::constant("BASIC", "10000"),
                Variable::constant("DA", "2000"),
                Variable::constant("HRA", "3000"),
                Variable::dynamic("GROSS", "BASIC + DA + HRA"),
                Variable::constant("PF", "1200"),
                Variable::constant("TAX", "500"),
                Variable::dynamic("DEDUCTIONS", "PF + TAX"),
            ],
            formulas: vec![
                Formula::new("NET_SALARY", "GROSS - DEDUCTIONS"),
                Formula::new("MONTHLY_SALARY", "(GROSS / 30) * {{#num_of_days}}"),
                Formula::new("BONUS", "GROSS * {{#bonus_percentage}} / 100"),
            ],
            source_path: None,
        }
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Formulas sorted by name for display.
    pub fn formulas(&self) -> Vec<&Formula> {
        let mut sorted: Vec<&Formula> = self.formulas.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn formula(&self, name: &str) -> Option<&Formula> {
        self.formulas.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.formulas.is_empty()
    }
}
