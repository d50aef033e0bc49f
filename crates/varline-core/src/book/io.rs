use super::Book;
use crate::error::Result;
use crate::storage::parse_definitions;
use log::debug;
use std::path::Path;

impl Book {
    /// Load a book from a definitions file (`.vars` line format or `.toml`).
    pub fn load_file(path: &Path) -> Result<Self> {
        let mut book = parse_definitions(path)?;
        book.source_path = Some(path.to_path_buf());
        debug!(
            "loaded {} variable(s) and {} formula(s) from {}",
            book.variables.len(),
            book.formulas.len(),
            path.display()
        );
        Ok(book)
    }
}
