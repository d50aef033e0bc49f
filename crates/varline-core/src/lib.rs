//! varline-core - UI-agnostic variable book + definitions loading.

pub mod book;
pub mod error;
pub mod storage;

pub use book::Book;
pub use error::{Result, VarlineError};

pub use varline_engine::engine::{
    ContextBindings, Formula, ResolutionResult, Variable, VariableKind,
};
