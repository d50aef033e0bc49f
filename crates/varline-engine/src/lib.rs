//! varline_engine - Arithmetic evaluation and variable resolution.

pub mod engine;
