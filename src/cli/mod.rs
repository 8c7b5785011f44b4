//! CLI support for predicate-sql
//!
//! Provides programmatic access to the `predsql` commands for embedding in
//! other tools.

mod compile;
mod convert;

pub use compile::{CompileOptions, CompileOutcome, CompileRequest, execute_compile};
pub use convert::{json_to_value, value_to_json};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Compile(#[from] crate::CompileError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A captured variable has a value with no SQL binding
    #[error("Unsupported value for variable '{0}'")]
    UnsupportedValue(String),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Compile(e.into())
    }
}
