//! CLI support for expressive-query
//!
//! Provides programmatic access to the `exq` commands so they can be embedded
//! in other tools.

mod check;
mod docs;
mod query;

pub use check::{execute_check, CheckOptions, CheckResult};
pub use docs::{get_doc_category, get_docs_overview, DocCategory};
pub use query::{execute_query, QueryOptions};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Invalid `where`/`orderBy`/`skip`/`take`
    Query(crate::QueryError),
    /// Malformed schema or record JSON
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No records provided
    NoInput,
    /// Records were not a JSON array
    NotAnArray,
    /// Unknown documentation category
    UnknownCategory(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Query(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::NotAnArray => write!(f, "Input must be a JSON array of records."),
            CliError::UnknownCategory(c) => {
                write!(f, "Unknown category: '{}'\nRun 'exq docs' to see available categories.", c)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Query(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::QueryError> for CliError {
    fn from(e: crate::QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
