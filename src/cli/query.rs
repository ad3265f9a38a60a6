//! Run a query over a JSON array of records

use std::sync::Arc;

use serde_json::Value;

use crate::json::Schema;
use crate::{Querier, QuerierConfig, QueryParameters};

use super::CliError;

/// Options for the query command
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Schema document (JSON)
    pub schema: String,
    /// JSON array of records
    pub input: Option<String>,
    /// `where`, `orderBy`, `skip`, `take`
    pub params: QueryParameters,
    pub config: QuerierConfig,
}

/// Execute a query, returning the selected records as a JSON array
pub fn execute_query(options: &QueryOptions) -> Result<Value, CliError> {
    let schema = Schema::from_json(&options.schema)?;
    let querier = Querier::with_config(Arc::new(schema.registry()), options.config);

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let records = match serde_json::from_str::<Value>(json_str)? {
        Value::Array(records) => records,
        _ => return Err(CliError::NotAnArray),
    };

    let selected = querier.apply_all(&records, &options.params)?;
    Ok(Value::Array(selected.into_iter().cloned().collect()))
}
