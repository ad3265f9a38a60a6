//! Compile `where`/`orderBy` text against a schema without running it

use std::sync::Arc;

use crate::json::Schema;
use crate::registry::FieldType;
use crate::{Querier, QuerierConfig};

use super::CliError;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Schema document (JSON)
    pub schema: String,
    /// `where` text to compile
    pub filter: Option<String>,
    /// `orderBy` text to compile
    pub order_by: Option<String>,
    pub config: QuerierConfig,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// Everything given compiled; lists the schema's top-level fields
    Valid { fields: Vec<(String, FieldType)> },
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let schema = Schema::from_json(&options.schema)?;
    let querier = Querier::with_config(Arc::new(schema.registry()), options.config);

    querier.validate(options.filter.as_deref(), options.order_by.as_deref())?;

    Ok(CheckResult::Valid {
        fields: querier.registry().fields(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryError;

    const SCHEMA: &str = r#"{"Name": "string", "Tags": {"Label": "string"}}"#;

    #[test]
    fn valid_query() {
        let options = CheckOptions {
            schema: SCHEMA.to_string(),
            filter: Some("Tags any (Label equals 'x')".to_string()),
            order_by: Some("Name desc".to_string()),
            ..CheckOptions::default()
        };
        assert!(matches!(
            execute_check(&options),
            Ok(CheckResult::Valid { fields }) if fields.len() == 2
        ));
    }

    #[test]
    fn empty_order_by_is_accepted() {
        let options = CheckOptions {
            schema: SCHEMA.to_string(),
            filter: Some(String::new()),
            order_by: Some(String::new()),
            ..CheckOptions::default()
        };
        assert!(execute_check(&options).is_ok());
    }

    #[test]
    fn nesting_limit_from_config() {
        let options = CheckOptions {
            schema: SCHEMA.to_string(),
            filter: Some("(Tags any (Label equals 'x'))".to_string()),
            config: QuerierConfig {
                max_nesting: 1,
                ..QuerierConfig::default()
            },
            ..CheckOptions::default()
        };
        assert!(matches!(
            execute_check(&options),
            Err(CliError::Query(QueryError::NestingTooDeep { limit: 1 }))
        ));

        let options = CheckOptions {
            config: QuerierConfig::default(),
            ..options
        };
        assert!(execute_check(&options).is_ok());
    }

    #[test]
    fn relation_is_not_orderable() {
        let options = CheckOptions {
            schema: SCHEMA.to_string(),
            order_by: Some("Tags".to_string()),
            ..CheckOptions::default()
        };
        assert!(matches!(
            execute_check(&options),
            Err(CliError::Query(QueryError::NotOrderable(field))) if field == "Tags"
        ));
    }
}
