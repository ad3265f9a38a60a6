//! Request-level facade: `where` → `orderBy` → `skip` → `take`.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use expressive_query::{Querier, QueryParameters, Registry};
//!
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! let querier = Querier::new(
//!     Registry::<Person>::new()
//!         .string("Name", |p| &p.name)
//!         .int("Age", |p| p.age),
//! );
//!
//! let people = vec![
//!     Person { name: "Alma".into(), age: 41 },
//!     Person { name: "Bo".into(), age: 19 },
//!     Person { name: "Alan".into(), age: 33 },
//! ];
//!
//! let params = QueryParameters::from_map(&HashMap::from([
//!     ("where".to_string(), "Name startsWith 'Al'".to_string()),
//!     ("orderBy".to_string(), "Age".to_string()),
//! ]))
//! .unwrap();
//!
//! let names: Vec<_> = querier
//!     .apply_all(&people, &params)
//!     .unwrap()
//!     .into_iter()
//!     .map(|p| p.name.as_str())
//!     .collect();
//! assert_eq!(names, vec!["Alan", "Alma"]);
//! ```

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use tracing::debug;

use crate::compiler::{self, Nesting, DEFAULT_MAX_NESTING};
use crate::error::{QueryError, Result};
use crate::ordering;
use crate::pagination::{self, Page, DEFAULT_TAKE};
use crate::predicate::{Comparator, Predicate};
use crate::registry::Registry;

/// Tunables of a [`Querier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerierConfig {
    /// Page size applied when a request has no `take`.
    pub default_take: usize,
    /// Bound on parenthesis and relation nesting in `where` text.
    pub max_nesting: usize,
}

impl Default for QuerierConfig {
    fn default() -> Self {
        QuerierConfig {
            default_take: DEFAULT_TAKE,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

/// Parsed request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    pub filter: Option<String>,
    pub order_by: Option<String>,
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

impl QueryParameters {
    pub const WHERE: &'static str = "where";
    pub const ORDER_BY: &'static str = "orderBy";
    pub const SKIP: &'static str = "skip";
    pub const TAKE: &'static str = "take";

    /// Reads `where`, `orderBy`, `skip` and `take` from a request's
    /// parameter map. Other keys are ignored.
    pub fn from_map<S: BuildHasher>(map: &HashMap<String, String, S>) -> Result<Self> {
        Ok(QueryParameters {
            filter: map.get(Self::WHERE).cloned(),
            order_by: map.get(Self::ORDER_BY).cloned(),
            skip: map
                .get(Self::SKIP)
                .map(|raw| parse_count(Self::SKIP, raw))
                .transpose()?,
            take: map
                .get(Self::TAKE)
                .map(|raw| parse_count(Self::TAKE, raw))
                .transpose()?,
        })
    }

    pub fn page(&self) -> Page {
        Page::new(self.skip, self.take)
    }
}

/// Parses a `skip`/`take` value as a non-negative integer.
pub fn parse_count(key: &str, raw: &str) -> Result<usize> {
    raw.parse::<usize>().map_err(|_| QueryError::InvalidParameter {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Absent and empty parameters are both no-ops.
fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.is_empty())
}

/// Applies request parameters to in-memory records using a shared registry.
pub struct Querier<T> {
    registry: Arc<Registry<T>>,
    config: QuerierConfig,
}

impl<T> Clone for Querier<T> {
    fn clone(&self) -> Self {
        Querier {
            registry: Arc::clone(&self.registry),
            config: self.config,
        }
    }
}

impl<T: 'static> Querier<T> {
    pub fn new(registry: Registry<T>) -> Self {
        Querier::with_config(Arc::new(registry), QuerierConfig::default())
    }

    pub fn with_config(registry: Arc<Registry<T>>, config: QuerierConfig) -> Self {
        Querier { registry, config }
    }

    pub fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    pub fn config(&self) -> QuerierConfig {
        self.config
    }

    pub fn compile_filter(&self, text: &str) -> Result<Predicate<T>> {
        compiler::compile_filter_with(&self.registry, text, Nesting::new(self.config.max_nesting))
    }

    pub fn compile_order(&self, text: &str) -> Result<Comparator<T>> {
        ordering::compile_order(&self.registry, text)
    }

    /// Compiles `where` and `orderBy` text without applying it. Absent or
    /// empty text is accepted, as in [`apply_all`](Self::apply_all).
    pub fn validate(&self, filter: Option<&str>, order_by: Option<&str>) -> Result<()> {
        if let Some(text) = non_empty(filter) {
            self.compile_filter(text)?;
        }
        if let Some(text) = non_empty(order_by) {
            self.compile_order(text)?;
        }
        Ok(())
    }

    /// Keeps matching records. Absent or empty `where` keeps everything.
    pub fn apply_where<'r>(&self, records: Vec<&'r T>, filter: Option<&str>) -> Result<Vec<&'r T>> {
        let Some(text) = non_empty(filter) else {
            return Ok(records);
        };
        let predicate = self.compile_filter(text)?;
        let kept = predicate.filter(records);
        debug!(kept = kept.len(), "applied where");
        Ok(kept)
    }

    /// Stable sort. Absent or empty `orderBy` keeps the input order.
    pub fn apply_order_by<'r>(&self, mut records: Vec<&'r T>, order_by: Option<&str>) -> Result<Vec<&'r T>> {
        let Some(text) = non_empty(order_by) else {
            return Ok(records);
        };
        self.compile_order(text)?.sort_refs(&mut records);
        Ok(records)
    }

    pub fn apply_skip<'r>(&self, records: Vec<&'r T>, skip: Option<usize>) -> Vec<&'r T> {
        pagination::apply_skip(records, skip).collect()
    }

    /// Takes at most `take` records, or the configured default when absent.
    pub fn apply_take<'r>(&self, records: Vec<&'r T>, take: Option<usize>) -> Vec<&'r T> {
        pagination::apply_take(records, take, self.config.default_take).collect()
    }

    /// Runs where → orderBy → skip → take over `records`.
    pub fn apply_all<'r>(&self, records: &'r [T], params: &QueryParameters) -> Result<Vec<&'r T>> {
        let records = records.iter().collect();
        let records = self.apply_where(records, params.filter.as_deref())?;
        let records = self.apply_order_by(records, params.order_by.as_deref())?;
        let records = self.apply_skip(records, params.skip);
        Ok(self.apply_take(records, params.take))
    }

    /// [`apply_all`](Self::apply_all) with parameters read from a request map.
    pub fn apply_map<'r, S: BuildHasher>(
        &self,
        records: &'r [T],
        map: &HashMap<String, String, S>,
    ) -> Result<Vec<&'r T>> {
        let params = QueryParameters::from_map(map)?;
        self.apply_all(records, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_from_map() {
        let map = HashMap::from([
            ("where".to_string(), "Age equals 3".to_string()),
            ("skip".to_string(), "2".to_string()),
            ("page".to_string(), "ignored".to_string()),
        ]);
        let params = QueryParameters::from_map(&map).unwrap();
        assert_eq!(params.filter.as_deref(), Some("Age equals 3"));
        assert_eq!(params.order_by, None);
        assert_eq!(params.skip, Some(2));
        assert_eq!(params.take, None);
    }

    #[test]
    fn malformed_counts_name_key_and_value() {
        let map = HashMap::from([("take".to_string(), "-1".to_string())]);
        assert_eq!(
            QueryParameters::from_map(&map),
            Err(QueryError::InvalidParameter {
                key: "take".to_string(),
                value: "-1".to_string(),
            })
        );

        let map = HashMap::from([("skip".to_string(), "two".to_string())]);
        assert!(matches!(
            QueryParameters::from_map(&map),
            Err(QueryError::InvalidParameter { key, .. }) if key == "skip"
        ));
    }

    #[test]
    fn validate_skips_empty_text_and_honours_nesting() {
        let querier = Querier::with_config(
            Arc::new(Registry::<i64>::new().int("N", |n| *n)),
            QuerierConfig {
                max_nesting: 1,
                ..QuerierConfig::default()
            },
        );
        assert_eq!(querier.validate(Some(""), Some("")), Ok(()));
        assert_eq!(querier.validate(None, Some("N desc")), Ok(()));
        assert_eq!(
            querier.validate(Some("((N equals 1))"), None),
            Err(QueryError::NestingTooDeep { limit: 1 })
        );
    }

    #[test]
    fn default_config() {
        let config = QuerierConfig::default();
        assert_eq!(config.default_take, 30);
        assert_eq!(config.max_nesting, DEFAULT_MAX_NESTING);
    }
}
