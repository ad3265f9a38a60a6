pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod comparison;
pub mod compiler;
pub mod error;
pub mod json;
pub mod ordering;
pub mod pagination;
pub mod predicate;
pub mod querier;
pub mod registry;
pub mod scanner;
pub mod value;

pub use ast::{Clause, Connective, Dir, Operand, Operator, OrderKey, OrderSpec, Quantifier};
pub use compiler::{compile_filter, compile_filter_with, Nesting, DEFAULT_MAX_NESTING};
pub use error::{QueryError, Result};
pub use json::Schema;
pub use ordering::{compile_order, compile_order_spec, parse_order_spec};
pub use pagination::{Page, DEFAULT_TAKE};
pub use predicate::{Comparator, Predicate};
pub use querier::{Querier, QuerierConfig, QueryParameters};
pub use registry::{Field, FieldType, Registry, Relation};
pub use scanner::{scan, Scanner};
