//! # Query Grammar - Syntax Values
//!
//! Transient values produced while scanning `where` and `orderBy` text. They
//! live for one compilation call and are discarded once the predicate or
//! comparator is built.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Boolean connectives and the connective window read before each term
//! - **[operators]** - Comparison operators and relation quantifiers
//! - **[clause]** - `field operator operand` units and parenthesized groups
//! - **[order]** - Ordering keys and directions
//!
//! ## Filter Grammar
//!
//! ```text
//! Query      := Term (Connective Term)*
//! Connective := "and" | "or" | "not"
//! Term       := "(" Query ")" | Clause
//! Clause     := Field Operator Operand
//! Operand    := QuotedString | "[" Literal ("," Literal)* "]" | "(" Query ")" | Token
//! ```
//!
//! Terms fold strictly left to right: `A or B and C` means `(A or B) and C`.
//!
//! ## Examples
//!
//! ```text
//! Name startsWith 'Al' and Age greaterThan 20
//! Age in [18, 21, null] or not (Name equals 'Bob')
//! Tags any (Label equals 'x')
//! ```
//!
//! ## Ordering Grammar
//!
//! ```text
//! OrderSpec := Key ("thenBy" Key)*
//! Key       := Field ["asc" | "desc"]
//! ```
pub mod clause;
pub mod operators;
pub mod order;
pub mod tokens;

pub use clause::{Clause, Operand, Segment, Term};
pub use operators::{Operator, Quantifier};
pub use order::{Dir, OrderKey, OrderSpec};
pub use tokens::{Connective, ConnectiveWindow};
