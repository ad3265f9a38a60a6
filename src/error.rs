//! Error types for query compilation.
//!
//! Every failure is an "invalid query argument": the whole filter or ordering
//! is rejected and nothing is partially compiled.

use thiserror::Error;

use crate::registry::FieldType;

/// Errors raised while scanning or compiling `where`/`orderBy` text, or while
/// reading request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A `(` that never closes, or a `)` that was never opened.
    #[error("invalid query argument: unbalanced parenthesis: {0}")]
    UnbalancedParenthesis(String),

    /// A quoted literal has no closing quote.
    #[error("invalid query argument: unclosed quote: {0}")]
    UnclosedQuote(String),

    /// `in` was not followed by `[`.
    #[error("invalid query argument: expected array value starting here: {0}")]
    ExpectedArray(String),

    /// An array operand has no closing `]`.
    #[error("invalid query argument: this array did not close: {0}")]
    UnclosedArray(String),

    /// `any`/`all` was not followed by a parenthesized query.
    #[error("invalid query argument: expected parenthesis here: {0}")]
    ExpectedChildQuery(String),

    /// A field name with nothing after it.
    #[error("invalid query argument: expected operator after '{0}'")]
    MissingOperator(String),

    /// A field and operator with no operand.
    #[error("invalid query argument: expected value after '{field} {operator}'")]
    MissingOperand { field: String, operator: String },

    /// Connectives at the end of the query with no term following them.
    #[error("invalid query argument: expected expression after '{0}'")]
    ExpectedClause(String),

    /// Two terms joined by something other than `and`/`or`.
    #[error("invalid query argument: expected 'and' or 'or' between expressions, but got '{0}'")]
    InvalidConnective(String),

    /// The field is not registered.
    #[error("invalid query argument: {0} is not filterable")]
    UnknownField(String),

    /// The operator is not defined for the field's type.
    #[error("invalid query argument: operation {operator} is not supported for {field} ({field_type})")]
    UnsupportedOperator {
        field: String,
        operator: String,
        field_type: FieldType,
    },

    /// The literal could not be parsed as the field's type.
    #[error("invalid query argument: could not parse '{literal}' as {expected} for {field}")]
    InvalidLiteral {
        field: String,
        literal: String,
        expected: &'static str,
    },

    /// The field cannot be used as an ordering key.
    #[error("invalid query argument: property {0} is not valid for orderBy")]
    NotOrderable(String),

    /// An ordering key with no field, or too many tokens.
    #[error("invalid query argument: orderBy {0}")]
    InvalidOrderKey(String),

    /// An ordering direction other than `asc`/`desc`.
    #[error("invalid query argument: orderBy expected asc, desc, or thenBy at {0}")]
    InvalidDirection(String),

    /// `skip`/`take` is not a non-negative integer.
    #[error("invalid query argument: argument for {key} could not be parsed to a non-negative integer. Value: {value}")]
    InvalidParameter { key: String, value: String },

    /// Parenthesis or relation nesting is deeper than the configured limit.
    #[error("invalid query argument: query nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
}

/// Result type for query compilation.
pub type Result<T> = std::result::Result<T, QueryError>;
