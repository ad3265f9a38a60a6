//! Predicate compiler for `where` text.
//!
//! Segments from the [`Scanner`] are compiled one at a time and folded
//! strictly left to right. For each segment:
//!
//! 1. the term is compiled (a group recursively, a clause against the registry),
//! 2. it is negated once if the connective window holds a `not`,
//! 3. it becomes the accumulated predicate if it is the first term, otherwise
//!    it is joined to the accumulated predicate with the window's first
//!    connective, which must be `and` or `or`.
//!
//! There is no precedence between `and` and `or`; only parentheses group.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::ast::{Clause, Connective, Operand, Term};
use crate::comparison;
use crate::error::{QueryError, Result};
use crate::predicate::Predicate;
use crate::registry::{Field, FieldType, Registry};
use crate::scanner::Scanner;
use crate::value;

/// Default bound on parenthesis and relation nesting.
pub const DEFAULT_MAX_NESTING: usize = 32;

/// Current nesting depth of a compilation, with its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nesting {
    depth: usize,
    limit: usize,
}

impl Nesting {
    pub fn new(limit: usize) -> Self {
        Nesting { depth: 0, limit }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// One level deeper, or `NestingTooDeep` past the limit.
    pub fn descend(self) -> Result<Nesting> {
        let depth = self.depth + 1;
        if depth > self.limit {
            return Err(QueryError::NestingTooDeep { limit: self.limit });
        }
        Ok(Nesting { depth, ..self })
    }
}

impl Default for Nesting {
    fn default() -> Self {
        Nesting::new(DEFAULT_MAX_NESTING)
    }
}

/// Compiles `where` text into a predicate over `T`.
///
/// Empty text compiles to a predicate that accepts every record.
///
/// # Example
///
/// ```
/// use expressive_query::{compile_filter, Registry};
///
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// let registry = Registry::<Person>::new()
///     .string("Name", |p| &p.name)
///     .int("Age", |p| p.age);
///
/// let filter = compile_filter(&registry, "Name startsWith 'Al' and Age greaterThan 20").unwrap();
///
/// assert!(filter.matches(&Person { name: "Alice".into(), age: 30 }));
/// assert!(!filter.matches(&Person { name: "Alice".into(), age: 12 }));
/// assert!(!filter.matches(&Person { name: "Bob".into(), age: 30 }));
/// ```
pub fn compile_filter<T: 'static>(registry: &Registry<T>, text: &str) -> Result<Predicate<T>> {
    compile_filter_with(registry, text, Nesting::default())
}

/// [`compile_filter`] with an explicit nesting limit.
pub fn compile_filter_with<T: 'static>(
    registry: &Registry<T>,
    text: &str,
    nesting: Nesting,
) -> Result<Predicate<T>> {
    debug!(query = text, "compiling filter");
    compile_nested(registry, text, nesting)
}

/// Compiles `text` at the given nesting level. Used for groups and for
/// relation child queries.
pub fn compile_nested<T: 'static>(registry: &Registry<T>, text: &str, nesting: Nesting) -> Result<Predicate<T>> {
    let mut scanner = Scanner::new(text);
    let mut accumulated: Option<Predicate<T>> = None;

    while let Some(segment) = scanner.next_segment()? {
        trace!(connectives = %segment.connectives, depth = nesting.depth(), "compiling term");

        let mut term = match &segment.term {
            Term::Group(inner) => compile_nested(registry, inner, nesting.descend()?)?,
            Term::Clause(clause) => compile_clause(registry, clause, nesting)?,
        };

        if segment.connectives.negates() {
            term = term.negate();
        }

        accumulated = Some(match accumulated {
            None => term,
            Some(previous) => combine(previous, term, segment.connectives.first)?,
        });
    }

    Ok(accumulated.unwrap_or_else(Predicate::always))
}

fn combine<T: 'static>(
    previous: Predicate<T>,
    term: Predicate<T>,
    connective: Option<Connective>,
) -> Result<Predicate<T>> {
    match connective {
        Some(Connective::And) => Ok(previous.and(term)),
        Some(Connective::Or) => Ok(previous.or(term)),
        Some(Connective::Not) => Err(QueryError::InvalidConnective(Connective::Not.to_string())),
        None => Err(QueryError::InvalidConnective(String::new())),
    }
}

/// Resolves the clause's field and builds the typed comparison for it.
pub fn compile_clause<T: 'static>(registry: &Registry<T>, clause: &Clause, nesting: Nesting) -> Result<Predicate<T>> {
    let field = registry
        .lookup(&clause.field)
        .ok_or_else(|| QueryError::UnknownField(clause.field.clone()))?;

    trace!(
        field = %clause.field,
        operator = %clause.operator,
        field_type = %field.field_type(),
        "compiling clause"
    );

    match field {
        Field::Relation(relation) => {
            let operator = comparison::resolve_operator(clause, FieldType::Relation)?;
            match (operator.quantifier(), &clause.operand) {
                (Some(quantifier), Operand::Nested(query)) => {
                    relation.quantify(quantifier, query, nesting.descend()?)
                }
                _ => Err(QueryError::ExpectedChildQuery(clause.field.clone())),
            }
        }
        Field::String(get) => comparison::string(get, clause),
        Field::Int(get) => {
            let get = Arc::clone(get);
            comparison::nullable(clause, FieldType::Int, move |r| Some(get(r)), value::parse_int)
        }
        Field::OptionalInt(get) => {
            let get = Arc::clone(get);
            comparison::nullable(clause, FieldType::OptionalInt, move |r| get(r), value::parse_int)
        }
        Field::Decimal(get) => {
            let get = Arc::clone(get);
            comparison::nullable(clause, FieldType::Decimal, move |r| Some(get(r)), value::parse_decimal)
        }
        Field::OptionalDecimal(get) => {
            let get = Arc::clone(get);
            comparison::nullable(clause, FieldType::OptionalDecimal, move |r| get(r), value::parse_decimal)
        }
        Field::OptionalBool(get) => {
            let get = Arc::clone(get);
            comparison::nullable(clause, FieldType::OptionalBool, move |r| get(r), value::parse_bool)
        }
        Field::DateTime(get) => {
            let get = Arc::clone(get);
            comparison::nullable(
                clause,
                FieldType::DateTime,
                move |r| Some(get(r)),
                |field, literal| value::parse_date_time(field, literal, false),
            )
        }
        Field::OptionalDateTime(get) => {
            let get = Arc::clone(get);
            comparison::nullable(
                clause,
                FieldType::OptionalDateTime,
                move |r| get(r),
                |field, literal| value::parse_date_time(field, literal, true),
            )
        }
    }
}
