//! Typed comparison builders.
//!
//! Each builder parses the clause's literal once, then returns a predicate
//! that reads the field through its accessor and compares against the parsed
//! literal. Absent values follow three-valued logic: every comparison with an
//! absent side is false, except `equals` when both sides are absent.

use std::collections::HashSet;
use std::sync::Arc;

use crate::ast::{Clause, Operand, Operator};
use crate::error::{QueryError, Result};
use crate::predicate::Predicate;
use crate::registry::{FieldType, StrAccessor};

fn unsupported(clause: &Clause, field_type: FieldType) -> QueryError {
    QueryError::UnsupportedOperator {
        field: clause.field.clone(),
        operator: clause.operator.clone(),
        field_type,
    }
}

/// Resolves the clause's operator, rejecting operators the type does not define.
pub fn resolve_operator(clause: &Clause, field_type: FieldType) -> Result<Operator> {
    Operator::parse(&clause.operator)
        .filter(|op| field_type.supports(*op))
        .ok_or_else(|| unsupported(clause, field_type))
}

/// Ordinal string comparisons, substring tests and `in` membership.
pub fn string<T: 'static>(get: &StrAccessor<T>, clause: &Clause) -> Result<Predicate<T>> {
    let operator = resolve_operator(clause, FieldType::String)?;
    let get = Arc::clone(get);

    let predicate = match (operator, &clause.operand) {
        (Operator::In, Operand::Array(items)) => {
            let set: HashSet<String> = items.iter().cloned().collect();
            Predicate::new(move |record| set.contains(get(record)))
        }
        (Operator::Contains, Operand::Literal(literal)) => {
            let literal = literal.clone();
            Predicate::new(move |record| get(record).contains(literal.as_str()))
        }
        (Operator::StartsWith, Operand::Literal(literal)) => {
            let literal = literal.clone();
            Predicate::new(move |record| get(record).starts_with(literal.as_str()))
        }
        (Operator::EndsWith, Operand::Literal(literal)) => {
            let literal = literal.clone();
            Predicate::new(move |record| get(record).ends_with(literal.as_str()))
        }
        (op, Operand::Literal(literal)) if op.is_comparison() => {
            let literal = literal.clone();
            Predicate::new(move |record| op.eval_ordering(get(record).cmp(literal.as_str())))
        }
        _ => return Err(unsupported(clause, FieldType::String)),
    };
    Ok(predicate)
}

/// Null-aware comparisons and `in` membership for numeric, boolean and
/// date/time fields.
///
/// `get` reads the field as an `Option` (non-optional fields wrap in `Some`)
/// and `parse` turns a literal into `Option<V>`, mapping `null` to `None`
/// where the type allows it.
pub fn nullable<T, V, G, P>(clause: &Clause, field_type: FieldType, get: G, parse: P) -> Result<Predicate<T>>
where
    T: 'static,
    V: PartialOrd + Send + Sync + 'static,
    G: Fn(&T) -> Option<V> + Send + Sync + 'static,
    P: Fn(&str, &str) -> Result<Option<V>>,
{
    let operator = resolve_operator(clause, field_type)?;

    let predicate = match (operator, &clause.operand) {
        (Operator::In, Operand::Array(items)) => {
            let set = items
                .iter()
                .map(|item| parse(&clause.field, item))
                .collect::<Result<Vec<Option<V>>>>()?;
            Predicate::new(move |record| set.contains(&get(record)))
        }
        (op, Operand::Literal(literal)) if op.is_comparison() => {
            let literal = parse(&clause.field, literal)?;
            Predicate::new(move |record| compare_nullable(op, get(record).as_ref(), literal.as_ref()))
        }
        _ => return Err(unsupported(clause, field_type)),
    };
    Ok(predicate)
}

/// Three-valued comparison of a field value against a literal.
pub fn compare_nullable<V: PartialOrd>(operator: Operator, value: Option<&V>, literal: Option<&V>) -> bool {
    match (value, literal) {
        (Some(value), Some(literal)) => value
            .partial_cmp(literal)
            .is_some_and(|ordering| operator.eval_ordering(ordering)),
        (None, None) => operator == Operator::Equals,
        _ => false,
    }
}
