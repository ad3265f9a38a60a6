//! Ordering compiler for `orderBy` text.
//!
//! `Age desc thenBy Name` sorts by age (largest first), then by name within
//! equal ages. The compiled comparator is applied with a stable sort, so
//! records equal under every key keep their original order.

use std::sync::Arc;

use tracing::debug;

use crate::ast::{Dir, OrderKey, OrderSpec};
use crate::error::{QueryError, Result};
use crate::predicate::Comparator;
use crate::registry::{Accessor, Field, Registry};

/// Separator between ordering keys.
pub const THEN_BY: &str = "thenBy";

/// Parses `orderBy` text into keys.
///
/// Each key is one or two whitespace-separated tokens: a field name and an
/// optional `asc`/`desc` (ascending by default).
pub fn parse_order_spec(text: &str) -> Result<OrderSpec> {
    let mut keys = Vec::new();
    let mut tokens: Vec<&str> = Vec::new();

    for token in text.split_whitespace() {
        if token == THEN_BY {
            keys.push(order_key(&tokens)?);
            tokens.clear();
        } else {
            tokens.push(token);
        }
    }
    keys.push(order_key(&tokens)?);

    Ok(keys)
}

fn order_key(tokens: &[&str]) -> Result<OrderKey> {
    match tokens {
        [] => Err(QueryError::InvalidOrderKey(format!(
            "expected property after {}",
            THEN_BY
        ))),
        [field] => Ok(OrderKey::asc(*field)),
        [field, dir] => Dir::parse(dir)
            .map(|dir| OrderKey::new(*field, dir))
            .ok_or_else(|| QueryError::InvalidDirection(dir.to_string())),
        [_, _, extra, ..] => Err(QueryError::InvalidOrderKey(format!(
            "expected {} at {}",
            THEN_BY, extra
        ))),
    }
}

/// Compiles `orderBy` text into a multi-key comparator.
///
/// # Example
///
/// ```
/// use expressive_query::{compile_order, Registry};
///
/// let registry = Registry::<(i64, i64)>::new()
///     .int("K1", |r| r.0)
///     .int("K2", |r| r.1);
///
/// let mut rows = vec![(1, 2), (1, 1), (0, 5)];
/// compile_order(&registry, "K1 asc thenBy K2 asc").unwrap().sort(&mut rows);
/// assert_eq!(rows, vec![(0, 5), (1, 1), (1, 2)]);
/// ```
pub fn compile_order<T: 'static>(registry: &Registry<T>, text: &str) -> Result<Comparator<T>> {
    debug!(order_by = text, "compiling ordering");
    let spec = parse_order_spec(text)?;
    compile_order_spec(registry, &spec)
}

/// Compiles parsed keys: the first key is primary, each later key breaks ties.
pub fn compile_order_spec<T: 'static>(registry: &Registry<T>, spec: &[OrderKey]) -> Result<Comparator<T>> {
    let mut combined: Option<Comparator<T>> = None;
    for key in spec {
        let next = key_comparator(registry, key)?;
        combined = Some(match combined {
            None => next,
            Some(previous) => previous.then(next),
        });
    }
    combined.ok_or_else(|| {
        QueryError::InvalidOrderKey(format!("expected property after {}", THEN_BY))
    })
}

fn key_comparator<T: 'static>(registry: &Registry<T>, key: &OrderKey) -> Result<Comparator<T>> {
    let field = registry
        .lookup(&key.field)
        .filter(|field| field.field_type().is_orderable())
        .ok_or_else(|| QueryError::NotOrderable(key.field.clone()))?;
    let dir = key.dir;

    let comparator = match field {
        Field::String(get) => {
            let get = Arc::clone(get);
            Comparator::new(move |a, b| dir.apply(get(a).cmp(get(b))))
        }
        Field::Int(get) => by_key(get, dir),
        Field::OptionalInt(get) => by_key(get, dir),
        Field::Decimal(get) => by_key(get, dir),
        Field::OptionalDecimal(get) => by_key(get, dir),
        Field::OptionalBool(get) => by_key(get, dir),
        Field::DateTime(get) => by_key(get, dir),
        Field::OptionalDateTime(get) => by_key(get, dir),
        Field::Relation(_) => return Err(QueryError::NotOrderable(key.field.clone())),
    };
    Ok(comparator)
}

/// Absent values sort before present ones (`None < Some`).
fn by_key<T: 'static, V: Ord + 'static>(get: &Accessor<T, V>, dir: Dir) -> Comparator<T> {
    let get = Arc::clone(get);
    Comparator::new(move |a, b| dir.apply(get(a).cmp(&get(b))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_directions() {
        assert_eq!(
            parse_order_spec("Age desc thenBy Name").unwrap(),
            vec![OrderKey::desc("Age"), OrderKey::asc("Name")]
        );
        assert_eq!(
            parse_order_spec("  Name   asc ").unwrap(),
            vec![OrderKey::asc("Name")]
        );
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(matches!(
            parse_order_spec("Age thenBy"),
            Err(QueryError::InvalidOrderKey(_))
        ));
        assert!(matches!(
            parse_order_spec("thenBy Age"),
            Err(QueryError::InvalidOrderKey(_))
        ));
        assert!(matches!(
            parse_order_spec(""),
            Err(QueryError::InvalidOrderKey(_))
        ));
        assert_eq!(
            parse_order_spec("Age down"),
            Err(QueryError::InvalidDirection("down".to_string()))
        );
        assert!(matches!(
            parse_order_spec("Age desc Name"),
            Err(QueryError::InvalidOrderKey(msg)) if msg.contains("Name")
        ));
    }
}
