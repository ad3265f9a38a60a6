//! Field registry: the static table of queryable fields for a record type.
//!
//! Each name maps to exactly one [`Field`], a tagged union of the field's type
//! and its accessor. Relation fields own the registry of their child record
//! type, so a registry is a tree built top-down at configuration time.
//!
//! # Example
//!
//! ```
//! use expressive_query::Registry;
//!
//! struct Tag {
//!     label: String,
//! }
//!
//! struct Person {
//!     name: String,
//!     age: i64,
//!     tags: Vec<Tag>,
//! }
//!
//! let registry = Registry::<Person>::new()
//!     .string("Name", |p| &p.name)
//!     .int("Age", |p| p.age)
//!     .relation("Tags", |p| p.tags.as_slice(), |tags| tags.string("Label", |t| &t.label));
//!
//! assert!(registry.lookup("Tags").is_some());
//! assert!(registry.lookup("Label").is_none());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::warn;

use crate::ast::{Operator, Quantifier};
use crate::compiler::{self, Nesting};
use crate::error::Result;
use crate::predicate::Predicate;

/// Accessor returning a borrowed string.
pub type StrAccessor<T> = Arc<dyn Fn(&T) -> &str + Send + Sync>;

/// Accessor returning an owned scalar.
pub type Accessor<T, V> = Arc<dyn Fn(&T) -> V + Send + Sync>;

/// Accessor returning a relation's child collection.
pub type ChildrenAccessor<T, C> = Arc<dyn Fn(&T) -> &[C] + Send + Sync>;

/// Type tag of a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Int,
    OptionalInt,
    Decimal,
    OptionalDecimal,
    OptionalBool,
    DateTime,
    OptionalDateTime,
    Relation,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::OptionalInt => "optionalInt",
            FieldType::Decimal => "decimal",
            FieldType::OptionalDecimal => "optionalDecimal",
            FieldType::OptionalBool => "optionalBool",
            FieldType::DateTime => "dateTime",
            FieldType::OptionalDateTime => "optionalDateTime",
            FieldType::Relation => "relation",
        }
    }

    /// Whether `operator` is defined for fields of this type.
    ///
    /// | Type | Operators |
    /// |---|---|
    /// | string | comparisons, `in`, `contains`, `startsWith`, `endsWith` |
    /// | int, decimal (and optional) | comparisons, `in` |
    /// | optionalBool | `equals` |
    /// | dateTime (and optional) | comparisons |
    /// | relation | `any`, `all` |
    pub fn supports(self, operator: Operator) -> bool {
        match self {
            FieldType::String => {
                operator.is_comparison()
                    || matches!(
                        operator,
                        Operator::In | Operator::Contains | Operator::StartsWith | Operator::EndsWith
                    )
            }
            FieldType::Int
            | FieldType::OptionalInt
            | FieldType::Decimal
            | FieldType::OptionalDecimal => operator.is_comparison() || operator == Operator::In,
            FieldType::OptionalBool => operator == Operator::Equals,
            FieldType::DateTime | FieldType::OptionalDateTime => operator.is_comparison(),
            FieldType::Relation => operator.quantifier().is_some(),
        }
    }

    /// Relations have no scalar value to sort by.
    pub fn is_orderable(self) -> bool {
        self != FieldType::Relation
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered field: its type tag and how to read it from a record.
pub enum Field<T> {
    String(StrAccessor<T>),
    Int(Accessor<T, i64>),
    OptionalInt(Accessor<T, Option<i64>>),
    Decimal(Accessor<T, Decimal>),
    OptionalDecimal(Accessor<T, Option<Decimal>>),
    OptionalBool(Accessor<T, Option<bool>>),
    DateTime(Accessor<T, NaiveDateTime>),
    OptionalDateTime(Accessor<T, Option<NaiveDateTime>>),
    Relation(Arc<dyn Relation<T>>),
}

impl<T> Field<T> {
    pub fn field_type(&self) -> FieldType {
        match self {
            Field::String(_) => FieldType::String,
            Field::Int(_) => FieldType::Int,
            Field::OptionalInt(_) => FieldType::OptionalInt,
            Field::Decimal(_) => FieldType::Decimal,
            Field::OptionalDecimal(_) => FieldType::OptionalDecimal,
            Field::OptionalBool(_) => FieldType::OptionalBool,
            Field::DateTime(_) => FieldType::DateTime,
            Field::OptionalDateTime(_) => FieldType::OptionalDateTime,
            Field::Relation(_) => FieldType::Relation,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({})", self.field_type())
    }
}

/// A child collection reachable from a record, with its own registry.
///
/// The child record type is erased here so registries of different parent
/// types can hold relations to any child type.
pub trait Relation<T>: Send + Sync {
    /// Compiles `query` against the child registry and lifts it over the
    /// collection with `quantifier`.
    fn quantify(&self, quantifier: Quantifier, query: &str, nesting: Nesting) -> Result<Predicate<T>>;

    /// Names and types of the child registry's fields.
    fn child_fields(&self) -> Vec<(String, FieldType)>;
}

struct ChildRelation<T, C> {
    children: ChildrenAccessor<T, C>,
    registry: Registry<C>,
}

impl<T: 'static, C: 'static> Relation<T> for ChildRelation<T, C> {
    fn quantify(&self, quantifier: Quantifier, query: &str, nesting: Nesting) -> Result<Predicate<T>> {
        let child = compiler::compile_nested(&self.registry, query, nesting)?;
        let children = Arc::clone(&self.children);

        let predicate = match quantifier {
            Quantifier::Any => {
                Predicate::new(move |record: &T| children(record).iter().any(|c| child.matches(c)))
            }
            Quantifier::All => {
                Predicate::new(move |record: &T| children(record).iter().all(|c| child.matches(c)))
            }
        };
        Ok(predicate)
    }

    fn child_fields(&self) -> Vec<(String, FieldType)> {
        self.registry.fields()
    }
}

/// Field name to [`Field`] table for records of type `T`.
///
/// Built once, then shared read-only (typically behind an `Arc`) by every
/// compilation.
pub struct Registry<T> {
    fields: HashMap<String, Field<T>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry {
            fields: HashMap::new(),
        }
    }
}

impl<T: 'static> Registry<T> {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registers `field` under `name`. A name registered twice keeps the
    /// later field.
    pub fn register(&mut self, name: impl Into<String>, field: Field<T>) {
        let name = name.into();
        let field_type = field.field_type();
        if let Some(previous) = self.fields.insert(name.clone(), field) {
            warn!(
                field = %name,
                previous = %previous.field_type(),
                current = %field_type,
                "field registered twice; keeping the later registration"
            );
        }
    }

    /// Registers a relation: `children` reads the child collection and
    /// `registry` describes the child records.
    pub fn register_relation<C, F>(&mut self, name: impl Into<String>, children: F, registry: Registry<C>)
    where
        C: 'static,
        F: Fn(&T) -> &[C] + Send + Sync + 'static,
    {
        let relation: ChildRelation<T, C> = ChildRelation {
            children: Arc::new(children),
            registry,
        };
        self.register(name, Field::Relation(Arc::new(relation)));
    }

    pub fn lookup(&self, name: &str) -> Option<&Field<T>> {
        self.fields.get(name)
    }

    /// Registered names with their types, sorted by name.
    pub fn fields(&self) -> Vec<(String, FieldType)> {
        let mut fields: Vec<_> = self
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.field_type()))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // ========================================================================
    // Builder shorthands
    // ========================================================================

    pub fn string<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        self.register(name, Field::String(Arc::new(accessor)));
        self
    }

    pub fn int<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> i64 + Send + Sync + 'static,
    {
        self.register(name, Field::Int(Arc::new(accessor)));
        self
    }

    pub fn optional_int<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<i64> + Send + Sync + 'static,
    {
        self.register(name, Field::OptionalInt(Arc::new(accessor)));
        self
    }

    pub fn decimal<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Decimal + Send + Sync + 'static,
    {
        self.register(name, Field::Decimal(Arc::new(accessor)));
        self
    }

    pub fn optional_decimal<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<Decimal> + Send + Sync + 'static,
    {
        self.register(name, Field::OptionalDecimal(Arc::new(accessor)));
        self
    }

    pub fn optional_bool<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<bool> + Send + Sync + 'static,
    {
        self.register(name, Field::OptionalBool(Arc::new(accessor)));
        self
    }

    pub fn date_time<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> NaiveDateTime + Send + Sync + 'static,
    {
        self.register(name, Field::DateTime(Arc::new(accessor)));
        self
    }

    pub fn optional_date_time<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<NaiveDateTime> + Send + Sync + 'static,
    {
        self.register(name, Field::OptionalDateTime(Arc::new(accessor)));
        self
    }

    /// Registers a relation whose child registry is built by `configure`.
    pub fn relation<C, F, B>(mut self, name: impl Into<String>, children: F, configure: B) -> Self
    where
        C: 'static,
        F: Fn(&T) -> &[C] + Send + Sync + 'static,
        B: FnOnce(Registry<C>) -> Registry<C>,
    {
        let child = configure(Registry::new());
        self.register_relation(name, children, child);
        self
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.fields.keys().collect();
        names.sort();
        f.debug_struct("Registry").field("fields", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line {
        sku: String,
    }

    struct Order {
        id: i64,
        note: Option<bool>,
        lines: Vec<Line>,
    }

    fn registry() -> Registry<Order> {
        Registry::<Order>::new()
            .int("Id", |o| o.id)
            .optional_bool("Flagged", |o| o.note)
            .relation("Lines", |o| o.lines.as_slice(), |lines| lines.string("Sku", |l| &l.sku))
    }

    #[test]
    fn lookup_resolves_registered_names() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("Id").map(Field::field_type), Some(FieldType::Int));
        assert_eq!(
            registry.lookup("Lines").map(Field::field_type),
            Some(FieldType::Relation)
        );
        assert!(registry.lookup("id").is_none());
        assert!(registry.lookup("Sku").is_none());
    }

    #[test]
    fn accessors_read_the_record() {
        let registry = registry();
        let order = Order {
            id: 7,
            note: None,
            lines: vec![],
        };
        match registry.lookup("Id") {
            Some(Field::Int(get)) => assert_eq!(get(&order), 7),
            other => panic!("unexpected field {:?}", other),
        }
        match registry.lookup("Flagged") {
            Some(Field::OptionalBool(get)) => assert_eq!(get(&order), None),
            other => panic!("unexpected field {:?}", other),
        }
    }

    #[test]
    fn relation_exposes_child_fields() {
        let registry = registry();
        match registry.lookup("Lines") {
            Some(Field::Relation(relation)) => {
                assert_eq!(
                    relation.child_fields(),
                    vec![("Sku".to_string(), FieldType::String)]
                );
            }
            other => panic!("unexpected field {:?}", other),
        }
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let registry = Registry::<Order>::new()
            .int("Id", |o| o.id)
            .optional_int("Id", |o| Some(o.id * 2));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup("Id").map(Field::field_type),
            Some(FieldType::OptionalInt)
        );
    }

    #[test]
    fn operator_support_table() {
        assert!(FieldType::String.supports(Operator::StartsWith));
        assert!(FieldType::String.supports(Operator::In));
        assert!(!FieldType::String.supports(Operator::Any));
        assert!(FieldType::OptionalInt.supports(Operator::In));
        assert!(!FieldType::Int.supports(Operator::Contains));
        assert!(FieldType::OptionalBool.supports(Operator::Equals));
        assert!(!FieldType::OptionalBool.supports(Operator::GreaterThan));
        assert!(!FieldType::OptionalBool.supports(Operator::In));
        assert!(FieldType::DateTime.supports(Operator::LessThanOrEquals));
        assert!(!FieldType::OptionalDateTime.supports(Operator::In));
        assert!(FieldType::Relation.supports(Operator::All));
        assert!(!FieldType::Relation.supports(Operator::Equals));
    }

    #[test]
    fn field_type_names() {
        assert_eq!(FieldType::OptionalDateTime.to_string(), "optionalDateTime");
        assert!(FieldType::Decimal.is_orderable());
        assert!(!FieldType::Relation.is_orderable());
    }
}
