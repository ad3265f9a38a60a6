//! Registries over `serde_json::Value` records, described by a schema document.
//!
//! A schema maps field names to type names, or to a nested schema for a
//! relation whose items are the array stored under that key:
//!
//! ```json
//! {
//!   "Name": "string",
//!   "Age": "int",
//!   "Score": "optionalDecimal",
//!   "Tags": { "Label": "string" }
//! }
//! ```
//!
//! Missing non-optional values read as the type's zero (`""`, `0`, the Unix
//! epoch); missing optional values read as absent.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::registry::Registry;
use crate::value::{date_time_from_str, decimal_from_str};

/// Scalar type names accepted in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarType {
    String,
    Int,
    OptionalInt,
    Decimal,
    OptionalDecimal,
    OptionalBool,
    DateTime,
    OptionalDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    Scalar(ScalarType),
    Relation(Schema),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub fields: BTreeMap<String, FieldSpec>,
}

impl Schema {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Builds the registry this schema describes.
    pub fn registry(&self) -> Registry<Value> {
        self.build(Registry::new())
    }

    fn build(&self, mut registry: Registry<Value>) -> Registry<Value> {
        for (name, spec) in &self.fields {
            let key = name.clone();
            registry = match spec {
                FieldSpec::Scalar(ScalarType::String) => registry.string(name.as_str(), move |v| {
                    v.get(&key).and_then(Value::as_str).unwrap_or_default()
                }),
                FieldSpec::Scalar(ScalarType::Int) => registry.int(name.as_str(), move |v| {
                    v.get(&key).and_then(Value::as_i64).unwrap_or_default()
                }),
                FieldSpec::Scalar(ScalarType::OptionalInt) => {
                    registry.optional_int(name.as_str(), move |v| v.get(&key).and_then(Value::as_i64))
                }
                FieldSpec::Scalar(ScalarType::Decimal) => registry.decimal(name.as_str(), move |v| {
                    v.get(&key).and_then(json_decimal).unwrap_or_default()
                }),
                FieldSpec::Scalar(ScalarType::OptionalDecimal) => {
                    registry.optional_decimal(name.as_str(), move |v| v.get(&key).and_then(json_decimal))
                }
                FieldSpec::Scalar(ScalarType::OptionalBool) => {
                    registry.optional_bool(name.as_str(), move |v| v.get(&key).and_then(Value::as_bool))
                }
                FieldSpec::Scalar(ScalarType::DateTime) => registry.date_time(name.as_str(), move |v| {
                    v.get(&key).and_then(json_date_time).unwrap_or_default()
                }),
                FieldSpec::Scalar(ScalarType::OptionalDateTime) => registry
                    .optional_date_time(name.as_str(), move |v| v.get(&key).and_then(json_date_time)),
                FieldSpec::Relation(child) => registry.relation(
                    name.as_str(),
                    move |v| {
                        v.get(&key)
                            .and_then(Value::as_array)
                            .map(Vec::as_slice)
                            .unwrap_or(&[])
                    },
                    |items| child.build(items),
                ),
            };
        }
        registry
    }
}

/// Numbers, or strings holding a decimal (common for money amounts).
fn json_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Decimal::from(i)),
            None => decimal_from_str(&n.to_string()),
        },
        Value::String(s) => decimal_from_str(s),
        _ => None,
    }
}

fn json_date_time(value: &Value) -> Option<NaiveDateTime> {
    value.as_str().and_then(date_time_from_str)
}
