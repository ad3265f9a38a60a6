//! Documentation content for the exq CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Where,
    Operators,
    Types,
    Relations,
    OrderBy,
    Paging,
    Schema,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "where" | "filter" | "filters" => Some(Self::Where),
            "operators" | "ops" => Some(Self::Operators),
            "types" | "type" => Some(Self::Types),
            "relations" | "relation" | "any" | "all" => Some(Self::Relations),
            "order_by" | "orderby" | "order" | "sort" => Some(Self::OrderBy),
            "paging" | "skip" | "take" => Some(Self::Paging),
            "schema" | "schemas" => Some(Self::Schema),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"EXQ DOCUMENTATION

exq filters, orders and pages JSON records using the text a client would send
as request parameters: where, orderBy, skip and take. Field names and types come
from a schema document.

DOCUMENTATION CATEGORIES

  where             Clauses, connectives, negation and grouping
  operators         Operator names and which field types accept them
  types             Literal syntax for each field type, null handling
  relations         any/all over child collections
  order-by          Sort keys, directions and thenBy
  paging            skip, take and the default page size
  schema            Describing record fields in JSON

QUICK REFERENCE

  Name equals 'Ann'                      Clause
  Age greaterThan 30 and Name in [A, B]  Connectives
  not (Age lessThan 18)                  Negated group
  Tags any (Label equals 'x')            Relation
  Age desc thenBy Name                   Ordering

Run 'exq doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Where) => Ok(WHERE_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Types) => Ok(TYPES_DOC),
        Some(DocCategory::Relations) => Ok(RELATIONS_DOC),
        Some(DocCategory::OrderBy) => Ok(ORDER_BY_DOC),
        Some(DocCategory::Paging) => Ok(PAGING_DOC),
        Some(DocCategory::Schema) => Ok(SCHEMA_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const WHERE_DOC: &str = r#"WHERE - Filter Expressions

CLAUSE
  <Field> <operator> <operand>
    Compares one field of each record with a literal.

    Example:
      Name equals 'Ann Lee'
      Age greaterThan 30

    Constraints:
      - Field names are case-sensitive
      - Unknown fields are rejected: "<Field> is not filterable"
      - Quote literals that contain spaces with '

CONNECTIVES
  and, or
    Combine clauses strictly left to right. There is no precedence:

      A or B and C      means   (A or B) and C

    Use parentheses to group differently:

      A or (B and C)

NEGATION
  not
    Negates the clause or group that follows. It may open the query or
    follow a connective, and negates once however often it is repeated:

      not Age equals 3
      Age equals 3 and not Name equals 'Bo'
      not (Age equals 3 or Age equals 4)

GROUPS
  ( ... )
    A parenthesized sub-expression is compiled on its own and then combined
    like a single clause. Parentheses must balance; quotes inside a group
    are honored.

EMPTY
  An empty where keeps every record.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Names and Field Types

COMPARISON
  equals
  greaterThan
  greaterThanOrEquals   (alias: greaterThanOrEqual)
  lessThan
  lessThanOrEquals      (alias: lessThanOrEqual)

MEMBERSHIP
  in [a, b, c]
    True when the field equals any listed value. Items are split on commas
    and trimmed; one pair of surrounding quotes is removed ('Ann Lee').
    Items cannot contain commas or ]. An empty list matches nothing.

STRING
  contains
  startsWith
  endsWith
    Ordinal, case-sensitive.

RELATION
  any ( ... )
  all ( ... )
    See 'exq doc relations'.

SUPPORT BY TYPE

  string              equals, comparisons, in, contains, startsWith, endsWith
  int, decimal        equals, comparisons, in
  optionalInt         equals, comparisons, in
  optionalDecimal     equals, comparisons, in
  optionalBool        equals
  dateTime            equals, comparisons
  optionalDateTime    equals, comparisons
  relation            any, all

  Any other combination is rejected when the query is compiled.
"#;

const TYPES_DOC: &str = r#"TYPES - Literals and Null

LITERALS
  string              Any word or quoted text
  int, optionalInt    Decimal digits with optional sign: 42, -7
  decimal             42, 19.99, -0.5
  optionalBool        true, false (any case)
  dateTime            2024-05-01, 2024-05-01T13:45:00, RFC 3339 with offset

NULL
  The literal null compares against absent values of optional fields.

    Score equals null            Score is absent
    Score greaterThan 3          false when Score is absent
    Rank in [1, null]            Rank is 1 or absent

  Comparisons other than equals are false when either side is null.
  On int and decimal fields null never matches a value. dateTime fields
  reject null. On string fields null is ordinary text.
"#;

const RELATIONS_DOC: &str = r#"RELATIONS - any / all

  <Relation> any ( <child where> )
  <Relation> all ( <child where> )
    The child where is compiled against the relation's own fields and
    applied to each child item.

    Example:
      Tags any (Label equals 'admin')
      Orders all (Total greaterThan 10 and Paid equals true)

    Constraints:
      - any over an empty collection is false
      - all over an empty collection is true
      - Relations nest; depth is bounded (see --max-nesting)
      - Relations cannot be ordered by
"#;

const ORDER_BY_DOC: &str = r#"ORDER BY - Sorting

  <Field> [asc|desc] [thenBy <Field> [asc|desc]]...

    Example:
      Age desc thenBy Name

    Constraints:
      - Direction defaults to asc
      - Sorting is stable: ties keep their input order
      - Absent optional values sort before present ones
      - Only scalar fields may be ordered
"#;

const PAGING_DOC: &str = r#"PAGING - skip and take

  skip    Number of records to drop after ordering
  take    Maximum number of records to return

    Constraints:
      - Both must be non-negative integers
      - Without take, the default page size applies (30 unless
        --default-take says otherwise)
      - Applied in order: where, orderBy, skip, take
"#;

const SCHEMA_DOC: &str = r#"SCHEMA - Describing Records

A schema is a JSON object mapping field names to a type name, or to a nested
schema for a relation whose items are the array stored under that key.

    {
      "Name": "string",
      "Age": "int",
      "Score": "optionalDecimal",
      "Born": "dateTime",
      "Tags": { "Label": "string" }
    }

TYPE NAMES
  string, int, optionalInt, decimal, optionalDecimal, optionalBool,
  dateTime, optionalDateTime

  Missing non-optional values read as "", 0 or the Unix epoch.
  Missing optional values read as null.
"#;
