use crate::ast::ConnectiveWindow;

/// Right-hand side of a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A single literal, unquoted or with its quotes stripped. `null` is kept as text.
    Literal(String),

    /// Trimmed items of a `[a, b, c]` array (operand of `in`).
    Array(Vec<String>),

    /// Inner text of the parenthesized query following `any`/`all`.
    Nested(String),
}

/// One `field operator operand` unit.
///
/// The operator is kept as written; it is resolved against the field's type
/// during compilation so errors can name it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: String,
    pub operator: String,
    pub operand: Operand,
}

impl Clause {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, operand: Operand) -> Self {
        Clause {
            field: field.into(),
            operator: operator.into(),
            operand,
        }
    }
}

/// A term of the filter grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Balanced, quote-aware inner text of `( ... )`, compiled recursively.
    Group(String),
    Clause(Clause),
}

/// A term together with the connectives read before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub connectives: ConnectiveWindow,
    pub term: Term,
}
