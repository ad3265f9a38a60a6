use std::cmp::Ordering;
use std::fmt;

/// Clause operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Comparison
    /// `equals`
    Equals,
    /// `greaterThan`
    GreaterThan,
    /// `greaterThanOrEquals` (also `greaterThanOrEqual`)
    GreaterThanOrEquals,
    /// `lessThan`
    LessThan,
    /// `lessThanOrEquals` (also `lessThanOrEqual`)
    LessThanOrEquals,

    // Membership
    /// `in [a, b, null]`
    In,

    // String
    /// `contains`
    Contains,
    /// `startsWith`
    StartsWith,
    /// `endsWith`
    EndsWith,

    // Relation quantifiers
    /// `any (child query)`
    Any,
    /// `all (child query)`
    All,
}

impl Operator {
    pub fn parse(word: &str) -> Option<Operator> {
        let op = match word {
            "equals" => Operator::Equals,
            "greaterThan" => Operator::GreaterThan,
            "greaterThanOrEquals" | "greaterThanOrEqual" => Operator::GreaterThanOrEquals,
            "lessThan" => Operator::LessThan,
            "lessThanOrEquals" | "lessThanOrEqual" => Operator::LessThanOrEquals,
            "in" => Operator::In,
            "contains" => Operator::Contains,
            "startsWith" => Operator::StartsWith,
            "endsWith" => Operator::EndsWith,
            "any" => Operator::Any,
            "all" => Operator::All,
            _ => return None,
        };
        Some(op)
    }

    /// `equals` and the four ordering comparisons.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Equals
                | Operator::GreaterThan
                | Operator::GreaterThanOrEquals
                | Operator::LessThan
                | Operator::LessThanOrEquals
        )
    }

    pub fn quantifier(self) -> Option<Quantifier> {
        match self {
            Operator::Any => Some(Quantifier::Any),
            Operator::All => Some(Quantifier::All),
            _ => None,
        }
    }

    /// Evaluates a comparison operator against the ordering of `value` relative to the literal.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Operator::Equals => ordering == Ordering::Equal,
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::GreaterThanOrEquals => ordering != Ordering::Less,
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessThanOrEquals => ordering != Ordering::Greater,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::GreaterThan => "greaterThan",
            Operator::GreaterThanOrEquals => "greaterThanOrEquals",
            Operator::LessThan => "lessThan",
            Operator::LessThanOrEquals => "lessThanOrEquals",
            Operator::In => "in",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Any => "any",
            Operator::All => "all",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a child predicate is applied over a relation's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// At least one child matches; false on an empty collection.
    Any,
    /// Every child matches; vacuously true on an empty collection.
    All,
}

impl Quantifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Quantifier::Any => "any",
            Quantifier::All => "all",
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
