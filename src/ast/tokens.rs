use std::fmt;

/// Boolean connective keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
    /// Negation of the following term (`not`)
    Not,
}

impl Connective {
    pub fn parse(word: &str) -> Option<Connective> {
        match word {
            "and" => Some(Connective::And),
            "or" => Some(Connective::Or),
            "not" => Some(Connective::Not),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
            Connective::Not => "not",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The up-to-two connectives read immediately before a term.
///
/// # Examples
/// ```text
/// and not (A or B)     -> first: and, second: not
/// not Age equals 3     -> first: not
/// Name equals 'x'      -> (empty)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectiveWindow {
    pub first: Option<Connective>,
    pub second: Option<Connective>,
}

impl ConnectiveWindow {
    /// `not` anywhere in the window negates the term once. It is a flag, not a counter.
    pub fn negates(&self) -> bool {
        self.first == Some(Connective::Not) || self.second == Some(Connective::Not)
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

impl fmt::Display for ConnectiveWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first, self.second) {
            (Some(a), Some(b)) => write!(f, "{} {}", a, b),
            (Some(a), None) | (None, Some(a)) => write!(f, "{}", a),
            (None, None) => Ok(()),
        }
    }
}
