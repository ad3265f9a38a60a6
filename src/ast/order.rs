use std::cmp::Ordering;
use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Dir {
    pub fn parse(word: &str) -> Option<Dir> {
        match word {
            "asc" => Some(Dir::Asc),
            "desc" => Some(Dir::Desc),
            _ => None,
        }
    }

    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One key of an ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey {
    pub field: String,
    pub dir: Dir,
}

impl OrderKey {
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderKey {
            field: field.into(),
            dir,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        OrderKey::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        OrderKey::new(field, Dir::Desc)
    }
}

/// Keys in priority order: the first is primary, each later key breaks ties.
pub type OrderSpec = Vec<OrderKey>;
