use serde::{Deserialize, Serialize};
use std::fmt;

/// The three boolean operations a [`QueryBuilder`](super::QueryBuilder) can represent.
///
/// Union and Intersect are commutative and associative. Difference is left-associative:
/// the first child is the base set and every following child is subtracted from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Operation {
    Union,
    Intersect,
    Difference,
}

impl Operation {
    /// The call name used in the query language.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Union => "Union",
            Operation::Intersect => "Intersect",
            Operation::Difference => "Difference",
        }
    }

    pub fn is_commutative(&self) -> bool {
        !matches!(self, Operation::Difference)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable query expression scoped to a single index.
///
/// Produced by leaf operations on frames and indexes, or by finalizing a builder.
/// Its expression is opaque to the composition engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Query {
    expression: String,
    index: String,
}

impl Query {
    pub fn new(expression: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            index: index.into(),
        }
    }

    /// Name of the index this query is evaluated against.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The expression, verbatim.
    pub fn serialize(&self) -> &str {
        &self.expression
    }

    /// Wraps this query in a counting aggregate.
    pub fn count(&self) -> Query {
        Query::new(format!("Count({})", self.expression), self.index.clone())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

pub(crate) fn assert_same_index(left: &str, right: &str) {
    assert!(
        left == right,
        "cannot compose queries across indexes ('{}' and '{}')",
        left,
        right
    );
}
