use super::types::{Operation, Query, assert_same_index};

/// A mutable accumulator for one boolean operation over queries of the same index.
///
/// Builders are single-owner: every merge consumes its operands and hands back the
/// resulting builder, which is either one of the inputs grown in place or a fresh node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    operation: Operation,
    children: Vec<Query>,
    index: String,
}

/// Either side of a merge.
#[derive(Debug, Clone)]
pub enum Operand {
    Query(Query),
    Builder(QueryBuilder),
}

impl Operand {
    fn index(&self) -> &str {
        match self {
            Operand::Query(query) => query.index(),
            Operand::Builder(builder) => &builder.index,
        }
    }
}

impl From<Query> for Operand {
    fn from(query: Query) -> Self {
        Operand::Query(query)
    }
}

impl From<QueryBuilder> for Operand {
    fn from(builder: QueryBuilder) -> Self {
        Operand::Builder(builder)
    }
}

impl QueryBuilder {
    /// Starts an empty builder for `operation` on `index`.
    pub fn start(operation: Operation, index: impl Into<String>) -> Self {
        Self {
            operation,
            children: Vec::new(),
            index: index.into(),
        }
    }

    fn pair(operation: Operation, left: Query, right: Query) -> Self {
        let mut builder = Self::start(operation, left.index());
        builder.add(left);
        builder.add(right);
        builder
    }

    /// Appends a child query.
    ///
    /// # Panics
    /// If the query belongs to a different index.
    pub fn add(&mut self, query: Query) {
        assert_same_index(&self.index, query.index());
        self.children.push(query);
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn children(&self) -> &[Query] {
        &self.children
    }

    /// Renders `Operation(child1, child2, ...)`.
    pub fn serialize(&self) -> String {
        let children: Vec<&str> = self.children.iter().map(|q| q.serialize()).collect();
        format!("{}({})", self.operation.name(), children.join(", "))
    }

    /// Freezes the builder into a single opaque query.
    pub fn finalize(self) -> Query {
        let expression = self.serialize();
        Query::new(expression, self.index)
    }

    /// Freezes the builder into a `Count(...)` query.
    pub fn finalize_count(self) -> Query {
        let expression = format!("Count({})", self.serialize());
        Query::new(expression, self.index)
    }

    pub fn union(self, other: impl Into<Operand>) -> QueryBuilder {
        merge(Operand::Builder(self), other.into(), Operation::Union)
    }

    pub fn intersect(self, other: impl Into<Operand>) -> QueryBuilder {
        merge(Operand::Builder(self), other.into(), Operation::Intersect)
    }

    pub fn difference(self, other: impl Into<Operand>) -> QueryBuilder {
        merge(Operand::Builder(self), other.into(), Operation::Difference)
    }
}

impl From<QueryBuilder> for Query {
    fn from(builder: QueryBuilder) -> Self {
        builder.finalize()
    }
}

impl Query {
    pub fn union(self, other: impl Into<Operand>) -> QueryBuilder {
        merge(Operand::Query(self), other.into(), Operation::Union)
    }

    pub fn intersect(self, other: impl Into<Operand>) -> QueryBuilder {
        merge(Operand::Query(self), other.into(), Operation::Intersect)
    }

    pub fn difference(self, other: impl Into<Operand>) -> QueryBuilder {
        merge(Operand::Query(self), other.into(), Operation::Difference)
    }
}

/// Combines `left` and `right` under `operation`, preserving left-to-right order.
///
/// A builder already carrying `operation` absorbs the other side; otherwise builders are
/// finalized into single operands of a new node. Difference always keeps the leftmost
/// operand of the overall expression as the first child.
///
/// # Panics
/// If the operands belong to different indexes. The check runs before either side is touched.
pub fn merge(left: Operand, right: Operand, operation: Operation) -> QueryBuilder {
    assert_same_index(left.index(), right.index());

    match (left, right) {
        (Operand::Query(left), Operand::Query(right)) => QueryBuilder::pair(operation, left, right),

        (Operand::Query(left), Operand::Builder(mut right)) => {
            if right.operation != operation {
                return QueryBuilder::pair(operation, left, right.finalize());
            }
            if operation.is_commutative() {
                right.children.push(left);
            } else {
                right.children.insert(0, left);
            }
            right
        }

        (Operand::Builder(mut left), Operand::Query(right)) => {
            if left.operation != operation {
                return QueryBuilder::pair(operation, left.finalize(), right);
            }
            left.children.push(right);
            left
        }

        (Operand::Builder(mut left), Operand::Builder(mut right)) => {
            if left.operation != operation || right.operation != operation {
                return QueryBuilder::pair(operation, left.finalize(), right.finalize());
            }
            if operation.is_commutative() {
                left.children.append(&mut right.children);
                left
            } else {
                right.children.splice(0..0, left.children);
                right
            }
        }
    }
}
