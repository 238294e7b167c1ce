use super::types::{Query, assert_same_index};

/// Several independent queries sent to the server in a single request.
#[derive(Debug, Clone, Default)]
pub struct BatchQuery {
    queries: Vec<Query>,
}

impl BatchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// If `query` targets a different index than the queries already in the batch.
    pub fn add(&mut self, query: Query) {
        if let Some(first) = self.queries.first() {
            assert_same_index(first.index(), query.index());
        }
        self.queries.push(query);
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn serialize(&self) -> String {
        let parts: Vec<&str> = self.queries.iter().map(|q| q.serialize()).collect();
        parts.join(" ")
    }

    /// # Panics
    /// If the batch is empty.
    pub fn finalize(self) -> Query {
        assert!(
            !self.queries.is_empty(),
            "batch query must contain at least one query"
        );
        let expression = self.serialize();
        let index = self.queries[0].index().to_string();
        Query::new(expression, index)
    }
}

impl FromIterator<Query> for BatchQuery {
    fn from_iter<I: IntoIterator<Item = Query>>(iter: I) -> Self {
        let mut batch = BatchQuery::new();
        for query in iter {
            batch.add(query);
        }
        batch
    }
}
