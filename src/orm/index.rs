use super::attributes::{Attributes, attribute_text};
use super::frame::{Frame, FrameOptions};
use super::types::TimeQuantum;
use super::validator::{validate_index_name, validate_label};
use crate::error::Result;
use crate::query::types::assert_same_index;
use crate::query::{BatchQuery, Operation, Query, QueryBuilder};

pub const DEFAULT_COLUMN_LABEL: &str = "columnID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    pub column_label: String,
    pub time_quantum: TimeQuantum,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            column_label: DEFAULT_COLUMN_LABEL.to_string(),
            time_quantum: TimeQuantum::None,
        }
    }
}

/// A named collection of frames sharing one column space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    name: String,
    column_label: String,
    time_quantum: TimeQuantum,
}

impl Index {
    pub fn new(name: &str) -> Result<Self> {
        Self::with_options(name, IndexOptions::default())
    }

    pub fn with_options(name: &str, options: IndexOptions) -> Result<Self> {
        validate_index_name(name)?;
        validate_label(&options.column_label)?;
        Ok(Self {
            name: name.to_string(),
            column_label: options.column_label,
            time_quantum: options.time_quantum,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_label(&self) -> &str {
        &self.column_label
    }

    pub fn time_quantum(&self) -> TimeQuantum {
        self.time_quantum
    }

    pub fn frame(&self, name: &str) -> Result<Frame> {
        Frame::new(self.clone(), name, FrameOptions::default())
    }

    pub fn frame_with_options(&self, name: &str, options: FrameOptions) -> Result<Frame> {
        Frame::new(self.clone(), name, options)
    }

    /// Wraps a hand-written expression.
    pub fn raw(&self, pql: impl Into<String>) -> Query {
        Query::new(pql, self.name.clone())
    }

    pub fn union(&self, queries: impl IntoIterator<Item = Query>) -> Query {
        self.combine(Operation::Union, queries)
    }

    pub fn intersect(&self, queries: impl IntoIterator<Item = Query>) -> Query {
        self.combine(Operation::Intersect, queries)
    }

    pub fn difference(&self, queries: impl IntoIterator<Item = Query>) -> Query {
        self.combine(Operation::Difference, queries)
    }

    fn combine(&self, operation: Operation, queries: impl IntoIterator<Item = Query>) -> Query {
        let mut builder = QueryBuilder::start(operation, self.name.clone());
        for query in queries {
            builder.add(query);
        }
        builder.finalize()
    }

    pub fn count(&self, query: &Query) -> Query {
        assert_same_index(&self.name, query.index());
        query.count()
    }

    /// # Panics
    /// If `queries` is empty or spans indexes.
    pub fn batch(&self, queries: impl IntoIterator<Item = Query>) -> Query {
        let batch: BatchQuery = queries.into_iter().collect();
        let query = batch.finalize();
        assert_same_index(&self.name, query.index());
        query
    }

    pub fn set_column_attributes(&self, column_id: u64, attributes: &Attributes) -> Result<Query> {
        let text = attribute_text(attributes)?;
        Ok(self.raw(format!(
            "SetColumnAttrs({}={}, {})",
            self.column_label, column_id, text
        )))
    }

    pub(crate) fn options_json(&self) -> serde_json::Value {
        serde_json::json!({ "options": { "columnLabel": self.column_label } })
    }

    pub(crate) fn time_quantum_json(&self) -> serde_json::Value {
        serde_json::json!({ "timeQuantum": self.time_quantum.as_str() })
    }
}
