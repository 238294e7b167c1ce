use super::attributes::{AttributeValue, Attributes, attribute_text};
use super::index::Index;
use super::types::{CacheType, TimeQuantum};
use super::validator::{validate_frame_name, validate_label};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::query::types::assert_same_index;
use chrono::NaiveDateTime;

pub const DEFAULT_ROW_LABEL: &str = "rowID";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOptions {
    pub time_quantum: TimeQuantum,
    pub inverse_enabled: bool,
    pub cache_type: CacheType,
    pub cache_size: u32,
    pub row_label: String,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            time_quantum: TimeQuantum::None,
            inverse_enabled: false,
            cache_type: CacheType::Default,
            cache_size: 0,
            row_label: DEFAULT_ROW_LABEL.to_string(),
        }
    }
}

/// A named bitmap matrix inside an index. Every query it produces is scoped to that index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    index: Index,
    name: String,
    options: FrameOptions,
}

impl Frame {
    pub fn new(index: Index, name: &str, options: FrameOptions) -> Result<Self> {
        validate_frame_name(name)?;
        validate_label(&options.row_label)?;
        Ok(Self {
            index,
            name: name.to_string(),
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn options(&self) -> &FrameOptions {
        &self.options
    }

    fn leaf(&self, pql: String) -> Query {
        Query::new(pql, self.index.name())
    }

    /// Selects one row: `Bitmap(rowID=1, frame='f')`.
    pub fn bitmap(&self, row_id: u64) -> Query {
        self.leaf(format!(
            "Bitmap({}={}, frame='{}')",
            self.options.row_label, row_id, self.name
        ))
    }

    /// Selects one column of an inverse-enabled frame.
    pub fn inverse_bitmap(&self, column_id: u64) -> Result<Query> {
        if !self.options.inverse_enabled {
            return Err(Error::Other(format!(
                "Inverse bitmaps support was not enabled for frame {}",
                self.name
            )));
        }
        Ok(self.leaf(format!(
            "Bitmap({}={}, frame='{}')",
            self.index.column_label(),
            column_id,
            self.name
        )))
    }

    pub fn set_bit(&self, row_id: u64, column_id: u64) -> Query {
        self.leaf(format!(
            "SetBit({}={}, frame='{}', {}={})",
            self.options.row_label,
            row_id,
            self.name,
            self.index.column_label(),
            column_id
        ))
    }

    /// Sets a bit in the time-bucketed views as well as the standard one.
    pub fn set_bit_at(&self, row_id: u64, column_id: u64, timestamp: NaiveDateTime) -> Query {
        self.leaf(format!(
            "SetBit({}={}, frame='{}', {}={}, timestamp='{}')",
            self.options.row_label,
            row_id,
            self.name,
            self.index.column_label(),
            column_id,
            timestamp.format(TIMESTAMP_FORMAT)
        ))
    }

    pub fn clear_bit(&self, row_id: u64, column_id: u64) -> Query {
        self.leaf(format!(
            "ClearBit({}={}, frame='{}', {}={})",
            self.options.row_label,
            row_id,
            self.name,
            self.index.column_label(),
            column_id
        ))
    }

    /// Row bits set between `start` and `end`.
    pub fn range(&self, row_id: u64, start: NaiveDateTime, end: NaiveDateTime) -> Query {
        self.leaf(format!(
            "Range({}={}, frame='{}', start='{}', end='{}')",
            self.options.row_label,
            row_id,
            self.name,
            start.format(TIMESTAMP_FORMAT),
            end.format(TIMESTAMP_FORMAT)
        ))
    }

    pub fn top_n(&self, n: u64) -> Query {
        self.leaf(format!("TopN(frame='{}', n={})", self.name, n))
    }

    /// Top rows by intersection count with `bitmap`.
    pub fn top_n_of(&self, n: u64, bitmap: &Query) -> Query {
        assert_same_index(self.index.name(), bitmap.index());
        self.leaf(format!(
            "TopN({}, frame='{}', n={})",
            bitmap.serialize(),
            self.name,
            n
        ))
    }

    /// Like [`Frame::top_n_of`], keeping rows whose attribute `field` matches one of `filters`.
    pub fn top_n_filtered(
        &self,
        n: u64,
        bitmap: &Query,
        field: &str,
        filters: &[AttributeValue],
    ) -> Result<Query> {
        assert_same_index(self.index.name(), bitmap.index());
        validate_label(field)?;

        let values = filters
            .iter()
            .map(AttributeValue::to_json)
            .collect::<Result<Vec<_>>>()?;
        let filter_text = serde_json::to_string(&values)
            .map_err(|e| Error::Other(format!("Unable to create JSON for filters: {}", e)))?;

        Ok(self.leaf(format!(
            "TopN({}, frame='{}', n={}, field='{}', {})",
            bitmap.serialize(),
            self.name,
            n,
            field,
            filter_text
        )))
    }

    pub fn set_row_attributes(&self, row_id: u64, attributes: &Attributes) -> Result<Query> {
        let text = attribute_text(attributes)?;
        Ok(self.leaf(format!(
            "SetRowAttrs({}={}, frame='{}', {})",
            self.options.row_label, row_id, self.name, text
        )))
    }

    /// Creation payload; optional members are only sent when they differ from the server default.
    pub(crate) fn options_json(&self) -> serde_json::Value {
        let mut options = serde_json::Map::new();
        options.insert(
            "rowLabel".to_string(),
            serde_json::Value::String(self.options.row_label.clone()),
        );
        if self.options.inverse_enabled {
            options.insert("inverseEnabled".to_string(), serde_json::Value::Bool(true));
        }
        if !self.options.time_quantum.is_none() {
            options.insert(
                "timeQuantum".to_string(),
                serde_json::Value::from(self.options.time_quantum.as_str()),
            );
        }
        if let Some(cache_type) = self.options.cache_type.as_str() {
            options.insert("cacheType".to_string(), serde_json::Value::from(cache_type));
        }
        if self.options.cache_size > 0 {
            options.insert(
                "cacheSize".to_string(),
                serde_json::Value::from(self.options.cache_size),
            );
        }
        serde_json::json!({ "options": options })
    }
}
