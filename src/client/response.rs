use super::protocol::{
    AttrMessage, BitmapMessage, ColumnAttrSetMessage, PairMessage, QueryResponseMessage,
    QueryResultMessage,
};
use crate::error::{Error, Result};
use crate::orm::Attributes;

fn attributes(records: &[AttrMessage]) -> Result<Attributes> {
    let mut attributes = Attributes::new();
    for record in records {
        attributes.insert(record.key.clone(), record.value()?);
    }
    Ok(attributes)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BitmapResult {
    pub bits: Vec<u64>,
    pub attributes: Attributes,
}

impl TryFrom<BitmapMessage> for BitmapResult {
    type Error = Error;

    fn try_from(message: BitmapMessage) -> Result<Self> {
        Ok(Self {
            attributes: attributes(&message.attrs)?,
            bits: message.bits,
        })
    }
}

/// A row id and its count, as returned by `TopN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountResultItem {
    pub id: u64,
    pub count: u64,
}

impl From<PairMessage> for CountResultItem {
    fn from(pair: PairMessage) -> Self {
        Self {
            id: pair.key,
            count: pair.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub count: u64,
    pub bitmap: BitmapResult,
    pub count_items: Vec<CountResultItem>,
}

impl TryFrom<QueryResultMessage> for QueryResult {
    type Error = Error;

    fn try_from(message: QueryResultMessage) -> Result<Self> {
        Ok(Self {
            count: message.n,
            bitmap: BitmapResult::try_from(message.bitmap)?,
            count_items: message.pairs.into_iter().map(CountResultItem::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnItem {
    pub id: u64,
    pub attributes: Attributes,
}

impl TryFrom<ColumnAttrSetMessage> for ColumnItem {
    type Error = Error;

    fn try_from(message: ColumnAttrSetMessage) -> Result<Self> {
        Ok(Self {
            id: message.id,
            attributes: attributes(&message.attrs)?,
        })
    }
}

/// Decoded response of a query call.
///
/// `error` carries the server's per-query error text and is empty on success.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub results: Vec<QueryResult>,
    pub columns: Vec<ColumnItem>,
    pub error: String,
}

impl QueryResponse {
    /// First result, which is the only one for non-batch queries.
    pub fn result(&self) -> Option<&QueryResult> {
        self.results.first()
    }
}

impl TryFrom<QueryResponseMessage> for QueryResponse {
    type Error = Error;

    fn try_from(message: QueryResponseMessage) -> Result<Self> {
        let results = message
            .results
            .into_iter()
            .map(QueryResult::try_from)
            .collect::<Result<Vec<_>>>()?;
        let columns = message
            .column_attr_sets
            .into_iter()
            .map(ColumnItem::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            results,
            columns,
            error: message.err,
        })
    }
}
