//! Cluster Wire Protocol
//!
//! Defines the HTTP endpoints of the server and the binary envelopes exchanged on the
//! query endpoint. Envelopes are serde structures encoded with bincode; index and frame
//! management payloads are JSON.

use crate::error::{Error, Result};
use crate::orm::AttributeValue;
use crate::orm::attributes::{ATTR_TYPE_BOOL, ATTR_TYPE_FLOAT, ATTR_TYPE_INT, ATTR_TYPE_STRING};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Cluster status document.
pub const ENDPOINT_STATUS: &str = "/status";

/// `/index/{index}`: create (POST) or delete (DELETE) an index.
pub fn index_path(index: &str) -> String {
    format!("/index/{}", index)
}

/// `/index/{index}/time-quantum`: change an index's time quantum (PATCH).
pub fn time_quantum_path(index: &str) -> String {
    format!("/index/{}/time-quantum", index)
}

/// `/index/{index}/frame/{frame}`: create (POST) or delete (DELETE) a frame.
pub fn frame_path(index: &str, frame: &str) -> String {
    format!("/index/{}/frame/{}", index, frame)
}

/// `/index/{index}/query`: execute a query (POST).
pub fn query_path(index: &str) -> String {
    format!("/index/{}/query", index)
}

// --- Binary Envelopes ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRequest {
    /// The serialized query expression.
    pub query: String,
    /// Whether column attributes should be returned alongside the results.
    pub column_attrs: bool,
    /// Time quantum code, empty for none.
    pub quantum: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryResponseMessage {
    pub err: String,
    pub results: Vec<QueryResultMessage>,
    pub column_attr_sets: Vec<ColumnAttrSetMessage>,
}

/// One result per query in the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryResultMessage {
    pub n: u64,
    pub bitmap: BitmapMessage,
    pub pairs: Vec<PairMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BitmapMessage {
    pub bits: Vec<u64>,
    pub attrs: Vec<AttrMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PairMessage {
    pub key: u64,
    pub count: u64,
}

/// A typed attribute record. Only the field matching `attr_type` is meaningful.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttrMessage {
    pub key: String,
    pub attr_type: u64,
    pub string_value: String,
    pub int_value: i64,
    pub bool_value: bool,
    pub float_value: f64,
}

impl AttrMessage {
    pub fn new(key: impl Into<String>, value: &AttributeValue) -> Self {
        let mut message = AttrMessage {
            key: key.into(),
            attr_type: value.type_code(),
            ..AttrMessage::default()
        };
        match value {
            AttributeValue::String(s) => message.string_value = s.clone(),
            AttributeValue::Integer(i) => message.int_value = *i,
            AttributeValue::Boolean(b) => message.bool_value = *b,
            AttributeValue::Float(f) => message.float_value = *f,
        }
        message
    }

    pub fn value(&self) -> Result<AttributeValue> {
        match self.attr_type {
            ATTR_TYPE_STRING => Ok(AttributeValue::String(self.string_value.clone())),
            ATTR_TYPE_INT => Ok(AttributeValue::Integer(self.int_value)),
            ATTR_TYPE_BOOL => Ok(AttributeValue::Boolean(self.bool_value)),
            ATTR_TYPE_FLOAT => Ok(AttributeValue::Float(self.float_value)),
            code => Err(Error::InvalidAttributeType(code)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ColumnAttrSetMessage {
    pub id: u64,
    pub attrs: Vec<AttrMessage>,
}

pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>> {
    bincode::serialize(message)
        .map_err(|e| Error::Other(format!("Failed to encode request: {}", e)))
}

/// Decodes a successful response body.
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    bincode::deserialize(body).map_err(|e| Error::DecodeFailed {
        status,
        reason: e.to_string(),
    })
}

pub fn encode_json(value: &serde_json::Value) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| Error::Other(format!("Failed to encode payload: {}", e)))
}
