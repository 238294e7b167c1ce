//! Attribute Dictionaries
//!
//! Rows and columns carry string-keyed attributes with heterogeneous values.
//! Values are a closed set of types; anything else is rejected at the JSON boundary.

use super::validator::validate_label;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire type tags used by attribute records in query responses.
pub const ATTR_TYPE_STRING: u64 = 1;
pub const ATTR_TYPE_INT: u64 = 2;
pub const ATTR_TYPE_BOOL: u64 = 3;
pub const ATTR_TYPE_FLOAT: u64 = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Float(f64),
}

/// Sorted so rendered attribute text is deterministic.
pub type Attributes = BTreeMap<String, AttributeValue>;

impl AttributeValue {
    /// Converts a JSON value, rejecting arrays, objects, null and unrepresentable numbers.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(s) => Ok(AttributeValue::String(s)),
            serde_json::Value::Bool(b) => Ok(AttributeValue::Boolean(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(AttributeValue::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(AttributeValue::Float(f))
                } else {
                    Err(Error::Other(format!("Invalid value for attribute: {}", n)))
                }
            }
            other => Err(Error::Other(format!(
                "Invalid value for attribute: {}",
                other
            ))),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        let value = match self {
            AttributeValue::String(s) => serde_json::Value::String(s.clone()),
            AttributeValue::Integer(i) => serde_json::Value::from(*i),
            AttributeValue::Boolean(b) => serde_json::Value::Bool(*b),
            AttributeValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    Error::Other(format!("Unable to encode attribute value {} as JSON", f))
                })?,
        };
        Ok(value)
    }

    pub fn type_code(&self) -> u64 {
        match self {
            AttributeValue::String(_) => ATTR_TYPE_STRING,
            AttributeValue::Integer(_) => ATTR_TYPE_INT,
            AttributeValue::Boolean(_) => ATTR_TYPE_BOOL,
            AttributeValue::Float(_) => ATTR_TYPE_FLOAT,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

/// Converts a JSON object into typed attributes.
pub fn attributes_from_json(value: serde_json::Value) -> Result<Attributes> {
    let serde_json::Value::Object(map) = value else {
        return Err(Error::Other("Attributes must be a JSON object".to_string()));
    };

    let mut attributes = Attributes::new();
    for (key, value) in map {
        validate_label(&key)?;
        attributes.insert(key, AttributeValue::from_json(value)?);
    }
    Ok(attributes)
}

/// Renders `key1=value1, key2=value2` with keys validated as labels and values as JSON.
pub(crate) fn attribute_text(attributes: &Attributes) -> Result<String> {
    let mut segments = Vec::with_capacity(attributes.len());
    for (key, value) in attributes {
        validate_label(key)?;
        let json = serde_json::to_string(&value.to_json()?)
            .map_err(|e| Error::Other(format!("Unable to encode attribute {}: {}", key, e)))?;
        segments.push(format!("{}={}", key, json));
    }
    Ok(segments.join(", "))
}
