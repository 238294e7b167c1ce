//! Name Validation
//!
//! Compiled patterns live in process-wide statics initialized on first use.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

const MAX_INDEX_NAME_LENGTH: usize = 64;
const MAX_FRAME_NAME_LENGTH: usize = 64;
const MAX_LABEL_LENGTH: usize = 64;

static INDEX_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid index name pattern"));
static FRAME_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][.a-z0-9_-]*$").expect("valid frame name pattern"));
static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("valid label pattern"));

pub fn validate_index_name(name: &str) -> Result<()> {
    check(name, &INDEX_NAME, MAX_INDEX_NAME_LENGTH, "index name")
}

pub fn validate_frame_name(name: &str) -> Result<()> {
    check(name, &FRAME_NAME, MAX_FRAME_NAME_LENGTH, "frame name")
}

/// Row labels, column labels and attribute keys.
pub fn validate_label(label: &str) -> Result<()> {
    check(label, &LABEL, MAX_LABEL_LENGTH, "label")
}

fn check(value: &str, pattern: &Regex, max_length: usize, what: &str) -> Result<()> {
    if value.chars().count() > max_length {
        return Err(Error::Validation(format!(
            "Invalid {} {} (longer than {} characters)",
            what, value, max_length
        )));
    }
    if !pattern.is_match(value) {
        return Err(Error::Validation(format!("Invalid {} {}", what, value)));
    }
    Ok(())
}
