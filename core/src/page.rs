//! The paginated response envelope.
//!
//! # Design
//! The backend wraps every listing in a Spring-style page envelope. Real
//! responses are not always well formed, so decoding is deliberately lenient
//! rather than derive-strict: an envelope whose `content` is missing or not
//! an array is interpreted as "zero results", not a decode fault, and missing
//! metadata fields fall back to defaults (`number` 0, `size` 10, counters 0).
//! Only a body that is not JSON at all, or whose `content` items do not
//! deserialize, is an error.
//!
//! `first`/`last` stay `Option<bool>` because the wire marks them optional;
//! `has_next`/`has_previous` are the strict comparisons `last == Some(false)`
//! / `first == Some(false)`, so an envelope that omits them paginates as a
//! single page.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based index of the page the server actually returned.
    pub number: u32,
    /// Size of the page the server actually returned.
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: Option<bool>,
    pub last: Option<bool>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.last == Some(false)
    }

    pub fn has_previous(&self) -> bool {
        self.first == Some(false)
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Interpret a decoded JSON value as a page envelope.
    ///
    /// Returns `Ok(None)` when the value is not page-shaped (no `content`,
    /// or `content` is not an array); callers treat that as zero results.
    /// Returns `Err` only when the `content` items fail to deserialize.
    pub fn from_value(value: &Value) -> Result<Option<Self>, serde_json::Error> {
        let content = match value.get("content") {
            Some(c @ Value::Array(_)) => c,
            _ => return Ok(None),
        };
        let content: Vec<T> = serde_json::from_value(content.clone())?;
        Ok(Some(Page {
            content,
            number: u32_field(value, "number", 0),
            size: u32_field(value, "size", 10),
            total_elements: value.get("totalElements").and_then(Value::as_u64).unwrap_or(0),
            total_pages: u32_field(value, "totalPages", 0),
            first: value.get("first").and_then(Value::as_bool),
            last: value.get("last").and_then(Value::as_bool),
        }))
    }
}

fn u32_field(value: &Value, key: &str, default: u32) -> u32 {
    value
        .get(key)
        .and_then(Value::as_u64)
        .map(|n| n as u32)
        .unwrap_or(default)
}
