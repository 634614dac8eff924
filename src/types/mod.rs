//! Common types used across the Ainfinit client library.
//!
//! Every platform response is a JSON object carrying a numeric `status` and a
//! `message`, plus an endpoint-specific payload under `data`, `result` or
//! nothing at all. The wrappers here describe those payload shapes; the
//! envelope itself is checked by the client before the payload is decoded.

pub mod serde_helpers;

use serde::{Deserialize, Serialize};

/// The `{status, message}` fields present on every response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseEnvelope {
    /// Vendor status code; `200..=299` is success.
    pub status: i64,
    /// Human readable message, may be absent or null.
    #[serde(default, deserialize_with = "serde_helpers::null_as_default::deserialize")]
    pub message: String,
}

/// A response whose payload lives under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// A response whose `data` may be missing or null.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionalDataResponse<T> {
    pub data: Option<T>,
}

/// One page of a paged listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Total number of rows across all pages.
    #[serde(default)]
    pub total: i64,
    /// Rows on this page.
    #[serde(default = "Vec::new", deserialize_with = "serde_helpers::null_as_default::deserialize")]
    pub rows: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total: 0,
            rows: Vec::new(),
        }
    }
}

/// A list returned under `result` with a sibling `count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResultList<T> {
    #[serde(default = "Vec::new", deserialize_with = "serde_helpers::null_as_default::deserialize")]
    pub result: Vec<T>,
    #[serde(default)]
    pub count: i64,
}

/// Acknowledgement for calls that return no payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// The vendor message accompanying the success status.
    #[serde(default, deserialize_with = "serde_helpers::null_as_default::deserialize")]
    pub message: String,
    /// Explicit success flag, only sent by some endpoints.
    #[serde(default)]
    pub ok: Option<bool>,
}
