//! Backend error body format
//!
//! The backend reports failures as `{"detail": ...}` where detail is either
//! a list of `{msg, loc, type}` entries (validation errors) or a plain
//! string. User-facing errors surface the first message found.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a structured error detail list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetail {
    pub msg: String,
    /// Field path that failed validation, e.g. `["body", "email"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Vec<Value>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// The `detail` field of an error body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Detail {
    Entries(Vec<ErrorDetail>),
    Message(String),
}

/// Error body returned by the backend on 4xx/5xx responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub detail: Detail,
}

impl ErrorBody {
    /// First human-readable message in the body, if any
    pub fn first_message(&self) -> Option<&str> {
        match &self.detail {
            Detail::Entries(entries) => entries.first().map(|e| e.msg.as_str()),
            Detail::Message(msg) => Some(msg.as_str()),
        }
    }
}

/// Extract the first detail message from a raw response body
///
/// Returns `None` when the body is not JSON or does not carry a detail
/// field, so callers can fall back to a generic message.
pub fn extract_detail_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.first_message().map(str::to_string))
}
