//! Promo Code Model

use serde::{Deserialize, Serialize};

/// Promo verification request payload
///
/// Codes are scoped to a single event, so verification always carries the
/// event id alongside the code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyPromoRequest {
    pub code: String,
    pub event_id: String,
}

impl VerifyPromoRequest {
    pub fn new(code: impl Into<String>, event_id: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            event_id: event_id.into(),
        }
    }
}

/// Verified promo code
///
/// Usage limits and expiry are enforced server-side; a successful
/// verification only hands back the code and its discount percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifiedPromo {
    pub code: String,
    /// Discount percentage in [0, 100]
    #[serde(default)]
    pub discount: f64,
}
