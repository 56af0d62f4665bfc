//! Order Models
//!
//! Wire types for the six public order endpoints and their responses.
//! Each payload struct matches one endpoint family exactly, so a field the
//! endpoint must not receive cannot be expressed at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Payment method selected by the payer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    KaspiBank,
    HalykBank,
}

impl PaymentMethod {
    /// The provider behind this method
    pub fn provider(&self) -> PaymentProvider {
        match self {
            PaymentMethod::KaspiBank => PaymentProvider::Kaspi,
            PaymentMethod::HalykBank => PaymentProvider::Epay,
        }
    }
}

/// Payment provider, determines the endpoint family and completion flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    /// Kaspi.kz, completes via hosted redirect
    Kaspi,
    /// Halyk Epay, completes via embedded widget
    Epay,
}

/// Residency status of the payer, drives currency selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ResidencyStatus {
    Resident,
    NonResident,
}

/// Payment currency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Kzt,
    Usd,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Kzt => "₸",
            Currency::Usd => "$",
        }
    }
}

/// Value of an additional form field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AdditionalValue {
    Checked(bool),
    Text(String),
}

impl From<bool> for AdditionalValue {
    fn from(v: bool) -> Self {
        AdditionalValue::Checked(v)
    }
}

impl From<String> for AdditionalValue {
    fn from(v: String) -> Self {
        AdditionalValue::Text(v)
    }
}

impl From<&str> for AdditionalValue {
    fn from(v: &str) -> Self {
        AdditionalValue::Text(v.to_string())
    }
}

/// Additional field values keyed by sanitized field key
pub type AdditionalValues = HashMap<String, AdditionalValue>;

/// Payload for `/orders/public/{kaspi,epay}` (priced event departments)
///
/// Carries no amount, the backend prices the event and applies the promo
/// discount itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardOrderRequest {
    pub fullname: String,
    pub email: String,
    pub cellphone: String,
    pub promo_code: Option<String>,
    pub event_id: String,
    pub additional: String,
    pub currency: Currency,
    pub additional_fields: AdditionalValues,
}

/// Payload for `/orders/public/{kaspi,epay}/event-custom-price`
/// (unpriced events, payer decides the amount)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomPriceOrderRequest {
    pub event_id: String,
    pub fullname: String,
    pub email: String,
    pub cellphone: String,
    pub additional: String,
    pub additional_fields: AdditionalValues,
    pub amount: f64,
    pub currency: Currency,
}

/// Payload for `/orders/public/{kaspi,epay}/self-pay`
/// (self-pay departments, no event involved)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelfPayOrderRequest {
    pub fullname: String,
    pub email: String,
    pub cellphone: String,
    pub department_id: String,
    pub additional: String,
    pub additional_fields: AdditionalValues,
    pub amount: f64,
    pub currency: Currency,
}

/// Order type as recorded by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Kaspi,
    Epay,
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Success,
    Failure,
}

/// Event snapshot embedded in order responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Order entity returned by the backend after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub cellphone: String,
    #[serde(default)]
    pub additional: String,
    #[serde(default)]
    pub additional_fields: HashMap<String, Value>,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Amount before the promo discount
    pub amount: f64,
    /// Amount actually charged
    pub final_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code_id: Option<String>,
    /// Embedded event snapshot, present on event-based orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<OrderEvent>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// OAuth material for launching the Epay widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpayAuth {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Response from any of the order creation endpoints
///
/// Kaspi responses carry `redirect_url`; Epay responses carry
/// `terminal_id` and `auth` for the widget instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<EpayAuth>,
}
