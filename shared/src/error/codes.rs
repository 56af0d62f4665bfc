//! Unified error codes for the payment portal
//!
//! This module defines all error codes used across the form engine, the
//! portal client, and any frontend consuming serialized errors.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Directory errors (departments, events)
//! - 2xxx: Promo code errors
//! - 4xxx: Order errors
//! - 5xxx: Provider errors (Kaspi, Epay)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 4,
    /// Required field missing
    RequiredField = 5,
    /// Value out of range
    ValueOutOfRange = 6,

    // ==================== 1xxx: Directory ====================
    /// Department not found
    DepartmentNotFound = 1001,
    /// Event not found
    EventNotFound = 1002,
    /// Directory listing unavailable
    DirectoryUnavailable = 1003,

    // ==================== 2xxx: Promo ====================
    /// Promo code rejected by the backend
    PromoRejected = 2001,
    /// Promo code input is empty
    PromoCodeEmpty = 2002,
    /// No event selected for promo verification
    PromoEventMissing = 2003,
    /// Selected event does not take promo codes
    PromoNotApplicable = 2004,

    // ==================== 4xxx: Order ====================
    /// A submission is already in flight
    SubmissionInFlight = 4001,
    /// Department type and payment method do not form a known variant
    UnsupportedCombination = 4002,
    /// Order form is incomplete
    OrderIncomplete = 4003,

    // ==================== 5xxx: Provider ====================
    /// Payment provider rejected the order
    ProviderRejected = 5001,
    /// Provider response carried no redirect URL
    RedirectMissing = 5002,
    /// Provider response carried no widget auth token
    WidgetAuthMissing = 5003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Operation timeout
    TimeoutError = 9003,
    /// Response could not be parsed
    InvalidResponse = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Directory
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::DirectoryUnavailable => "Directory listing is unavailable",

            // Promo
            ErrorCode::PromoRejected => "Invalid promo code",
            ErrorCode::PromoCodeEmpty => "Promo code is empty",
            ErrorCode::PromoEventMissing => "Select an event before applying a promo code",
            ErrorCode::PromoNotApplicable => "Promo codes are not available for this event",

            // Order
            ErrorCode::SubmissionInFlight => "A submission is already in progress",
            ErrorCode::UnsupportedCombination => "Unsupported department and payment method",
            ErrorCode::OrderIncomplete => "Order form is incomplete",

            // Provider
            ErrorCode::ProviderRejected => "Payment provider rejected the order",
            ErrorCode::RedirectMissing => "Payment response carried no redirect URL",
            ErrorCode::WidgetAuthMissing => "Payment response carried no widget credentials",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::InvalidResponse => "Response could not be parsed",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::InvalidRequest),
            5 => Ok(ErrorCode::RequiredField),
            6 => Ok(ErrorCode::ValueOutOfRange),

            // Directory
            1001 => Ok(ErrorCode::DepartmentNotFound),
            1002 => Ok(ErrorCode::EventNotFound),
            1003 => Ok(ErrorCode::DirectoryUnavailable),

            // Promo
            2001 => Ok(ErrorCode::PromoRejected),
            2002 => Ok(ErrorCode::PromoCodeEmpty),
            2003 => Ok(ErrorCode::PromoEventMissing),
            2004 => Ok(ErrorCode::PromoNotApplicable),

            // Order
            4001 => Ok(ErrorCode::SubmissionInFlight),
            4002 => Ok(ErrorCode::UnsupportedCombination),
            4003 => Ok(ErrorCode::OrderIncomplete),

            // Provider
            5001 => Ok(ErrorCode::ProviderRejected),
            5002 => Ok(ErrorCode::RedirectMissing),
            5003 => Ok(ErrorCode::WidgetAuthMissing),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::TimeoutError),
            9004 => Ok(ErrorCode::InvalidResponse),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
