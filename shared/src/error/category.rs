//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Directory errors
/// - 2xxx: Promo errors
/// - 4xxx: Order errors
/// - 5xxx: Provider errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Directory errors (1xxx)
    Directory,
    /// Promo code errors (2xxx)
    Promo,
    /// Order errors (4xxx)
    Order,
    /// Provider errors (5xxx)
    Provider,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Directory,
            2000..3000 => Self::Promo,
            3000..5000 => Self::Order,
            5000..6000 => Self::Provider,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Directory => "directory",
            Self::Promo => "promo",
            Self::Order => "order",
            Self::Provider => "provider",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(4), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);

        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Directory);
        assert_eq!(ErrorCategory::from_code(1999), ErrorCategory::Directory);

        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Promo);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Provider);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(
            ErrorCode::DepartmentNotFound.category(),
            ErrorCategory::Directory
        );
        assert_eq!(ErrorCode::PromoRejected.category(), ErrorCategory::Promo);
        assert_eq!(
            ErrorCode::SubmissionInFlight.category(),
            ErrorCategory::Order
        );
        assert_eq!(
            ErrorCode::ProviderRejected.category(),
            ErrorCategory::Provider
        );
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::General.name(), "general");
        assert_eq!(ErrorCategory::Directory.name(), "directory");
        assert_eq!(ErrorCategory::Promo.name(), "promo");
        assert_eq!(ErrorCategory::Order.name(), "order");
        assert_eq!(ErrorCategory::Provider.name(), "provider");
        assert_eq!(ErrorCategory::System.name(), "system");
    }

    #[test]
    fn test_category_serialize() {
        let category = ErrorCategory::Promo;
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, "\"promo\"");

        let category: ErrorCategory = serde_json::from_str("\"provider\"").unwrap();
        assert_eq!(category, ErrorCategory::Provider);
    }
}
