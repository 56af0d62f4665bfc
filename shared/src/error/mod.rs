//! Unified error handling system
//!
//! Provides structured error codes, categories, and HTTP status mapping
//! shared by every crate in the workspace:
//!
//! - [`ErrorCode`]: numeric error codes organized by category
//!   - 0xxx: General errors
//!   - 1xxx: Directory errors (departments, events)
//!   - 2xxx: Promo code errors
//!   - 4xxx: Order errors
//!   - 5xxx: Provider errors (Kaspi, Epay)
//!   - 9xxx: System errors
//! - [`ErrorCategory`]: coarse classification derived from the code range
//! - [`AppError`]: the application error type carrying a code, a message,
//!   and optional structured details

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
