//! Shared types for the payment portal
//!
//! Everything that crosses a crate boundary lives here: the directory and
//! order models exchanged with the backend, the error code system, and the
//! backend error body format.

pub mod error;
pub mod models;
pub mod money;
pub mod response;

// Re-export commonly used types
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::{ErrorBody, ErrorDetail};
