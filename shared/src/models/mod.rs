//! Data models
//!
//! Shared between the form engine and the portal client. All types mirror
//! the backend wire format exactly, including field naming.

pub mod department;
pub mod event;
pub mod order;
pub mod promo;

// Re-exports
pub use department::*;
pub use event::*;
pub use order::*;
pub use promo::*;
