//! Payment form engine
//!
//! Headless state and orchestration for the public event-registration
//! payment form: department and event selection, residency-aware pricing,
//! promo verification, order submission against the six portal endpoints
//! and the provider handoff (Kaspi redirect or Halyk widget).
//!
//! The shell owns rendering and navigation; everything it needs to draw or
//! decide lives in [`session::FormSession`] and the [`lookup::EventTypeahead`]
//! worker. Backend access goes through the traits in [`traits`], so the
//! engine is testable without a portal.

pub mod builder;
pub mod fields;
pub mod lookup;
pub mod pricing;
pub mod promo;
pub mod session;
pub mod submit;
pub mod traits;
pub mod validation;

pub use builder::{OrderRequest, OrderVariant};
pub use lookup::EventTypeahead;
pub use session::{FormSession, OrderDraft};
pub use submit::{ReturnUrls, SubmitOutcome, WidgetLaunch};
