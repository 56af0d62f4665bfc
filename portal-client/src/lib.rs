//! Portal Client - HTTP client for the registration portal backend
//!
//! Thin typed wrapper over the portal's public REST API. Implements the
//! form engine's backend seams, so a [`PortalClient`] slots straight into
//! `payment_form::FormSession`.

pub mod config;
pub mod error;
pub mod http;
pub mod services;

pub use config::PortalConfig;
pub use error::{ClientError, ClientResult};
pub use http::PortalClient;
