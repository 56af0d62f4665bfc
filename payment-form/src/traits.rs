//! Collaborator seams consumed by the form engine
//!
//! The engine never talks HTTP itself. Directory lookups, promo verification,
//! order creation and page navigation all go through these traits so the
//! portal client (or a test fake) can be plugged in behind them.

use async_trait::async_trait;

use shared::AppResult;
use shared::models::{
    CustomPriceOrderRequest, Department, Event, EventPage, EventQuery, PaymentResponse,
    SelfPayOrderRequest, StandardOrderRequest, VerifiedPromo, VerifyPromoRequest,
};

/// Public directory lookups: departments, their events, typeahead search
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// List departments open for public payment
    async fn list_departments(&self) -> AppResult<Vec<Department>>;

    /// List the public events of one department
    async fn list_events(&self, department_id: &str) -> AppResult<Vec<Event>>;

    /// Search events, typically by title (paginated)
    async fn search_events(&self, query: &EventQuery) -> AppResult<EventPage>;
}

/// Promo code verification against a selected event
///
/// A backend rejection (HTTP 400) surfaces as a promo rejection error;
/// anything else is a network or system error.
#[async_trait]
pub trait PromoVerifier: Send + Sync {
    async fn verify(&self, request: &VerifyPromoRequest) -> AppResult<VerifiedPromo>;
}

/// Provider order creation, one method per public endpoint
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// `orders/public/kaspi`
    async fn create_kaspi(&self, request: &StandardOrderRequest) -> AppResult<PaymentResponse>;

    /// `orders/public/kaspi/event-custom-price`
    async fn create_kaspi_custom_price(
        &self,
        request: &CustomPriceOrderRequest,
    ) -> AppResult<PaymentResponse>;

    /// `orders/public/kaspi/self-pay`
    async fn create_kaspi_self_pay(
        &self,
        request: &SelfPayOrderRequest,
    ) -> AppResult<PaymentResponse>;

    /// `orders/public/epay`
    async fn create_epay(&self, request: &StandardOrderRequest) -> AppResult<PaymentResponse>;

    /// `orders/public/epay/event-custom-price`
    async fn create_epay_custom_price(
        &self,
        request: &CustomPriceOrderRequest,
    ) -> AppResult<PaymentResponse>;

    /// `orders/public/epay/self-pay`
    async fn create_epay_self_pay(
        &self,
        request: &SelfPayOrderRequest,
    ) -> AppResult<PaymentResponse>;
}

/// Host shell the engine drives after a successful submission
#[async_trait]
pub trait PortalShell: Send + Sync {
    /// Full-page navigation to the provider checkout URL
    async fn navigate(&self, url: &str);
}
