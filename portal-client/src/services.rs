//! Typed portal endpoints
//!
//! The operations the form engine consumes, as methods on [`PortalClient`]
//! plus implementations of the engine's backend seams. Each concern maps
//! client failures onto its own error range: directory lookups, promo
//! verification and order creation all surface differently to the payer.

use async_trait::async_trait;
use serde::Serialize;

use payment_form::builder::OrderVariant;
use payment_form::traits::{DirectoryService, OrderGateway, PromoVerifier};
use shared::models::{
    CustomPriceOrderRequest, Department, Event, EventPage, EventQuery, PaymentResponse,
    SelfPayOrderRequest, StandardOrderRequest, VerifiedPromo, VerifyPromoRequest,
};
use shared::{AppError, AppResult, ErrorCode};

use crate::{ClientError, ClientResult, PortalClient};

impl PortalClient {
    /// Departments open to public registration
    pub async fn departments(&self) -> ClientResult<Vec<Department>> {
        self.get("departments/public").await
    }

    /// Events of one department
    pub async fn department_events(&self, department_id: &str) -> ClientResult<Vec<Event>> {
        self.get(&format!("events/public/{department_id}")).await
    }

    /// Search events, paginated
    pub async fn events(&self, query: &EventQuery) -> ClientResult<EventPage> {
        self.get_query("events", query).await
    }

    /// Verify a promo code against an event
    pub async fn verify_promo(&self, request: &VerifyPromoRequest) -> ClientResult<VerifiedPromo> {
        self.post("promo-codes/verify", request).await
    }

    async fn submit_order<B: Serialize + Sync>(
        &self,
        path: &str,
        payload: &B,
    ) -> AppResult<PaymentResponse> {
        tracing::debug!(path, "creating order");
        let result: ClientResult<PaymentResponse> = self.post(path, payload).await;
        result.map_err(order_error)
    }
}

/// The backend refusing an order is a provider rejection, whatever the
/// status; the detail message is what the payer sees.
fn order_error(err: ClientError) -> AppError {
    match err {
        ClientError::BadRequest(msg) | ClientError::Validation(msg) => {
            AppError::provider_rejected(msg)
        }
        other => other.into(),
    }
}

/// Any 400 on verification means the code is not valid for the event
fn promo_error(err: ClientError) -> AppError {
    match err {
        ClientError::BadRequest(_) => AppError::promo_rejected(),
        other => other.into(),
    }
}

fn directory_error(err: ClientError, not_found: ErrorCode) -> AppError {
    match err {
        ClientError::NotFound(msg) => AppError::with_message(not_found, msg),
        ClientError::Server(msg) => AppError::with_message(ErrorCode::DirectoryUnavailable, msg),
        ClientError::Http(e) if !e.is_timeout() => {
            AppError::with_message(ErrorCode::DirectoryUnavailable, e.to_string())
        }
        other => other.into(),
    }
}

#[async_trait]
impl DirectoryService for PortalClient {
    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.departments()
            .await
            .map_err(|e| directory_error(e, ErrorCode::DepartmentNotFound))
    }

    async fn list_events(&self, department_id: &str) -> AppResult<Vec<Event>> {
        self.department_events(department_id)
            .await
            .map_err(|e| directory_error(e, ErrorCode::DepartmentNotFound))
    }

    async fn search_events(&self, query: &EventQuery) -> AppResult<EventPage> {
        self.events(query)
            .await
            .map_err(|e| directory_error(e, ErrorCode::EventNotFound))
    }
}

#[async_trait]
impl PromoVerifier for PortalClient {
    async fn verify(&self, request: &VerifyPromoRequest) -> AppResult<VerifiedPromo> {
        self.verify_promo(request).await.map_err(promo_error)
    }
}

#[async_trait]
impl OrderGateway for PortalClient {
    async fn create_kaspi(&self, request: &StandardOrderRequest) -> AppResult<PaymentResponse> {
        self.submit_order(OrderVariant::KaspiStandard.wire_path(), request)
            .await
    }

    async fn create_kaspi_custom_price(
        &self,
        request: &CustomPriceOrderRequest,
    ) -> AppResult<PaymentResponse> {
        self.submit_order(OrderVariant::KaspiCustomPrice.wire_path(), request)
            .await
    }

    async fn create_kaspi_self_pay(
        &self,
        request: &SelfPayOrderRequest,
    ) -> AppResult<PaymentResponse> {
        self.submit_order(OrderVariant::KaspiSelfPay.wire_path(), request)
            .await
    }

    async fn create_epay(&self, request: &StandardOrderRequest) -> AppResult<PaymentResponse> {
        self.submit_order(OrderVariant::EpayStandard.wire_path(), request)
            .await
    }

    async fn create_epay_custom_price(
        &self,
        request: &CustomPriceOrderRequest,
    ) -> AppResult<PaymentResponse> {
        self.submit_order(OrderVariant::EpayCustomPrice.wire_path(), request)
            .await
    }

    async fn create_epay_self_pay(
        &self,
        request: &SelfPayOrderRequest,
    ) -> AppResult<PaymentResponse> {
        self.submit_order(OrderVariant::EpaySelfPay.wire_path(), request)
            .await
    }
}
