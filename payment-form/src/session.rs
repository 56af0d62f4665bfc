//! Form session
//!
//! Single owner of everything the payment form tracks between page load and
//! payment: the payer's draft, the department and event selection, resolved
//! pricing, the promo state and the submission flags. The shell renders from
//! this state and feeds every input change back through the setters.
//!
//! ```text
//! select department ──> select event ──> (verify promo) ──> submit
//!                                                             │
//!                                  Kaspi ◄───────────────────┴────────────► Halyk
//!                                  delay, navigate                  widget overlay
//! ```
//!
//! `submit` refuses re-entry while a submission is in flight or the widget
//! is open, so a double click can never create two orders.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use shared::models::{
    AdditionalValue, AdditionalValues, Department, Event, FieldType, Order, PaymentMethod,
    PaymentProvider, PaymentResponse, ResidencyStatus, VerifiedPromo,
};
use shared::{AppError, AppResult, ErrorCode};

use crate::builder::{self, OrderRequest, OrderVariant};
use crate::fields::{FieldDescriptor, derive_descriptors, normalize_date};
use crate::pricing::PricingState;
use crate::promo::PromoState;
use crate::submit::{self, REDIRECT_DELAY, ReturnUrls, SubmitOutcome, WidgetLaunch};
use crate::traits::{DirectoryService, OrderGateway, PortalShell, PromoVerifier};
use crate::validation;

/// Payer-entered form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub fullname: String,
    pub email: String,
    pub cellphone: String,
    /// Free-form comment, absent until the payer types one
    pub additional: Option<String>,
    /// Payer-entered amount for self-pay and custom-price orders
    pub amount: Option<f64>,
    /// Department-defined extras, only touched fields are present
    pub additional_fields: AdditionalValues,
}

/// State machine behind one payment form
pub struct FormSession {
    directory: Arc<dyn DirectoryService>,
    promo_verifier: Arc<dyn PromoVerifier>,
    gateway: Arc<dyn OrderGateway>,
    shell: Arc<dyn PortalShell>,
    urls: ReturnUrls,

    draft: OrderDraft,
    department: Option<Department>,
    event: Option<Event>,
    fields: Vec<FieldDescriptor>,
    method: PaymentMethod,
    residency: Option<ResidencyStatus>,
    pricing: PricingState,
    promo: PromoState,

    submitting: bool,
    show_widget: bool,
    widget: Option<WidgetLaunch>,
    last_order: Option<Order>,
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("department", &self.department.as_ref().map(|d| &d.id))
            .field("event", &self.event.as_ref().map(|e| &e.id))
            .field("method", &self.method)
            .field("residency", &self.residency)
            .field("submitting", &self.submitting)
            .field("show_widget", &self.show_widget)
            .finish()
    }
}

impl FormSession {
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        promo_verifier: Arc<dyn PromoVerifier>,
        gateway: Arc<dyn OrderGateway>,
        shell: Arc<dyn PortalShell>,
        urls: ReturnUrls,
    ) -> Self {
        Self {
            directory,
            promo_verifier,
            gateway,
            shell,
            urls,
            draft: OrderDraft::default(),
            department: None,
            event: None,
            fields: Vec::new(),
            method: PaymentMethod::KaspiBank,
            residency: None,
            pricing: PricingState::new(),
            promo: PromoState::new(),
            submitting: false,
            show_widget: false,
            widget: None,
            last_order: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn department(&self) -> Option<&Department> {
        self.department.as_ref()
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    /// Extra field descriptors for the selected department, in label order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn residency(&self) -> Option<ResidencyStatus> {
        self.residency
    }

    pub fn pricing(&self) -> &PricingState {
        &self.pricing
    }

    pub fn promo(&self) -> &PromoState {
        &self.promo
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn widget_visible(&self) -> bool {
        self.show_widget
    }

    pub fn widget(&self) -> Option<&WidgetLaunch> {
        self.widget.as_ref()
    }

    /// Order created by the last successful submission
    pub fn last_order(&self) -> Option<&Order> {
        self.last_order.as_ref()
    }

    // ── Directory loaders ────────────────────────────────────

    pub async fn load_departments(&self) -> AppResult<Vec<Department>> {
        self.directory.list_departments().await
    }

    /// Events of the selected department, empty without a selection
    pub async fn load_events(&self) -> AppResult<Vec<Event>> {
        let Some(department) = self.department.as_ref() else {
            return Ok(Vec::new());
        };
        self.directory.list_events(&department.id).await
    }

    // ── Draft setters ────────────────────────────────────────

    pub fn set_fullname(&mut self, value: impl Into<String>) {
        self.draft.fullname = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
    }

    pub fn set_cellphone(&mut self, value: impl Into<String>) {
        self.draft.cellphone = value.into();
    }

    pub fn set_additional(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.draft.additional = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.draft.amount = Some(amount);
    }

    pub fn set_promo_input(&mut self, code: impl Into<String>) {
        self.promo.set_input(code);
    }

    /// Store a text or date extra field
    ///
    /// Date fields are normalized to `YYYY-MM-DD`. Input that does not parse
    /// is kept as typed so the payer's value is never silently dropped.
    pub fn set_additional_text(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.draft.additional_fields.remove(name);
            return;
        }
        let stored = match self.field_type_of(name) {
            Some(FieldType::Date) => match normalize_date(&value) {
                Some(normalized) => normalized,
                None => {
                    tracing::warn!(field = name, "unrecognized date input kept as typed");
                    value
                }
            },
            _ => value,
        };
        self.draft
            .additional_fields
            .insert(name.to_string(), AdditionalValue::from(stored));
    }

    pub fn set_additional_checked(&mut self, name: &str, checked: bool) {
        self.draft
            .additional_fields
            .insert(name.to_string(), AdditionalValue::from(checked));
    }

    fn field_type_of(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.field_type)
    }

    // ── Selection ────────────────────────────────────────────

    /// Select a department, clearing event, promo, pricing and extras
    pub fn select_department(&mut self, department: Department) {
        tracing::debug!(department_id = %department.id, "department selected");
        self.fields = derive_descriptors(&department);
        self.draft.additional_fields.clear();
        self.draft.amount = None;
        self.event = None;
        self.promo.reset();
        self.pricing.reset();
        self.department = Some(department);
    }

    /// Select an event and resolve its price for the current residency
    ///
    /// A previously applied promo belongs to the old event and is dropped.
    pub fn select_event(&mut self, event: Event) {
        tracing::debug!(event_id = %event.id, priced = event.priced, "event selected");
        self.promo.reset();
        self.pricing.clear_discount();
        self.pricing
            .resolve_event(&event, self.residency.unwrap_or(ResidencyStatus::Resident));
        if event.priced {
            self.draft.amount = None;
        }
        self.event = Some(event);
    }

    /// Switch residency and re-resolve the selected event's price
    ///
    /// An applied promo survives the switch, the discount is recomputed
    /// against the new base price.
    pub fn set_residency(&mut self, residency: ResidencyStatus) {
        self.residency = Some(residency);
        if let Some(event) = self.event.as_ref() {
            self.pricing.resolve_event(event, residency);
        }
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    // ── Promo ────────────────────────────────────────────────

    /// Verify the typed promo code against the backend
    ///
    /// The discount and the applied code change together on success. On any
    /// failure both are left exactly as they were.
    pub async fn verify_promo(&mut self) -> AppResult<VerifiedPromo> {
        let request = self.promo.prepare_request(self.event.as_ref())?;
        tracing::debug!(event_id = %request.event_id, "verifying promo code");

        match self.promo_verifier.verify(&request).await {
            Ok(verified) => {
                tracing::info!(discount = verified.discount, "promo code applied");
                self.pricing.apply_discount(verified.discount);
                self.promo.apply(verified.clone());
                Ok(verified)
            }
            Err(err) => {
                tracing::warn!(code = %err.code, "promo verification failed");
                Err(err)
            }
        }
    }

    /// Drop the applied promo and restore the undiscounted price
    pub fn clear_promo(&mut self) {
        self.promo.clear_applied();
        self.pricing.clear_discount();
    }

    // ── Submission ───────────────────────────────────────────

    /// Validate the draft, create the order and hand back what to do next
    ///
    /// Kaspi orders end in a delayed navigation to the provider page; the
    /// in-flight flag stays up because the page is going away. Halyk orders
    /// open the widget overlay, which gates resubmission until it is closed.
    pub async fn submit(&mut self) -> AppResult<SubmitOutcome> {
        // 1. Refuse while a submission or the widget is already in flight
        if self.submitting || self.show_widget {
            return Err(AppError::submission_in_flight());
        }

        // 2. Validate the whole draft, collecting every violation
        let department_type = self.department.as_ref().map(|d| d.department_type);
        validation::ensure_valid(&self.draft, department_type, self.event.as_ref())?;

        // 3. Kaspi cannot charge non-residents in USD
        if self.method == PaymentMethod::KaspiBank
            && self.residency == Some(ResidencyStatus::NonResident)
        {
            return Err(AppError::unsupported_combination(
                "Kaspi Bank does not support USD payments. Select HalykBank for non-resident payments or switch to resident",
            ));
        }

        // 4. Resolve the endpoint and assemble the payload
        let Some(department) = self.department.as_ref() else {
            return Err(AppError::with_message(
                ErrorCode::OrderIncomplete,
                "department is required",
            ));
        };
        let priced = self.event.as_ref().map(|event| event.priced).unwrap_or(true);
        let variant = OrderVariant::resolve(department.department_type, self.method, priced);
        let residency = self.residency.unwrap_or(ResidencyStatus::Resident);
        let currency = variant.currency(self.pricing.currency(), residency);
        let request = builder::build_order_request(
            variant,
            &self.draft,
            Some(department.id.as_str()),
            self.event.as_ref().map(|event| event.id.as_str()),
            self.promo.applied_code(),
            currency,
        )?;

        // 5. Fire the request, one attempt id per call for log correlation
        let attempt = Uuid::new_v4();
        tracing::info!(%attempt, path = variant.wire_path(), "submitting order");
        self.submitting = true;
        let response = match self.create_order(variant, &request).await {
            Ok(response) => response,
            Err(err) => {
                self.submitting = false;
                tracing::warn!(%attempt, code = %err.code, "order submission failed");
                return Err(err);
            }
        };

        // 6. Shape the provider outcome and settle the flags
        let outcome = match variant.provider() {
            PaymentProvider::Kaspi => submit::redirect_outcome(response),
            PaymentProvider::Epay => submit::widget_outcome(response, &self.urls),
        };
        match outcome {
            Ok(SubmitOutcome::Redirect { url, order }) => {
                // Gate stays closed, the shell is navigating away
                self.last_order = Some(order.clone());
                tracing::info!(%attempt, order_id = order.id, "redirecting to payment page");
                tokio::time::sleep(REDIRECT_DELAY).await;
                self.shell.navigate(&url).await;
                Ok(SubmitOutcome::Redirect { url, order })
            }
            Ok(SubmitOutcome::Widget(launch)) => {
                self.submitting = false;
                self.show_widget = true;
                self.last_order = Some(launch.order.clone());
                self.widget = Some(launch.clone());
                tracing::info!(%attempt, order_id = launch.order.id, "opening payment widget");
                Ok(SubmitOutcome::Widget(launch))
            }
            Err(err) => {
                self.submitting = false;
                tracing::warn!(%attempt, code = %err.code, "payment response unusable");
                Err(err)
            }
        }
    }

    async fn create_order(
        &self,
        variant: OrderVariant,
        request: &OrderRequest,
    ) -> AppResult<PaymentResponse> {
        match (variant.provider(), request) {
            (PaymentProvider::Kaspi, OrderRequest::Standard(request)) => {
                self.gateway.create_kaspi(request).await
            }
            (PaymentProvider::Kaspi, OrderRequest::CustomPrice(request)) => {
                self.gateway.create_kaspi_custom_price(request).await
            }
            (PaymentProvider::Kaspi, OrderRequest::SelfPay(request)) => {
                self.gateway.create_kaspi_self_pay(request).await
            }
            (PaymentProvider::Epay, OrderRequest::Standard(request)) => {
                self.gateway.create_epay(request).await
            }
            (PaymentProvider::Epay, OrderRequest::CustomPrice(request)) => {
                self.gateway.create_epay_custom_price(request).await
            }
            (PaymentProvider::Epay, OrderRequest::SelfPay(request)) => {
                self.gateway.create_epay_self_pay(request).await
            }
        }
    }

    /// Close the widget overlay, re-enabling submission
    pub fn close_widget(&mut self) {
        self.show_widget = false;
        self.widget = None;
    }

    /// Wipe the session back to its initial state, keeping the collaborators
    pub fn reset(&mut self) {
        tracing::debug!("form session reset");
        self.draft = OrderDraft::default();
        self.department = None;
        self.event = None;
        self.fields.clear();
        self.method = PaymentMethod::KaspiBank;
        self.residency = None;
        self.pricing.reset();
        self.promo.reset();
        self.submitting = false;
        self.show_widget = false;
        self.widget = None;
        self.last_order = None;
    }
}
