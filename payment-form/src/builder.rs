//! Order request builder
//!
//! Maps the department kind, payment method and event pricing onto one of
//! six backend endpoints and assembles the matching payload. The variant
//! table is exhaustive, every combination the form can produce lands on
//! exactly one endpoint.

use shared::models::{
    Currency, CustomPriceOrderRequest, DepartmentType, PaymentMethod, PaymentProvider,
    ResidencyStatus, SelfPayOrderRequest, StandardOrderRequest,
};
use shared::{AppError, AppResult, ErrorCode};

use crate::session::OrderDraft;

/// One of the six order endpoints the portal exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderVariant {
    /// Kaspi, catalog-priced event
    KaspiStandard,
    /// Kaspi, payer enters the amount for a non-priced event
    KaspiCustomPrice,
    /// Kaspi, self-pay department
    KaspiSelfPay,
    /// Halyk widget, catalog-priced event
    EpayStandard,
    /// Halyk widget, payer enters the amount
    EpayCustomPrice,
    /// Halyk widget, self-pay department
    EpaySelfPay,
}

impl OrderVariant {
    /// Pick the endpoint for the current selection
    pub fn resolve(
        department_type: DepartmentType,
        method: PaymentMethod,
        priced: bool,
    ) -> OrderVariant {
        match (department_type, method.provider(), priced) {
            (DepartmentType::SelfPay, PaymentProvider::Kaspi, _) => OrderVariant::KaspiSelfPay,
            (DepartmentType::SelfPay, PaymentProvider::Epay, _) => OrderVariant::EpaySelfPay,
            (DepartmentType::EventBased, PaymentProvider::Kaspi, true) => {
                OrderVariant::KaspiStandard
            }
            (DepartmentType::EventBased, PaymentProvider::Kaspi, false) => {
                OrderVariant::KaspiCustomPrice
            }
            (DepartmentType::EventBased, PaymentProvider::Epay, true) => OrderVariant::EpayStandard,
            (DepartmentType::EventBased, PaymentProvider::Epay, false) => {
                OrderVariant::EpayCustomPrice
            }
        }
    }

    pub fn provider(&self) -> PaymentProvider {
        match self {
            OrderVariant::KaspiStandard
            | OrderVariant::KaspiCustomPrice
            | OrderVariant::KaspiSelfPay => PaymentProvider::Kaspi,
            OrderVariant::EpayStandard
            | OrderVariant::EpayCustomPrice
            | OrderVariant::EpaySelfPay => PaymentProvider::Epay,
        }
    }

    /// Endpoint path relative to the API base
    pub fn wire_path(&self) -> &'static str {
        match self {
            OrderVariant::KaspiStandard => "orders/public/kaspi",
            OrderVariant::KaspiCustomPrice => "orders/public/kaspi/event-custom-price",
            OrderVariant::KaspiSelfPay => "orders/public/kaspi/self-pay",
            OrderVariant::EpayStandard => "orders/public/epay",
            OrderVariant::EpayCustomPrice => "orders/public/epay/event-custom-price",
            OrderVariant::EpaySelfPay => "orders/public/epay/self-pay",
        }
    }

    /// Currency the order is charged in
    ///
    /// Kaspi and self-pay orders are always KZT. Catalog-priced Halyk orders
    /// follow the resolved pricing currency so a USD fallback keeps amount
    /// and currency consistent. Custom-price Halyk orders follow residency,
    /// the payer typed the amount in the currency they were shown.
    pub fn currency(&self, resolved: Currency, residency: ResidencyStatus) -> Currency {
        match self {
            OrderVariant::KaspiStandard
            | OrderVariant::KaspiCustomPrice
            | OrderVariant::KaspiSelfPay
            | OrderVariant::EpaySelfPay => Currency::Kzt,
            OrderVariant::EpayStandard => resolved,
            OrderVariant::EpayCustomPrice => match residency {
                ResidencyStatus::NonResident => Currency::Usd,
                ResidencyStatus::Resident => Currency::Kzt,
            },
        }
    }
}

/// Payload for one of the three endpoint shapes
#[derive(Debug, Clone, PartialEq)]
pub enum OrderRequest {
    Standard(StandardOrderRequest),
    CustomPrice(CustomPriceOrderRequest),
    SelfPay(SelfPayOrderRequest),
}

fn required<T>(value: Option<T>, what: &str) -> AppResult<T> {
    value.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderIncomplete, format!("{what} is required"))
    })
}

/// Assemble the payload for the resolved variant
///
/// The draft is expected to have passed validation; missing ids or amounts
/// still come back as `OrderIncomplete` rather than panicking.
pub fn build_order_request(
    variant: OrderVariant,
    draft: &OrderDraft,
    department_id: Option<&str>,
    event_id: Option<&str>,
    promo_code: Option<String>,
    currency: Currency,
) -> AppResult<OrderRequest> {
    let fullname = draft.fullname.trim().to_string();
    let email = draft.email.trim().to_string();
    let cellphone = draft.cellphone.trim().to_string();
    let additional = draft.additional.clone().unwrap_or_default();
    let additional_fields = draft.additional_fields.clone();

    let request = match variant {
        OrderVariant::KaspiStandard | OrderVariant::EpayStandard => {
            let event_id = required(event_id, "event")?;
            OrderRequest::Standard(StandardOrderRequest {
                fullname,
                email,
                cellphone,
                promo_code,
                event_id: event_id.to_string(),
                additional,
                currency,
                additional_fields,
            })
        }
        OrderVariant::KaspiCustomPrice | OrderVariant::EpayCustomPrice => {
            let event_id = required(event_id, "event")?;
            let amount = required(draft.amount, "amount")?;
            OrderRequest::CustomPrice(CustomPriceOrderRequest {
                event_id: event_id.to_string(),
                fullname,
                email,
                cellphone,
                additional,
                additional_fields,
                amount,
                currency,
            })
        }
        OrderVariant::KaspiSelfPay | OrderVariant::EpaySelfPay => {
            let department_id = required(department_id, "department")?;
            let amount = required(draft.amount, "amount")?;
            OrderRequest::SelfPay(SelfPayOrderRequest {
                fullname,
                email,
                cellphone,
                department_id: department_id.to_string(),
                additional,
                additional_fields,
                amount,
                currency,
            })
        }
    };

    Ok(request)
}
