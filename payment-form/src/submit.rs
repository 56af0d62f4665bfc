//! Submission outcomes
//!
//! Shapes the backend's payment response into what the shell does next:
//! navigate to the Kaspi payment page, or open the Halyk widget with a
//! fully assembled launch config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use shared::models::{Currency, EpayAuth, Order, PaymentResponse};
use shared::{AppError, AppResult, ErrorCode};

/// Pause before navigating to the provider page, long enough for the
/// confirmation state to paint
pub const REDIRECT_DELAY: Duration = Duration::from_millis(300);

/// Language the widget is launched in
pub const WIDGET_LANGUAGE: &str = "RUS";

/// Return URLs the payer lands on after the provider finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnUrls {
    pub success_url: String,
    pub fail_url: String,
}

impl ReturnUrls {
    pub fn new(success_url: impl Into<String>, fail_url: impl Into<String>) -> Self {
        Self {
            success_url: success_url.into(),
            fail_url: fail_url.into(),
        }
    }
}

/// Everything the Halyk widget needs to open
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetLaunch {
    pub terminal_id: String,
    pub auth: EpayAuth,
    /// Order id as the provider-facing invoice number
    pub invoice_id: String,
    pub amount: f64,
    pub currency: Currency,
    /// Payer email, used as the provider account reference
    pub account_id: String,
    pub back_link: String,
    pub failure_back_link: String,
    pub post_link: String,
    pub failure_post_link: String,
    pub description: String,
    pub language: String,
    pub order: Order,
}

/// What the shell does after a successful submission
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Navigate to the provider payment page after [`REDIRECT_DELAY`]
    Redirect { url: String, order: Order },
    /// Open the widget overlay
    Widget(WidgetLaunch),
}

/// Shape a Kaspi response into a redirect outcome
///
/// A missing or empty redirect URL means the backend accepted the order but
/// gave the payer nowhere to go, surfaced as `RedirectMissing`.
pub fn redirect_outcome(response: PaymentResponse) -> AppResult<SubmitOutcome> {
    match response.redirect_url {
        Some(url) if !url.trim().is_empty() => Ok(SubmitOutcome::Redirect {
            url,
            order: response.order,
        }),
        _ => Err(AppError::new(ErrorCode::RedirectMissing)
            .with_detail("order_id", response.order.id)),
    }
}

/// Shape an Epay response into a widget launch
pub fn widget_outcome(response: PaymentResponse, urls: &ReturnUrls) -> AppResult<SubmitOutcome> {
    let order = response.order;

    let Some(terminal_id) = response.terminal_id else {
        return Err(AppError::with_message(
            ErrorCode::WidgetAuthMissing,
            "Payment response is missing the terminal id",
        )
        .with_detail("order_id", order.id));
    };
    let Some(auth) = response.auth else {
        return Err(AppError::new(ErrorCode::WidgetAuthMissing)
            .with_detail("order_id", order.id));
    };

    let description = format!(
        "Оплата за {}",
        order
            .event
            .as_ref()
            .and_then(|event| event.title.as_deref())
            .unwrap_or_default()
    );

    Ok(SubmitOutcome::Widget(WidgetLaunch {
        terminal_id,
        auth,
        invoice_id: order.id.to_string(),
        amount: order.final_amount,
        currency: order.currency.unwrap_or_default(),
        account_id: order.email.clone(),
        back_link: urls.success_url.clone(),
        failure_back_link: urls.fail_url.clone(),
        post_link: format!("{}/post", urls.success_url),
        failure_post_link: format!("{}/post", urls.fail_url),
        description,
        language: WIDGET_LANGUAGE.to_string(),
        order,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderEvent, OrderStatus, OrderType};
    use std::collections::HashMap;

    fn test_order() -> Order {
        Order {
            id: 4217,
            fullname: "Aigerim Bekova".to_string(),
            email: "aigerim@example.com".to_string(),
            cellphone: "+7 701 555 0101".to_string(),
            additional: String::new(),
            additional_fields: HashMap::new(),
            order_type: OrderType::Kaspi,
            status: OrderStatus::Pending,
            amount: 10000.0,
            final_amount: 8000.0,
            currency: Some(Currency::Kzt),
            department_id: Some("dep-1".to_string()),
            event_id: Some("ev-1".to_string()),
            promo_code_id: None,
            event: Some(OrderEvent {
                id: Some("ev-1".to_string()),
                title: Some("Climate Summit".to_string()),
            }),
            created_at: "2026-03-02T10:00:00Z".to_string(),
            updated_at: None,
        }
    }

    fn urls() -> ReturnUrls {
        ReturnUrls::new(
            "https://pay.example.com/success",
            "https://pay.example.com/fail",
        )
    }

    #[test]
    fn test_redirect_outcome() {
        let response = PaymentResponse {
            redirect_url: Some("https://kaspi.kz/pay/4217".to_string()),
            order: test_order(),
            terminal_id: None,
            auth: None,
        };

        let SubmitOutcome::Redirect { url, order } = redirect_outcome(response).unwrap() else {
            panic!("expected redirect");
        };
        assert_eq!(url, "https://kaspi.kz/pay/4217");
        assert_eq!(order.id, 4217);
    }

    #[test]
    fn test_missing_redirect_url_is_an_error() {
        for redirect_url in [None, Some(String::new()), Some("   ".to_string())] {
            let response = PaymentResponse {
                redirect_url,
                order: test_order(),
                terminal_id: None,
                auth: None,
            };
            let err = redirect_outcome(response).unwrap_err();
            assert_eq!(err.code, ErrorCode::RedirectMissing);
        }
    }

    #[test]
    fn test_widget_outcome_assembles_launch() {
        let response = PaymentResponse {
            redirect_url: None,
            order: test_order(),
            terminal_id: Some("TERM-01".to_string()),
            auth: Some(EpayAuth {
                access_token: "tok".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: Some(1200),
                scope: None,
            }),
        };

        let SubmitOutcome::Widget(launch) = widget_outcome(response, &urls()).unwrap() else {
            panic!("expected widget");
        };
        assert_eq!(launch.terminal_id, "TERM-01");
        assert_eq!(launch.invoice_id, "4217");
        assert_eq!(launch.amount, 8000.0);
        assert_eq!(launch.currency, Currency::Kzt);
        assert_eq!(launch.account_id, "aigerim@example.com");
        assert_eq!(launch.back_link, "https://pay.example.com/success");
        assert_eq!(launch.failure_back_link, "https://pay.example.com/fail");
        assert_eq!(launch.post_link, "https://pay.example.com/success/post");
        assert_eq!(launch.failure_post_link, "https://pay.example.com/fail/post");
        assert_eq!(launch.description, "Оплата за Climate Summit");
        assert_eq!(launch.language, "RUS");
    }

    #[test]
    fn test_widget_description_tolerates_missing_event() {
        let mut order = test_order();
        order.event = None;
        let response = PaymentResponse {
            redirect_url: None,
            order,
            terminal_id: Some("TERM-01".to_string()),
            auth: Some(EpayAuth {
                access_token: "tok".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: None,
                scope: None,
            }),
        };

        let SubmitOutcome::Widget(launch) = widget_outcome(response, &urls()).unwrap() else {
            panic!("expected widget");
        };
        assert_eq!(launch.description, "Оплата за ");
    }

    #[test]
    fn test_widget_without_auth_is_an_error() {
        let response = PaymentResponse {
            redirect_url: None,
            order: test_order(),
            terminal_id: Some("TERM-01".to_string()),
            auth: None,
        };
        let err = widget_outcome(response, &urls()).unwrap_err();
        assert_eq!(err.code, ErrorCode::WidgetAuthMissing);

        let response = PaymentResponse {
            redirect_url: None,
            order: test_order(),
            terminal_id: None,
            auth: Some(EpayAuth {
                access_token: "tok".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: None,
                scope: None,
            }),
        };
        let err = widget_outcome(response, &urls()).unwrap_err();
        assert_eq!(err.code, ErrorCode::WidgetAuthMissing);
    }

    #[test]
    fn test_missing_currency_defaults_to_kzt() {
        let mut order = test_order();
        order.currency = None;
        let response = PaymentResponse {
            redirect_url: None,
            order,
            terminal_id: Some("TERM-01".to_string()),
            auth: Some(EpayAuth {
                access_token: "tok".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: None,
                scope: None,
            }),
        };

        let SubmitOutcome::Widget(launch) = widget_outcome(response, &urls()).unwrap() else {
            panic!("expected widget");
        };
        assert_eq!(launch.currency, Currency::Kzt);
    }
}
