//! Draft validation
//!
//! Checks run over the whole draft at once and every violation is collected,
//! so the form can mark all offending fields in a single pass instead of
//! stopping at the first failure.

use shared::models::{DepartmentType, Event};
use shared::money::MAX_AMOUNT;
use shared::{AppError, AppResult};

use crate::session::OrderDraft;

// ── Field limits ─────────────────────────────────────────────

/// Maximum length for the payer's full name
pub const MAX_FULLNAME_LEN: usize = 200;

/// Maximum length for the payer's email address
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length for the payer's phone number
pub const MAX_CELLPHONE_LEN: usize = 32;

/// Maximum length for the free-form comment
pub const MAX_ADDITIONAL_LEN: usize = 500;

/// Maximum length for a promo code
pub const MAX_PROMO_CODE_LEN: usize = 64;

// ── Violations ───────────────────────────────────────────────

/// A single failed check, tied to the field it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Fold collected violations into a single validation error, with one
/// detail entry per field
pub fn violations_to_error(violations: Vec<FieldViolation>) -> AppError {
    let mut error = AppError::validation("Form validation failed");
    for violation in violations {
        error = error.with_detail(violation.field, violation.message);
    }
    error
}

// ── Checks ───────────────────────────────────────────────────

/// Require a non-empty trimmed value within the length cap
fn require_text(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: &str,
    max_len: usize,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        violations.push(FieldViolation::new(
            field,
            format!("{field} must not be empty"),
        ));
    } else if trimmed.chars().count() > max_len {
        violations.push(FieldViolation::new(
            field,
            format!(
                "{field} is too long ({} chars, max {max_len})",
                trimmed.chars().count()
            ),
        ));
    }
}

/// Loose shape check, one `@` with a dotted domain and no whitespace
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Check a payer-entered amount for custom-price and self-pay orders
pub fn check_amount(violations: &mut Vec<FieldViolation>, amount: f64) {
    if !amount.is_finite() {
        violations.push(FieldViolation::new("amount", "amount must be a number"));
    } else if amount <= 0.0 {
        violations.push(FieldViolation::new(
            "amount",
            "amount must be greater than zero",
        ));
    } else if amount > MAX_AMOUNT {
        violations.push(FieldViolation::new(
            "amount",
            format!("amount exceeds the maximum of {MAX_AMOUNT}"),
        ));
    }
}

/// Validate the full draft against the selected department and event
///
/// Returns every violation found. An empty vec means the draft is ready
/// to be turned into an order request.
pub fn validate_draft(
    draft: &OrderDraft,
    department_type: Option<DepartmentType>,
    event: Option<&Event>,
) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    require_text(&mut violations, "fullname", &draft.fullname, MAX_FULLNAME_LEN);

    let email = draft.email.trim();
    if email.is_empty() {
        violations.push(FieldViolation::new("email", "email must not be empty"));
    } else if email.chars().count() > MAX_EMAIL_LEN {
        violations.push(FieldViolation::new(
            "email",
            format!(
                "email is too long ({} chars, max {MAX_EMAIL_LEN})",
                email.chars().count()
            ),
        ));
    } else if !is_email_shaped(email) {
        violations.push(FieldViolation::new("email", "email address is not valid"));
    }

    require_text(
        &mut violations,
        "cellphone",
        &draft.cellphone,
        MAX_CELLPHONE_LEN,
    );

    if let Some(additional) = &draft.additional
        && additional.chars().count() > MAX_ADDITIONAL_LEN
    {
        violations.push(FieldViolation::new(
            "additional",
            format!(
                "additional is too long ({} chars, max {MAX_ADDITIONAL_LEN})",
                additional.chars().count()
            ),
        ));
    }

    match department_type {
        None => {
            violations.push(FieldViolation::new(
                "department",
                "department must be selected",
            ));
        }
        Some(DepartmentType::SelfPay) => {
            check_amount(&mut violations, draft.amount.unwrap_or(0.0));
        }
        Some(DepartmentType::EventBased) => match event {
            None => {
                violations.push(FieldViolation::new("event", "event must be selected"));
            }
            Some(event) if !event.priced => {
                check_amount(&mut violations, draft.amount.unwrap_or(0.0));
            }
            Some(_) => {}
        },
    }

    violations
}

/// Shorthand for callers that only need pass or fail
pub fn ensure_valid(
    draft: &OrderDraft,
    department_type: Option<DepartmentType>,
    event: Option<&Event>,
) -> AppResult<()> {
    let violations = validate_draft(draft, department_type, event);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations_to_error(violations))
    }
}
