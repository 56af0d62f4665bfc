//! Promo code state
//!
//! Holds the code the payer typed and the discount the backend confirmed.
//! The two are kept separate so a failed verification never disturbs an
//! already applied discount.

use shared::models::{Event, VerifiedPromo, VerifyPromoRequest};
use shared::{AppError, AppResult, ErrorCode};

use crate::validation::MAX_PROMO_CODE_LEN;

/// Promo input and applied discount for the active session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromoState {
    input: String,
    applied: Option<VerifiedPromo>,
}

impl PromoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, code: impl Into<String>) {
        self.input = code.into();
    }

    /// The verified promo currently applied, if any
    pub fn applied(&self) -> Option<&VerifiedPromo> {
        self.applied.as_ref()
    }

    /// Promo code to put on the order request
    pub fn applied_code(&self) -> Option<String> {
        self.applied.as_ref().map(|promo| promo.code.clone())
    }

    /// Build a verification request for the current input
    ///
    /// Guards run before any network call is made: the code must be
    /// non-empty, within the length cap, and an event that takes promo
    /// codes must be selected.
    pub fn prepare_request(&self, event: Option<&Event>) -> AppResult<VerifyPromoRequest> {
        let code = self.input.trim();
        if code.is_empty() {
            return Err(AppError::new(ErrorCode::PromoCodeEmpty));
        }
        if code.chars().count() > MAX_PROMO_CODE_LEN {
            return Err(AppError::validation(format!(
                "promo code is too long ({} chars, max {MAX_PROMO_CODE_LEN})",
                code.chars().count()
            )));
        }
        let Some(event) = event else {
            return Err(AppError::new(ErrorCode::PromoEventMissing));
        };
        if !event.priced {
            return Err(AppError::new(ErrorCode::PromoNotApplicable));
        }

        Ok(VerifyPromoRequest::new(code, event.id.clone()))
    }

    /// Record a backend-confirmed promo
    pub fn apply(&mut self, promo: VerifiedPromo) {
        self.applied = Some(promo);
    }

    /// Drop the applied promo, keeping the typed input
    pub fn clear_applied(&mut self) {
        self.applied = None;
    }

    /// Restore pristine state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
