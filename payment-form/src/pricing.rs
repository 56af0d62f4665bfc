//! Pricing resolver
//!
//! Tracks the displayed price, the promo discount and the final amount the
//! payer is charged. Math runs on Decimal and is stored back as f64 rounded
//! to two places, the same treatment the backend gives order amounts. The
//! discount line shown on the checkout summary is rounded down instead, so
//! the displayed discount never overstates what is deducted.

use rust_decimal::Decimal;

use shared::models::{Currency, Event, ResidencyStatus};
use shared::money::{to_decimal, to_f64};

/// Derived pricing state for the active form session
///
/// Invariant: `final_price = max(0, price - price * discount / 100)`,
/// recomputed on every price or discount change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingState {
    price: f64,
    discount: f64,
    final_price: f64,
    currency: Currency,
    usd_fallback: bool,
}

impl PricingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Discount percentage currently applied
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Amount the payer is charged
    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn currency_symbol(&self) -> &'static str {
        self.currency.symbol()
    }

    /// True when non-resident pricing fell back to KZT because the event
    /// carries no USD price. The form surfaces a warning while this holds.
    pub fn usd_fallback_active(&self) -> bool {
        self.usd_fallback
    }

    /// Set the base price and recompute the final price
    pub fn set_price(&mut self, price: f64) {
        self.price = price;
        self.recompute();
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Apply a percentage discount, replacing any previous one
    pub fn apply_discount(&mut self, percent: f64) {
        self.discount = percent;
        self.recompute();
    }

    /// Drop the applied discount
    pub fn clear_discount(&mut self) {
        self.discount = 0.0;
        self.recompute();
    }

    /// Discount amount for the checkout summary, rounded down to whole
    /// currency units
    pub fn discount_amount(&self) -> f64 {
        let amount = to_decimal(self.price) * to_decimal(self.discount) / Decimal::ONE_HUNDRED;
        to_f64(amount.floor())
    }

    /// Resolve price and currency for a selected event
    ///
    /// Residents always pay the KZT catalog price. Non-residents pay the USD
    /// price when the event has one; otherwise the KZT price is kept and the
    /// fallback flag is raised. Custom-price events carry no catalog price,
    /// the payer enters the amount instead.
    pub fn resolve_event(&mut self, event: &Event, residency: ResidencyStatus) {
        self.usd_fallback = false;

        if !event.priced {
            self.currency = Currency::Kzt;
            self.set_price(0.0);
            return;
        }

        match residency {
            ResidencyStatus::Resident => {
                self.currency = Currency::Kzt;
                self.set_price(event.price);
            }
            ResidencyStatus::NonResident => match event.price_usd {
                Some(price_usd) => {
                    self.currency = Currency::Usd;
                    self.set_price(price_usd);
                }
                None => {
                    tracing::warn!(
                        event_id = %event.id,
                        "USD price not available for this event, using KZT price"
                    );
                    self.usd_fallback = true;
                    self.currency = Currency::Kzt;
                    self.set_price(event.price);
                }
            },
        }
    }

    /// Restore pristine state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn recompute(&mut self) {
        let price = to_decimal(self.price);
        let discount = to_decimal(self.discount);
        let final_price = (price - price * discount / Decimal::ONE_HUNDRED).max(Decimal::ZERO);
        self.final_price = to_f64(final_price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced_event(price: f64, price_usd: Option<f64>) -> Event {
        Event {
            id: "ev-1".to_string(),
            title: "Climate Summit".to_string(),
            department_id: Some("dep-1".to_string()),
            priced: true,
            price,
            price_usd,
            manager_email: None,
            without_period: true,
            period_from: None,
            period_till: None,
        }
    }

    fn custom_price_event() -> Event {
        Event {
            priced: false,
            price: 0.0,
            price_usd: None,
            ..priced_event(0.0, None)
        }
    }

    // ========== Final price invariant ==========

    #[test]
    fn test_final_price_formula() {
        let mut pricing = PricingState::new();
        pricing.set_price(10000.0);
        pricing.apply_discount(20.0);

        assert_eq!(pricing.price(), 10000.0);
        assert_eq!(pricing.discount(), 20.0);
        assert_eq!(pricing.final_price(), 8000.0);
    }

    #[test]
    fn test_final_price_never_exceeds_price() {
        let prices = [0.0, 1.0, 99.99, 10000.0, 123456.78];
        let discounts = [0.0, 1.0, 33.0, 50.0, 99.0, 100.0];
        for price in prices {
            for discount in discounts {
                let mut pricing = PricingState::new();
                pricing.set_price(price);
                pricing.apply_discount(discount);
                assert!(
                    pricing.final_price() <= price,
                    "final {} exceeds price {} at discount {}",
                    pricing.final_price(),
                    price,
                    discount
                );
                assert!(pricing.final_price() >= 0.0);
            }
        }
    }

    #[test]
    fn test_final_price_clamped_at_zero() {
        let mut pricing = PricingState::new();
        pricing.set_price(100.0);
        pricing.apply_discount(150.0);
        assert_eq!(pricing.final_price(), 0.0);
    }

    #[test]
    fn test_full_discount() {
        let mut pricing = PricingState::new();
        pricing.set_price(5000.0);
        pricing.apply_discount(100.0);
        assert_eq!(pricing.final_price(), 0.0);
    }

    #[test]
    fn test_fractional_final_price_keeps_cents() {
        let mut pricing = PricingState::new();
        pricing.set_price(9999.99);
        pricing.apply_discount(33.0);
        // 9999.99 * 0.67 = 6699.9933, stored at two places
        assert_eq!(pricing.final_price(), 6699.99);
    }

    #[test]
    fn test_reprice_keeps_discount() {
        let mut pricing = PricingState::new();
        pricing.set_price(10000.0);
        pricing.apply_discount(20.0);
        pricing.set_price(25.0);
        assert_eq!(pricing.discount(), 20.0);
        assert_eq!(pricing.final_price(), 20.0);
    }

    #[test]
    fn test_clear_discount() {
        let mut pricing = PricingState::new();
        pricing.set_price(10000.0);
        pricing.apply_discount(20.0);
        pricing.clear_discount();
        assert_eq!(pricing.discount(), 0.0);
        assert_eq!(pricing.final_price(), 10000.0);
    }

    // ========== Discount display rounding ==========

    #[test]
    fn test_discount_amount_rounds_down() {
        let mut pricing = PricingState::new();
        pricing.set_price(9999.99);
        pricing.apply_discount(33.0);
        // Raw discount is 3299.9967, display floors it
        assert_eq!(pricing.discount_amount(), 3299.0);
    }

    #[test]
    fn test_discount_amount_exact() {
        let mut pricing = PricingState::new();
        pricing.set_price(10000.0);
        pricing.apply_discount(20.0);
        assert_eq!(pricing.discount_amount(), 2000.0);
    }

    // ========== Event resolution ==========

    #[test]
    fn test_resident_pays_kzt_price() {
        let mut pricing = PricingState::new();
        pricing.resolve_event(&priced_event(10000.0, Some(25.0)), ResidencyStatus::Resident);

        assert_eq!(pricing.price(), 10000.0);
        assert_eq!(pricing.currency(), Currency::Kzt);
        assert_eq!(pricing.currency_symbol(), "₸");
        assert!(!pricing.usd_fallback_active());
    }

    #[test]
    fn test_non_resident_pays_usd_price() {
        let mut pricing = PricingState::new();
        pricing.resolve_event(
            &priced_event(10000.0, Some(25.0)),
            ResidencyStatus::NonResident,
        );

        assert_eq!(pricing.price(), 25.0);
        assert_eq!(pricing.currency(), Currency::Usd);
        assert_eq!(pricing.currency_symbol(), "$");
        assert!(!pricing.usd_fallback_active());
    }

    #[test]
    fn test_non_resident_falls_back_to_kzt_without_usd_price() {
        let mut pricing = PricingState::new();
        pricing.resolve_event(&priced_event(10000.0, None), ResidencyStatus::NonResident);

        // Never USD with a missing price
        assert_eq!(pricing.price(), 10000.0);
        assert_eq!(pricing.currency(), Currency::Kzt);
        assert!(pricing.usd_fallback_active());
    }

    #[test]
    fn test_fallback_flag_clears_on_reresolve() {
        let mut pricing = PricingState::new();
        pricing.resolve_event(&priced_event(10000.0, None), ResidencyStatus::NonResident);
        assert!(pricing.usd_fallback_active());

        pricing.resolve_event(&priced_event(10000.0, None), ResidencyStatus::Resident);
        assert!(!pricing.usd_fallback_active());
    }

    #[test]
    fn test_custom_price_event_has_no_catalog_price() {
        let mut pricing = PricingState::new();
        pricing.apply_discount(20.0);
        pricing.resolve_event(&custom_price_event(), ResidencyStatus::Resident);

        assert_eq!(pricing.price(), 0.0);
        assert_eq!(pricing.final_price(), 0.0);
        assert_eq!(pricing.currency(), Currency::Kzt);
    }

    #[test]
    fn test_discount_survives_residency_switch() {
        let event = priced_event(10000.0, Some(25.0));
        let mut pricing = PricingState::new();
        pricing.resolve_event(&event, ResidencyStatus::Resident);
        pricing.apply_discount(20.0);

        pricing.resolve_event(&event, ResidencyStatus::NonResident);
        assert_eq!(pricing.discount(), 20.0);
        assert_eq!(pricing.final_price(), 20.0);
    }

    #[test]
    fn test_reset() {
        let mut pricing = PricingState::new();
        pricing.resolve_event(&priced_event(10000.0, None), ResidencyStatus::NonResident);
        pricing.apply_discount(20.0);

        pricing.reset();
        assert_eq!(pricing, PricingState::default());
    }
}
