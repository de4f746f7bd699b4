//! Discount-factor providers.
//!
//! The resolution engine never derives rates itself; it consumes discount
//! factors keyed by maturity date through the [`DiscountCurve`] trait.
//! [`FlatDiscountCurve`] is the stock implementation so the library is
//! usable end-to-end without an external curve library.

use dv_core::{ensure, DiscountFactor, Error, Result};
use dv_time::{Actual365Fixed, Date, DayCounter};
use std::sync::Arc;

/// A discount-factor provider keyed by maturity date.
pub trait DiscountCurve: std::fmt::Debug + Send + Sync {
    /// The date at which the discount factor is 1.
    fn reference_date(&self) -> Date;

    /// Discount factor for payment at `date`.
    fn discount(&self, date: Date) -> DiscountFactor;
}

/// A flat, continuously-compounded discount curve:
/// `df(T) = exp(-r·T)`.
#[derive(Debug, Clone)]
pub struct FlatDiscountCurve {
    reference_date: Date,
    rate: f64,
    day_counter: Arc<dyn DayCounter>,
}

impl FlatDiscountCurve {
    /// Create a flat curve with the Actual/365 (Fixed) day count.
    pub fn new(reference_date: Date, rate: f64) -> Result<Self> {
        ensure!(
            rate.is_finite(),
            Error::InvalidSmile(format!("flat rate must be finite, got {rate}"))
        );
        Ok(Self {
            reference_date,
            rate,
            day_counter: Arc::new(Actual365Fixed),
        })
    }

    /// Replace the day counter.
    pub fn with_day_counter(mut self, day_counter: impl DayCounter + 'static) -> Self {
        self.day_counter = Arc::new(day_counter);
        self
    }

    /// The flat continuously-compounded rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl DiscountCurve for FlatDiscountCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn discount(&self, date: Date) -> DiscountFactor {
        let t = self.day_counter.year_fraction(self.reference_date, date);
        (-self.rate * t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn unit_at_reference() {
        let curve = FlatDiscountCurve::new(d(2025, 1, 2), 0.05).unwrap();
        assert_abs_diff_eq!(curve.discount(d(2025, 1, 2)), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn one_year_discount() {
        let curve = FlatDiscountCurve::new(d(2025, 1, 2), 0.05).unwrap();
        assert_abs_diff_eq!(
            curve.discount(d(2026, 1, 2)),
            (-0.05f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_rate_is_unity_everywhere() {
        let curve = FlatDiscountCurve::new(d(2025, 1, 2), 0.0).unwrap();
        assert_abs_diff_eq!(curve.discount(d(2030, 1, 2)), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn rejects_non_finite_rate() {
        assert!(FlatDiscountCurve::new(d(2025, 1, 2), f64::NAN).is_err());
    }
}
