//! The market snapshot.
//!
//! A [`MarketSnapshot`] bundles the as-of date, the spot, and the two
//! discount-factor providers (domestic and foreign). It is immutable for
//! the lifetime of a resolution run and cheap to clone — curve providers
//! are shared through `Arc`.

use crate::discount::DiscountCurve;
use dv_core::{ensure, DiscountFactor, Error, Price, Real, Result, Time};
use dv_time::{Actual365Fixed, Date, DayCounter};
use std::sync::Arc;

/// Immutable market inputs for a resolution run.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    as_of: Date,
    spot: Price,
    domestic: Arc<dyn DiscountCurve>,
    foreign: Arc<dyn DiscountCurve>,
    day_counter: Arc<dyn DayCounter>,
}

impl MarketSnapshot {
    /// Create a snapshot. Uses the Actual/365 (Fixed) day count for
    /// date → time conversion unless overridden.
    ///
    /// # Errors
    /// `InvalidSmile` when the spot is not strictly positive.
    pub fn new(
        as_of: Date,
        spot: Price,
        domestic: Arc<dyn DiscountCurve>,
        foreign: Arc<dyn DiscountCurve>,
    ) -> Result<Self> {
        ensure!(
            spot > 0.0,
            Error::InvalidSmile(format!("spot must be positive, got {spot}"))
        );
        Ok(Self {
            as_of,
            spot,
            domestic,
            foreign,
            day_counter: Arc::new(Actual365Fixed),
        })
    }

    /// Replace the day counter.
    pub fn with_day_counter(mut self, day_counter: impl DayCounter + 'static) -> Self {
        self.day_counter = Arc::new(day_counter);
        self
    }

    /// The as-of (valuation) date.
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// The spot price.
    pub fn spot(&self) -> Price {
        self.spot
    }

    /// The day counter used for date → time conversion.
    pub fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    /// A shared handle to the day counter, for structures that outlive
    /// the snapshot.
    pub fn shared_day_counter(&self) -> Arc<dyn DayCounter> {
        Arc::clone(&self.day_counter)
    }

    /// Year fraction from the as-of date to `date`.
    pub fn time_to(&self, date: Date) -> Time {
        self.day_counter.year_fraction(self.as_of, date)
    }

    /// Domestic (risk-free numeraire) discount factor to `date`.
    pub fn discount_domestic(&self, date: Date) -> DiscountFactor {
        self.domestic.discount(date)
    }

    /// Foreign (dividend-like) discount factor to `date`.
    pub fn discount_foreign(&self, date: Date) -> DiscountFactor {
        self.foreign.discount(date)
    }

    /// The forward implied by the supplied discount factors:
    /// `F = S · df_f / df_d`.
    pub fn forward(&self, date: Date) -> Real {
        self.spot * self.discount_foreign(date) / self.discount_domestic(date)
    }
}
