//! `DayCounter` trait and built-in day-count conventions.
//!
//! A day counter computes the **day count fraction** — the fraction of a
//! year between two dates — used when discounting and when converting an
//! option maturity into the `T` of the Black-Scholes formulas.

use crate::Date;
use dv_core::{Real, Time};

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &'static str;

    /// Number of calendar days between `d1` and `d2` (negative if `d2 < d1`).
    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d2.signed_duration_since(d1).num_days()
    }

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

/// Actual/365 (Fixed) day counter.
///
/// `year_fraction = actual_days / 365`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &'static str {
        "Actual/365 (Fixed)"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360 day counter.
///
/// `year_fraction = actual_days / 360`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &'static str {
        "Actual/360"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}
