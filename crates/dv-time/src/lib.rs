//! # dv-time
//!
//! Dates and day-count conventions for deltavol.
//!
//! Dates are plain [`chrono::NaiveDate`] values; what the library adds is
//! the [`DayCounter`] trait that turns a pair of dates into the year
//! fraction the Black-Scholes formulas consume.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `DayCounter` trait and built-in conventions.
pub mod day_counter;

/// A calendar date. Alias for `chrono::NaiveDate`.
pub type Date = chrono::NaiveDate;

pub use day_counter::{Actual360, Actual365Fixed, DayCounter};
