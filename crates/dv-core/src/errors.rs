//! Error types for deltavol.
//!
//! The whole workspace reports through a single `thiserror`-derived enum.
//! Every variant is a distinct, recoverable condition: a failed resolution
//! for one strike never corrupts or blocks resolution of another, and no
//! failure is ever replaced by a sentinel volatility.

use chrono::NaiveDate;
use thiserror::Error;

/// The top-level error type used throughout deltavol.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid smile or market input: non-monotone delta nodes,
    /// non-positive time/vol/spot, discount factors outside (0, 1].
    #[error("invalid smile: {0}")]
    InvalidSmile(String),

    /// The API was called in a way the model cannot support, e.g. a
    /// premium-adjusted strike inversion requested for a call option.
    #[error("invalid usage: {0}")]
    InvalidUsage(String),

    /// Interpolation was evaluated outside the node range with
    /// extrapolation disabled.
    #[error("value {value} outside interpolation domain [{min}, {max}]")]
    OutOfDomain {
        /// The abscissa that fell outside the node range.
        value: f64,
        /// Lower bound of the interpolation domain.
        min: f64,
        /// Upper bound of the interpolation domain.
        max: f64,
    },

    /// The root-finder exhausted its evaluation budget without bracketing
    /// a root or converging to one.
    #[error("no convergence after {evaluations} function evaluations: {context}")]
    NoConvergence {
        /// Number of objective evaluations spent.
        evaluations: usize,
        /// What the solver was doing when the budget ran out.
        context: String,
    },

    /// A term-structure query outside the quoted tenor range with
    /// extrapolation disabled, or not after the reference date.
    #[error("date {date} outside term-structure range [{min}, {max}]")]
    OutOfRange {
        /// The queried date.
        date: NaiveDate,
        /// First date the curve covers.
        min: NaiveDate,
        /// Last date the curve covers.
        max: NaiveDate,
    },
}

/// Shorthand `Result` type used throughout deltavol.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Guard a precondition, returning the given error when it fails.
///
/// # Example
/// ```
/// use dv_core::{ensure, errors::Error};
/// fn positive(x: f64) -> dv_core::Result<f64> {
///     ensure!(x > 0.0, Error::InvalidSmile(format!("x must be positive, got {x}")));
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
