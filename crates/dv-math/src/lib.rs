//! # dv-math
//!
//! Numerical utilities for deltavol: standard-normal helpers, 1D
//! interpolation with explicit extrapolation control, and a Brent root
//! finder with automatic bracket expansion from a guess/step pair.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Standard-normal PDF, CDF, and quantile.
pub mod distributions;

/// 1D interpolation trait and strategies.
pub mod interpolation;

/// 1D root-finding.
pub mod solvers1d;

pub use interpolation::{Interpolation1D, InterpolationKind};
pub use solvers1d::{Brent, SolverConfig};
