//! # dv-termstructures
//!
//! Blends per-tenor resolved volatilities into a fixed-strike
//! term structure: linear interpolation in total variance between knots,
//! flat forward-variance extrapolation beyond them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// The fixed-strike Black variance curve.
pub mod variance_curve;

/// Resolves a strike across tenors and assembles the curve.
pub mod builder;

pub use builder::TermStructureBuilder;
pub use variance_curve::BlackVarianceCurve;
