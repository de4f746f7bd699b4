//! Standard-normal distribution helpers.
//!
//! Thin wrappers over `statrs` so the rest of the workspace can call
//! `normal_cdf` / `normal_quantile` without carrying distribution objects
//! around.

use dv_core::{ensure, Error, Real, Result};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

fn standard_normal() -> Normal {
    // Parameters (0, 1) are always valid.
    Normal::new(0.0, 1.0).expect("standard normal")
}

/// The standard normal probability density function φ(x).
pub fn normal_pdf(x: Real) -> Real {
    standard_normal().pdf(x)
}

/// The standard normal cumulative distribution function Φ(x).
pub fn normal_cdf(x: Real) -> Real {
    standard_normal().cdf(x)
}

/// The inverse standard normal CDF (probit function).
///
/// # Errors
/// `InvalidSmile` when `p` is not strictly inside (0, 1) — in this library
/// an out-of-range probability always traces back to an out-of-range
/// delta quote.
pub fn normal_quantile(p: Real) -> Result<Real> {
    ensure!(
        p > 0.0 && p < 1.0,
        Error::InvalidSmile(format!("quantile probability {p} outside (0, 1)"))
    );
    Ok(standard_normal().inverse_cdf(p))
}
