//! 1D interpolation trait and strategies.
//!
//! The smile code never names a concrete strategy: it builds a boxed
//! [`Interpolation1D`] through [`InterpolationKind`], so swapping linear
//! for spline interpolation is a configuration change, not a code change.
//!
//! Evaluation outside the node range is an explicit decision: callers pass
//! `allow_extrapolation`, and when it is set the boundary segment's model
//! is extended past the end nodes.

use dv_core::{ensure, Error, Real, Result};

/// A 1D interpolation function defined by a set of known points.
pub trait Interpolation1D: std::fmt::Debug + Send + Sync {
    /// Lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Evaluate without a domain check; outside the node range the
    /// boundary segment's model is extended.
    fn raw_value(&self, x: Real) -> Real;

    /// Evaluate at `x`.
    ///
    /// # Errors
    /// `OutOfDomain` when `x` lies outside `[x_min, x_max]` and
    /// `allow_extrapolation` is false.
    fn value(&self, x: Real, allow_extrapolation: bool) -> Result<Real> {
        if !allow_extrapolation && (x < self.x_min() || x > self.x_max()) {
            return Err(Error::OutOfDomain {
                value: x,
                min: self.x_min(),
                max: self.x_max(),
            });
        }
        Ok(self.raw_value(x))
    }
}

/// Interpolation strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationKind {
    /// Piecewise-linear. Produces a visible kink at the ATM node of a
    /// smile — a known property of the strategy, not a defect.
    #[default]
    Linear,
    /// Natural cubic spline.
    CubicSpline,
}

impl InterpolationKind {
    /// Build an interpolant over sorted `xs` and corresponding `ys`.
    ///
    /// # Errors
    /// `InvalidSmile` when fewer than two points are given, lengths
    /// mismatch, or `xs` is not strictly increasing.
    pub fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>> {
        validate_nodes(xs, ys)?;
        Ok(match self {
            InterpolationKind::Linear => Box::new(LinearInterpolation {
                xs: xs.to_vec(),
                ys: ys.to_vec(),
            }),
            InterpolationKind::CubicSpline => Box::new(CubicSplineInterpolation::build(xs, ys)),
        })
    }
}

fn validate_nodes(xs: &[Real], ys: &[Real]) -> Result<()> {
    ensure!(
        xs.len() >= 2,
        Error::InvalidSmile(format!("need at least 2 points, got {}", xs.len()))
    );
    ensure!(
        xs.len() == ys.len(),
        Error::InvalidSmile(format!(
            "xs ({}) and ys ({}) must have the same length",
            xs.len(),
            ys.len()
        ))
    );
    for w in xs.windows(2) {
        ensure!(
            w[0] < w[1],
            Error::InvalidSmile(format!("x values must be strictly increasing: {} >= {}", w[0], w[1]))
        );
    }
    Ok(())
}

/// Find `i` such that `xs[i] <= x < xs[i+1]`, clamped to `[0, n-2]`.
fn locate(xs: &[Real], x: Real) -> usize {
    let n = xs.len();
    if x <= xs[0] {
        return 0;
    }
    if x >= xs[n - 1] {
        return n - 2;
    }
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Piecewise-linear interpolation.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl Interpolation1D for LinearInterpolation {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn raw_value(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let dx = self.xs[i + 1] - self.xs[i];
        self.ys[i] + (x - self.xs[i]) * (self.ys[i + 1] - self.ys[i]) / dx
    }
}

// ── Natural cubic spline ──────────────────────────────────────────────────────

/// Natural cubic spline interpolation (zero second derivative at both
/// ends). Outside the node range the boundary cubic is extended.
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
    /// Second derivatives at the nodes.
    m: Vec<Real>,
}

impl CubicSplineInterpolation {
    /// Precondition: nodes already validated (len >= 2, strictly increasing).
    fn build(xs: &[Real], ys: &[Real]) -> Self {
        let n = xs.len();
        let mut m = vec![0.0; n];
        if n > 2 {
            // Thomas algorithm on the natural-spline tridiagonal system.
            let mut sub = vec![0.0; n - 2];
            let mut diag = vec![0.0; n - 2];
            let mut sup = vec![0.0; n - 2];
            let mut rhs = vec![0.0; n - 2];
            for i in 1..n - 1 {
                let h0 = xs[i] - xs[i - 1];
                let h1 = xs[i + 1] - xs[i];
                sub[i - 1] = h0;
                diag[i - 1] = 2.0 * (h0 + h1);
                sup[i - 1] = h1;
                rhs[i - 1] = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
            }
            for i in 1..n - 2 {
                let w = sub[i] / diag[i - 1];
                diag[i] -= w * sup[i - 1];
                rhs[i] -= w * rhs[i - 1];
            }
            m[n - 2] = rhs[n - 3] / diag[n - 3];
            for i in (1..n - 2).rev() {
                m[i] = (rhs[i - 1] - sup[i - 1] * m[i + 1]) / diag[i - 1];
            }
        }
        Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            m,
        }
    }
}

impl Interpolation1D for CubicSplineInterpolation {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn raw_value(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let h = self.xs[i + 1] - self.xs[i];
        let dx = x - self.xs[i];
        let b = (self.ys[i + 1] - self.ys[i]) / h - h * (2.0 * self.m[i] + self.m[i + 1]) / 6.0;
        let c = self.m[i] / 2.0;
        let d = (self.m[i + 1] - self.m[i]) / (6.0 * h);
        self.ys[i] + dx * (b + dx * (c + dx * d))
    }
}
