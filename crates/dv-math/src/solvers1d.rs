//! 1D root-finding.
//!
//! [`Brent`] combines bisection, secant, and inverse quadratic
//! interpolation, and can either work a caller-supplied bracket or grow
//! its own bracket outward from a guess in geometric steps. The expansion
//! phase and the iteration phase share a single evaluation budget, so
//! worst-case latency per solve is bounded by configuration.

use dv_core::{ensure, Error, Real, Result};

/// Bracket-expansion growth factor.
const GROWTH_FACTOR: Real = 1.6;

/// Settings for a 1D solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute accuracy of the returned root.
    pub accuracy: Real,
    /// Initial half-width of the bracket grown around the guess.
    pub step: Real,
    /// Total objective-evaluation budget (bracketing plus iteration).
    pub max_evaluations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        // Accuracy and step match quoted-market vol precision expectations.
        Self {
            accuracy: 1e-16,
            step: 1e-12,
            max_evaluations: 1000,
        }
    }
}

/// Brent's method with optional domain bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Brent {
    config: SolverConfig,
    lower_bound: Option<Real>,
    upper_bound: Option<Real>,
}

impl Brent {
    /// Create a solver with the given settings.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            lower_bound: None,
            upper_bound: None,
        }
    }

    /// Restrict the search to `x >= bound`.
    pub fn with_lower_bound(mut self, bound: Real) -> Self {
        self.lower_bound = Some(bound);
        self
    }

    /// Restrict the search to `x <= bound`.
    pub fn with_upper_bound(mut self, bound: Real) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    fn enforce_bounds(&self, x: Real) -> Real {
        let x = match self.lower_bound {
            Some(lo) => x.max(lo),
            None => x,
        };
        match self.upper_bound {
            Some(hi) => x.min(hi),
            None => x,
        }
    }

    /// Find a root of `f` starting from `guess`.
    ///
    /// A bracket is grown outward from `guess` in geometric steps (the
    /// side with the smaller residual is pushed further out), honouring
    /// any configured bounds, and the bracketed root is then polished
    /// with Brent iteration.
    ///
    /// # Errors
    /// `NoConvergence` when the evaluation budget runs out before a sign
    /// change is found or before the bracketed root reaches the
    /// configured accuracy, and when the objective produces a non-finite
    /// value.
    pub fn solve<F>(&self, f: F, guess: Real) -> Result<Real>
    where
        F: Fn(Real) -> Real,
    {
        let step = self.config.step.abs().max(f64::EPSILON);
        let mut evaluations = 0usize;

        let mut x_min = self.enforce_bounds(guess - step);
        let mut x_max = self.enforce_bounds(guess + step);
        let mut f_min = self.eval(&f, x_min, &mut evaluations)?;
        let mut f_max = self.eval(&f, x_max, &mut evaluations)?;

        while evaluations < self.config.max_evaluations {
            if f_min == 0.0 {
                return Ok(x_min);
            }
            if f_max == 0.0 {
                return Ok(x_max);
            }
            if f_min * f_max < 0.0 {
                return self.solve_impl(&f, x_min, x_max, f_min, f_max, &mut evaluations);
            }
            // Push out the side that looks closer to a sign change.
            if f_min.abs() < f_max.abs() {
                x_min = self.enforce_bounds(x_min + GROWTH_FACTOR * (x_min - x_max));
                f_min = self.eval(&f, x_min, &mut evaluations)?;
            } else {
                x_max = self.enforce_bounds(x_max + GROWTH_FACTOR * (x_max - x_min));
                f_max = self.eval(&f, x_max, &mut evaluations)?;
            }
        }
        Err(Error::NoConvergence {
            evaluations,
            context: "unable to bracket root".into(),
        })
    }

    /// Find a root of `f` inside a caller-supplied bracket.
    ///
    /// # Errors
    /// `InvalidUsage` when `f(x_min)` and `f(x_max)` do not have opposite
    /// signs; `NoConvergence` when the iteration budget runs out.
    pub fn solve_bracketed<F>(&self, f: F, x_min: Real, x_max: Real) -> Result<Real>
    where
        F: Fn(Real) -> Real,
    {
        let mut evaluations = 0usize;
        let f_min = self.eval(&f, x_min, &mut evaluations)?;
        let f_max = self.eval(&f, x_max, &mut evaluations)?;
        if f_min == 0.0 {
            return Ok(x_min);
        }
        if f_max == 0.0 {
            return Ok(x_max);
        }
        ensure!(
            f_min * f_max < 0.0,
            Error::InvalidUsage(format!(
                "root not bracketed: f({x_min}) and f({x_max}) have the same sign"
            ))
        );
        self.solve_impl(&f, x_min, x_max, f_min, f_max, &mut evaluations)
    }

    fn eval<F>(&self, f: &F, x: Real, evaluations: &mut usize) -> Result<Real>
    where
        F: Fn(Real) -> Real,
    {
        *evaluations += 1;
        let fx = f(x);
        ensure!(
            fx.is_finite(),
            Error::NoConvergence {
                evaluations: *evaluations,
                context: format!("objective is not finite at {x}"),
            }
        );
        Ok(fx)
    }

    /// Brent iteration on a sign-changing bracket.
    fn solve_impl<F>(
        &self,
        f: &F,
        x_min: Real,
        x_max: Real,
        f_min: Real,
        f_max: Real,
        evaluations: &mut usize,
    ) -> Result<Real>
    where
        F: Fn(Real) -> Real,
    {
        let acc = self.config.accuracy.abs().max(f64::MIN_POSITIVE);
        let mut a = x_min;
        let mut b = x_max;
        let mut fa = f_min;
        let mut fb = f_max;
        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        while *evaluations < self.config.max_evaluations {
            if fb * fc > 0.0 {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }
            let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
            let xm = 0.5 * (c - b);
            if xm.abs() <= tol || fb == 0.0 {
                return Ok(b);
            }
            if e.abs() >= tol && fa.abs() > fb.abs() {
                // Try inverse quadratic interpolation (secant when a == c).
                let s = fb / fa;
                let (p, q) = if a == c {
                    (2.0 * xm * s, 1.0 - s)
                } else {
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
                if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }
            a = b;
            fa = fb;
            b += if d.abs() > tol {
                d
            } else if xm > 0.0 {
                tol
            } else {
                -tol
            };
            fb = self.eval(f, b, evaluations)?;
        }
        Err(Error::NoConvergence {
            evaluations: *evaluations,
            context: "maximum iterations reached".into(),
        })
    }
}
