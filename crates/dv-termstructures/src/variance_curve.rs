//! Fixed-strike Black variance curve.
//!
//! Knots are (maturity, volatility) pairs for one strike. Queries between
//! knots interpolate linearly in total variance `σ²·t`, which keeps the
//! forward variance flat on each segment. Queries beyond the knot range
//! continue the boundary segment's forward-variance slope.

use dv_core::{ensure, Error, Real, Result, Time, Volatility};
use dv_time::{Date, DayCounter};
use std::sync::Arc;

/// A term structure of Black volatilities for a single strike.
#[derive(Debug, Clone)]
pub struct BlackVarianceCurve {
    reference_date: Date,
    day_counter: Arc<dyn DayCounter>,
    maturities: Vec<Date>,
    times: Vec<Time>,
    vols: Vec<Volatility>,
    /// Total variances `σ²·t`, one per knot.
    variances: Vec<Real>,
    allow_extrapolation: bool,
}

impl BlackVarianceCurve {
    /// Build a curve from per-tenor volatilities.
    ///
    /// # Errors
    /// `InvalidSmile` when no knots are given, maturities are not strictly
    /// increasing and after the reference date, or a volatility is not a
    /// positive finite number.
    pub fn new(
        reference_date: Date,
        knots: &[(Date, Volatility)],
        day_counter: Arc<dyn DayCounter>,
    ) -> Result<Self> {
        ensure!(
            !knots.is_empty(),
            Error::InvalidSmile("term structure needs at least one tenor".into())
        );
        let mut maturities = Vec::with_capacity(knots.len());
        let mut times = Vec::with_capacity(knots.len());
        let mut vols = Vec::with_capacity(knots.len());
        let mut variances = Vec::with_capacity(knots.len());
        for &(date, vol) in knots {
            ensure!(
                maturities.last().map_or(reference_date < date, |&m| m < date),
                Error::InvalidSmile(format!(
                    "tenor dates must be strictly increasing and after {reference_date}, got {date}"
                ))
            );
            ensure!(
                vol.is_finite() && vol > 0.0,
                Error::InvalidSmile(format!("volatility at {date} must be positive, got {vol}"))
            );
            let t = day_counter.year_fraction(reference_date, date);
            maturities.push(date);
            times.push(t);
            vols.push(vol);
            variances.push(vol * vol * t);
        }
        Ok(Self {
            reference_date,
            day_counter,
            maturities,
            times,
            vols,
            variances,
            allow_extrapolation: true,
        })
    }

    /// Allow or forbid queries outside the knot range. Enabled by default.
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// The valuation date.
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// The first knot maturity.
    pub fn min_date(&self) -> Date {
        self.maturities[0]
    }

    /// The last knot maturity.
    pub fn max_date(&self) -> Date {
        *self.maturities.last().expect("curve has at least one knot")
    }

    /// The knot maturities.
    pub fn maturities(&self) -> &[Date] {
        &self.maturities
    }

    /// The knot volatilities.
    pub fn vols(&self) -> &[Volatility] {
        &self.vols
    }

    /// The Black volatility for `date`.
    ///
    /// Knot dates reproduce their input volatility exactly.
    ///
    /// # Errors
    /// `OutOfRange` when `date` is not strictly after the reference date,
    /// or lies outside the knot range while extrapolation is disabled.
    pub fn volatility(&self, date: Date) -> Result<Volatility> {
        if let Ok(i) = self.maturities.binary_search(&date) {
            return Ok(self.vols[i]);
        }
        let t = self.time_checked(date)?;
        Ok((self.variance_at(t) / t).sqrt())
    }

    /// The total Black variance `σ²(date)·t` for `date`.
    ///
    /// # Errors
    /// Same conditions as [`volatility`](Self::volatility).
    pub fn total_variance(&self, date: Date) -> Result<Real> {
        if let Ok(i) = self.maturities.binary_search(&date) {
            return Ok(self.variances[i]);
        }
        let t = self.time_checked(date)?;
        Ok(self.variance_at(t))
    }

    fn time_checked(&self, date: Date) -> Result<Time> {
        let out_of_range = Error::OutOfRange {
            date,
            min: self.min_date(),
            max: self.max_date(),
        };
        ensure!(date > self.reference_date, out_of_range.clone());
        ensure!(
            self.allow_extrapolation || (self.min_date() <= date && date <= self.max_date()),
            out_of_range
        );
        Ok(self.day_counter.year_fraction(self.reference_date, date))
    }

    /// Total variance at `t`, with `t > 0` already established.
    fn variance_at(&self, t: Time) -> Real {
        let n = self.times.len();
        if n == 1 {
            // Constant variance rate on both sides of a single knot.
            return self.variances[0] * t / self.times[0];
        }
        if t <= self.times[0] {
            // The segment from the origin to the first knot carries the
            // first knot's variance rate.
            return (self.variances[0] * t / self.times[0]).max(0.0);
        }
        if t >= self.times[n - 1] {
            let slope = (self.variances[n - 1] - self.variances[n - 2])
                / (self.times[n - 1] - self.times[n - 2]);
            return (self.variances[n - 1] + slope * (t - self.times[n - 1])).max(0.0);
        }
        let i = self.times.partition_point(|&x| x < t) - 1;
        let frac = (t - self.times[i]) / (self.times[i + 1] - self.times[i]);
        self.variances[i] + frac * (self.variances[i + 1] - self.variances[i])
    }
}
