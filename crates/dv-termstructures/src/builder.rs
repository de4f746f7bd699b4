//! Assembles a [`BlackVarianceCurve`] from quoted smiles.
//!
//! Each tenor is resolved independently for the requested strike, so the
//! per-tenor solves run in parallel. The builder fails fast: any tenor
//! that does not resolve fails the whole build.

use crate::variance_curve::BlackVarianceCurve;
use dv_core::{ensure, Error, Real, Result, Volatility};
use dv_market::{MarketSnapshot, QuotedSmile};
use dv_smile::{ResolverConfig, SmileResolver};
use rayon::prelude::*;

/// Builds fixed-strike volatility term structures from delta-quoted
/// smiles.
#[derive(Debug, Clone, Copy)]
pub struct TermStructureBuilder {
    resolver: ResolverConfig,
    allow_extrapolation: bool,
}

impl Default for TermStructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TermStructureBuilder {
    /// A builder with default resolver settings and curve extrapolation
    /// enabled.
    pub fn new() -> Self {
        Self {
            resolver: ResolverConfig::new(),
            allow_extrapolation: true,
        }
    }

    /// Replace the per-tenor resolver settings.
    pub fn with_resolver(mut self, config: ResolverConfig) -> Self {
        self.resolver = config;
        self
    }

    /// Allow or forbid curve queries outside the tenor range.
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Resolve `strike` on every quoted tenor and assemble the curve.
    ///
    /// # Errors
    /// `InvalidSmile` when no quotes are given or the maturities are not
    /// strictly increasing; any per-tenor resolution error otherwise.
    pub fn build(
        &self,
        strike: Real,
        market: &MarketSnapshot,
        quotes: &[QuotedSmile],
    ) -> Result<BlackVarianceCurve> {
        ensure!(
            !quotes.is_empty(),
            Error::InvalidSmile("term structure needs at least one quoted tenor".into())
        );
        for w in quotes.windows(2) {
            ensure!(
                w[0].maturity() < w[1].maturity(),
                Error::InvalidSmile(format!(
                    "tenor maturities must be strictly increasing, got {} then {}",
                    w[0].maturity(),
                    w[1].maturity()
                ))
            );
        }

        let resolver = SmileResolver::new(self.resolver);
        let vols: Vec<Volatility> = quotes
            .par_iter()
            .map(|quote| resolver.resolve(strike, market, quote))
            .collect::<Result<_>>()?;

        let knots: Vec<_> = quotes
            .iter()
            .map(|q| q.maturity())
            .zip(vols)
            .collect();
        Ok(
            BlackVarianceCurve::new(market.as_of(), &knots, market.shared_day_counter())?
                .with_extrapolation(self.allow_extrapolation),
        )
    }
}
