//! The fixed-point resolver.
//!
//! The volatility implied by a delta-quoted smile for a strike `K` is the
//! `v` satisfying `v = smile(Δ(K, v))`: the delta of the option depends on
//! the very volatility being looked up. The resolver phrases this as a
//! root-find on `f(v) = interpolant(Δ(K, v)) − v` and hands it to the
//! Brent solver, seeded at the tenor's ATM volatility.

use crate::delta::BlackDeltaCalculator;
use crate::resolved::ResolvedSmile;
use dv_core::{ensure, Error, Real, Result, Volatility};
use dv_market::{DeltaConvention, MarketSnapshot, OptionType, QuotedSmile};
use dv_math::{Brent, InterpolationKind, SolverConfig};

/// Volatilities below this floor are fenced off from the solver so the
/// delta formulas stay well defined during bracket expansion.
const VOL_FLOOR: Real = 1e-8;

/// Settings for one resolution run.
#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    /// Smile interpolation strategy.
    pub interpolation: InterpolationKind,
    /// Root-finder settings (accuracy, step, evaluation budget).
    pub solver: SolverConfig,
    /// Whether interpolant queries outside the quoted delta range are
    /// allowed. Defaults to true via [`ResolverConfig::default`].
    pub allow_extrapolation: bool,
}

impl ResolverConfig {
    /// Market-practice defaults: linear interpolation, extrapolation
    /// allowed.
    pub fn new() -> Self {
        Self {
            interpolation: InterpolationKind::Linear,
            solver: SolverConfig::default(),
            allow_extrapolation: true,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the fixed-point volatility for one strike and one tenor.
#[derive(Debug, Clone, Copy)]
pub struct SmileResolver {
    config: ResolverConfig,
}

impl Default for SmileResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::new())
    }
}

impl SmileResolver {
    /// Create a resolver with the given settings.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The resolver's settings.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the volatility for `strike` on one quoted tenor.
    pub fn resolve(
        &self,
        strike: Real,
        market: &MarketSnapshot,
        quote: &QuotedSmile,
    ) -> Result<Volatility> {
        let resolved = ResolvedSmile::from_quote(market, quote, self.config.solver)?;
        self.resolve_on(strike, market, &resolved)
    }

    /// Resolve against an already-prepared [`ResolvedSmile`].
    pub fn resolve_on(
        &self,
        strike: Real,
        market: &MarketSnapshot,
        smile: &ResolvedSmile,
    ) -> Result<Volatility> {
        ensure!(
            strike > 0.0,
            Error::InvalidSmile(format!("strike must be positive, got {strike}"))
        );
        let (deltas, vols) = smile.axes();
        let interpolant = self.config.interpolation.build(&deltas, &vols)?;

        let spot = market.spot();
        let (df_d, df_f) = (smile.domestic_discount(), smile.foreign_discount());
        let time = smile.time();

        let query_delta = |v: Real| -> Result<Real> {
            BlackDeltaCalculator::new(
                OptionType::Put,
                DeltaConvention::Spot,
                spot,
                df_d,
                df_f,
                v,
                time,
            )?
            .delta(strike)
        };
        // Excursions outside the quoted delta range during iteration are
        // expected; the extrapolation policy is applied to the root, not
        // to the path. The vol floor keeps `query_delta` from failing;
        // NaN makes the solver report it if it ever does.
        let objective = |v: Real| match query_delta(v).and_then(|d| interpolant.value(d, true)) {
            Ok(smile_vol) => smile_vol - v,
            Err(_) => Real::NAN,
        };

        let root = Brent::new(self.config.solver)
            .with_lower_bound(VOL_FLOOR)
            .solve(objective, smile.atm_vol())?;

        if !self.config.allow_extrapolation {
            interpolant.value(query_delta(root)?, false)?;
        }
        Ok(root)
    }
}
