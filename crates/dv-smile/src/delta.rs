//! Black-Scholes delta formulas and their inversions.
//!
//! [`BlackDeltaCalculator`] fixes one (option type, convention, market,
//! vol, time) tuple and answers strike → delta, delta → strike, and the
//! ATM strike for a chosen definition. The forward is always derived from
//! the caller-supplied *discrete* discount factors (`F = S·df_f/df_d`),
//! never from re-derived continuous rates, so delta, strike, and ATM
//! formulas stay mutually consistent.
//!
//! Premium-adjusted call delta is not monotone in strike (the premium
//! term erodes the raw delta as the call goes in the money), so
//! delta → strike inversion under a premium-adjusted convention is only
//! defined for puts, where the mapping is strictly monotone and the
//! bracketed solve has a unique root.

use dv_core::{ensure, DiscountFactor, Error, Price, Real, Result, Time, Volatility};
use dv_market::{AtmDefinition, DeltaConvention, OptionType};
use dv_math::distributions::{normal_cdf, normal_quantile};
use dv_math::{Brent, SolverConfig};

/// Bracket-expansion factor for the premium-adjusted strike solve.
const BRACKET_GROWTH: Real = 1.5;

/// Strike ↔ delta conversion for one option under one convention.
#[derive(Debug, Clone, Copy)]
pub struct BlackDeltaCalculator {
    option: OptionType,
    convention: DeltaConvention,
    spot: Price,
    foreign_discount: DiscountFactor,
    forward: Real,
    /// σ√T
    std_dev: Real,
    solver: SolverConfig,
}

impl BlackDeltaCalculator {
    /// Create a calculator.
    ///
    /// # Errors
    /// `InvalidSmile` unless `spot > 0`, `vol > 0`, `time > 0`, and both
    /// discount factors lie in (0, 1].
    pub fn new(
        option: OptionType,
        convention: DeltaConvention,
        spot: Price,
        domestic_discount: DiscountFactor,
        foreign_discount: DiscountFactor,
        vol: Volatility,
        time: Time,
    ) -> Result<Self> {
        ensure!(
            spot > 0.0,
            Error::InvalidSmile(format!("spot must be positive, got {spot}"))
        );
        ensure!(
            vol > 0.0 && vol.is_finite(),
            Error::InvalidSmile(format!("vol must be positive, got {vol}"))
        );
        ensure!(
            time > 0.0,
            Error::InvalidSmile(format!("time must be positive, got {time}"))
        );
        ensure!(
            domestic_discount > 0.0 && domestic_discount <= 1.0,
            Error::InvalidSmile(format!(
                "domestic discount factor {domestic_discount} outside (0, 1]"
            ))
        );
        ensure!(
            foreign_discount > 0.0 && foreign_discount <= 1.0,
            Error::InvalidSmile(format!(
                "foreign discount factor {foreign_discount} outside (0, 1]"
            ))
        );
        Ok(Self {
            option,
            convention,
            spot,
            foreign_discount,
            forward: spot * foreign_discount / domestic_discount,
            std_dev: vol * time.sqrt(),
            solver: SolverConfig::default(),
        })
    }

    /// Replace the solver settings used by premium-adjusted inversions.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// The forward implied by the supplied discount factors.
    pub fn forward(&self) -> Real {
        self.forward
    }

    /// Delta of an option struck at `strike`.
    ///
    /// # Errors
    /// `InvalidSmile` when `strike` is not strictly positive.
    pub fn delta(&self, strike: Real) -> Result<Real> {
        ensure!(
            strike > 0.0,
            Error::InvalidSmile(format!("strike must be positive, got {strike}"))
        );
        let omega = self.option.sign();
        let d1 = (self.forward / strike).ln() / self.std_dev + 0.5 * self.std_dev;
        let scale = match self.convention {
            DeltaConvention::Spot | DeltaConvention::PremiumAdjustedSpot => self.foreign_discount,
            DeltaConvention::Forward | DeltaConvention::PremiumAdjustedForward => 1.0,
        };
        let delta = if self.convention.is_premium_adjusted() {
            let d2 = d1 - self.std_dev;
            omega * scale * (strike / self.forward) * normal_cdf(omega * d2)
        } else {
            omega * scale * normal_cdf(omega * d1)
        };
        Ok(delta)
    }

    /// Strike of the option quoted at `delta`.
    ///
    /// Closed form for the premium-excluded conventions. Under a
    /// premium-adjusted convention only put deltas can be inverted
    /// (`InvalidUsage` for calls); the put mapping is strictly monotone
    /// and is solved with a bracketed Brent search seeded at the
    /// premium-excluded strike.
    pub fn strike_from_delta(&self, delta: Real) -> Result<Real> {
        if self.convention.is_premium_adjusted() {
            return self.premium_adjusted_strike(delta);
        }
        self.simple_strike(delta, self.convention)
    }

    /// The ATM strike under `definition`.
    ///
    /// `DeltaNeutral` is the zero-delta straddle of this calculator's own
    /// delta family: `F·exp(+σ²T/2)` premium-excluded, `F·exp(−σ²T/2)`
    /// premium-adjusted.
    pub fn atm_strike(&self, definition: AtmDefinition) -> Real {
        match definition {
            AtmDefinition::DeltaNeutral => {
                let half_var = 0.5 * self.std_dev * self.std_dev;
                if self.convention.is_premium_adjusted() {
                    self.forward * (-half_var).exp()
                } else {
                    self.forward * half_var.exp()
                }
            }
            AtmDefinition::Forward => self.forward,
            AtmDefinition::Spot => self.spot,
        }
    }

    /// Closed-form inversion of the premium-excluded delta.
    fn simple_strike(&self, delta: Real, convention: DeltaConvention) -> Result<Real> {
        let scale = match convention {
            DeltaConvention::Spot => self.foreign_discount,
            DeltaConvention::Forward => 1.0,
            _ => unreachable!("simple_strike only handles premium-excluded conventions"),
        };
        let omega = self.option.sign();
        let p = omega * delta / scale;
        ensure!(
            p > 0.0,
            Error::InvalidUsage(format!(
                "{:?} delta must have sign {omega}, got {delta}",
                self.option
            ))
        );
        ensure!(
            p < 1.0,
            Error::InvalidSmile(format!(
                "delta {delta} out of range for the {convention:?} convention (|delta| < {scale})"
            ))
        );
        // d1 = ω·Φ⁻¹(ω·Δ/scale), then K = F·exp(σ²T/2 − d1·σ√T).
        let d1 = omega * normal_quantile(p)?;
        Ok(self.forward * (0.5 * self.std_dev * self.std_dev - d1 * self.std_dev).exp())
    }

    /// Bracketed numeric inversion of the premium-adjusted put delta.
    fn premium_adjusted_strike(&self, delta: Real) -> Result<Real> {
        ensure!(
            self.option == OptionType::Put,
            Error::InvalidUsage(
                "premium-adjusted strike inversion is only defined for puts \
                 (call delta is not monotone in strike)"
                    .into()
            )
        );
        ensure!(
            delta < 0.0,
            Error::InvalidUsage(format!("put delta must be negative, got {delta}"))
        );

        // The premium-adjusted put delta exceeds the raw one (the premium
        // is given back), so the premium-excluded strike lies at or below
        // the root and seeds the lower bracket edge.
        let pure = self.convention.without_premium_adjustment();
        let mut lo = match self.simple_strike(delta, pure) {
            Ok(k) => k,
            // Quote magnitude out of reach of the raw delta; fall back to
            // the forward and let the bracket search take over.
            Err(Error::InvalidSmile(_)) => self.forward,
            Err(e) => return Err(e),
        };
        let objective = |k: Real| match self.delta(k) {
            Ok(d) => d - delta,
            Err(_) => Real::NAN,
        };

        // Premium-adjusted put delta decreases in strike, so walk `lo`
        // down to a non-negative residual and `hi` up to a non-positive
        // one.
        let budget = self.solver.max_evaluations.max(1);
        let mut steps = 0usize;
        while objective(lo) < 0.0 {
            lo /= BRACKET_GROWTH;
            steps += 1;
            ensure!(
                steps < budget,
                Error::NoConvergence {
                    evaluations: steps,
                    context: format!("no lower strike bracket for delta {delta}"),
                }
            );
        }
        let mut hi = lo * BRACKET_GROWTH;
        while objective(hi) > 0.0 {
            hi *= BRACKET_GROWTH;
            steps += 1;
            ensure!(
                steps < budget,
                Error::NoConvergence {
                    evaluations: steps,
                    context: format!("no upper strike bracket for delta {delta}"),
                }
            );
        }
        Brent::new(self.solver).solve_bracketed(objective, lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SPOT: Real = 1.13;
    const DF_D: Real = 0.995;
    const DF_F: Real = 0.9975;
    const TIME: Real = 0.25;
    const VOL: Real = 0.03;

    fn calc(option: OptionType, convention: DeltaConvention) -> BlackDeltaCalculator {
        BlackDeltaCalculator::new(option, convention, SPOT, DF_D, DF_F, VOL, TIME).unwrap()
    }

    #[test]
    fn spot_delta_roundtrip() {
        let put = calc(OptionType::Put, DeltaConvention::Spot);
        for target in [-0.9, -0.75, -0.5, -0.25, -0.1] {
            let k = put.strike_from_delta(target).unwrap();
            assert_abs_diff_eq!(put.delta(k).unwrap(), target, epsilon = 1e-12);
        }
    }

    #[test]
    fn forward_delta_roundtrip() {
        let call = calc(OptionType::Call, DeltaConvention::Forward);
        for target in [0.1, 0.25, 0.5, 0.75, 0.9] {
            let k = call.strike_from_delta(target).unwrap();
            assert_abs_diff_eq!(call.delta(k).unwrap(), target, epsilon = 1e-12);
        }
    }

    #[test]
    fn premium_adjusted_put_roundtrip() {
        for convention in [
            DeltaConvention::PremiumAdjustedSpot,
            DeltaConvention::PremiumAdjustedForward,
        ] {
            let put = calc(OptionType::Put, convention);
            for target in [-0.9, -0.5, -0.25, -0.1] {
                let k = put.strike_from_delta(target).unwrap();
                assert_abs_diff_eq!(put.delta(k).unwrap(), target, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn premium_adjusted_call_inversion_is_invalid_usage() {
        let call = calc(OptionType::Call, DeltaConvention::PremiumAdjustedSpot);
        let err = call.strike_from_delta(0.25).unwrap_err();
        assert!(matches!(err, Error::InvalidUsage(_)));
    }

    #[test]
    fn premium_adjustment_shrinks_put_delta_magnitude() {
        let raw = calc(OptionType::Put, DeltaConvention::Spot);
        let adjusted = calc(OptionType::Put, DeltaConvention::PremiumAdjustedSpot);
        let k = raw.strike_from_delta(-0.25).unwrap();
        assert!(adjusted.delta(k).unwrap().abs() < raw.delta(k).unwrap().abs());
    }

    #[test]
    fn delta_neutral_straddle_is_zero() {
        for convention in [
            DeltaConvention::Spot,
            DeltaConvention::Forward,
            DeltaConvention::PremiumAdjustedSpot,
            DeltaConvention::PremiumAdjustedForward,
        ] {
            let call = calc(OptionType::Call, convention);
            let put = calc(OptionType::Put, convention);
            let k = call.atm_strike(AtmDefinition::DeltaNeutral);
            let straddle = call.delta(k).unwrap() + put.delta(k).unwrap();
            assert_abs_diff_eq!(straddle, 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn atm_forward_and_spot_definitions() {
        let put = calc(OptionType::Put, DeltaConvention::Spot);
        assert_abs_diff_eq!(
            put.atm_strike(AtmDefinition::Forward),
            SPOT * DF_F / DF_D,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(put.atm_strike(AtmDefinition::Spot), SPOT, epsilon = 1e-15);
    }

    #[test]
    fn wrong_sign_delta_rejected() {
        let put = calc(OptionType::Put, DeltaConvention::Spot);
        assert!(matches!(
            put.strike_from_delta(0.25).unwrap_err(),
            Error::InvalidUsage(_)
        ));
        let call = calc(OptionType::Call, DeltaConvention::Spot);
        assert!(matches!(
            call.strike_from_delta(-0.25).unwrap_err(),
            Error::InvalidUsage(_)
        ));
    }

    #[test]
    fn invalid_market_inputs_rejected() {
        let bad = |spot, df_d, df_f, vol, time| {
            BlackDeltaCalculator::new(
                OptionType::Put,
                DeltaConvention::Spot,
                spot,
                df_d,
                df_f,
                vol,
                time,
            )
        };
        assert!(bad(-1.0, DF_D, DF_F, VOL, TIME).is_err());
        assert!(bad(SPOT, 1.5, DF_F, VOL, TIME).is_err());
        assert!(bad(SPOT, DF_D, 0.0, VOL, TIME).is_err());
        assert!(bad(SPOT, DF_D, DF_F, 0.0, TIME).is_err());
        assert!(bad(SPOT, DF_D, DF_F, VOL, -0.5).is_err());
    }
}
