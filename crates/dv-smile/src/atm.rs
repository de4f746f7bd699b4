//! ATM node computation.
//!
//! The ATM strike is found under the smile's *own* convention and
//! definition, but the node that goes into the interpolant is always the
//! clean spot put delta of that strike — the one delta axis every
//! resolved smile shares.

use crate::delta::BlackDeltaCalculator;
use dv_core::{DiscountFactor, Price, Real, Result, Time, Volatility};
use dv_market::{AtmDefinition, DeltaConvention, OptionType};
use dv_math::SolverConfig;

/// Compute the ATM (strike, clean spot put delta) pair for a smile.
#[allow(clippy::too_many_arguments)]
pub fn atm_node(
    convention: DeltaConvention,
    definition: AtmDefinition,
    spot: Price,
    domestic_discount: DiscountFactor,
    foreign_discount: DiscountFactor,
    atm_vol: Volatility,
    time: Time,
    solver: SolverConfig,
) -> Result<(Real, Real)> {
    let own = BlackDeltaCalculator::new(
        OptionType::Put,
        convention,
        spot,
        domestic_discount,
        foreign_discount,
        atm_vol,
        time,
    )?
    .with_solver(solver);
    let strike = own.atm_strike(definition);

    let clean = BlackDeltaCalculator::new(
        OptionType::Put,
        DeltaConvention::Spot,
        spot,
        domestic_discount,
        foreign_discount,
        atm_vol,
        time,
    )?;
    let delta = clean.delta(strike)?;
    Ok((strike, delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use dv_math::distributions::normal_cdf;

    const SPOT: Real = 1.13;
    const DF_D: Real = 0.995;
    const DF_F: Real = 0.9975;
    const TIME: Real = 0.25;
    const VOL: Real = 0.03;

    #[test]
    fn delta_neutral_strike_and_clean_delta() {
        let (strike, delta) = atm_node(
            DeltaConvention::Spot,
            AtmDefinition::DeltaNeutral,
            SPOT,
            DF_D,
            DF_F,
            VOL,
            TIME,
            SolverConfig::default(),
        )
        .unwrap();
        let forward = SPOT * DF_F / DF_D;
        let half_var = 0.5 * VOL * VOL * TIME;
        assert_abs_diff_eq!(strike, forward * half_var.exp(), epsilon = 1e-14);
        // d1 = 0 at the delta-neutral strike, so the clean put delta is
        // -df_f/2.
        assert_abs_diff_eq!(delta, -DF_F * 0.5, epsilon = 1e-14);
    }

    #[test]
    fn premium_adjusted_atm_is_always_a_clean_delta() {
        let (strike, delta) = atm_node(
            DeltaConvention::PremiumAdjustedSpot,
            AtmDefinition::DeltaNeutral,
            SPOT,
            DF_D,
            DF_F,
            VOL,
            TIME,
            SolverConfig::default(),
        )
        .unwrap();
        let forward = SPOT * DF_F / DF_D;
        let std_dev = VOL * TIME.sqrt();
        assert_abs_diff_eq!(
            strike,
            forward * (-0.5 * std_dev * std_dev).exp(),
            epsilon = 1e-14
        );
        // d1 = σ√T at that strike; the stored delta is the clean spot
        // put delta, not the premium-adjusted one.
        assert_abs_diff_eq!(delta, -DF_F * normal_cdf(-std_dev), epsilon = 1e-12);
    }
}
