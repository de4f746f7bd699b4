//! FX option quotation conventions.

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl OptionType {
    /// +1 for calls, −1 for puts — the `ω` in the Black-Scholes formulas.
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

/// Delta quotation convention of an FX smile.
///
/// The *premium-adjusted* ("premium-included") conventions subtract the
/// option premium, expressed in units of spot, from the raw delta. That
/// subtraction makes the call delta non-monotone in strike, which is why
/// strike inversion under these conventions is restricted to puts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaConvention {
    /// Spot delta: `±df_f·Φ(±d1)`.
    Spot,
    /// Forward delta: `±Φ(±d1)`.
    Forward,
    /// Premium-adjusted spot delta: `±df_f·(K/F)·Φ(±d2)`.
    PremiumAdjustedSpot,
    /// Premium-adjusted forward delta: `±(K/F)·Φ(±d2)`.
    PremiumAdjustedForward,
}

impl DeltaConvention {
    /// Whether the convention includes the premium adjustment.
    pub fn is_premium_adjusted(&self) -> bool {
        matches!(
            self,
            DeltaConvention::PremiumAdjustedSpot | DeltaConvention::PremiumAdjustedForward
        )
    }

    /// The premium-excluded counterpart (identity for Spot/Forward).
    pub fn without_premium_adjustment(&self) -> DeltaConvention {
        match self {
            DeltaConvention::Spot | DeltaConvention::PremiumAdjustedSpot => DeltaConvention::Spot,
            DeltaConvention::Forward | DeltaConvention::PremiumAdjustedForward => {
                DeltaConvention::Forward
            }
        }
    }
}

/// How the at-the-money strike of a smile is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtmDefinition {
    /// The zero-delta straddle: the strike where call delta plus put
    /// delta vanishes under the smile's own convention.
    #[default]
    DeltaNeutral,
    /// ATM at the forward: `K = F`.
    Forward,
    /// ATM at the spot: `K = S`.
    Spot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_adjustment_flags() {
        assert!(!DeltaConvention::Spot.is_premium_adjusted());
        assert!(!DeltaConvention::Forward.is_premium_adjusted());
        assert!(DeltaConvention::PremiumAdjustedSpot.is_premium_adjusted());
        assert!(DeltaConvention::PremiumAdjustedForward.is_premium_adjusted());
    }

    #[test]
    fn pure_counterparts() {
        assert_eq!(
            DeltaConvention::PremiumAdjustedSpot.without_premium_adjustment(),
            DeltaConvention::Spot
        );
        assert_eq!(
            DeltaConvention::PremiumAdjustedForward.without_premium_adjustment(),
            DeltaConvention::Forward
        );
        assert_eq!(
            DeltaConvention::Forward.without_premium_adjustment(),
            DeltaConvention::Forward
        );
    }
}
