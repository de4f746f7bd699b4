//! Delta-quoted smile records.
//!
//! A [`QuotedSmile`] is one tenor of the market quote: an ATM volatility
//! plus an ordered ladder of (put delta, volatility) nodes under a stated
//! delta convention. Deltas are signed put deltas (negative), strictly
//! increasing — i.e. from the deep-in-the-money −0.90 put up to the
//! −0.10 wing.

use crate::conventions::{AtmDefinition, DeltaConvention};
use dv_core::{ensure, Error, Real, Result, Volatility};
use dv_time::Date;

/// One (delta, volatility) node of a quoted smile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmileNode {
    /// Signed put delta (negative).
    pub delta: Real,
    /// Quoted Black volatility at that delta.
    pub vol: Volatility,
}

impl SmileNode {
    /// Convenience constructor.
    pub fn new(delta: Real, vol: Volatility) -> Self {
        Self { delta, vol }
    }
}

/// A delta-quoted volatility smile for a single tenor.
#[derive(Debug, Clone)]
pub struct QuotedSmile {
    maturity: Date,
    atm_vol: Volatility,
    atm_definition: AtmDefinition,
    nodes: Vec<SmileNode>,
    convention: DeltaConvention,
}

impl QuotedSmile {
    /// Create and validate a quoted smile.
    ///
    /// # Errors
    /// `InvalidSmile` when the node ladder is empty, deltas are not
    /// negative and strictly increasing, or any volatility is not
    /// strictly positive.
    pub fn new(
        maturity: Date,
        atm_vol: Volatility,
        atm_definition: AtmDefinition,
        nodes: Vec<SmileNode>,
        convention: DeltaConvention,
    ) -> Result<Self> {
        ensure!(
            atm_vol > 0.0,
            Error::InvalidSmile(format!("ATM vol must be positive, got {atm_vol}"))
        );
        ensure!(
            !nodes.is_empty(),
            Error::InvalidSmile("smile needs at least one delta node".into())
        );
        for node in &nodes {
            ensure!(
                node.vol > 0.0,
                Error::InvalidSmile(format!(
                    "vol at delta {} must be positive, got {}",
                    node.delta, node.vol
                ))
            );
            ensure!(
                node.delta < 0.0,
                Error::InvalidSmile(format!(
                    "deltas are signed put deltas and must be negative, got {}",
                    node.delta
                ))
            );
        }
        for w in nodes.windows(2) {
            ensure!(
                w[0].delta < w[1].delta,
                Error::InvalidSmile(format!(
                    "deltas must be strictly increasing: {} >= {}",
                    w[0].delta, w[1].delta
                ))
            );
        }
        Ok(Self {
            maturity,
            atm_vol,
            atm_definition,
            nodes,
            convention,
        })
    }

    /// The option maturity date of this tenor.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// The quoted ATM volatility.
    pub fn atm_vol(&self) -> Volatility {
        self.atm_vol
    }

    /// How the ATM strike is defined for this smile.
    pub fn atm_definition(&self) -> AtmDefinition {
        self.atm_definition
    }

    /// The quoted (delta, vol) nodes, ordered by delta.
    pub fn nodes(&self) -> &[SmileNode] {
        &self.nodes
    }

    /// The delta convention of the quotes.
    pub fn convention(&self) -> DeltaConvention {
        self.convention
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maturity() -> Date {
        Date::from_ymd_opt(2025, 9, 15).unwrap()
    }

    fn ladder() -> Vec<SmileNode> {
        vec![
            SmileNode::new(-0.90, 0.034),
            SmileNode::new(-0.75, 0.0316),
            SmileNode::new(-0.25, 0.0318),
            SmileNode::new(-0.10, 0.0335),
        ]
    }

    #[test]
    fn accepts_valid_ladder() {
        let smile = QuotedSmile::new(
            maturity(),
            0.03,
            AtmDefinition::DeltaNeutral,
            ladder(),
            DeltaConvention::Spot,
        )
        .unwrap();
        assert_eq!(smile.nodes().len(), 4);
        assert_eq!(smile.convention(), DeltaConvention::Spot);
    }

    #[test]
    fn rejects_non_monotone_deltas() {
        let mut nodes = ladder();
        nodes.swap(1, 2);
        let err = QuotedSmile::new(
            maturity(),
            0.03,
            AtmDefinition::DeltaNeutral,
            nodes,
            DeltaConvention::Spot,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSmile(_)));
    }

    #[test]
    fn rejects_positive_delta() {
        let mut nodes = ladder();
        nodes.push(SmileNode::new(0.25, 0.033));
        assert!(QuotedSmile::new(
            maturity(),
            0.03,
            AtmDefinition::DeltaNeutral,
            nodes,
            DeltaConvention::Spot,
        )
        .is_err());
    }

    #[test]
    fn rejects_non_positive_vol() {
        let mut nodes = ladder();
        nodes[2].vol = 0.0;
        assert!(QuotedSmile::new(
            maturity(),
            0.03,
            AtmDefinition::DeltaNeutral,
            nodes,
            DeltaConvention::Spot,
        )
        .is_err());
    }

    #[test]
    fn rejects_empty_ladder() {
        assert!(QuotedSmile::new(
            maturity(),
            0.03,
            AtmDefinition::DeltaNeutral,
            vec![],
            DeltaConvention::Spot,
        )
        .is_err());
    }
}
