//! A quoted smile after clean-delta conversion and ATM insertion.
//!
//! Every [`ResolvedSmile`] lives on a single delta axis: the clean spot
//! put delta. Quoted nodes under any other convention are mapped onto
//! that axis through their own quoted volatility (each quoted pair is
//! already self-consistent, so no solve is needed per node), and exactly
//! one ATM node is inserted at its clean-delta position.

use crate::atm::atm_node;
use crate::delta::BlackDeltaCalculator;
use dv_core::{ensure, DiscountFactor, Error, Real, Result, Time, Volatility};
use dv_market::{DeltaConvention, MarketSnapshot, OptionType, QuotedSmile, SmileNode};
use dv_math::SolverConfig;
use dv_time::Date;

/// A smile ready for interpolation: clean spot put deltas, ATM inserted.
#[derive(Debug, Clone)]
pub struct ResolvedSmile {
    maturity: Date,
    time: Time,
    domestic_discount: DiscountFactor,
    foreign_discount: DiscountFactor,
    convention: DeltaConvention,
    atm_vol: Volatility,
    atm_strike: Real,
    atm_index: usize,
    nodes: Vec<SmileNode>,
}

impl ResolvedSmile {
    /// Convert a quoted smile onto the clean spot-delta axis and insert
    /// the ATM node.
    ///
    /// # Errors
    /// `InvalidSmile` when the tenor is not after the as-of date, when
    /// conversion breaks strict delta ordering, or when the ATM delta
    /// collides with a quoted node.
    pub fn from_quote(
        market: &MarketSnapshot,
        quote: &QuotedSmile,
        solver: SolverConfig,
    ) -> Result<Self> {
        let time = market.time_to(quote.maturity());
        ensure!(
            time > 0.0,
            Error::InvalidSmile(format!(
                "tenor {} is not after the as-of date {}",
                quote.maturity(),
                market.as_of()
            ))
        );
        let domestic_discount = market.discount_domestic(quote.maturity());
        let foreign_discount = market.discount_foreign(quote.maturity());

        let mut nodes = Vec::with_capacity(quote.nodes().len() + 1);
        for node in quote.nodes() {
            nodes.push(clean_node(
                *node,
                quote.convention(),
                market.spot(),
                domestic_discount,
                foreign_discount,
                time,
                solver,
            )?);
        }
        for w in nodes.windows(2) {
            ensure!(
                w[0].delta < w[1].delta,
                Error::InvalidSmile(format!(
                    "clean-delta conversion broke node ordering: {} >= {}",
                    w[0].delta, w[1].delta
                ))
            );
        }

        let (atm_strike, atm_delta) = atm_node(
            quote.convention(),
            quote.atm_definition(),
            market.spot(),
            domestic_discount,
            foreign_discount,
            quote.atm_vol(),
            time,
            solver,
        )?;
        let atm_index = nodes.partition_point(|n| n.delta < atm_delta);
        ensure!(
            nodes.get(atm_index).map(|n| n.delta) != Some(atm_delta),
            Error::InvalidSmile(format!(
                "ATM delta {atm_delta} collides with a quoted node"
            ))
        );
        nodes.insert(atm_index, SmileNode::new(atm_delta, quote.atm_vol()));

        Ok(Self {
            maturity: quote.maturity(),
            time,
            domestic_discount,
            foreign_discount,
            convention: quote.convention(),
            atm_vol: quote.atm_vol(),
            atm_strike,
            atm_index,
            nodes,
        })
    }

    /// The tenor maturity date.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Year fraction from the as-of date to maturity.
    pub fn time(&self) -> Time {
        self.time
    }

    /// Domestic discount factor to maturity.
    pub fn domestic_discount(&self) -> DiscountFactor {
        self.domestic_discount
    }

    /// Foreign discount factor to maturity.
    pub fn foreign_discount(&self) -> DiscountFactor {
        self.foreign_discount
    }

    /// The original quotation convention of the smile.
    pub fn convention(&self) -> DeltaConvention {
        self.convention
    }

    /// The quoted ATM volatility.
    pub fn atm_vol(&self) -> Volatility {
        self.atm_vol
    }

    /// The ATM strike implied by the smile's convention and definition.
    pub fn atm_strike(&self) -> Real {
        self.atm_strike
    }

    /// Index of the inserted ATM node.
    pub fn atm_index(&self) -> usize {
        self.atm_index
    }

    /// The clean-delta nodes, ATM included, ordered by delta.
    pub fn nodes(&self) -> &[SmileNode] {
        &self.nodes
    }

    /// Split the nodes into interpolation abscissae and ordinates.
    pub fn axes(&self) -> (Vec<Real>, Vec<Volatility>) {
        (
            self.nodes.iter().map(|n| n.delta).collect(),
            self.nodes.iter().map(|n| n.vol).collect(),
        )
    }
}

/// Map one quoted node onto the clean spot-delta axis using its own vol.
fn clean_node(
    node: SmileNode,
    convention: DeltaConvention,
    spot: Real,
    domestic_discount: DiscountFactor,
    foreign_discount: DiscountFactor,
    time: Time,
    solver: SolverConfig,
) -> Result<SmileNode> {
    if convention == DeltaConvention::Spot {
        return Ok(node);
    }
    let own = BlackDeltaCalculator::new(
        OptionType::Put,
        convention,
        spot,
        domestic_discount,
        foreign_discount,
        node.vol,
        time,
    )?
    .with_solver(solver);
    let strike = own.strike_from_delta(node.delta)?;
    let clean = BlackDeltaCalculator::new(
        OptionType::Put,
        DeltaConvention::Spot,
        spot,
        domestic_discount,
        foreign_discount,
        node.vol,
        time,
    )?;
    Ok(SmileNode::new(clean.delta(strike)?, node.vol))
}
