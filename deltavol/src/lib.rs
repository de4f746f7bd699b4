//! # deltavol
//!
//! Implied-volatility resolution from FX delta-quoted volatility smiles.
//!
//! FX smiles are quoted per delta, not per strike, and the Black-Scholes
//! delta of an option depends on the volatility being looked up. Reading
//! the volatility for a strike is therefore a fixed-point problem
//! `v = smile(Δ(K, v))`, which this crate solves with a bounded Brent
//! iteration over a smile interpolated on the clean spot put-delta axis.
//!
//! ```no_run
//! use deltavol::{
//!     AtmDefinition, DeltaConvention, FlatDiscountCurve, MarketSnapshot,
//!     QuotedSmile, SmileNode, SmileResolver,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> deltavol::Result<()> {
//! let as_of = deltavol::Date::from_ymd_opt(2025, 6, 16).unwrap();
//! let market = MarketSnapshot::new(
//!     as_of,
//!     1.13,
//!     Arc::new(FlatDiscountCurve::new(as_of, 0.02)?),
//!     Arc::new(FlatDiscountCurve::new(as_of, 0.01)?),
//! )?;
//! let quote = QuotedSmile::new(
//!     deltavol::Date::from_ymd_opt(2025, 9, 16).unwrap(),
//!     0.03,
//!     AtmDefinition::DeltaNeutral,
//!     vec![
//!         SmileNode::new(-0.75, 0.0316),
//!         SmileNode::new(-0.25, 0.0318),
//!     ],
//!     DeltaConvention::Spot,
//! )?;
//! let vol = SmileResolver::default().resolve(1.14, &market, &quote)?;
//! # let _ = vol;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Parallel resolution over strike grids.
pub mod batch;

pub use batch::{resolve_strikes, resolve_strikes_on};
pub use dv_core::{DiscountFactor, Error, Price, Real, Result, Size, Time, Volatility};
pub use dv_market::{
    AtmDefinition, DeltaConvention, DiscountCurve, FlatDiscountCurve, MarketSnapshot, OptionType,
    QuotedSmile, SmileNode,
};
pub use dv_math::{Brent, Interpolation1D, InterpolationKind, SolverConfig};
pub use dv_smile::{atm_node, BlackDeltaCalculator, ResolvedSmile, ResolverConfig, SmileResolver};
pub use dv_termstructures::{BlackVarianceCurve, TermStructureBuilder};
pub use dv_time::{Actual360, Actual365Fixed, Date, DayCounter};
