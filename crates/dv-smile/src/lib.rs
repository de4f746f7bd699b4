//! # dv-smile
//!
//! The resolution engine: Black-Scholes delta/strike conversion under the
//! four FX delta conventions, ATM strike determination, and the
//! fixed-point solve that recovers the volatility implied by a
//! delta-quoted smile for an arbitrary strike.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// ATM node computation.
pub mod atm;

/// Black-Scholes delta formulas and their inversions.
pub mod delta;

/// A quoted smile after clean-delta conversion and ATM insertion.
pub mod resolved;

/// The fixed-point resolver.
pub mod resolver;

pub use atm::atm_node;
pub use delta::BlackDeltaCalculator;
pub use resolved::ResolvedSmile;
pub use resolver::{ResolverConfig, SmileResolver};
