//! # dv-core
//!
//! Core types, error taxonomy, and precondition macros shared across the
//! deltavol workspace — numeric type aliases and the single
//! `thiserror`-derived error enum every other crate reports through.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types and the `ensure!` macro.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// A time measurement in years (a day-count fraction).
pub type Time = Real;

/// A volatility level expressed as a decimal (e.g. 0.10 = 10 %).
pub type Volatility = Real;

/// A discount factor in (0, 1].
pub type DiscountFactor = Real;

/// A price or spot level.
pub type Price = Real;

/// Alias used for array sizes / indices.
pub type Size = usize;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
