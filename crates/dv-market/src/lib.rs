//! # dv-market
//!
//! Read-only market inputs consumed by the resolution engine: quotation
//! conventions, discount-factor providers, the market snapshot, and
//! delta-quoted smile records. All types here are plain data supplied by
//! the caller; nothing in this crate mutates after construction.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Option type, delta conventions, ATM definitions.
pub mod conventions;

/// Discount-factor providers.
pub mod discount;

/// Delta-quoted smile records.
pub mod smile_quote;

/// The market snapshot.
pub mod snapshot;

pub use conventions::{AtmDefinition, DeltaConvention, OptionType};
pub use discount::{DiscountCurve, FlatDiscountCurve};
pub use smile_quote::{QuotedSmile, SmileNode};
pub use snapshot::MarketSnapshot;
