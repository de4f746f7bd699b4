//! Parallel resolution over strike grids.
//!
//! Each strike is an independent fixed-point solve against the same
//! resolved smile, so a grid maps cleanly onto a rayon parallel iterator.
//! Failures are reported per strike: one bad strike does not poison the
//! rest of the grid.

use dv_core::{Real, Result, Volatility};
use dv_market::{MarketSnapshot, QuotedSmile};
use dv_smile::{ResolvedSmile, ResolverConfig, SmileResolver};
use rayon::prelude::*;

/// Resolve a grid of strikes against one quoted tenor.
///
/// The smile is converted to the clean delta axis once and shared across
/// all strikes. The outer `Result` covers that conversion; the inner ones
/// are per strike.
pub fn resolve_strikes(
    strikes: &[Real],
    market: &MarketSnapshot,
    quote: &QuotedSmile,
    config: ResolverConfig,
) -> Result<Vec<Result<Volatility>>> {
    let resolved = ResolvedSmile::from_quote(market, quote, config.solver)?;
    Ok(resolve_strikes_on(strikes, market, &resolved, config))
}

/// Resolve a grid of strikes against an already-resolved smile.
pub fn resolve_strikes_on(
    strikes: &[Real],
    market: &MarketSnapshot,
    smile: &ResolvedSmile,
    config: ResolverConfig,
) -> Vec<Result<Volatility>> {
    let resolver = SmileResolver::new(config);
    strikes
        .par_iter()
        .map(|&strike| resolver.resolve_on(strike, market, smile))
        .collect()
}
