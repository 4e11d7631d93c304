//! Externally supplied option chain snapshot and the lookups the core
//! consumes: nearest expiration to a target date, percent-OTM strike
//! targets, and nearest-available-strike resolution.
//!
//! Nothing here fetches data. The chain arrives as input (typically a JSON
//! snapshot) and every lookup is a pure function over it.

use crate::errors::{PotError, PotResult};
use crate::models::LegInput;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Calendar-day year used to convert days-to-expiration into years.
pub const DAYS_PER_YEAR: f64 = 365.0;

// ── Snapshot value types ──

/// One quoted option at a strike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionQuote {
    pub strike: f64,
    /// Annualized implied vol, decimal form. Absent when the feed had no
    /// quote to imply it from -- absence is not a zero.
    pub implied_volatility: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub volume: Option<i64>,
    pub open_interest: Option<i64>,
}

impl OptionQuote {
    /// Leg input for the estimator, if this quote carries an implied vol.
    #[inline]
    pub fn leg_input(&self) -> Option<LegInput> {
        self.implied_volatility.map(|iv| LegInput {
            strike: self.strike,
            implied_vol: iv,
        })
    }
}

/// All quotes for one expiration date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpirationSlice {
    pub expiration: NaiveDate,
    pub calls: Vec<OptionQuote>,
    pub puts: Vec<OptionQuote>,
}

/// Snapshot of an option chain for one underlying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    pub spot: f64,
    pub expirations: Vec<ExpirationSlice>,
}

impl OptionChain {
    /// Expiration on or after `today` closest to `today + target_days`.
    ///
    /// Past expirations are filtered out first; with none left the chain
    /// cannot serve this query and that is a chain error.
    pub fn nearest_expiration(
        &self,
        today: NaiveDate,
        target_days: i64,
    ) -> PotResult<&ExpirationSlice> {
        let target = today + chrono::Duration::days(target_days);
        self.expirations
            .iter()
            .filter(|slice| slice.expiration >= today)
            .min_by_key(|slice| (slice.expiration - target).num_days().abs())
            .ok_or_else(|| PotError::Chain("no future expirations in chain".into()))
    }
}

// ── Lookups ──

/// Calendar days from `today` to `expiration`, as years (days / 365,
/// floored at zero days).
#[inline]
pub fn horizon_years(today: NaiveDate, expiration: NaiveDate) -> f64 {
    (expiration - today).num_days().max(0) as f64 / DAYS_PER_YEAR
}

/// Short-strike targets at a symmetric percent-OTM offset from spot:
/// call above, put below.
#[inline]
pub fn otm_targets(spot: f64, pct_otm: f64) -> (f64, f64) {
    (spot * (1.0 + pct_otm), spot * (1.0 - pct_otm))
}

/// Nearest available strike to `target` by absolute price difference.
/// Equidistant strikes resolve to the lower one.
pub fn nearest_strike<'a>(quotes: &'a [OptionQuote], target: f64) -> PotResult<&'a OptionQuote> {
    quotes
        .iter()
        .min_by(|a, b| {
            let da = (a.strike - target).abs();
            let db = (b.strike - target).abs();
            da.partial_cmp(&db)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.strike.partial_cmp(&b.strike).unwrap_or(Ordering::Equal))
        })
        .ok_or_else(|| PotError::Chain("no strikes available at this expiration".into()))
}
