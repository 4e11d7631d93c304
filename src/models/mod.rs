pub mod touch;

/// Which side of the strategy a short strike sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    Call,
    Put,
}

impl std::fmt::Display for LegKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// Market inputs shared by every leg of one calculation.
/// Immutable for the duration of one estimate; recomputed fresh whenever
/// any input changes. Stack-allocated, Copy.
#[derive(Debug, Clone, Copy)]
pub struct MarketSnapshot {
    /// Spot price of the underlying (positive)
    pub spot: f64,
    /// Time to expiration in years (calendar days / 365)
    pub horizon_years: f64,
}

/// One short strike plus its annualized implied volatility (decimal form,
/// e.g. 0.25 for 25%). Built from a resolved chain quote; a quote with no
/// implied vol produces no `LegInput` at all rather than a zero vol.
#[derive(Debug, Clone, Copy)]
pub struct LegInput {
    pub strike: f64,
    pub implied_vol: f64,
}

/// A probability of touch, clamped to [0, 1] at construction.
///
/// The raw reflection formula can land fractionally outside [0, 1] at
/// extreme z, so the clamp happens here, before any composition.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct TouchProbability(f64);

impl TouchProbability {
    pub const ZERO: Self = Self(0.0);
    pub const CERTAIN: Self = Self(1.0);

    /// Clamp a raw formula output into a valid probability.
    /// Non-finite values collapse to 0 -- they only arise from inputs the
    /// degenerate-case policy already maps to "will not touch".
    #[inline]
    pub fn new(raw: f64) -> Self {
        if raw.is_finite() {
            Self(raw.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}
