use crate::errors::{PotError, PotResult};
use crate::models::touch::TouchEstimator;
use crate::models::{LegInput, LegKind, MarketSnapshot, TouchProbability};

/// Supported strategy shapes: two short strikes, or one on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    IronCondor,
    ShortCall,
    ShortPut,
}

impl Strategy {
    pub fn parse(s: &str) -> PotResult<Self> {
        match s {
            "iron_condor" => Ok(Self::IronCondor),
            "short_call" => Ok(Self::ShortCall),
            "short_put" => Ok(Self::ShortPut),
            other => Err(PotError::Config(format!("unknown strategy: {other}"))),
        }
    }

    #[inline]
    pub fn uses_call(self) -> bool {
        matches!(self, Self::IronCondor | Self::ShortCall)
    }

    #[inline]
    pub fn uses_put(self) -> bool {
        matches!(self, Self::IronCondor | Self::ShortPut)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IronCondor => write!(f, "iron_condor"),
            Self::ShortCall => write!(f, "short_call"),
            Self::ShortPut => write!(f, "short_put"),
        }
    }
}

/// Joint outcome for one strategy evaluation. Stack-allocated, Copy.
/// Recomputed fresh on every input change; never cached.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    /// Per-leg POTs; `None` means the strategy has no such leg.
    pub pot_call: Option<TouchProbability>,
    pub pot_put: Option<TouchProbability>,
    /// P(at least one short strike touches before expiration)
    pub prob_either: f64,
    /// Always 1 - prob_either, never computed independently.
    pub prob_neither: f64,
}

impl StrategyOutcome {
    fn from_either(
        strategy: Strategy,
        pot_call: Option<TouchProbability>,
        pot_put: Option<TouchProbability>,
        prob_either: f64,
    ) -> Self {
        Self {
            strategy,
            pot_call,
            pot_put,
            prob_either,
            prob_neither: 1.0 - prob_either,
        }
    }
}

/// Compose per-leg touch probabilities into the joint outcome.
///
/// Condor: prob_either = c + p - c*p
///
/// Inclusion-exclusion, treating the two legs as independent. The legs
/// share the underlying path, so this is a known simplification carried
/// over from the reference model, not a derived property.
///
/// A leg required by the strategy but passed as `None` is a
/// data-availability failure (`PotError::MissingLeg`), never a zero.
pub fn combine(
    pot_call: Option<TouchProbability>,
    pot_put: Option<TouchProbability>,
    strategy: Strategy,
) -> PotResult<StrategyOutcome> {
    match strategy {
        Strategy::IronCondor => {
            let c = pot_call.ok_or(PotError::MissingLeg(LegKind::Call))?;
            let p = pot_put.ok_or(PotError::MissingLeg(LegKind::Put))?;
            let either = c.value() + p.value() - c.value() * p.value();
            Ok(StrategyOutcome::from_either(strategy, Some(c), Some(p), either))
        }
        Strategy::ShortCall => {
            let c = pot_call.ok_or(PotError::MissingLeg(LegKind::Call))?;
            Ok(StrategyOutcome::from_either(strategy, Some(c), None, c.value()))
        }
        Strategy::ShortPut => {
            let p = pot_put.ok_or(PotError::MissingLeg(LegKind::Put))?;
            Ok(StrategyOutcome::from_either(strategy, None, Some(p), p.value()))
        }
    }
}

/// Run the estimator over the legs the strategy uses and combine.
///
/// Legs are `Option<LegInput>`: `None` means the data (strike or implied
/// vol) was unavailable upstream, and surfaces as `MissingLeg` when the
/// strategy needs it. Legs the strategy does not use are ignored.
pub fn evaluate(
    estimator: &TouchEstimator,
    snapshot: &MarketSnapshot,
    call: Option<LegInput>,
    put: Option<LegInput>,
    strategy: Strategy,
) -> PotResult<StrategyOutcome> {
    let pot_call = if strategy.uses_call() {
        call.map(|leg| estimator.leg_touch(LegKind::Call, snapshot, &leg))
    } else {
        None
    };
    let pot_put = if strategy.uses_put() {
        put.map(|leg| estimator.leg_touch(LegKind::Put, snapshot, &leg))
    } else {
        None
    };

    combine(pot_call, pot_put, strategy)
}
