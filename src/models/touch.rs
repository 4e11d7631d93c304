use crate::models::{LegKind, LegInput, MarketSnapshot, TouchProbability};
use statrs::distribution::{ContinuousCDF, Normal};

/// Reflection-principle probability of touch.
///
/// POT = 2 * (1 - Phi(z))
///
/// where z = |ln(S / K)| / (sigma * sqrt(T))
///
/// First-passage probability of a driftless GBM log-price through the
/// barrier K before T, via the reflection symmetry of Brownian motion at
/// the barrier. Drift is ignored at the short horizons this calculator
/// targets.
pub struct TouchEstimator {
    /// Standard normal distribution (created once, reused)
    normal: Normal,
}

impl TouchEstimator {
    pub fn new() -> Self {
        // Normal::new(0, 1) only fails if std_dev <= 0; this is safe.
        let normal = Normal::new(0.0, 1.0).unwrap_or_else(|_| {
            // This is structurally unreachable but we handle it gracefully
            tracing::error!("failed to create standard normal -- using fallback");
            Normal::new(0.0, 1.0).unwrap_or(Normal::standard())
        });
        Self { normal }
    }

    /// Raw reflection formula. Symmetric in S and K.
    ///
    /// Degenerate inputs (T <= 0, sigma <= 0, non-positive prices) return
    /// 0: no time or no variance means no stochastic touch, a deliberate
    /// modeling choice rather than an error. S == K gives exactly 1.
    /// The caller clamps the result before composing (see
    /// [`TouchProbability`]); Phi can land fractionally outside [0, 1]
    /// at extreme z.
    #[inline]
    pub fn estimate_touch(&self, spot: f64, strike: f64, horizon_years: f64, sigma: f64) -> f64 {
        if horizon_years <= 0.0 || sigma <= 0.0 || spot <= 0.0 || strike <= 0.0 {
            return 0.0;
        }

        let z = (spot / strike).ln().abs() / (sigma * horizon_years.sqrt());
        if !z.is_finite() {
            return 0.0;
        }

        2.0 * (1.0 - self.normal.cdf(z))
    }

    /// Leg-aware probability of touch, clamped.
    ///
    /// Policy: a strike already in-the-money for its direction (call strike
    /// at or below spot, put strike at or above spot) is a certain touch --
    /// the price starts at or past the barrier. The reflection formula only
    /// applies out-of-the-money. Degenerate horizons still report 0.
    pub fn leg_touch(
        &self,
        leg: LegKind,
        snapshot: &MarketSnapshot,
        input: &LegInput,
    ) -> TouchProbability {
        if snapshot.horizon_years <= 0.0 || input.implied_vol <= 0.0 {
            return TouchProbability::ZERO;
        }

        let in_the_money = match leg {
            LegKind::Call => input.strike <= snapshot.spot,
            LegKind::Put => input.strike >= snapshot.spot,
        };
        if in_the_money {
            return TouchProbability::CERTAIN;
        }

        TouchProbability::new(self.estimate_touch(
            snapshot.spot,
            input.strike,
            snapshot.horizon_years,
            input.implied_vol,
        ))
    }
}

impl Default for TouchEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T_TWO_DAYS: f64 = 2.0 / 365.0;

    #[test]
    fn test_atm_touch_is_certain() {
        let est = TouchEstimator::new();
        let p = est.estimate_touch(15_000.0, 15_000.0, T_TWO_DAYS, 0.2);
        // z = 0 => 2 * (1 - 0.5) = 1 exactly
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_degenerate_inputs_are_zero() {
        let est = TouchEstimator::new();
        assert_eq!(est.estimate_touch(15_000.0, 15_300.0, 0.0, 0.2), 0.0);
        assert_eq!(est.estimate_touch(15_000.0, 15_300.0, -1.0, 0.2), 0.0);
        assert_eq!(est.estimate_touch(15_000.0, 15_300.0, T_TWO_DAYS, 0.0), 0.0);
        assert_eq!(est.estimate_touch(15_000.0, 15_300.0, T_TWO_DAYS, -0.1), 0.0);
        assert_eq!(est.estimate_touch(0.0, 15_300.0, T_TWO_DAYS, 0.2), 0.0);
        assert_eq!(est.estimate_touch(15_000.0, 0.0, T_TWO_DAYS, 0.2), 0.0);
    }

    #[test]
    fn test_output_in_unit_interval() {
        let est = TouchEstimator::new();
        for &spot in &[1.0, 42.5, 15_000.0, 1.0e6] {
            for &ratio in &[0.5, 0.9, 0.99, 1.0, 1.01, 1.1, 2.0] {
                for &t in &[1.0 / 365.0, T_TWO_DAYS, 0.25, 1.0, 5.0] {
                    for &sigma in &[0.01, 0.18, 0.5, 2.0] {
                        let p = est.estimate_touch(spot, spot * ratio, t, sigma);
                        assert!(
                            (0.0..=1.0).contains(&p),
                            "POT out of range: p={p} spot={spot} ratio={ratio} t={t} sigma={sigma}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_symmetric_in_spot_and_strike() {
        let est = TouchEstimator::new();
        let up = est.estimate_touch(100.0, 110.0, 0.1, 0.3);
        let down = est.estimate_touch(110.0, 100.0, 0.1, 0.3);
        assert_eq!(up, down);
    }

    #[test]
    fn test_monotone_decreasing_in_distance() {
        let est = TouchEstimator::new();
        let spot = 15_000.0;
        let mut prev = est.estimate_touch(spot, spot, T_TWO_DAYS, 0.2);
        for &strike in &[15_050.0, 15_150.0, 15_300.0, 15_600.0, 16_200.0] {
            let p = est.estimate_touch(spot, strike, T_TWO_DAYS, 0.2);
            assert!(
                p < prev,
                "POT must strictly decrease as the strike moves away: {p} >= {prev} at K={strike}"
            );
            prev = p;
        }
    }

    #[test]
    fn test_known_value() {
        let est = TouchEstimator::new();
        // S=15000, K=15300, T=2/365, sigma=0.18:
        // z = ln(1.02) / (0.18 * sqrt(2/365)) ~= 1.4866, POT ~= 0.1371
        let p = est.estimate_touch(15_000.0, 15_300.0, T_TWO_DAYS, 0.18);
        assert!((p - 0.1371).abs() < 1e-3, "POT={p}");
    }

    #[test]
    fn test_itm_call_leg_is_certain() {
        let est = TouchEstimator::new();
        let snap = MarketSnapshot { spot: 15_000.0, horizon_years: T_TWO_DAYS };
        let leg = LegInput { strike: 14_500.0, implied_vol: 0.18 };
        assert_eq!(est.leg_touch(LegKind::Call, &snap, &leg).value(), 1.0);
    }

    #[test]
    fn test_itm_put_leg_is_certain() {
        let est = TouchEstimator::new();
        let snap = MarketSnapshot { spot: 15_000.0, horizon_years: T_TWO_DAYS };
        let leg = LegInput { strike: 15_500.0, implied_vol: 0.2 };
        assert_eq!(est.leg_touch(LegKind::Put, &snap, &leg).value(), 1.0);
    }

    #[test]
    fn test_otm_leg_matches_raw_formula() {
        let est = TouchEstimator::new();
        let snap = MarketSnapshot { spot: 15_000.0, horizon_years: T_TWO_DAYS };
        let leg = LegInput { strike: 15_300.0, implied_vol: 0.18 };
        let p = est.leg_touch(LegKind::Call, &snap, &leg).value();
        assert_eq!(p, est.estimate_touch(15_000.0, 15_300.0, T_TWO_DAYS, 0.18));
    }

    #[test]
    fn test_degenerate_leg_beats_itm_shortcut() {
        // Zero horizon reports 0 even for an in-the-money strike.
        let est = TouchEstimator::new();
        let snap = MarketSnapshot { spot: 15_000.0, horizon_years: 0.0 };
        let leg = LegInput { strike: 14_500.0, implied_vol: 0.18 };
        assert_eq!(est.leg_touch(LegKind::Call, &snap, &leg).value(), 0.0);
    }
}
