use crate::errors::{PotError, PotResult};
use crate::strategy::Strategy;
use std::path::PathBuf;

/// Run configuration, loaded from the environment.
///
/// Percent-style inputs (PCT_OTM) are entered as percentages and stored as
/// decimals, matching how implied vols are consumed downstream.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the option chain snapshot (JSON)
    pub chain_path: PathBuf,
    pub strategy: Strategy,
    /// Distance from spot for short-strike targets, decimal (0.02 = 2% OTM)
    pub pct_otm: f64,
    /// Desired calendar days to expiration; the chain resolves to the
    /// nearest available expiration
    pub days_to_expiration: i64,
    /// Literal strike overrides; when set, percent-OTM targeting is skipped
    /// for that leg
    pub call_strike: Option<f64>,
    pub put_strike: Option<f64>,
}

impl AppConfig {
    pub fn from_env() -> PotResult<Self> {
        dotenvy::dotenv().ok();

        let strategy = Strategy::parse(&env_var_or("STRATEGY", "iron_condor"))?;

        let pct_otm_input = env_var_or("PCT_OTM", "2.0")
            .parse::<f64>()
            .map_err(|e| PotError::Config(format!("PCT_OTM: {e}")))?;

        let days_to_expiration = env_var_or("DAYS_TO_EXPIRATION", "2")
            .parse::<i64>()
            .map_err(|e| PotError::Config(format!("DAYS_TO_EXPIRATION: {e}")))?;

        Ok(Self {
            chain_path: PathBuf::from(env_var("CHAIN_PATH")?),
            strategy,
            pct_otm: pct_otm_input / 100.0,
            days_to_expiration,
            call_strike: env_var_opt_f64("CALL_STRIKE")?,
            put_strike: env_var_opt_f64("PUT_STRIKE")?,
        })
    }
}

fn env_var(key: &str) -> PotResult<String> {
    std::env::var(key).map_err(|_| PotError::Config(format!("missing env var: {key}")))
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_var_opt_f64(key: &str) -> PotResult<Option<f64>> {
    match std::env::var(key) {
        Ok(v) => v
            .parse::<f64>()
            .map(Some)
            .map_err(|e| PotError::Config(format!("{key}: {e}"))),
        Err(_) => Ok(None),
    }
}
