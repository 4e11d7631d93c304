use chrono::NaiveDate;
use condor_pot::chain::{self, OptionChain, OptionQuote};
use condor_pot::config::AppConfig;
use condor_pot::models::touch::TouchEstimator;
use condor_pot::models::{LegInput, MarketSnapshot};
use condor_pot::{strategy, PotResult, Strategy, StrategyOutcome};

fn main() {
    // Structured logging to stderr; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    let today = chrono::Local::now().date_naive();
    if let Err(e) = run(&cfg, today) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

/// Per-leg slice of the report: resolved strike, quote stats, POT.
#[derive(Debug, serde::Serialize)]
struct LegReport {
    strike: f64,
    implied_vol: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    volume: Option<i64>,
    open_interest: Option<i64>,
}

#[derive(Debug, serde::Serialize)]
struct Report {
    strategy: Strategy,
    spot: f64,
    expiration: NaiveDate,
    days_to_expiration: i64,
    horizon_years: f64,
    call: Option<LegReport>,
    put: Option<LegReport>,
    outcome: StrategyOutcome,
}

fn run(cfg: &AppConfig, today: NaiveDate) -> PotResult<()> {
    let raw = std::fs::read_to_string(&cfg.chain_path)?;
    let option_chain: OptionChain = serde_json::from_str(&raw)?;

    let slice = option_chain.nearest_expiration(today, cfg.days_to_expiration)?;
    let dte = (slice.expiration - today).num_days();
    let horizon = chain::horizon_years(today, slice.expiration);
    tracing::info!(
        expiration = %slice.expiration,
        dte,
        spot = option_chain.spot,
        "resolved expiration"
    );

    let (call_target, put_target) = chain::otm_targets(option_chain.spot, cfg.pct_otm);

    let call_quote = if cfg.strategy.uses_call() {
        let target = cfg.call_strike.unwrap_or(call_target);
        Some(chain::nearest_strike(&slice.calls, target)?)
    } else {
        None
    };
    let put_quote = if cfg.strategy.uses_put() {
        let target = cfg.put_strike.unwrap_or(put_target);
        Some(chain::nearest_strike(&slice.puts, target)?)
    } else {
        None
    };

    if let Some(q) = call_quote {
        tracing::info!(strike = q.strike, iv = ?q.implied_volatility, "call leg resolved");
    }
    if let Some(q) = put_quote {
        tracing::info!(strike = q.strike, iv = ?q.implied_volatility, "put leg resolved");
    }

    let estimator = TouchEstimator::new();
    let snapshot = MarketSnapshot {
        spot: option_chain.spot,
        horizon_years: horizon,
    };
    let call_leg: Option<LegInput> = call_quote.and_then(OptionQuote::leg_input);
    let put_leg: Option<LegInput> = put_quote.and_then(OptionQuote::leg_input);

    let outcome = strategy::evaluate(&estimator, &snapshot, call_leg, put_leg, cfg.strategy)?;

    let report = Report {
        strategy: cfg.strategy,
        spot: option_chain.spot,
        expiration: slice.expiration,
        days_to_expiration: dte,
        horizon_years: horizon,
        call: call_quote.map(leg_report),
        put: put_quote.map(leg_report),
        outcome,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn leg_report(q: &OptionQuote) -> LegReport {
    LegReport {
        strike: q.strike,
        implied_vol: q.implied_volatility,
        bid: q.bid,
        ask: q.ask,
        volume: q.volume,
        open_interest: q.open_interest,
    }
}
