//! Probability-of-touch (POT) calculator for short option strategies.
//!
//! Estimates the probability that the underlying touches a short strike at
//! any point before expiration, using a reflection-principle approximation
//! of first-passage probability under driftless geometric Brownian motion,
//! then composes one or two legs into joint touch / no-touch probabilities
//! for an iron condor, short call, or short put.
//!
//! The core is a pure library: market data (spot, implied vols, option
//! chain) is supplied as input, and every estimate is a deterministic
//! function of its arguments. Data retrieval and presentation live outside
//! this crate.

pub mod chain;
pub mod config;
pub mod errors;
pub mod models;
pub mod strategy;

pub use errors::{PotError, PotResult};
pub use models::touch::TouchEstimator;
pub use models::{LegInput, LegKind, MarketSnapshot, TouchProbability};
pub use strategy::{combine, evaluate, Strategy, StrategyOutcome};
