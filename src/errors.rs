use crate::models::LegKind;

/// Domain-specific error types for the POT calculator.
///
/// Degenerate numeric inputs (zero time, zero vol) are NOT errors -- the
/// estimator handles them locally and reports a zero probability. Errors
/// here are data-availability and boundary failures that must reach the
/// caller intact.
#[derive(Debug, thiserror::Error)]
pub enum PotError {
    /// The selected strategy needs a leg whose data is unavailable.
    /// Distinct from a zero-probability leg: substituting 0 here would
    /// corrupt the reported outcome.
    #[error("missing {0} leg data for selected strategy")]
    MissingLeg(LegKind),

    #[error("config error: {0}")]
    Config(String),

    #[error("chain error: {0}")]
    Chain(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for PotError {
    fn from(e: serde_json::Error) -> Self {
        PotError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for PotError {
    fn from(e: std::io::Error) -> Self {
        PotError::Io(e.to_string())
    }
}

pub type PotResult<T> = Result<T, PotError>;
