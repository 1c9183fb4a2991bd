use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised while turning user input into scenarios or looking them up.
/// The aggregator itself never fails.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("End date {end} is before start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Could not parse date: {0}")]
    InvalidDate(String),

    #[error("Invalid quantity: '{0}'")]
    UnparsableQuantity(String),

    #[error("Invalid capacity: '{0}'")]
    UnparsableCapacity(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    #[error("Ambiguous key: '{key}' matches {candidates:?}")]
    AmbiguousKey { key: String, candidates: Vec<String> },

    #[error("Scenario '{0}' not found")]
    ScenarioNotFound(String),

    #[error("Scenario id prefix '{0}' matches more than one scenario")]
    AmbiguousScenario(String),
}
