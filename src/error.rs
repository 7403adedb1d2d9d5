//! Error types for the investment calculators
//!
//! Division guards (zero down payment, zero cash invested) are not errors:
//! they resolve to defined sentinel values on the result records.

use thiserror::Error;

/// Result type alias for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Error, Debug)]
pub enum CalcError {
    /// State code outside the supported set, or missing from a rate table
    #[error("Unknown state code: {code}")]
    UnknownState { code: String },

    /// An input value is outside its accepted range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A rate table could not be built from its source
    #[error("Rate table error: {reason}")]
    RateTable { reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CalcError {
    pub(crate) fn invalid(field: &str, value: impl ToString, reason: &str) -> Self {
        CalcError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
