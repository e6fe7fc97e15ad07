//! Error types for parameter validation, scenario loading and export

use thiserror::Error;

/// A parameter was outside its documented domain.
///
/// This is the only failure the projection engine can report. It is raised
/// before any simulation state exists, so no partial series is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid parameter `{parameter}` = {value}: {reason}")]
pub struct InvalidParameterError {
    /// Name of the offending parameter
    pub parameter: &'static str,
    /// The rejected value, formatted for display
    pub value: String,
    /// Why the value was rejected
    pub reason: String,
}

impl InvalidParameterError {
    pub fn new(parameter: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self {
            parameter,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors from the I/O layers around the engine (loaders, exporters).
#[derive(Error, Debug)]
pub enum Error {
    /// Parameter validation failed
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),

    /// A scenario row could not be turned into parameters
    #[error("Scenario row {row}: {source}")]
    ScenarioRow {
        /// 1-indexed data row (header excluded)
        row: usize,
        #[source]
        source: Box<Error>,
    },

    /// Unrecognized text value in a scenario file
    #[error("Unknown {field}: {value}")]
    UnknownValue {
        field: &'static str,
        value: String,
    },

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the loader and export layers.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = InvalidParameterError::new("years_invested", 0, "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `years_invested` = 0: must be at least 1"
        );
    }

    #[test]
    fn test_row_context_wraps_source() {
        let inner = Error::from(InvalidParameterError::new("annual_dividend_yield", 1.5, "must be in [0, 1]"));
        let err = Error::ScenarioRow { row: 3, source: Box::new(inner) };
        assert!(err.to_string().starts_with("Scenario row 3: Invalid parameter `annual_dividend_yield`"));
    }
}
