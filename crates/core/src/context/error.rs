use thiserror::Error;

use crate::calendar::CalendarId;
use crate::storage::RepositoryError;

/// Errors that abort request context resolution.
///
/// Every variant is terminal: resolution stops and the caller renders the
/// failure. Defaulting a missing parameter is not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A request value is malformed or names an entity that does not exist.
    #[error("Invalid {field}: {value}")]
    InvalidParameter { field: &'static str, value: String },
    /// A numeric request value is outside its accepted domain.
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("Bad calendar ID: {0}")]
    InvalidCalendar(CalendarId),
    /// Deployment-level condition: nothing to show at all.
    #[error("There are no calendars")]
    NoCalendars,
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl ContextError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            value: value.into(),
        }
    }
}

/// Result type for context resolution.
pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let error = ContextError::invalid("event id", "55");
        assert_eq!(error.to_string(), "Invalid event id: 55");
    }

    #[test]
    fn test_out_of_range_display() {
        let error = ContextError::OutOfRange {
            field: "month",
            value: 13,
        };
        assert_eq!(error.to_string(), "month is out of range: 13");
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let error: ContextError = RepositoryError::QueryFailed("syntax".to_string()).into();
        assert_eq!(error.to_string(), "Query failed: syntax");
    }
}
