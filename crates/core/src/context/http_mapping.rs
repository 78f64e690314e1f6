use crate::storage::repository_error_to_status_code;

use super::ContextError;

/// Maps a [`ContextError`] to an HTTP status code.
///
/// - `InvalidParameter`, `OutOfRange` -> 400
/// - `InvalidCalendar` -> 404
/// - `NoCalendars` -> 503, the deployment is not usable yet
/// - `Storage` -> whatever the repository error maps to
pub fn context_error_to_status_code(error: &ContextError) -> u16 {
    match error {
        ContextError::InvalidParameter { .. } | ContextError::OutOfRange { .. } => 400,
        ContextError::InvalidCalendar(_) => 404,
        ContextError::NoCalendars => 503,
        ContextError::Storage(repo_error) => repository_error_to_status_code(repo_error),
    }
}
