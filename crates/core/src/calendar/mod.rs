mod error;
mod types;

pub use error::IdParseError;
pub use types::{Calendar, CalendarId, Event, EventId, Occurrence, OccurrenceId, User, UserId};
