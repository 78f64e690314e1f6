use async_trait::async_trait;

use crate::calendar::{Calendar, CalendarId, Event, EventId, OccurrenceId, User, UserId};

use super::Result;

/// Site configuration key holding the default calendar ID.
pub const DEFAULT_CALENDAR_KEY: &str = "default_cid";

/// Repository for user lookups.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;
}

/// Repository for calendars and site-wide configuration.
#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// Gets a calendar by its ID.
    async fn get_calendar(&self, id: CalendarId) -> Result<Option<Calendar>>;

    /// Lists every stored calendar in definition order.
    async fn list_calendars(&self) -> Result<Vec<Calendar>>;

    /// Gets a site configuration value.
    async fn get_config(&self, key: &str) -> Result<Option<String>>;
}

/// Repository for event lookups.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Gets an event by its ID.
    async fn get_event(&self, id: EventId) -> Result<Option<Event>>;

    /// Gets the event that owns the given occurrence.
    async fn get_event_by_occurrence(&self, id: OccurrenceId) -> Result<Option<Event>>;
}
