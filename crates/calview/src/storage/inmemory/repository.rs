//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use calview_core::calendar::{
    Calendar, CalendarId, Event, EventId, Occurrence, OccurrenceId, User, UserId,
};
use calview_core::storage::{
    CalendarRepository, EventRepository, RepositoryError, Result, UserRepository,
};

/// In-memory storage backend.
///
/// Calendars are kept in a `Vec` so listing returns them in the order they
/// were inserted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    calendars: Arc<RwLock<Vec<Calendar>>>,
    events: Arc<RwLock<HashMap<EventId, Event>>>,
    occurrences: Arc<RwLock<HashMap<OccurrenceId, Occurrence>>>,
    config: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an authenticated user.
    pub async fn insert_user(&self, user: User) -> Result<()> {
        let Some(id) = user.id else {
            return Err(RepositoryError::InvalidData(
                "cannot store the anonymous user".to_string(),
            ));
        };

        let mut users = self.users.write().await;
        if users.contains_key(&id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: id.to_string(),
            });
        }
        users.insert(id, user);
        Ok(())
    }

    pub async fn insert_calendar(&self, calendar: Calendar) -> Result<()> {
        let mut calendars = self.calendars.write().await;
        if calendars.iter().any(|c| c.id == calendar.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Calendar",
                id: calendar.id.to_string(),
            });
        }
        calendars.push(calendar);
        Ok(())
    }

    /// Stores an event. Its calendar must already exist.
    pub async fn insert_event(&self, event: Event) -> Result<()> {
        if !self
            .calendars
            .read()
            .await
            .iter()
            .any(|c| c.id == event.calendar_id)
        {
            return Err(RepositoryError::NotFound {
                entity_type: "Calendar",
                id: event.calendar_id.to_string(),
            });
        }

        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Event",
                id: event.id.to_string(),
            });
        }
        events.insert(event.id, event);
        Ok(())
    }

    /// Stores an occurrence. Its event must already exist.
    pub async fn insert_occurrence(&self, occurrence: Occurrence) -> Result<()> {
        if !self.events.read().await.contains_key(&occurrence.event_id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Event",
                id: occurrence.event_id.to_string(),
            });
        }

        let mut occurrences = self.occurrences.write().await;
        if occurrences.contains_key(&occurrence.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Occurrence",
                id: occurrence.id.to_string(),
            });
        }
        occurrences.insert(occurrence.id, occurrence);
        Ok(())
    }

    /// Sets a site configuration value, replacing any previous one.
    pub async fn set_config(&self, key: impl Into<String>, value: impl Into<String>) {
        self.config.write().await.insert(key.into(), value.into());
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }
}

#[async_trait]
impl CalendarRepository for InMemoryRepository {
    async fn get_calendar(&self, id: CalendarId) -> Result<Option<Calendar>> {
        let calendars = self.calendars.read().await;
        Ok(calendars.iter().find(|c| c.id == id).cloned())
    }

    async fn list_calendars(&self) -> Result<Vec<Calendar>> {
        Ok(self.calendars.read().await.clone())
    }

    async fn get_config(&self, key: &str) -> Result<Option<String>> {
        let config = self.config.read().await;
        Ok(config.get(key).cloned())
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn get_event(&self, id: EventId) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn get_event_by_occurrence(&self, id: OccurrenceId) -> Result<Option<Event>> {
        let Some(event_id) = self.occurrences.read().await.get(&id).map(|o| o.event_id) else {
            return Ok(None);
        };
        self.get_event(event_id).await
    }
}
