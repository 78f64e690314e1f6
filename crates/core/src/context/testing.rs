//! In-process fake repositories for resolver tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::calendar::{
    Calendar, CalendarId, Event, EventId, Occurrence, OccurrenceId, User, UserId,
};
use crate::storage::{
    CalendarRepository, EventRepository, RepositoryError, Result, UserRepository,
    DEFAULT_CALENDAR_KEY,
};

#[derive(Debug, Default)]
pub struct FakeStore {
    pub users: Vec<User>,
    pub calendars: Vec<Calendar>,
    pub events: Vec<Event>,
    pub occurrences: Vec<Occurrence>,
    pub config: HashMap<String, String>,
    /// When set, every call fails with this error.
    pub failure: Option<RepositoryError>,
}

impl FakeStore {
    pub fn with_calendars(ids: &[i64]) -> Self {
        Self {
            calendars: ids
                .iter()
                .map(|id| Calendar::new(CalendarId(*id), format!("Calendar {id}")))
                .collect(),
            ..Default::default()
        }
    }

    pub fn user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn event(mut self, id: i64, calendar_id: i64) -> Self {
        self.events.push(Event::new(
            EventId(id),
            CalendarId(calendar_id),
            format!("Event {id}"),
        ));
        self
    }

    pub fn occurrence(mut self, id: i64, event_id: i64) -> Self {
        self.occurrences.push(Occurrence {
            id: OccurrenceId(id),
            event_id: EventId(event_id),
        });
        self
    }

    pub fn site_default(mut self, calendar_id: &str) -> Self {
        self.config
            .insert(DEFAULT_CALENDAR_KEY.to_string(), calendar_id.to_string());
        self
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.check()?;
        Ok(self.users.iter().find(|u| u.id == Some(id)).cloned())
    }
}

#[async_trait]
impl CalendarRepository for FakeStore {
    async fn get_calendar(&self, id: CalendarId) -> Result<Option<Calendar>> {
        self.check()?;
        Ok(self.calendars.iter().find(|c| c.id == id).cloned())
    }

    async fn list_calendars(&self) -> Result<Vec<Calendar>> {
        self.check()?;
        Ok(self.calendars.clone())
    }

    async fn get_config(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.config.get(key).cloned())
    }
}

#[async_trait]
impl EventRepository for FakeStore {
    async fn get_event(&self, id: EventId) -> Result<Option<Event>> {
        self.check()?;
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }

    async fn get_event_by_occurrence(&self, id: OccurrenceId) -> Result<Option<Event>> {
        self.check()?;
        let Some(occurrence) = self.occurrences.iter().find(|o| o.id == id) else {
            return Ok(None);
        };
        self.get_event(occurrence.event_id).await
    }
}
