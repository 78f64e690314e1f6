use crate::calendar::{Calendar, CalendarId, EventId, OccurrenceId, User};
use crate::storage::{CalendarRepository, EventRepository, DEFAULT_CALENDAR_KEY};

use super::params::{PARAM_CALENDAR, PARAM_EVENT, PARAM_OCCURRENCE};
use super::{ContextError, RequestParams, Result};

/// The request signal that decides which calendar is shown.
///
/// Signals are mutually exclusive: the first one present wins, in the order
/// of the variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarSelector {
    /// `phpcid`: a calendar ID named directly.
    ExplicitId(String),
    /// `eid`: the calendar owning this event.
    EventId(String),
    /// `oid`: the calendar owning this occurrence's event.
    OccurrenceId(String),
    /// No signal: user default, then site default, then any calendar.
    Default,
}

impl CalendarSelector {
    /// Scans the request parameters in priority order.
    pub fn from_params(params: &RequestParams) -> Self {
        if let Some(id) = signal(params, PARAM_CALENDAR) {
            Self::ExplicitId(id.to_string())
        } else if let Some(id) = signal(params, PARAM_EVENT) {
            Self::EventId(id.to_string())
        } else if let Some(id) = signal(params, PARAM_OCCURRENCE) {
            Self::OccurrenceId(id.to_string())
        } else {
            Self::Default
        }
    }

    /// Resolves the selector to a calendar ID.
    ///
    /// Only `ExplicitId` can yield an ID with no stored calendar behind it;
    /// [`load_calendar`] catches that case.
    pub async fn resolve(
        &self,
        user: &User,
        calendars: &dyn CalendarRepository,
        events: &dyn EventRepository,
    ) -> Result<CalendarId> {
        match self {
            Self::ExplicitId(raw) => raw
                .parse::<CalendarId>()
                .map_err(|_| ContextError::invalid("calendar id", raw.as_str())),
            Self::EventId(raw) => {
                let event = match raw.parse::<EventId>() {
                    Ok(id) => events.get_event(id).await?,
                    Err(_) => None,
                };
                event
                    .map(|event| event.calendar_id)
                    .ok_or_else(|| ContextError::invalid("event id", raw.as_str()))
            }
            Self::OccurrenceId(raw) => {
                let event = match raw.parse::<OccurrenceId>() {
                    Ok(id) => events.get_event_by_occurrence(id).await?,
                    Err(_) => None,
                };
                event
                    .map(|event| event.calendar_id)
                    .ok_or_else(|| ContextError::invalid("occurrence id", raw.as_str()))
            }
            Self::Default => resolve_default(user, calendars).await,
        }
    }
}

/// A selection signal; `"0"` counts as not given and defers to the next one.
fn signal<'a>(params: &'a RequestParams, key: &str) -> Option<&'a str> {
    params.first(key).filter(|value| *value != "0")
}

async fn resolve_default(user: &User, calendars: &dyn CalendarRepository) -> Result<CalendarId> {
    let stored = calendars.list_calendars().await?;
    if stored.is_empty() {
        return Err(ContextError::NoCalendars);
    }

    let candidate = match user.default_calendar_id {
        Some(id) => Some(id),
        None => calendars
            .get_config(DEFAULT_CALENDAR_KEY)
            .await?
            .and_then(|raw| raw.parse::<CalendarId>().ok()),
    };

    pick_default_calendar(&stored, candidate)
}

/// Picks the candidate if it is stored, otherwise the first stored calendar.
///
/// Fails only when there are no calendars at all.
pub fn pick_default_calendar(
    stored: &[Calendar],
    candidate: Option<CalendarId>,
) -> Result<CalendarId> {
    if let Some(id) = candidate.filter(|id| stored.iter().any(|c| c.id == *id)) {
        return Ok(id);
    }

    let fallback = stored.first().ok_or(ContextError::NoCalendars)?;
    if let Some(id) = candidate {
        tracing::debug!(
            candidate = %id,
            fallback = %fallback.id,
            "Default calendar not found, using first calendar"
        );
    }
    Ok(fallback.id)
}

/// Loads the selected calendar.
pub async fn load_calendar(calendars: &dyn CalendarRepository, id: CalendarId) -> Result<Calendar> {
    calendars
        .get_calendar(id)
        .await?
        .ok_or(ContextError::InvalidCalendar(id))
}
