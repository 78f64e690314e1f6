use calview_core::calendar::{
    Calendar, CalendarId, Event, EventId, Occurrence, OccurrenceId, User, UserId,
};
use calview_core::storage::{Result, DEFAULT_CALENDAR_KEY};

use crate::storage::InMemoryRepository;

/// Seeds the repository with demo calendars, users and events.
///
/// `default_calendar_id` overrides the site default calendar, which is
/// otherwise the first demo calendar.
pub async fn seed_demo_data(
    repo: &InMemoryRepository,
    default_calendar_id: Option<&str>,
) -> Result<()> {
    repo.insert_calendar(
        Calendar::new(CalendarId(1), "Personal")
            .with_timezone("America/Montevideo")
            .with_language("es"),
    )
    .await?;
    repo.insert_calendar(
        Calendar::new(CalendarId(2), "Team")
            .with_timezone("Europe/Berlin")
            .with_language("de"),
    )
    .await?;
    repo.insert_calendar(Calendar::new(CalendarId(3), "Holidays"))
        .await?;

    repo.insert_user(
        User::new(UserId(1), "admin")
            .with_timezone("America/New_York")
            .with_default_calendar(CalendarId(2)),
    )
    .await?;
    repo.insert_user(User::new(UserId(2), "guest").with_language("en"))
        .await?;

    repo.insert_event(Event::new(EventId(1), CalendarId(2), "Standup Meeting"))
        .await?;
    repo.insert_event(Event::new(EventId(2), CalendarId(1), "Dentist"))
        .await?;
    repo.insert_event(Event::new(EventId(3), CalendarId(3), "New Year's Day"))
        .await?;

    // Three standups, one dentist visit, one holiday
    for (id, event) in [(1, 1), (2, 1), (3, 1), (4, 2), (5, 3)] {
        repo.insert_occurrence(Occurrence {
            id: OccurrenceId(id),
            event_id: EventId(event),
        })
        .await?;
    }

    repo.set_config(DEFAULT_CALENDAR_KEY, default_calendar_id.unwrap_or("1"))
        .await;

    tracing::debug!("Seeded demo data");
    Ok(())
}
