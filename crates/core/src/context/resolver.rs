use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::storage::{CalendarRepository, EventRepository, UserRepository};

use super::params::PARAM_LANGUAGE;
use super::{
    extract_transport_facts, load_calendar, resolve_date, resolve_language, resolve_timezone,
    resolve_user, CalendarSelector, RequestContext, RequestParams, Result, TransportMeta,
};

/// Everything the resolver reads from one inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextRequest {
    pub params: RequestParams,
    /// User ID carried by the session, if any.
    pub session_user: Option<String>,
    pub transport: TransportMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Timezone used when neither the user nor the calendar sets a valid one.
    pub default_timezone: Tz,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_timezone: Tz::UTC,
        }
    }
}

/// Resolves a [`RequestContext`] against the storage collaborators.
#[derive(Clone)]
pub struct ContextResolver {
    users: Arc<dyn UserRepository>,
    calendars: Arc<dyn CalendarRepository>,
    events: Arc<dyn EventRepository>,
    config: ResolverConfig,
}

impl ContextResolver {
    pub fn new(
        users: Arc<dyn UserRepository>,
        calendars: Arc<dyn CalendarRepository>,
        events: Arc<dyn EventRepository>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            users,
            calendars,
            events,
            config,
        }
    }

    /// Resolves the context relative to the current time.
    pub async fn resolve(&self, request: &ContextRequest) -> Result<RequestContext> {
        self.resolve_at(request, Utc::now()).await
    }

    /// Resolves the context with `now` as the current instant.
    pub async fn resolve_at(
        &self,
        request: &ContextRequest,
        now: DateTime<Utc>,
    ) -> Result<RequestContext> {
        let transport = extract_transport_facts(&request.transport);

        let user = resolve_user(self.users.as_ref(), request.session_user.as_deref()).await?;

        let selector = CalendarSelector::from_params(&request.params);
        let calendar_id = selector
            .resolve(&user, self.calendars.as_ref(), self.events.as_ref())
            .await?;
        let calendar = load_calendar(self.calendars.as_ref(), calendar_id).await?;
        tracing::debug!(?selector, calendar_id = %calendar.id, "Selected calendar");

        let mut messages = Vec::new();

        let timezone = resolve_timezone(&user, &calendar, self.config.default_timezone);
        if let Some(rejected) = timezone.rejected {
            messages.push(format!(
                "Unknown timezone \"{rejected}\", showing times in {}",
                timezone.tz.name()
            ));
        }
        let tz = timezone.tz;

        let language = resolve_language(
            request.params.first(PARAM_LANGUAGE),
            &user,
            &calendar,
            request.transport.accept_language.as_deref(),
        );

        let today = now.with_timezone(&tz).date_naive();
        let date = resolve_date(&request.params, tz, today)?;

        tracing::debug!(
            timezone = tz.name(),
            language = %language,
            year = date.year,
            month = date.month,
            day = date.day,
            "Resolved request context"
        );

        Ok(RequestContext {
            user,
            calendar,
            timezone: tz,
            language,
            date,
            action: request.params.action().to_string(),
            transport,
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::calendar::{Calendar, CalendarId, User, UserId};
    use crate::context::params::{
        PARAM_ACTION, PARAM_CALENDAR, PARAM_DAY, PARAM_EVENT, PARAM_MONTH, PARAM_OCCURRENCE,
        PARAM_YEAR,
    };
    use crate::context::testing::FakeStore;
    use crate::context::{ContextError, Scheme};
    use crate::storage::RepositoryError;

    fn resolver(store: FakeStore) -> ContextResolver {
        let store = Arc::new(store);
        ContextResolver::new(
            store.clone(),
            store.clone(),
            store,
            ResolverConfig::default(),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap()
    }

    fn request(params: RequestParams) -> ContextRequest {
        ContextRequest {
            params,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_february_scenario() {
        let resolver = resolver(FakeStore::with_calendars(&[1]));
        let params = RequestParams::new()
            .with(PARAM_YEAR, "2023")
            .with(PARAM_MONTH, "2")
            .with(PARAM_DAY, "30");

        let ctx = resolver.resolve_at(&request(params), now()).await.unwrap();

        assert_eq!(ctx.calendar().id, CalendarId(1));
        assert!(ctx.user().is_anonymous());
        assert_eq!(ctx.year(), 2023);
        assert_eq!(ctx.month(), 2);
        assert_eq!(ctx.day(), 2);
        assert_eq!(ctx.timezone_name(), "UTC");
        assert_eq!(ctx.language(), "en");
        assert_eq!(ctx.action(), "display_month");
        assert!(ctx.messages().is_empty());
    }

    #[tokio::test]
    async fn test_event_list_beats_occurrence() {
        let store = FakeStore::with_calendars(&[1, 2, 3])
            .event(55, 2)
            .event(56, 3)
            .event(70, 1)
            .occurrence(9, 70);
        let params = RequestParams::new()
            .with_list(PARAM_EVENT, ["55", "56"])
            .with(PARAM_OCCURRENCE, "9");

        let ctx = resolver(store)
            .resolve_at(&request(params), now())
            .await
            .unwrap();
        assert_eq!(ctx.calendar().id, CalendarId(2));
    }

    #[tokio::test]
    async fn test_explicit_calendar_ignores_other_signals() {
        let store = FakeStore::with_calendars(&[1, 2]).event(55, 1);
        let params = RequestParams::new()
            .with(PARAM_CALENDAR, "2")
            .with(PARAM_EVENT, "55");

        let ctx = resolver(store)
            .resolve_at(&request(params), now())
            .await
            .unwrap();
        assert_eq!(ctx.calendar().id, CalendarId(2));
    }

    #[tokio::test]
    async fn test_explicit_calendar_must_exist() {
        let params = RequestParams::new().with(PARAM_CALENDAR, "9");
        let err = resolver(FakeStore::with_calendars(&[1]))
            .resolve_at(&request(params), now())
            .await
            .unwrap_err();
        assert_eq!(err, ContextError::InvalidCalendar(CalendarId(9)));
    }

    #[tokio::test]
    async fn test_anonymous_with_missing_site_default_gets_some_calendar() {
        let store = FakeStore::with_calendars(&[4, 6]).site_default("5");

        let ctx = resolver(store)
            .resolve_at(&request(RequestParams::new()), now())
            .await
            .unwrap();
        assert_eq!(ctx.calendar().id, CalendarId(4));
    }

    #[tokio::test]
    async fn test_no_calendars() {
        let err = resolver(FakeStore::default())
            .resolve_at(&request(RequestParams::new()), now())
            .await
            .unwrap_err();
        assert_eq!(err, ContextError::NoCalendars);
    }

    #[tokio::test]
    async fn test_month_out_of_range_aborts() {
        let params = RequestParams::new().with(PARAM_MONTH, "13");
        let err = resolver(FakeStore::with_calendars(&[1]))
            .resolve_at(&request(params), now())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ContextError::OutOfRange {
                field: "month",
                value: 13
            }
        );
    }

    #[tokio::test]
    async fn test_session_user_preferences_apply() {
        let mut store = FakeStore::with_calendars(&[1, 2]);
        store.calendars[1] = Calendar::new(CalendarId(2), "Team")
            .with_timezone("Europe/Berlin")
            .with_language("fr");
        let store = store.user(
            User::new(UserId(3), "lena")
                .with_timezone("Pacific/Auckland")
                .with_language("de")
                .with_default_calendar(CalendarId(2)),
        );

        let ctx = resolver(store)
            .resolve_at(
                &ContextRequest {
                    session_user: Some("3".to_string()),
                    ..Default::default()
                },
                now(),
            )
            .await
            .unwrap();

        assert_eq!(ctx.user().username, "lena");
        assert_eq!(ctx.calendar().id, CalendarId(2));
        assert_eq!(ctx.timezone(), Tz::Pacific__Auckland);
        assert_eq!(ctx.language(), "de");
        // Midnight has already passed in Auckland.
        assert_eq!((ctx.year(), ctx.month(), ctx.day()), (2024, 5, 18));
    }

    #[tokio::test]
    async fn test_calendar_locale_and_accept_language() {
        let mut store = FakeStore::with_calendars(&[1]);
        store.calendars[0] = Calendar::new(CalendarId(1), "Main").with_timezone("Asia/Tokyo");

        let mut request = request(RequestParams::new());
        request.transport.accept_language = Some("nl-NL,nl;q=0.9".to_string());

        let ctx = resolver(store).resolve_at(&request, now()).await.unwrap();
        assert_eq!(ctx.timezone_name(), "Asia/Tokyo");
        assert_eq!(ctx.language(), "nl");
    }

    #[tokio::test]
    async fn test_bad_language_parameter_falls_back() {
        let params = RequestParams::new().with("lang", "1234!");
        let ctx = resolver(FakeStore::with_calendars(&[1]))
            .resolve_at(&request(params), now())
            .await
            .unwrap();
        assert_eq!(ctx.language(), "en");
    }

    #[tokio::test]
    async fn test_unknown_timezone_adds_message() {
        let mut store = FakeStore::with_calendars(&[1]);
        store.calendars[0] = Calendar::new(CalendarId(1), "Main").with_timezone("Nowhere/Land");

        let mut ctx = resolver(store)
            .resolve_at(&request(RequestParams::new()), now())
            .await
            .unwrap();
        assert_eq!(ctx.timezone_name(), "UTC");
        assert_eq!(
            ctx.messages(),
            ["Unknown timezone \"Nowhere/Land\", showing times in UTC"]
        );

        ctx.add_message("Event saved");
        assert_eq!(ctx.messages().len(), 2);
        assert_eq!(ctx.messages()[1], "Event saved");
    }

    #[tokio::test]
    async fn test_transport_and_action_are_carried() {
        let mut request = request(RequestParams::new().with(PARAM_ACTION, "event_form"));
        request.transport = TransportMeta {
            script_name: "/cal/index.php".to_string(),
            server_name: "example.org".to_string(),
            server_port: Some(443),
            ..Default::default()
        };

        let ctx = resolver(FakeStore::with_calendars(&[1]))
            .resolve_at(&request, now())
            .await
            .unwrap();
        assert_eq!(ctx.action(), "event_form");
        assert_eq!(ctx.transport().scheme, Scheme::Https);
        assert_eq!(ctx.transport().url_path, "/cal");
    }

    #[tokio::test]
    async fn test_storage_failure_aborts() {
        let store = FakeStore {
            failure: Some(RepositoryError::ConnectionFailed("refused".to_string())),
            ..FakeStore::with_calendars(&[1])
        };

        let err = resolver(store)
            .resolve_at(&request(RequestParams::new()), now())
            .await
            .unwrap_err();
        assert!(matches!(err, ContextError::Storage(_)));
    }
}
