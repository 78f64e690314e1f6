use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::IdParseError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            /// Parses an integer literal, ignoring surrounding whitespace.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map($name)
                    .map_err(|_| IdParseError {
                        kind: $label,
                        value: s.to_string(),
                    })
            }
        }
    };
}

numeric_id!(
    /// Identifier of a stored calendar.
    CalendarId,
    "calendar"
);
numeric_id!(
    /// Identifier of a stored user.
    UserId,
    "user"
);
numeric_id!(
    /// Identifier of a stored event.
    EventId,
    "event"
);
numeric_id!(
    /// Identifier of one concrete occurrence of an event.
    OccurrenceId,
    "occurrence"
);

/// A named scheduling collection with its own timezone and language defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: CalendarId,
    pub title: String,
    /// IANA timezone name used when the viewing user has none configured.
    pub timezone: Option<String>,
    /// Language code used when neither the request nor the user picks one.
    pub language: Option<String>,
}

impl Calendar {
    /// Creates a calendar without timezone or language defaults.
    pub fn new(id: CalendarId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            timezone: None,
            language: None,
        }
    }

    /// Sets the default timezone for this calendar.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets the default language for this calendar.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// The identity making a request, authenticated or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// `None` for the anonymous user.
    pub id: Option<UserId>,
    pub username: String,
    pub timezone: Option<String>,
    pub language: Option<String>,
    /// Calendar shown when the request does not name one.
    pub default_calendar_id: Option<CalendarId>,
}

impl User {
    /// Creates an authenticated user with no preferences set.
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            username: username.into(),
            timezone: None,
            language: None,
            default_calendar_id: None,
        }
    }

    /// The user synthesized for requests without a session.
    pub fn anonymous() -> Self {
        Self {
            id: None,
            username: "anonymous".to_string(),
            timezone: None,
            language: None,
            default_calendar_id: None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.id.is_none()
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_default_calendar(mut self, calendar_id: CalendarId) -> Self {
        self.default_calendar_id = Some(calendar_id);
        self
    }
}

/// A scheduled event. Only its owning calendar matters to request resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub calendar_id: CalendarId,
    pub subject: String,
}

impl Event {
    pub fn new(id: EventId, calendar_id: CalendarId, subject: impl Into<String>) -> Self {
        Self {
            id,
            calendar_id,
            subject: subject.into(),
        }
    }
}

/// One concrete scheduled instance of a (possibly recurring) event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: OccurrenceId,
    pub event_id: EventId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parses_with_surrounding_whitespace() {
        assert_eq!(" 42 ".parse::<CalendarId>().unwrap(), CalendarId(42));
        assert_eq!("-7".parse::<EventId>().unwrap(), EventId(-7));
    }

    #[test]
    fn test_id_rejects_non_integer() {
        let err = "1.5".parse::<CalendarId>().unwrap_err();
        assert_eq!(err.kind, "calendar");
        assert_eq!(err.value, "1.5");
        assert!("abc".parse::<OccurrenceId>().is_err());
        assert!("".parse::<UserId>().is_err());
    }

    #[test]
    fn test_anonymous_user_has_no_preferences() {
        let user = User::anonymous();

        assert!(user.is_anonymous());
        assert_eq!(user.timezone, None);
        assert_eq!(user.language, None);
        assert_eq!(user.default_calendar_id, None);
    }

    #[test]
    fn test_calendar_builder() {
        let calendar = Calendar::new(CalendarId(3), "Work")
            .with_timezone("Europe/Paris")
            .with_language("fr");

        assert_eq!(calendar.id, CalendarId(3));
        assert_eq!(calendar.title, "Work");
        assert_eq!(calendar.timezone.as_deref(), Some("Europe/Paris"));
        assert_eq!(calendar.language.as_deref(), Some("fr"));
    }
}
