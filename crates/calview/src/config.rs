use std::env;

use chrono_tz::Tz;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Timezone used when neither user nor calendar configures one (default: UTC)
    pub default_timezone: Tz,
    /// Header an upstream login layer sets to the authenticated user ID
    /// (default: "x-authenticated-user")
    pub session_header: String,
    /// Site-wide default calendar ID (default: none)
    pub default_calendar_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DEFAULT_TIMEZONE` - IANA timezone name (default: "UTC")
    /// - `SESSION_HEADER` - Session user header (default: "x-authenticated-user")
    /// - `DEFAULT_CALENDAR_ID` - Site default calendar ID (default: unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_timezone = match lookup("DEFAULT_TIMEZONE") {
            Some(name) => name.parse().unwrap_or_else(|_| {
                tracing::warn!(timezone = %name, "Invalid DEFAULT_TIMEZONE, using UTC");
                Tz::UTC
            }),
            None => Tz::UTC,
        };

        Self {
            default_timezone,
            session_header: lookup("SESSION_HEADER")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "x-authenticated-user".to_string())
                .to_ascii_lowercase(),
            default_calendar_id: lookup("DEFAULT_CALENDAR_ID").filter(|v| !v.is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timezone: Tz::UTC,
            session_header: "x-authenticated-user".to_string(),
            default_calendar_id: None,
        }
    }
}
