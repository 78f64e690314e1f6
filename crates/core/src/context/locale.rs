use std::sync::LazyLock;

use chrono_tz::Tz;
use regex::Regex;

use crate::calendar::{Calendar, User};

/// Language used when nothing else applies or the choice is malformed.
pub const FALLBACK_LANGUAGE: &str = "en";

static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?-u:\w)+$").expect("language pattern is valid"));

/// The timezone a request is evaluated in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneChoice {
    pub tz: Tz,
    /// A configured name that could not be parsed and was replaced.
    pub rejected: Option<String>,
}

/// Picks the user's timezone, else the calendar's, else `default`.
///
/// An unknown name is not an error: the next candidate applies and the first
/// rejected name is reported back so the caller can tell the user.
pub fn resolve_timezone(user: &User, calendar: &Calendar, default: Tz) -> TimezoneChoice {
    let mut rejected = None;

    let candidates = [user.timezone.as_deref(), calendar.timezone.as_deref()];
    for name in candidates.into_iter().filter_map(non_empty) {
        match name.parse::<Tz>() {
            Ok(tz) => return TimezoneChoice { tz, rejected },
            Err(_) => {
                tracing::warn!(timezone = name, "Unknown timezone");
                rejected.get_or_insert_with(|| name.to_string());
            }
        }
    }

    TimezoneChoice {
        tz: default,
        rejected,
    }
}

/// Resolves the display language.
///
/// Priority: request parameter, user preference, calendar default, the
/// first two characters of `Accept-Language`, then [`FALLBACK_LANGUAGE`].
/// Anything that is not a plain word is replaced by the fallback.
pub fn resolve_language(
    requested: Option<&str>,
    user: &User,
    calendar: &Calendar,
    accept_language: Option<&str>,
) -> String {
    let header_prefix =
        non_empty(accept_language).map(|header| header.chars().take(2).collect::<String>());

    let language = non_empty(requested)
        .or(non_empty(user.language.as_deref()))
        .or(non_empty(calendar.language.as_deref()))
        .map(str::to_string)
        .or(header_prefix)
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());

    if LANGUAGE_PATTERN.is_match(&language) {
        language
    } else {
        tracing::debug!(language = %language, "Rejecting malformed language");
        FALLBACK_LANGUAGE.to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
