use chrono_tz::Tz;
use serde::Serialize;

use crate::calendar::{Calendar, User};

use super::{TransportFacts, ViewDate};

/// The resolved context of one request.
///
/// Built once by [`ContextResolver`](super::ContextResolver) and discarded
/// when the request ends. Everything except the message log is fixed after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    pub(super) user: User,
    pub(super) calendar: Calendar,
    pub(super) timezone: Tz,
    pub(super) language: String,
    #[serde(flatten)]
    pub(super) date: ViewDate,
    pub(super) action: String,
    pub(super) transport: TransportFacts,
    pub(super) messages: Vec<String>,
}

impl RequestContext {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// The timezone all date arithmetic for this request uses.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// IANA name of [`Self::timezone`]. Never empty.
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn year(&self) -> i32 {
        self.date.year
    }

    pub fn month(&self) -> u32 {
        self.date.month
    }

    pub fn day(&self) -> u32 {
        self.date.day
    }

    /// The requested page action, `display_month` by default.
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn transport(&self) -> &TransportFacts {
        &self.transport
    }

    /// Appends a user-facing message to show with the response.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Messages in the order they were added.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
