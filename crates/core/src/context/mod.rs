//! Per-request context resolution.
//!
//! Turns the ambiguous signals of one inbound request (calendar, event and
//! occurrence IDs, session identity, language and date parameters) into a
//! single [`RequestContext`]. Resolution runs four steps in order: transport
//! facts, identity, calendar selection, then locale and date.

mod date;
mod error;
mod http_mapping;
mod identity;
mod locale;
mod params;
mod resolver;
mod selection;
mod transport;
mod types;

#[cfg(test)]
mod testing;

pub use date::{days_in_month, resolve_date, resolve_day, resolve_month, resolve_year, ViewDate};
pub use error::{ContextError, Result};
pub use http_mapping::context_error_to_status_code;
pub use identity::resolve_user;
pub use locale::{resolve_language, resolve_timezone, TimezoneChoice, FALLBACK_LANGUAGE};
pub use params::{
    ParamValue, RequestParams, DEFAULT_ACTION, PARAM_ACTION, PARAM_CALENDAR, PARAM_DAY,
    PARAM_EVENT, PARAM_LANGUAGE, PARAM_MONTH, PARAM_OCCURRENCE, PARAM_YEAR,
};
pub use resolver::{ContextRequest, ContextResolver, ResolverConfig};
pub use selection::{load_calendar, pick_default_calendar, CalendarSelector};
pub use transport::{extract_transport_facts, Scheme, TransportFacts, TransportMeta};
pub use types::RequestContext;
