use std::collections::hash_map::Entry;
use std::collections::HashMap;

use url::form_urlencoded;

pub const PARAM_CALENDAR: &str = "phpcid";
pub const PARAM_EVENT: &str = "eid";
pub const PARAM_OCCURRENCE: &str = "oid";
pub const PARAM_YEAR: &str = "year";
pub const PARAM_MONTH: &str = "month";
pub const PARAM_DAY: &str = "day";
pub const PARAM_LANGUAGE: &str = "lang";
pub const PARAM_ACTION: &str = "action";

/// Page action used when the request does not name one.
pub const DEFAULT_ACTION: &str = "display_month";

/// A single inbound parameter, either a plain value or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    /// The scalar value, or the first element of a list.
    pub fn first(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(value) => Some(value),
            ParamValue::List(values) => values.first().map(String::as_str),
        }
    }
}

/// The inbound request parameter map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: HashMap<String, ParamValue>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URL query string.
    ///
    /// `key[]=a&key[]=b` and `key=a&key=b` both produce a list under `key`.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.append(&key, value.into_owned());
        }
        params
    }

    /// Sets a scalar parameter, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(key.into(), ParamValue::Scalar(value.into()));
        self
    }

    /// Sets a list parameter, replacing any previous value.
    pub fn with_list<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.values.insert(key.into(), ParamValue::List(values));
        self
    }

    fn append(&mut self, key: &str, value: String) {
        let (key, is_list) = match key.strip_suffix("[]") {
            Some(base) => (base, true),
            None => (key, false),
        };

        match self.values.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(if is_list {
                    ParamValue::List(vec![value])
                } else {
                    ParamValue::Scalar(value)
                });
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                ParamValue::List(values) => values.push(value),
                ParamValue::Scalar(previous) => {
                    let previous = std::mem::take(previous);
                    slot.insert(ParamValue::List(vec![previous, value]));
                }
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Returns the parameter's scalar value (or first list element).
    ///
    /// Empty and whitespace-only values count as absent.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(ParamValue::first)
            .filter(|value| !value.trim().is_empty())
    }

    /// The requested page action.
    pub fn action(&self) -> &str {
        self.first(PARAM_ACTION).unwrap_or(DEFAULT_ACTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_scalars() {
        let params = RequestParams::from_query("phpcid=3&month=2&lang=fr");

        assert_eq!(params.first(PARAM_CALENDAR), Some("3"));
        assert_eq!(params.first(PARAM_MONTH), Some("2"));
        assert_eq!(params.first(PARAM_LANGUAGE), Some("fr"));
        assert_eq!(params.first(PARAM_DAY), None);
    }

    #[test]
    fn test_from_query_bracket_list() {
        let params = RequestParams::from_query("eid%5B%5D=55&eid[]=56");

        assert_eq!(
            params.get(PARAM_EVENT),
            Some(&ParamValue::List(vec!["55".to_string(), "56".to_string()]))
        );
        assert_eq!(params.first(PARAM_EVENT), Some("55"));
    }

    #[test]
    fn test_repeated_key_becomes_list() {
        let params = RequestParams::from_query("oid=9&oid=10");

        assert_eq!(
            params.get(PARAM_OCCURRENCE),
            Some(&ParamValue::List(vec!["9".to_string(), "10".to_string()]))
        );
        assert_eq!(params.first(PARAM_OCCURRENCE), Some("9"));
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let params = RequestParams::from_query("phpcid=&eid=%20&oid=4");

        assert_eq!(params.first(PARAM_CALENDAR), None);
        assert_eq!(params.first(PARAM_EVENT), None);
        assert_eq!(params.first(PARAM_OCCURRENCE), Some("4"));
    }

    #[test]
    fn test_empty_list_has_no_first_value() {
        let params = RequestParams::new().with_list(PARAM_EVENT, Vec::<String>::new());
        assert_eq!(params.first(PARAM_EVENT), None);
    }

    #[test]
    fn test_action_defaults_to_display_month() {
        assert_eq!(RequestParams::new().action(), DEFAULT_ACTION);
        assert_eq!(
            RequestParams::new().with(PARAM_ACTION, "event_form").action(),
            "event_form"
        );
    }
}
