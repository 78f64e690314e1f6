use thiserror::Error;

/// Error returned when a string is not a valid numeric identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {kind} ID: {value}")]
pub struct IdParseError {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse_error_display() {
        let error = IdParseError {
            kind: "calendar",
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid calendar ID: abc");
    }
}
