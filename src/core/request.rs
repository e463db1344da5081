//! Inbound query request validation.
//!
//! Rejects malformed input before any external I/O is attempted and
//! normalizes optional fields into a fully-populated [`QueryParams`]. The
//! same invalid input always produces the same rejection shape: issues are
//! collected for every failing field, in a fixed field order.
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::query::{DEFAULT_MAX_RETRIES, QueryParams};

/// A single failed field with the reason it was rejected.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validation failure carrying every field issue found in the request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid query request: {}", describe(.issues))]
pub struct RequestValidationError {
    pub issues: Vec<FieldIssue>,
}

impl RequestValidationError {
    /// A rejection for a body that could not be parsed as JSON at all.
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: "body".to_string(),
                message: reason.into(),
            }],
        }
    }
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Query request validator
pub struct QueryRequestValidator;

impl QueryRequestValidator {
    /// Validate a raw JSON body against the query schema and normalize
    /// defaults into a [`QueryParams`] record.
    pub fn validate(body: &Value) -> Result<QueryParams, RequestValidationError> {
        let Some(object) = body.as_object() else {
            return Err(RequestValidationError::malformed_body(
                "request body must be a JSON object",
            ));
        };

        let mut issues = Vec::new();

        let game_type = match object.get("type") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::String(_)) => {
                issues.push(FieldIssue::new("type", "must be a non-empty string"));
                None
            }
            Some(_) => {
                issues.push(FieldIssue::new("type", "must be a string"));
                None
            }
            None => {
                issues.push(FieldIssue::new("type", "is required"));
                None
            }
        };

        let host = match object.get("host") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::String(_)) => {
                issues.push(FieldIssue::new("host", "must be a non-empty string"));
                None
            }
            Some(_) => {
                issues.push(FieldIssue::new("host", "must be a string"));
                None
            }
            None => {
                issues.push(FieldIssue::new("host", "is required"));
                None
            }
        };

        let port = match object.get("port") {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_u64() {
                Some(n) if (1..=u64::from(u16::MAX)).contains(&n) => Some(n as u16),
                _ => {
                    issues.push(FieldIssue::new(
                        "port",
                        "must be an integer between 1 and 65535",
                    ));
                    None
                }
            },
        };

        let max_retries = match object.get("maxRetries") {
            None | Some(Value::Null) => DEFAULT_MAX_RETRIES,
            Some(value) => match value.as_u64() {
                Some(n) if n <= u64::from(u32::MAX) => n as u32,
                _ => {
                    issues.push(FieldIssue::new(
                        "maxRetries",
                        "must be a non-negative integer",
                    ));
                    DEFAULT_MAX_RETRIES
                }
            },
        };

        match (game_type, host) {
            (Some(game_type), Some(host)) if issues.is_empty() => Ok(QueryParams {
                game_type,
                host,
                port,
                max_retries,
            }),
            _ => Err(RequestValidationError { issues }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn minimal_request_normalizes_defaults() {
        let params = QueryRequestValidator::validate(&json!({
            "type": "minecraft",
            "host": "play.example.com",
        }))
        .unwrap();

        assert_eq!(params.game_type, "minecraft");
        assert_eq!(params.host, "play.example.com");
        assert_eq!(params.port, None);
        assert_eq!(params.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn explicit_fields_are_carried_through() {
        let params = QueryRequestValidator::validate(&json!({
            "type": "cs2",
            "host": "192.0.2.1",
            "port": 27015,
            "maxRetries": 3,
        }))
        .unwrap();

        assert_eq!(params.port, Some(27015));
        assert_eq!(params.max_retries, 3);
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let err = QueryRequestValidator::validate(&json!({})).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert_eq!(err.issues[0].field, "type");
        assert_eq!(err.issues[1].field, "host");
    }

    #[test]
    fn empty_strings_are_rejected() {
        let err = QueryRequestValidator::validate(&json!({
            "type": "",
            "host": "",
        }))
        .unwrap_err();
        assert!(err.issues.iter().all(|i| i.message.contains("non-empty")));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = QueryRequestValidator::validate(&json!({
            "type": 7,
            "host": "play.example.com",
            "port": "27015",
            "maxRetries": -1,
        }))
        .unwrap_err();

        let fields: Vec<&str> = err.issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["type", "port", "maxRetries"]);
    }

    #[test]
    fn port_out_of_range_is_rejected() {
        let err = QueryRequestValidator::validate(&json!({
            "type": "minecraft",
            "host": "play.example.com",
            "port": 70000,
        }))
        .unwrap_err();
        assert_eq!(err.issues[0].field, "port");
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = QueryRequestValidator::validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.issues[0].field, "body");
    }

    #[test]
    fn same_input_yields_identical_rejection() {
        let body = json!({ "host": 1 });
        let first = QueryRequestValidator::validate(&body).unwrap_err();
        let second = QueryRequestValidator::validate(&body).unwrap_err();
        assert_eq!(first, second);
    }
}
