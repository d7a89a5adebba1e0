//! Error handling for API operations.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Common error type for API operations.
///
/// Only [ApiError::Rejected] carries a payload. The response stage of the
/// client resolves such failures as data, so callers usually only see the
/// payload-less variants.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Timeout, unreachable host, or any other failure below HTTP.
    #[error("request failed")]
    Transport(#[source] reqwest::Error),
    /// A non-2xx response without a body.
    #[error("server responded with {status}")]
    Status { status: StatusCode },
    /// A failed request that still carries a body, either a structured
    /// backend error or a fixture short-circuit.
    #[error("request rejected with payload{}", fmt_status(.status))]
    Rejected {
        status: Option<StatusCode>,
        payload: Value,
    },
    /// The fixture transport has nothing for this request.
    #[error("no fixture for {method} {path}")]
    NoFixture { method: Method, path: String },
    /// The payload does not have the shape the endpoint declares.
    #[error("unexpected response shape")]
    UnexpectedShape {
        payload: Value,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode request body")]
    Encode(#[source] serde_json::Error),
    #[error("invalid request url '{url}'")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid header value")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    #[error("could not build http client")]
    Build(#[source] reqwest::Error),
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),
}

impl ApiError {
    /// The payload attached to this failure, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Rejected { payload, .. } => Some(payload),
            ApiError::UnexpectedShape { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Build the failure for a response body, dropping bodies that count
    /// as empty.
    pub(crate) fn from_body(status: Option<StatusCode>, payload: Value) -> Self {
        match (payload_is_present(&payload), status) {
            (true, status) => ApiError::Rejected { status, payload },
            (false, Some(status)) => ApiError::Status { status },
            (false, None) => ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Whether a payload counts as present.
///
/// `null`, `false`, `0` and the empty string are absent. Empty arrays and
/// objects are present.
pub fn payload_is_present(payload: &Value) -> bool {
    match payload {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn fmt_status(status: &Option<StatusCode>) -> String {
    match status {
        Some(status) => format!(" ({status})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn presence_follows_truthiness() {
        assert!(!payload_is_present(&json!(null)));
        assert!(!payload_is_present(&json!(false)));
        assert!(!payload_is_present(&json!(0)));
        assert!(!payload_is_present(&json!("")));
        assert!(payload_is_present(&json!([])));
        assert!(payload_is_present(&json!({})));
        assert!(payload_is_present(&json!("oops")));
        assert!(payload_is_present(&json!(1.5)));
    }

    #[test]
    fn empty_body_becomes_status_error() {
        let err = ApiError::from_body(Some(StatusCode::NOT_FOUND), json!(null));
        assert!(matches!(err, ApiError::Status {
            status: StatusCode::NOT_FOUND
        }));
        assert!(err.payload().is_none());
    }

    #[test]
    fn body_becomes_rejection() {
        let err = ApiError::from_body(Some(StatusCode::BAD_REQUEST), json!({"detail": "no"}));
        assert_eq!(err.payload(), Some(&json!({"detail": "no"})));
        assert_eq!(err.to_string(), "request rejected with payload (400 Bad Request)");
    }
}
