//! Response classifier: turns a raw HTTP outcome into a [`ResultEnvelope`].
//!
//! Classification never fails; every outcome maps to a success or failure
//! envelope.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use serde_json::{Value, json};

use super::envelope::{FailureKind, ResultEnvelope};
use crate::dolibarr::{RawResponse, ResponseShape, TransportError, TransportErrorKind};

/// Classify the outcome of one request.
pub fn classify(
    outcome: Result<RawResponse, TransportError>,
    shape: ResponseShape,
) -> ResultEnvelope {
    match outcome {
        Ok(response) => classify_response(&response, shape),
        Err(err) => transport_failure(&err),
    }
}

pub fn classify_response(response: &RawResponse, shape: ResponseShape) -> ResultEnvelope {
    if response.status >= 400 {
        let message = error_message(response.status, &response.body);
        return ResultEnvelope::api_error(message, response.status);
    }

    let data = decode_body(&response.body);
    match shape {
        ResponseShape::List if !data.is_array() => ResultEnvelope::success(json!([])),
        _ => ResultEnvelope::success(data),
    }
}

pub fn transport_failure(err: &TransportError) -> ResultEnvelope {
    ResultEnvelope::failure(FailureKind::InternalError, transport_message(err.kind))
}

/// Decode a success body as JSON, falling back to `{"raw_response": ...}`.
pub fn decode_body(body: &[u8]) -> Value {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return value;
    }
    let raw = match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => BASE64.encode(body),
    };
    json!({ "raw_response": raw })
}

/// Extract a human-readable message from an error response body.
pub fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| message_from_json(&value))
        .unwrap_or_else(|| status_text(status))
}

fn message_from_json(value: &Value) -> Option<String> {
    match value.get("error") {
        Some(Value::Object(error)) => {
            if let Some(message) = error.get("message").and_then(non_empty_str) {
                return Some(message);
            }
        }
        Some(error) => {
            if let Some(message) = non_empty_str(error) {
                return Some(message);
            }
        }
        None => {}
    }

    match value.get("errors")? {
        Value::Null => None,
        Value::Array(items) if items.iter().all(Value::is_string) && !items.is_empty() => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn status_text(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status");
    format!("HTTP {status}: {reason}")
}

/// Fixed cause text per transport failure category.
pub fn transport_message(kind: TransportErrorKind) -> String {
    match kind {
        TransportErrorKind::Tls => {
            "SSL Error: could not establish a secure connection to the Dolibarr server".into()
        }
        TransportErrorKind::Connection => {
            "Connection Error: could not connect to the Dolibarr server".into()
        }
        TransportErrorKind::Timeout => {
            "Timeout: the Dolibarr server did not respond in time".into()
        }
        TransportErrorKind::Other => "HTTP request failed: unexpected transport error".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(status: u16, body: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse::new(status, body.as_bytes().to_vec()))
    }

    #[test]
    fn test_success_json() {
        let env = classify(ok(200, r#"{"id": 3}"#), ResponseShape::Any);
        assert_eq!(env.data(), Some(&json!({"id": 3})));
    }

    #[test]
    fn test_list_coerces_non_array() {
        let env = classify(ok(200, r#"{"unexpected": true}"#), ResponseShape::List);
        assert_eq!(env.data(), Some(&json!([])));

        let env = classify(ok(200, "[1, 2]"), ResponseShape::List);
        assert_eq!(env.data(), Some(&json!([1, 2])));
    }

    #[test]
    fn test_non_json_body_wrapped() {
        let env = classify(ok(200, "<html>ok</html>"), ResponseShape::Any);
        assert_eq!(env.data(), Some(&json!({"raw_response": "<html>ok</html>"})));
    }

    #[test]
    fn test_binary_body_base64() {
        let value = decode_body(&[0xff, 0xfe, 0x00]);
        assert_eq!(value, json!({"raw_response": "//4A"}));
    }

    #[test]
    fn test_error_message_object() {
        let env = classify(
            ok(401, r#"{"error": {"code": 401, "message": "Bad token"}}"#),
            ResponseShape::Any,
        );
        assert_eq!(
            env,
            ResultEnvelope::Failure {
                kind: FailureKind::ApiError,
                message: "Bad token".into(),
                status: Some(401),
            }
        );
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(error_message(400, br#"{"error": "Bad request"}"#), "Bad request");
        assert_eq!(
            error_message(400, br#"{"errors": ["name required", "bad email"]}"#),
            "name required; bad email"
        );
        assert_eq!(error_message(400, br#"{"errors": {"name": 1}}"#), r#"{"name":1}"#);
        assert_eq!(error_message(404, b"not json"), "HTTP 404: Not Found");
        assert_eq!(error_message(500, br#"{"error": {}}"#), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_transport_failures() {
        let env = classify(Err(TransportError::timeout()), ResponseShape::Any);
        assert_eq!(env.failure_kind(), Some(FailureKind::InternalError));
        assert!(env.to_json()["error"].as_str().unwrap().contains("Timeout"));

        let env = classify(
            Err(TransportError::new(TransportErrorKind::Tls, "handshake")),
            ResponseShape::Any,
        );
        let text = env.to_json()["error"].as_str().unwrap().to_string();
        assert!(text.starts_with("SSL Error"));
        assert!(!text.contains("handshake"));
    }
}
