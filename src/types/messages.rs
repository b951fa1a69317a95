//! NATS request/reply envelopes
//!
//! Every request carries an id that the reply echoes back, so callers can
//! match replies even when they multiplex over one inbox.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Incoming request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request<T> {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub payload: T,
}

/// Successful reply envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse<T> {
    /// Id of the request being answered
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub payload: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(request_id: Uuid, payload: T) -> Self {
        Self {
            id: request_id,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Failure categories reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Payload did not parse or carried unusable parameters
    InvalidRequest,
    /// Reading the upstream tables failed
    UpstreamError,
}

/// Failed reply envelope. The id is nil when the request itself was unreadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(request_id: Uuid, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            id: request_id,
            timestamp: Utc::now(),
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_camel_case_envelope() {
        let json = r#"{
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "timestamp": "2026-01-05T08:00:00Z",
            "payload": {"maxJobsPerTruck": 3}
        }"#;

        let request: Request<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(request.id.to_string(), "123e4567-e89b-12d3-a456-426614174000");
        assert_eq!(request.payload["maxJobsPerTruck"], 3);
    }

    #[test]
    fn test_request_without_id_is_rejected() {
        let json = r#"{"timestamp": "2026-01-05T08:00:00Z", "payload": {}}"#;
        assert!(serde_json::from_str::<Request<serde_json::Value>>(json).is_err());
    }

    #[test]
    fn test_error_code_wire_names() {
        let error = ErrorResponse::new(Uuid::nil(), ErrorCode::UpstreamError, "Airtable Trucks 503");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
        assert_eq!(json["error"]["message"], "Airtable Trucks 503");
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");

        let invalid = serde_json::to_value(ErrorCode::InvalidRequest).unwrap();
        assert_eq!(invalid, "INVALID_REQUEST");
    }

    #[test]
    fn test_success_response_keeps_request_id() {
        let id = Uuid::new_v4();
        let response = SuccessResponse::new(id, serde_json::json!({}));
        assert_eq!(response.id, id);
    }
}
