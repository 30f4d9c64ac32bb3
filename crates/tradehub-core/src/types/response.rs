//! Response envelope types for API endpoints.
//!
//! The transport layer owns routing and status codes; the envelope shape
//! lives here so services and handlers agree on it.

use serde::{Deserialize, Serialize};

/// Outcome marker for the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The operation succeeded.
    Ok,
    /// The operation failed.
    Error,
}

/// Standard API response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Outcome of the operation.
    pub status: ResponseStatus,
    /// Human-readable message.
    pub message: String,
    /// Payload, when the operation produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Build a success envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Build a success envelope with no payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: message.into(),
            data: None,
        }
    }

    /// Build an error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serializes_status_lowercase() {
        let resp = ApiResponse::ok("user created", serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "user created");
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let resp = ApiResponse::<()>::error("user not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("data").is_none());
    }
}
