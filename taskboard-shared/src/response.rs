/// JSON response envelope
///
/// Every response carries a status discriminator; error responses
/// additionally carry a human-readable message:
///
/// ```json
/// {"status": "OK"}
/// {"status": "Error", "error": "user not found"}
/// ```
///
/// Data-carrying responses flatten their payload beside `status`.
/// Unauthorized responses always use the fixed [`UNAUTHORIZED_MSG`] so
/// clients cannot tell which authentication sub-check failed.

use serde::{Deserialize, Serialize};

/// Fixed message for every unauthorized response
pub const UNAUTHORIZED_MSG: &str = "unauthorized";

/// Response status discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    Error,
}

/// Response envelope, optionally wrapping a payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T = ()> {
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    /// Bare success confirmation
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            error: None,
            data: None,
        }
    }

    /// Error envelope with a message
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(msg.into()),
            data: None,
        }
    }

    /// Error envelope with the fixed unauthorized message
    pub fn unauthorized() -> Self {
        Self::error(UNAUTHORIZED_MSG)
    }
}

impl<T> ApiResponse<T> {
    /// Success envelope carrying a payload
    pub fn with(data: T) -> Self {
        Self {
            status: Status::Ok,
            error: None,
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let body = serde_json::to_value(ApiResponse::ok()).unwrap();
        assert_eq!(body, json!({"status": "OK"}));
    }

    #[test]
    fn test_error_envelope() {
        let body = serde_json::to_value(ApiResponse::error("user not found")).unwrap();
        assert_eq!(body, json!({"status": "Error", "error": "user not found"}));
    }

    #[test]
    fn test_unauthorized_envelope_uses_fixed_message() {
        let body = serde_json::to_value(ApiResponse::unauthorized()).unwrap();
        assert_eq!(body, json!({"status": "Error", "error": "unauthorized"}));
    }

    #[test]
    fn test_payload_is_flattened() {
        #[derive(Serialize)]
        struct Payload {
            access_token: &'static str,
        }

        let body = serde_json::to_value(ApiResponse::with(Payload {
            access_token: "abc",
        }))
        .unwrap();
        assert_eq!(body, json!({"status": "OK", "access_token": "abc"}));
    }
}
