//! Error taxonomy for backend calls.

use thiserror::Error;

/// Failure modes of a gateway call.
///
/// `Unauthorized` is what the refresh-and-replay machinery reacts to;
/// everything else passes straight through to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response received at all.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 401 from the backend; candidate for the single token-refresh replay.
    #[error("authentication required")]
    Unauthorized,

    /// Token refresh failed; both tokens have been cleared.
    #[error("session expired")]
    SessionExpired,

    /// The server answered 2xx but the body did not parse.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected client-side before any network call.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Human-readable message for the status bar.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error. Please check your connection.".to_string(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Unauthorized => "You are not authorized to perform this action.".to_string(),
            ApiError::SessionExpired => "Session expired. Please log in again.".to_string(),
            ApiError::InvalidResponse(_) => "Unexpected response from the server.".to_string(),
            ApiError::Validation(msg) => msg.clone(),
        }
    }

    /// True when the server signals the endpoint itself does not exist
    /// (404/405). The favorite toggle uses this to fall back to a
    /// session-local flag.
    pub fn is_capability_missing(&self) -> bool {
        matches!(self, ApiError::Server { status: 404 | 405, .. })
    }
}

/// Pull a display message out of an error response body.
///
/// The backend wraps errors as `{"detail": ...}` (DRF) or
/// `{"message": ...}` / `{"error": ...}`; fall back to a generic string.
pub fn message_from_body(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    format!("Server error (status {})", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_body_detail() {
        assert_eq!(
            message_from_body(400, r#"{"detail": "filename is required"}"#),
            "filename is required"
        );
        assert_eq!(
            message_from_body(400, r#"{"error": "Image file is required"}"#),
            "Image file is required"
        );
    }

    #[test]
    fn test_message_from_body_fallback() {
        assert_eq!(message_from_body(500, "not json"), "Server error (status 500)");
        assert_eq!(message_from_body(502, "{}"), "Server error (status 502)");
    }

    #[test]
    fn test_capability_missing() {
        let missing = ApiError::Server { status: 404, message: "not found".into() };
        let broken = ApiError::Server { status: 500, message: "boom".into() };
        assert!(missing.is_capability_missing());
        assert!(!broken.is_capability_missing());
        assert!(!ApiError::Unauthorized.is_capability_missing());
    }
}
