use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// Transient toast shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Builds an error toast from a failed response body.
    pub fn from_error_body(body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .map(|value| error_message(&value))
            .unwrap_or_else(|_| GENERIC_ERROR.to_string());
        Self::error(message)
    }
}

/// Extracts the human-readable message from an error body, preferring
/// `message` over `error`.
pub fn error_message(body: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|field| body.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_message() {
        let body = json!({
            "status": false,
            "message": "Role name already exists",
            "error": "conflict"
        });
        assert_eq!(error_message(&body), "Role name already exists");
    }

    #[test]
    fn test_error_message_falls_back_to_error_field() {
        assert_eq!(error_message(&json!({"error": "Forbidden"})), "Forbidden");
        assert_eq!(error_message(&json!({"message": "  ", "error": "Forbidden"})), "Forbidden");
    }

    #[test]
    fn test_error_message_generic_fallback() {
        assert_eq!(error_message(&json!({"status": false})), GENERIC_ERROR);
        assert_eq!(error_message(&json!({"message": 42})), GENERIC_ERROR);
        assert_eq!(error_message(&json!("oops")), GENERIC_ERROR);
    }

    #[test]
    fn test_from_error_body_handles_non_json() {
        let n = Notification::from_error_body(b"<html>502</html>");
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message, GENERIC_ERROR);
    }
}
