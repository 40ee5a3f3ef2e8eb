//! Response envelope types for API endpoints.
//!
//! Success responses carry `{message, status, data}`; failures carry
//! `{error}`. The envelope shape is part of the wire contract with the
//! client UI.

use serde::{Deserialize, Serialize};

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T: Serialize> {
    /// Short human-readable outcome message.
    pub message: String,
    /// HTTP status code mirrored in the body.
    pub status: u16,
    /// Response payload.
    pub data: T,
}

impl<T: Serialize> ApiEnvelope<T> {
    /// Wrap a payload in a 200 envelope.
    pub fn ok(data: T) -> Self {
        Self {
            message: "ok".to_string(),
            status: 200,
            data,
        }
    }

    /// Wrap a payload in a 201 envelope.
    pub fn created(data: T) -> Self {
        Self {
            message: "created".to_string(),
            status: 201,
            data,
        }
    }

    /// Wrap a payload with a custom message.
    pub fn with_message(message: impl Into<String>, status: u16, data: T) -> Self {
        Self {
            message: message.into(),
            status,
            data,
        }
    }
}

/// Standard failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let env = ApiEnvelope::ok(serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["message"], "ok");
        assert_eq!(json["status"], 200);
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn error_envelope_shape() {
        let body = ApiErrorBody {
            error: "Folder not found".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Folder not found"}));
    }
}
