//! HTTP DTOs for chat endpoints
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::catalog::UiFilter;
use crate::domain::dialogue::{Conversation, Turn};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request for the next assistant reply
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Turn>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ui_flags: UiFilter,
}

/// Explicit `null` reads the same as an omitted field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    pub fn conversation(&self) -> Conversation {
        Conversation::from_turns(self.messages.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub is_drink_recommendation: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub status: String,
}

impl Default for ResetResponse {
    fn default() -> Self {
        Self {
            status: "conversation reset".to_string(),
        }
    }
}

/// Service descriptor returned from `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<EndpointDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointDescriptor {
    pub method: String,
    pub path: String,
    pub description: String,
}

impl EndpointDescriptor {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            description: description.to_string(),
        }
    }
}

impl Default for ServiceDescriptor {
    fn default() -> Self {
        Self {
            message: "\u{2615} Cafekase API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: vec![
                EndpointDescriptor::new("GET", "/health", "Health check"),
                EndpointDescriptor::new("POST", "/api/chat", "Next assistant reply for a conversation"),
                EndpointDescriptor::new("POST", "/api/reset", "Acknowledge a conversation reset"),
            ],
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_GATEWAY".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CaffeinePreference, TempPreference};
    use crate::domain::dialogue::TurnRole;

    #[test]
    fn test_chat_request_defaults() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();

        assert!(req.messages.is_empty());
        assert_eq!(req.ui_flags, UiFilter::any());
    }

    #[test]
    fn test_null_fields_read_as_omitted() {
        let req: ChatRequest = serde_json::from_str(r#"{"messages": null, "uiFlags": null}"#).unwrap();

        assert!(req.messages.is_empty());
        assert_eq!(req.ui_flags, UiFilter::any());
        assert_eq!(req.conversation().user_turn_count(), 0);
    }

    #[test]
    fn test_chat_request_deserialization() {
        let json = r#"{
            "messages": [
                {"role": "assistant", "content": "Tell me about your best cafe memory."},
                {"role": "user", "content": "Kyoto, rainy afternoon"}
            ],
            "uiFlags": {"temp": "iced", "caffeine": "no_caffeine"}
        }"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[1].role, TurnRole::User);
        assert_eq!(req.ui_flags.temp, TempPreference::Iced);
        assert_eq!(req.ui_flags.caffeine, CaffeinePreference::NoCaffeine);
        assert_eq!(req.conversation().user_turn_count(), 1);
    }

    #[test]
    fn test_partial_ui_flags_default_to_any() {
        let req: ChatRequest = serde_json::from_str(r#"{"uiFlags": {"temp": "hot"}}"#).unwrap();
        assert_eq!(req.ui_flags.caffeine, CaffeinePreference::Any);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{"messages": [{"role": "system", "content": "hi"}]}"#;
        assert!(serde_json::from_str::<ChatRequest>(json).is_err());
    }

    #[test]
    fn test_chat_response_uses_camel_case() {
        let json = serde_json::to_value(ChatResponse {
            response: "DRINK: Latte".to_string(),
            is_drink_recommendation: true,
        })
        .unwrap();

        assert_eq!(json["isDrinkRecommendation"], true);
        assert_eq!(json["response"], "DRINK: Latte");
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse::bad_gateway("AI provider unavailable");
        let json = serde_json::to_string(&error).unwrap();

        assert!(json.contains("BAD_GATEWAY"));
        assert!(!json.contains("details"));
    }
}
