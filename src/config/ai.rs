//! LLM collaborator configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::OpenAIConfig;

/// Most collaborator calls one dialogue cycle makes: question, forced, repair.
pub const MAX_CALLS_PER_CYCLE: u64 = 3;

/// LLM collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Transport-level retries on retryable failures
    #[serde(default)]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Upper bound on collaborator time for one cycle, retries included.
    pub fn worst_case_cycle_secs(&self) -> u64 {
        MAX_CALLS_PER_CYCLE * (1 + u64::from(self.max_retries)) * self.timeout_secs
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Builds the adapter configuration.
    pub fn openai(&self) -> Result<OpenAIConfig, ValidationError> {
        let key = self
            .openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;

        Ok(OpenAIConfig::new(key)
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
            .with_max_retries(self.max_retries))
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
        }
    }
}

fn default_model() -> String {
    OpenAIConfig::DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    OpenAIConfig::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 15,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_worst_case_cycle_counts_every_call_and_retry() {
        assert_eq!(AiConfig::default().worst_case_cycle_secs(), 180);

        let config = AiConfig {
            timeout_secs: 20,
            max_retries: 1,
            ..Default::default()
        };
        assert_eq!(config.worst_case_cycle_secs(), 120);
    }

    #[test]
    fn test_validation_requires_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
        );

        let blank = AiConfig {
            openai_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!blank.has_openai());
        assert!(blank.openai().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            base_url: "api.openai.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_openai_config_carries_settings() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            model: "gpt-4o-mini".to_string(),
            max_retries: 2,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let openai = config.openai().unwrap();
        assert_eq!(openai.model, "gpt-4o-mini");
        assert_eq!(openai.max_retries, 2);
        assert_eq!(openai.timeout, Duration::from_secs(60));
    }
}
