//! LLM provider factory.
//!
//! Resolves a provider name to a client, checking the secrets it needs.

use crate::client::LlmClient;
use crate::providers::{GeminiClient, DEFAULT_GEMINI_ENDPOINT};
use notice_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("gemini" or "google")
/// * `endpoint` - Optional custom base URL
/// * `api_key` - API key; required by every supported provider
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or the key is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "gemini" | "google" => {
            let api_key = api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| AppError::Config("Gemini provider requires API key".to_string()))?;
            let base_url = endpoint.unwrap_or(DEFAULT_GEMINI_ENDPOINT);
            Ok(Arc::new(GeminiClient::with_base_url(base_url, api_key)))
        }
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gemini_client() {
        let client = create_client("gemini", None, Some("key")).unwrap();
        assert_eq!(client.provider_name(), "gemini");
    }

    #[test]
    fn test_google_alias_with_custom_endpoint() {
        let client = create_client("Google", Some("http://localhost:8080"), Some("key"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_gemini_requires_api_key() {
        for key in [None, Some(""), Some("   ")] {
            match create_client("gemini", None, key) {
                Err(AppError::Config(msg)) => assert!(msg.contains("requires API key")),
                Err(other) => panic!("Unexpected error: {}", other),
                Ok(_) => panic!("Expected error for Gemini without API key"),
            }
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, Some("key")) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
