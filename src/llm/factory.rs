//! LLM client factory.
//!
//! Centralizes provider-specific logic for creating LLM clients from the
//! resolved configuration.

use crate::config::LlmConfig;
use crate::error::{Result, SqlRagError};
use crate::llm::{GeminiClient, GeminiConfig, LlmClient, LlmProvider, MockLlmClient};

/// Creates an LLM client for the configured provider.
///
/// Expects a fully resolved config (CLI and environment precedence already
/// applied). A missing API key for a provider that needs one is a
/// configuration error, raised before any model call is attempted.
pub fn create_client(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    let provider: LlmProvider = config.provider.parse().map_err(SqlRagError::config)?;

    match provider {
        LlmProvider::Gemini => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                SqlRagError::config(
                    "Gemini API key not set. Use --api-key, GEMINI_API_KEY, or the config file.",
                )
            })?;
            let gemini_config = GeminiConfig::new(api_key, config.model.clone())
                .with_timeout(config.timeout_secs);
            Ok(Box::new(GeminiClient::new(gemini_config)?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
