//! Configuration for the OpenAI-compatible provider.

use secrecy::SecretString;

/// Connection settings for an OpenAI-compatible endpoint.
pub struct OpenAiCompatConfig {
    /// Label used in logs (e.g., "openai").
    pub provider_name: String,
    /// Base URL of the API (e.g., `https://api.openai.com/v1`).
    pub base_url: String,
    pub api_key: SecretString,
    /// Model to fall back to when a request does not name one.
    pub model: String,
}
