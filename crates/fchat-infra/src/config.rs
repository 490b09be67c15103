//! Environment-driven settings for fchat.
//!
//! All configuration comes from the process environment (the binary loads
//! `.env` into it first). Only `OPENAI_API_KEY` is required; every other key
//! falls back to a default, and a malformed value logs a warning and falls
//! back rather than aborting startup.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use secrecy::SecretString;

use fchat_types::llm::GenerationProfile;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_USERDATA_DIR: &str = "userdata";

/// Runtime settings resolved from the environment.
#[derive(Debug)]
pub struct Settings {
    /// API key for the model provider. Required.
    pub api_key: SecretString,
    /// Base URL of the OpenAI-compatible endpoint (`OPENAI_API_BASE`).
    pub api_base: String,
    /// Model identifier (`OPENAI_MODEL`).
    pub model: String,
    /// Sampling temperature (`TEMPERATURE`).
    pub temperature: f64,
    /// Completion token cap (`MAX_TOKENS`).
    pub max_tokens: u32,
    /// Browser origin allowed by CORS (`FCHAT_CORS_ORIGIN`).
    pub cors_origin: String,
    /// Directory holding the credential files (`FCHAT_USERDATA_DIR`).
    pub userdata_dir: PathBuf,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .map(SecretString::from)
            .context("OPENAI_API_KEY is not set; the model provider cannot be reached")?;

        let api_base =
            lookup("OPENAI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let temperature =
            parse_or_default(lookup("TEMPERATURE"), "TEMPERATURE", DEFAULT_TEMPERATURE);
        let max_tokens =
            parse_or_default(lookup("MAX_TOKENS"), "MAX_TOKENS", DEFAULT_MAX_TOKENS);
        let cors_origin =
            lookup("FCHAT_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let userdata_dir = lookup("FCHAT_USERDATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERDATA_DIR));

        Ok(Self {
            api_key,
            api_base,
            model,
            temperature,
            max_tokens,
            cors_origin,
            userdata_dir,
        })
    }

    /// Model and sampling parameters for completion requests.
    pub fn generation_profile(&self) -> GenerationProfile {
        GenerationProfile {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

fn parse_or_default<T>(raw: Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Failed to parse {key}={raw:?}, using default {default}");
                default
            }
        },
    }
}
