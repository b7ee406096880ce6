//! LLM profile configs loaded from environment variables.
//!
//! Two roles are configured for the selected provider:
//!
//! - **Generation** → chat/completion model used to author quizzes
//! - **Embedding**  → model used to embed search queries
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND` = `openai` (default) | `ollama`
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//!
//! OpenAI:
//! - `OPENAI_API_KEY` (mandatory)
//! - `OPENAI_URL` (default `https://api.openai.com`)
//! - `OPENAI_MODEL` (default `gpt-4o-mini`)
//! - `OPENAI_EMBEDDING_MODEL` (default `text-embedding-3-small`)
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` (mandatory)
//! - `OLLAMA_MODEL` (mandatory)
//! - `EMBEDDING_MODEL` (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, env_opt_u32, env_or, must_env, validate_http_endpoint},
};

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// The pair of profiles the backend runs with.
#[derive(Debug, Clone)]
pub struct LlmProfilesConfig {
    pub generation: LlmModelConfig,
    pub embedding: LlmModelConfig,
}

/// Builds both profiles for the provider named by `LLM_KIND`.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - [`ConfigError::MissingVar`] when a mandatory variable is absent
/// - [`ConfigError::InvalidFormat`] when an endpoint is not http(s)
pub fn config_from_env() -> Result<LlmProfilesConfig, AiLlmError> {
    let kind: LlmProvider = env_or("LLM_KIND", "openai").parse()?;
    match kind {
        LlmProvider::OpenAI => Ok(LlmProfilesConfig {
            generation: config_openai_generation()?,
            embedding: config_openai_embedding()?,
        }),
        LlmProvider::Ollama => Ok(LlmProfilesConfig {
            generation: config_ollama_generation()?,
            embedding: config_ollama_embedding()?,
        }),
    }
}

fn openai_endpoint() -> Result<String, AiLlmError> {
    let url = env_or("OPENAI_URL", DEFAULT_OPENAI_URL);
    validate_http_endpoint("OPENAI_URL", &url)?;
    Ok(url)
}

/// Quiz authoring profile on OpenAI.
///
/// # Defaults
/// - `temperature = Some(0.7)` (varied questions between runs)
/// - `timeout_secs = Some(60)`
pub fn config_openai_generation() -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
        endpoint: openai_endpoint()?,
        api_key: Some(must_env("OPENAI_API_KEY")?),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Query embedding profile on OpenAI.
pub fn config_openai_embedding() -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_or("OPENAI_EMBEDDING_MODEL", DEFAULT_OPENAI_EMBEDDING_MODEL),
        endpoint: openai_endpoint()?,
        api_key: Some(must_env("OPENAI_API_KEY")?),
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}

/// Resolves the Ollama endpoint.
///
/// Precedence: `OLLAMA_URL` if non-empty, then `OLLAMA_PORT` on localhost.
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            validate_http_endpoint("OLLAMA_URL", &url)?;
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            port.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(ConfigError::MissingVar("OLLAMA_URL or OLLAMA_PORT").into())
}

pub fn config_ollama_generation() -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: must_env("OLLAMA_MODEL")?,
        endpoint: ollama_endpoint()?,
        api_key: None,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(0.7),
        top_p: Some(0.9),
        timeout_secs: Some(300),
    })
}

pub fn config_ollama_embedding() -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: must_env("EMBEDDING_MODEL")?,
        endpoint: ollama_endpoint()?,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
