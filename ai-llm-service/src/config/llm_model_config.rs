use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM model invocation profile.
///
/// # Fields
///
/// - `provider`: which backend to call.
/// - `model`: model identifier (e.g. `"gpt-4o-mini"`, `"llama3.1"`).
/// - `endpoint`: base URL of the provider API.
/// - `api_key`: bearer key for providers that require it (OpenAI).
/// - `max_tokens`: generation cap, if supported.
/// - `temperature` / `top_p`: sampling controls.
/// - `timeout_secs`: per-request timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
}
