//! Health probes for LLM backends (Ollama, OpenAI).
//!
//! - Ollama: `GET {endpoint}/api/tags`, best-effort model existence check
//! - OpenAI: `GET {endpoint}/v1/models` with Bearer auth, best-effort model check
//!
//! [`HealthService::check`] never fails: errors are mapped to `ok = false`,
//! which keeps `/health` itself always answerable.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HealthError, HttpError, make_snippet},
};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub ok: bool,
    pub latency_ms: u128,
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker reusing a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let start = Instant::now();
        match self.probe(cfg).await {
            Ok(status) => {
                info!(
                    provider = %status.provider,
                    model = %status.model,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status = HealthStatus::new(cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    pub async fn check_many(&self, configs: &[LlmModelConfig]) -> Vec<HealthStatus> {
        debug!(count = configs.len(), "running health probes");
        let mut out = Vec::with_capacity(configs.len());
        for cfg in configs {
            out.push(self.check(cfg).await);
        }
        out
    }

    /// Strict probe: lists models and looks for `cfg.model`.
    async fn probe(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let base = cfg.endpoint.trim().trim_end_matches('/');
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let mut req = match cfg.provider {
            LlmProvider::Ollama => self.client.get(format!("{base}/api/tags")),
            LlmProvider::OpenAI => {
                let key = cfg.api_key.as_deref().ok_or_else(|| {
                    HealthError::Decode("missing OpenAI API key".into())
                })?;
                self.client
                    .get(format!("{base}/v1/models"))
                    .header(header::AUTHORIZATION, format!("Bearer {key}"))
            }
        };
        req = req.timeout(timeout);

        let start = Instant::now();
        let resp = req.send().await?;
        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let url = resp.url().to_string();
            let text = resp.text().await.unwrap_or_default();
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            })
            .into());
        }

        let listing: ModelListing = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                return Ok(HealthStatus::new(
                    cfg,
                    true,
                    latency,
                    format!("reachable; failed to decode model list: {e}"),
                ));
            }
        };

        if listing.contains(&cfg.model) {
            Ok(HealthStatus::new(cfg, true, latency, "healthy; model is available"))
        } else {
            Ok(HealthStatus::new(cfg, false, latency, "reachable, but model not listed"))
        }
    }
}

/// Union of `/api/tags` (`models[].name`) and `/v1/models` (`data[].id`).
#[derive(Debug, Default, Deserialize)]
struct ModelListing {
    #[serde(default)]
    models: Vec<NamedModel>,
    #[serde(default)]
    data: Vec<IdModel>,
}

#[derive(Debug, Deserialize)]
struct NamedModel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct IdModel {
    id: String,
}

impl ModelListing {
    fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m.name == model) || self.data.iter().any(|m| m.id == model)
    }
}
