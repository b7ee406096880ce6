use ai_llm_service::health_service::HealthStatus;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    /// `development` or `hosted`.
    pub mode: &'static str,
    pub version: &'static str,
    pub llm: Vec<HealthStatus>,
}
