use std::sync::Arc;

use axum::{extract::State, response::Response};
use tracing::debug;

use crate::{
    core::{app_state::AppState, http::response_envelope},
    routes::health::health_response::HealthResponse,
};

/// Liveness plus a snapshot of the LLM backends.
///
/// Always answers 200: provider problems show up as `ok: false` entries.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let llm = match &state.llm {
        Some(llm) => llm.health_all().await,
        None => Vec::new(),
    };
    debug!(providers = llm.len(), "health_route: probed");

    let body = HealthResponse {
        status: "ok",
        mode: if state.dev_mode { "development" } else { "hosted" },
        version: env!("CARGO_PKG_VERSION"),
        llm,
    };
    response_envelope::ok(body)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use super::*;
    use crate::core::test_support::{body_json, harness};

    #[tokio::test]
    async fn reports_mode_without_llm_probes() {
        let h = harness("", Vec::new());
        let resp = health_route(State(h.state)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["mode"], "development");
        assert_eq!(json["data"]["llm"], serde_json::json!([]));
    }
}
