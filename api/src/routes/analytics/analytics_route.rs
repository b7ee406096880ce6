use std::sync::Arc;

use axum::{extract::State, response::Response};
use profile_store::analytics::summarize_attempts;
use tracing::debug;

use crate::{
    core::{app_state::AppState, auth::AuthUser, http::response_envelope},
    error_handler::AppResult,
};

/// Learning analytics over the caller's attempt history.
pub async fn analytics_route(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> AppResult<Response> {
    let attempts = state.store.list_attempts(&user.id).await?;
    debug!(user = %user.id, attempts = attempts.len(), "analytics_route: loaded");
    let report = summarize_attempts(&attempts);
    Ok(response_envelope::ok(report))
}
