use std::sync::Arc;

use axum::{extract::State, response::Response};
use tracing::debug;

use crate::{
    core::{app_state::AppState, auth::AuthUser, http::response_envelope},
    error_handler::AppResult,
    routes::profile::profile_response::ProfileResponse,
};

/// Current XP, level, title and streak for the caller.
pub async fn profile_route(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> AppResult<Response> {
    let profile = state.store.get_or_create_profile(&user.id).await?;
    debug!(user = %user.id, total_xp = profile.total_xp, "profile_route: loaded");
    Ok(response_envelope::ok(ProfileResponse::from(&profile)))
}
