use std::sync::Arc;

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub use crate::core::app_state::{AppConfig, AppState};
pub use crate::error_handler::AppError;

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        analytics::analytics_route::analytics_route,
        health::health_route::health_route,
        profile::{checkin_route::checkin_route, profile_route::profile_route},
        quiz::{generate_quiz_route::generate_quiz_route, submit_quiz_route::submit_quiz_route},
        search::search_route::search_route,
    },
};

/// Builds state from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let address = state.config.api_address.clone();

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(AppError::Bind)?;
    info!(%address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// All routes with middleware applied.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_allow_origin.as_deref());

    let api = Router::new()
        .route("/search", post(search_route))
        .route("/quiz/generate", post(generate_quiz_route))
        .route("/quiz/submit", post(submit_quiz_route))
        .route("/profile", get(profile_route))
        .route("/profile/checkin", post(checkin_route))
        .route("/analytics", get(analytics_route));

    Router::new()
        .route("/health", get(health_route))
        .nest("/api", api)
        .layer(middleware::from_fn(json_error_mapper))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => base.allow_origin(value),
        Some(Err(_)) => {
            warn!("CORS_ALLOW_ORIGIN is not a valid header value, allowing any origin");
            base.allow_origin(Any)
        }
        None => base.allow_origin(Any),
    }
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::core::test_support::{body_json, harness};

    #[tokio::test]
    async fn api_routes_require_a_bearer_token() {
        let h = harness("", Vec::new());
        let resp = router(h.state)
            .oneshot(Request::get("/api/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn malformed_json_is_wrapped_in_the_envelope() {
        let h = harness("", Vec::new());
        let req = Request::post("/api/search")
            .header(header::AUTHORIZATION, "Bearer dev")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"query\": "))
            .unwrap();
        let resp = router(h.state).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn missing_field_is_a_validation_error() {
        let h = harness("", Vec::new());
        let req = Request::post("/api/quiz/submit")
            .header(header::AUTHORIZATION, "Bearer dev")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"answers\": [0]}"))
            .unwrap();
        let resp = router(h.state).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"][0]["field"], "quizId");
    }

    #[tokio::test]
    async fn health_is_public() {
        let h = harness("", Vec::new());
        let resp = router(h.state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
