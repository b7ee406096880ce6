use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap, response::Response};
use rag_base::{format_search_results_as_context, search_documents};
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, auth::AuthUser, http::response_envelope},
    error_handler::AppResult,
    routes::search::{
        search_request::{SearchFormat, SearchRequest},
        search_response::SearchResponse,
    },
};

/// Similarity search over the course material for the chat widget.
#[instrument(name = "search_route", skip_all)]
pub async fn search_route(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    Json(body): Json<SearchRequest>,
) -> AppResult<Response> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");
    debug!(%request_id, user = %user.id, query = %body.query, format = ?body.format, "search_route: start");

    let options = body.options()?;
    let hits = search_documents(state.search.as_ref(), &body.query, options).await?;
    let result_count = hits.len();

    let response = match body.format {
        SearchFormat::Context => SearchResponse {
            query: body.query,
            results: None,
            context: Some(format_search_results_as_context(&hits)),
            result_count,
        },
        SearchFormat::Results => SearchResponse {
            query: body.query,
            results: Some(hits),
            context: None,
            result_count,
        },
    };

    info!(%request_id, hits = result_count, "search_route: success");
    Ok(response_envelope::ok(response))
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rag_base::SearchHit;

    use super::*;
    use crate::core::test_support::{body_json, harness, user};

    fn request(json: &str) -> Json<SearchRequest> {
        Json(serde_json::from_str(json).unwrap())
    }

    #[tokio::test]
    async fn returns_hits_with_defaults_applied() {
        let h = harness("", vec![SearchHit::from_content("a"), SearchHit::from_content("b")]);
        let resp = search_route(
            State(h.state.clone()),
            user("u1"),
            HeaderMap::new(),
            request(r#"{"query":"house edge"}"#),
        )
        .await
        .unwrap();

        let json = body_json(resp).await;
        assert_eq!(json["data"]["resultCount"], 2);
        assert_eq!(json["data"]["results"][1]["content"], "b");
        assert!(json["data"].get("context").is_none());

        let sent = h.search.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.match_threshold, 0.7);
        assert_eq!(sent.match_count, 5);
    }

    #[tokio::test]
    async fn context_format_joins_hits() {
        let h = harness("", vec![SearchHit::from_content("a"), SearchHit::from_content("b")]);
        let resp = search_route(
            State(h.state.clone()),
            user("u1"),
            HeaderMap::new(),
            request(r#"{"query":"odds","format":"context"}"#),
        )
        .await
        .unwrap();

        let json = body_json(resp).await;
        assert_eq!(json["data"]["context"], "a\n\n---\n\nb");
        assert!(json["data"].get("results").is_none());
    }

    #[tokio::test]
    async fn short_query_never_reaches_the_store() {
        let h = harness("", Vec::new());
        let Err(err) = search_route(
            State(h.state.clone()),
            user("u1"),
            HeaderMap::new(),
            request(r#"{"query":" ab "}"#),
        )
        .await
        else {
            panic!("short query must be rejected");
        };

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(h.search.calls(), 0);
    }
}
