//! Vector-store collaborators.
//!
//! Ranking is entirely the database's job: the `match_documents` function
//! (pgvector cosine similarity) filters by threshold, orders by similarity
//! and limits to `match_count`. This module only ships the request and
//! decodes rows.
//!
//! - [`SupabaseVectorSearch`]: embed query → `POST /rest/v1/rpc/<function>`
//! - [`NoopVectorSearch`]: no database configured; always empty

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use reqwest::header;
use serde::Serialize;
use tracing::{debug, error};

use crate::embedding::EmbeddingsProvider;
use crate::errors::rag_base_error::RagBaseError;
use crate::structs::{rag_base_config::RagConfig, search_options::MatchRequest, search_result::SearchHit};

pub type SearchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<SearchHit>, RagBaseError>> + Send + 'a>>;

/// External similarity search.
pub trait VectorSearch: Send + Sync {
    fn match_documents<'a>(&'a self, request: &'a MatchRequest) -> SearchFuture<'a>;
}

/// Hosted Postgres + pgvector reached through its REST RPC endpoint.
pub struct SupabaseVectorSearch {
    client: reqwest::Client,
    rpc_url: String,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl SupabaseVectorSearch {
    pub fn new(cfg: &RagConfig, embedder: Arc<dyn EmbeddingsProvider>) -> Result<Self, RagBaseError> {
        let mut headers = header::HeaderMap::new();
        let key = header::HeaderValue::from_str(&cfg.service_key).map_err(|_| {
            RagBaseError::EnvParse {
                key: "SUPABASE_SERVICE_KEY".into(),
                value: "<redacted>".into(),
            }
        })?;
        let bearer = header::HeaderValue::from_str(&format!("Bearer {}", cfg.service_key))
            .map_err(|_| RagBaseError::EnvParse {
                key: "SUPABASE_SERVICE_KEY".into(),
                value: "<redacted>".into(),
            })?;
        headers.insert("apikey", key);
        headers.insert(header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            rpc_url: cfg.rpc_url(),
            embedder,
        })
    }
}

/// Argument names of the `match_documents` SQL function.
#[derive(Serialize)]
struct MatchDocumentsArgs<'a> {
    query_embedding: Vec<f32>,
    match_threshold: f64,
    match_count: u32,
    filter_module: Option<&'a str>,
}

impl VectorSearch for SupabaseVectorSearch {
    fn match_documents<'a>(&'a self, request: &'a MatchRequest) -> SearchFuture<'a> {
        Box::pin(async move {
            let query_embedding = self.embedder.embed(&request.query).await?;
            debug!(
                target: "rag_base::search",
                dim = query_embedding.len(),
                threshold = request.match_threshold,
                count = request.match_count,
                "POST {}", self.rpc_url
            );

            let args = MatchDocumentsArgs {
                query_embedding,
                match_threshold: request.match_threshold,
                match_count: request.match_count,
                filter_module: request.filter_module.as_deref(),
            };

            let resp = self.client.post(&self.rpc_url).json(&args).send().await?;
            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                let snippet: String = text.chars().take(240).collect();
                error!(
                    target: "rag_base::search",
                    %status,
                    %snippet,
                    "match_documents RPC failed"
                );
                return Err(RagBaseError::Upstream {
                    status: status.as_u16(),
                    snippet,
                });
            }

            let hits: Vec<SearchHit> = resp.json().await?;
            Ok(hits)
        })
    }
}

/// Used when no database is configured: every search yields no hits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVectorSearch;

impl VectorSearch for NoopVectorSearch {
    fn match_documents<'a>(&'a self, _request: &'a MatchRequest) -> SearchFuture<'a> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_args_use_sql_parameter_names() {
        let args = MatchDocumentsArgs {
            query_embedding: vec![0.1, 0.2],
            match_threshold: 0.7,
            match_count: 5,
            filter_module: None,
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["match_count"], 5);
        assert_eq!(json["query_embedding"].as_array().map(Vec::len), Some(2));
        assert!(json["filter_module"].is_null());
    }

    #[tokio::test]
    async fn noop_search_returns_nothing() {
        let req = crate::SearchOptions::default().resolve("bankroll");
        let hits = NoopVectorSearch.match_documents(&req).await.unwrap();
        assert!(hits.is_empty());
    }
}
