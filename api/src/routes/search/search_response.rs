use rag_base::SearchHit;
use serde::Serialize;

/// `results` or `context` is set depending on the requested format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SearchHit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub result_count: usize,
}
