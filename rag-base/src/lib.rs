//! Retrieval for the assistant.
//!
//! Public API:
//! - [`search_documents`]: validate the query, apply option defaults, delegate
//!   to a [`VectorSearch`] collaborator and return its hits in order.
//! - [`format_search_results_as_context`]: collapse hits into one prompt block.

pub mod embedding;
pub mod errors;
pub mod structs;
pub mod vector_db;

use tracing::{debug, info};

pub use embedding::EmbeddingsProvider;
pub use errors::rag_base_error::RagBaseError;
pub use structs::rag_base_config::RagConfig;
pub use structs::search_options::{
    DEFAULT_MATCH_COUNT, DEFAULT_MATCH_THRESHOLD, MIN_QUERY_CHARS, MatchRequest, SearchOptions,
};
pub use structs::search_result::SearchHit;
pub use vector_db::{NoopVectorSearch, SupabaseVectorSearch, VectorSearch};

/// Separator placed between chunks in the prompt context.
pub const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

/// Similarity search over the course material.
///
/// Rejects queries shorter than [`MIN_QUERY_CHARS`] (after trimming) with
/// [`RagBaseError::InvalidQuery`] without touching `search`. Hits come back
/// in the collaborator's order; nothing is re-ranked or filtered here.
pub async fn search_documents(
    search: &dyn VectorSearch,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchHit>, RagBaseError> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(RagBaseError::InvalidQuery(format!(
            "query must be at least {MIN_QUERY_CHARS} characters"
        )));
    }

    let request = options.resolve(query);
    debug!(
        target: "rag_base::search",
        query = %request.query,
        threshold = request.match_threshold,
        count = request.match_count,
        module = ?request.filter_module,
        "search_documents: start"
    );

    let hits = search.match_documents(&request).await?;

    info!(
        target: "rag_base::search",
        hits = hits.len(),
        "search_documents: finished"
    );
    Ok(hits)
}

/// Joins hit contents, in order, with [`CONTEXT_DELIMITER`].
///
/// No hits → `""`. Prompt assembly checks for the empty string to decide
/// whether to include a context section at all.
pub fn format_search_results_as_context(results: &[SearchHit]) -> String {
    results
        .iter()
        .map(|hit| hit.content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_DELIMITER)
}
