//! Unified error type for the rag-base crate.

use thiserror::Error;

/// Errors produced by retrieval.
#[derive(Debug, Error)]
pub enum RagBaseError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Required environment variable is missing.
    #[error("missing env variable: {key}")]
    EnvMissing { key: String },

    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    // ── Caller input ────────────────────────────────────────────────────────
    /// The search query was rejected before reaching the vector store.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    // ── Collaborators ───────────────────────────────────────────────────────
    /// Embedding backend failed to embed the query.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Transport error talking to the vector store.
    #[error("vector store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Vector store answered with a non-success status.
    #[error("vector store returned {status}: {snippet}")]
    Upstream { status: u16, snippet: String },

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RagBaseError {
    /// True for errors caused by the caller rather than a collaborator.
    pub fn is_validation(&self) -> bool {
        matches!(self, RagBaseError::InvalidQuery(_))
    }
}
