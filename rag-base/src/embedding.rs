//! Query embedding seam.

use std::{future::Future, pin::Pin};

use ai_llm_service::service_profiles::LlmServiceProfiles;

use crate::errors::rag_base_error::RagBaseError;

pub type EmbedFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<f32>, RagBaseError>> + Send + 'a>>;

/// Provider interface for embedding generation.
///
/// Implement this trait to plug in another embedding backend.
pub trait EmbeddingsProvider: Send + Sync {
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a>;
}

impl EmbeddingsProvider for LlmServiceProfiles {
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a> {
        Box::pin(async move {
            LlmServiceProfiles::embed(self, text)
                .await
                .map_err(|e| RagBaseError::Embedding(e.to_string()))
        })
    }
}
