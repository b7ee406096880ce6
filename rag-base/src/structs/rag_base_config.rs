//! Configuration layer for the hosted vector-search RPC.

use crate::errors::rag_base_error::RagBaseError;

/// Runtime settings for [`crate::vector_db::SupabaseVectorSearch`].
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Service-role key sent as `apikey` and bearer token.
    pub service_key: String,
    /// Name of the Postgres function exposed under `/rest/v1/rpc/`.
    pub rpc_function: String,
    pub timeout_secs: u64,
}

impl RagConfig {
    /// Environment variables used:
    /// - `SUPABASE_URL` (required)
    /// - `SUPABASE_SERVICE_KEY` (required)
    /// - `RAG_RPC_FUNCTION` (default: `match_documents`)
    /// - `RAG_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, RagBaseError> {
        Ok(Self {
            url: read_env("SUPABASE_URL")?,
            service_key: read_env("SUPABASE_SERVICE_KEY")?,
            rpc_function: read_env("RAG_RPC_FUNCTION").unwrap_or_else(|_| "match_documents".into()),
            timeout_secs: match read_env("RAG_TIMEOUT_SECS") {
                Ok(v) => v.parse::<u64>().map_err(|_| RagBaseError::EnvParse {
                    key: "RAG_TIMEOUT_SECS".into(),
                    value: v,
                })?,
                Err(_) => 30,
            },
        })
    }

    /// Full RPC endpoint URL.
    pub fn rpc_url(&self) -> String {
        format!(
            "{}/rest/v1/rpc/{}",
            self.url.trim_end_matches('/'),
            self.rpc_function
        )
    }
}

fn read_env(key: &str) -> Result<String, RagBaseError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RagBaseError::EnvMissing { key: key.into() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_url_joins_cleanly() {
        let cfg = RagConfig {
            url: "https://demo.supabase.co/".into(),
            service_key: "k".into(),
            rpc_function: "match_documents".into(),
            timeout_secs: 30,
        };
        assert_eq!(cfg.rpc_url(), "https://demo.supabase.co/rest/v1/rpc/match_documents");
    }
}
