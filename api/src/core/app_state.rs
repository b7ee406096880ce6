use std::{env, sync::Arc};

use ai_llm_service::{
    config::default_config::config_from_env, generator::TextGenerator,
    service_profiles::LlmServiceProfiles,
};
use profile_store::{
    AuthVerifier, DevAuth, InMemoryStore, ProfileStore, SupabaseAuth, SupabaseConfig,
    SupabaseStore,
};
use rag_base::{EmbeddingsProvider, NoopVectorSearch, RagConfig, SupabaseVectorSearch, VectorSearch};
use tracing::{info, warn};

use crate::error_handler::AppError;

const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";

/// Process-level HTTP settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address, `API_ADDRESS` (default `0.0.0.0:8080`).
    pub api_address: String,
    /// Allowed browser origin, `CORS_ALLOW_ORIGIN`. Unset → any origin.
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_address: env::var("API_ADDRESS")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            cors_allow_origin: env::var("CORS_ALLOW_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// Shared state for all HTTP handlers.
///
/// Every collaborator sits behind a trait object so handlers run unchanged
/// against the hosted services, the development fallbacks and test fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub generator: Arc<dyn TextGenerator>,
    pub search: Arc<dyn VectorSearch>,
    pub store: Arc<dyn ProfileStore>,
    pub auth: Arc<dyn AuthVerifier>,
    /// Concrete LLM profiles, kept for `/health` probes.
    pub llm: Option<Arc<LlmServiceProfiles>>,
    /// True when running without a database (in-memory store, dev auth).
    pub dev_mode: bool,
}

impl AppState {
    /// Wires collaborators from the environment.
    ///
    /// Without `SUPABASE_URL` the service runs in development mode: data
    /// lives in memory, any bearer token is accepted and search finds nothing.
    pub fn from_env() -> Result<Self, AppError> {
        let config = AppConfig::from_env();

        let profiles = config_from_env().map_err(|e| AppError::Config(e.to_string()))?;
        let llm = Arc::new(
            LlmServiceProfiles::new(profiles, None).map_err(|e| AppError::Config(e.to_string()))?,
        );

        let db = SupabaseConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
        let dev_mode = db.is_none();

        let (store, auth, search): (
            Arc<dyn ProfileStore>,
            Arc<dyn AuthVerifier>,
            Arc<dyn VectorSearch>,
        ) = match db {
            Some(db) => {
                let rag = RagConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
                let embedder: Arc<dyn EmbeddingsProvider> = llm.clone();
                info!(url = %db.url, rpc = %rag.rpc_url(), "using hosted database");
                (
                    Arc::new(SupabaseStore::new(db.clone()).map_err(|e| AppError::Config(e.to_string()))?),
                    Arc::new(SupabaseAuth::new(&db).map_err(|e| AppError::Config(e.to_string()))?),
                    Arc::new(
                        SupabaseVectorSearch::new(&rag, embedder)
                            .map_err(|e| AppError::Config(e.to_string()))?,
                    ),
                )
            }
            None => {
                warn!(
                    "SUPABASE_URL is not set: development mode (in-memory store, any bearer token accepted, empty search)"
                );
                (
                    Arc::new(InMemoryStore::new()),
                    Arc::new(DevAuth),
                    Arc::new(NoopVectorSearch),
                )
            }
        };

        Ok(Self {
            config,
            generator: llm.clone(),
            search,
            store,
            auth,
            llm: Some(llm),
            dev_mode,
        })
    }
}
