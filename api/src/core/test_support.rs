//! In-process fakes for handler tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use ai_llm_service::generator::{GenerateFuture, TextGenerator};
use axum::response::Response;
use profile_store::{AuthenticatedUser, DevAuth, InMemoryStore};
use rag_base::{MatchRequest, SearchHit, VectorSearch, vector_db::SearchFuture};

use crate::core::{
    app_state::{AppConfig, AppState},
    auth::AuthUser,
};

/// Answers every prompt with the same text and remembers the last prompt.
#[derive(Default)]
pub struct FakeGenerator {
    pub reply: String,
    pub last_prompt: Mutex<Option<String>>,
}

impl TextGenerator for FakeGenerator {
    fn generate<'a>(&'a self, prompt: &'a str, _system: Option<&'a str>) -> GenerateFuture<'a> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        let reply = self.reply.clone();
        Box::pin(async move { Ok(reply) })
    }
}

/// Returns fixed hits and counts calls.
#[derive(Default)]
pub struct FakeSearch {
    pub hits: Vec<SearchHit>,
    pub calls: AtomicUsize,
    pub last: Mutex<Option<MatchRequest>>,
}

impl FakeSearch {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl VectorSearch for FakeSearch {
    fn match_documents<'a>(&'a self, request: &'a MatchRequest) -> SearchFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(request.clone());
        }
        let hits = self.hits.clone();
        Box::pin(async move { Ok(hits) })
    }
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub generator: Arc<FakeGenerator>,
    pub search: Arc<FakeSearch>,
    pub store: Arc<InMemoryStore>,
}

pub fn harness(llm_reply: &str, hits: Vec<SearchHit>) -> Harness {
    let generator = Arc::new(FakeGenerator {
        reply: llm_reply.to_string(),
        ..Default::default()
    });
    let search = Arc::new(FakeSearch {
        hits,
        ..Default::default()
    });
    let store = Arc::new(InMemoryStore::new());

    let state = Arc::new(AppState {
        config: AppConfig {
            api_address: "127.0.0.1:0".into(),
            cors_allow_origin: None,
        },
        generator: generator.clone(),
        search: search.clone(),
        store: store.clone(),
        auth: Arc::new(DevAuth),
        llm: None,
        dev_mode: true,
    });

    Harness {
        state,
        generator,
        search,
        store,
    }
}

pub fn user(id: &str) -> AuthUser {
    AuthUser(AuthenticatedUser {
        id: id.to_string(),
        email: None,
    })
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A well-formed three-question quiz as an LLM would return it.
pub const QUIZ_JSON: &str = r#"```json
{"questions": [
  {"question": "What does the house edge describe?", "options": ["Casino's long-run advantage", "A betting strategy", "A table limit", "A bonus"], "correctAnswer": 0, "explanation": "It is the built-in margin."},
  {"question": "Chasing losses means...", "options": ["Betting more to win back losses", "Taking a break", "Setting a budget", "Cashing out"], "correctAnswer": 0, "explanation": "It usually deepens losses."},
  {"question": "A good session budget is...", "options": ["Money you need for rent", "Money you can afford to lose", "A credit card limit", "Unlimited"], "correctAnswer": 1, "explanation": "Only play with disposable money."}
]}
```"#;
