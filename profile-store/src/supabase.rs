//! PostgREST-backed [`ProfileStore`] for the hosted database.
//!
//! Tables: `student_profiles` (keyed by `user_id`), `quizzes`, `quiz_attempts`.
//! Requests use the service-role key; row-level security is bypassed and
//! every query filters by `user_id` explicitly.

use std::time::Duration;

use reqwest::{Response, header};
use serde::{
    Serialize,
    de::{DeserializeOwned, IgnoredAny},
};
use tracing::{debug, error};
use uuid::Uuid;

use crate::{
    errors::{Result, StoreError},
    models::{NewQuiz, QuizAttempt, QuizRecord, StudentProfile},
    store::{ProfileStore, StoreFuture},
};

const PROFILES: &str = "student_profiles";
const QUIZZES: &str = "quizzes";
const ATTEMPTS: &str = "quiz_attempts";

/// Connection settings shared by the store and the auth verifier.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: String,
    /// Public key sent with end-user tokens to `/auth/v1/user`.
    pub anon_key: String,
    pub timeout_secs: u64,
}

impl SupabaseConfig {
    /// Reads `SUPABASE_URL`, `SUPABASE_SERVICE_KEY`, `SUPABASE_ANON_KEY`
    /// (defaults to the service key) and `SUPABASE_TIMEOUT_SECS` (default 15).
    ///
    /// Returns `Ok(None)` when `SUPABASE_URL` is unset, which selects
    /// development mode.
    pub fn from_env() -> Result<Option<Self>> {
        let Some(url) = non_empty_env("SUPABASE_URL") else {
            return Ok(None);
        };
        let service_key =
            non_empty_env("SUPABASE_SERVICE_KEY").ok_or(StoreError::MissingEnv("SUPABASE_SERVICE_KEY"))?;
        let anon_key = non_empty_env("SUPABASE_ANON_KEY").unwrap_or_else(|| service_key.clone());
        let timeout_secs = non_empty_env("SUPABASE_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        Ok(Some(Self {
            url: url.trim_end_matches('/').to_string(),
            service_key,
            anon_key,
            timeout_secs,
        }))
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub struct SupabaseStore {
    client: reqwest::Client,
    cfg: SupabaseConfig,
}

impl SupabaseStore {
    pub fn new(cfg: SupabaseConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let invalid = |_| StoreError::MissingEnv("SUPABASE_SERVICE_KEY");
        headers.insert(
            "apikey",
            header::HeaderValue::from_str(&cfg.service_key).map_err(invalid)?,
        );
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.service_key)).map_err(invalid)?,
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, cfg })
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &'static str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>> {
        debug!(table, ?filters, "GET rows");
        let resp = self
            .client
            .get(self.cfg.rest_url(table))
            .query(filters)
            .send()
            .await?;
        decode(checked(resp, table).await?, table).await
    }

    async fn insert_returning<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, &str)],
        prefer: &str,
        body: &B,
    ) -> Result<Vec<T>> {
        debug!(table, "POST rows");
        let resp = self
            .client
            .post(self.cfg.rest_url(table))
            .query(query)
            .header("Prefer", prefer)
            .json(body)
            .send()
            .await?;
        decode(checked(resp, table).await?, table).await
    }
}

async fn checked(resp: Response, table: &'static str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let snippet: String = text.trim().chars().take(240).collect();
    error!(table, %status, %snippet, "database request failed");
    Err(StoreError::Status {
        status: status.as_u16(),
        table,
        snippet,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response, table: &'static str) -> Result<T> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode {
        table,
        message: e.to_string(),
    })
}

#[derive(Serialize)]
struct ProfileUpdate {
    total_xp: u32,
    streak_days: u32,
    last_active_date: Option<chrono::NaiveDate>,
    quizzes_completed: u32,
}

#[derive(Serialize)]
struct QuizInsert<'a> {
    id: Uuid,
    #[serde(flatten)]
    quiz: &'a NewQuiz,
}

impl ProfileStore for SupabaseStore {
    fn get_or_create_profile<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, StudentProfile> {
        Box::pin(async move {
            let filter = [("user_id", format!("eq.{user_id}")), ("select", "*".into())];
            if let Some(p) = self.select::<StudentProfile>(PROFILES, &filter).await?.pop() {
                return Ok(p);
            }

            let fresh = StudentProfile::new(user_id);
            let mut inserted: Vec<StudentProfile> = self
                .insert_returning(
                    PROFILES,
                    &[("on_conflict", "user_id")],
                    "resolution=ignore-duplicates,return=representation",
                    &fresh,
                )
                .await?;
            if let Some(p) = inserted.pop() {
                return Ok(p);
            }

            // Lost an insert race against a concurrent request; read the winner.
            self.select::<StudentProfile>(PROFILES, &filter)
                .await?
                .pop()
                .ok_or_else(|| StoreError::NotFound(format!("profile {user_id}")))
        })
    }

    fn save_profile<'a>(&'a self, profile: &'a StudentProfile) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let body = ProfileUpdate {
                total_xp: profile.total_xp,
                streak_days: profile.streak_days,
                last_active_date: profile.last_active_date,
                quizzes_completed: profile.quizzes_completed,
            };
            let resp = self
                .client
                .patch(self.cfg.rest_url(PROFILES))
                .query(&[("user_id", format!("eq.{}", profile.user_id))])
                .header("Prefer", "return=minimal")
                .json(&body)
                .send()
                .await?;
            checked(resp, PROFILES).await?;
            Ok(())
        })
    }

    fn insert_quiz<'a>(&'a self, quiz: NewQuiz) -> StoreFuture<'a, QuizRecord> {
        Box::pin(async move {
            let body = QuizInsert {
                id: services::uuid::new_id(),
                quiz: &quiz,
            };
            let mut rows: Vec<QuizRecord> = self
                .insert_returning(QUIZZES, &[], "return=representation", &body)
                .await?;
            rows.pop().ok_or_else(|| StoreError::Decode {
                table: QUIZZES,
                message: "insert returned no rows".into(),
            })
        })
    }

    fn get_quiz<'a>(&'a self, quiz_id: Uuid) -> StoreFuture<'a, Option<QuizRecord>> {
        Box::pin(async move {
            let filter = [("id", format!("eq.{quiz_id}")), ("select", "*".into())];
            Ok(self.select::<QuizRecord>(QUIZZES, &filter).await?.pop())
        })
    }

    fn count_attempts<'a>(&'a self, user_id: &'a str, quiz_id: Uuid) -> StoreFuture<'a, u32> {
        Box::pin(async move {
            let filter = [
                ("user_id", format!("eq.{user_id}")),
                ("quiz_id", format!("eq.{quiz_id}")),
                ("select", "id".into()),
            ];
            let rows = self.select::<IgnoredAny>(ATTEMPTS, &filter).await?;
            Ok(u32::try_from(rows.len()).unwrap_or(u32::MAX))
        })
    }

    fn record_attempt<'a>(&'a self, attempt: QuizAttempt) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let resp = self
                .client
                .post(self.cfg.rest_url(ATTEMPTS))
                .header("Prefer", "return=minimal")
                .json(&attempt)
                .send()
                .await?;
            checked(resp, ATTEMPTS).await?;
            Ok(())
        })
    }

    fn list_attempts<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, Vec<QuizAttempt>> {
        Box::pin(async move {
            let filter = [
                ("user_id", format!("eq.{user_id}")),
                ("select", "*".into()),
                ("order", "created_at.asc".into()),
            ];
            self.select::<QuizAttempt>(ATTEMPTS, &filter).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuizLevel, QuizQuestion};

    #[test]
    fn quiz_insert_is_flat() {
        let quiz = NewQuiz {
            user_id: "u1".into(),
            topic: "house edge".into(),
            level: QuizLevel::Intermediate,
            questions: vec![QuizQuestion {
                question: "q".into(),
                options: vec!["a".into()],
                correct_answer: 0,
                explanation: "e".into(),
            }],
        };
        let id = Uuid::nil();
        let json = serde_json::to_value(QuizInsert { id, quiz: &quiz }).unwrap();
        assert_eq!(json["id"], Uuid::nil().to_string());
        assert_eq!(json["level"], "intermediate");
        assert_eq!(json["questions"][0]["correctAnswer"], 0);
    }

    #[test]
    fn rest_url_has_no_double_slash() {
        let cfg = SupabaseConfig {
            url: "https://demo.supabase.co".into(),
            service_key: "k".into(),
            anon_key: "a".into(),
            timeout_secs: 5,
        };
        assert_eq!(cfg.rest_url(PROFILES), "https://demo.supabase.co/rest/v1/student_profiles");
    }
}
