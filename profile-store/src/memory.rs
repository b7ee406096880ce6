//! Process-local store for development without a database, and for tests.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{NewQuiz, QuizAttempt, QuizRecord, StudentProfile},
    store::{ProfileStore, StoreFuture},
};

#[derive(Default)]
pub struct InMemoryStore {
    profiles: RwLock<HashMap<String, StudentProfile>>,
    quizzes: RwLock<HashMap<Uuid, QuizRecord>>,
    attempts: RwLock<Vec<QuizAttempt>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryStore {
    fn get_or_create_profile<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, StudentProfile> {
        Box::pin(async move {
            let mut profiles = self.profiles.write().await;
            Ok(profiles
                .entry(user_id.to_string())
                .or_insert_with(|| StudentProfile::new(user_id))
                .clone())
        })
    }

    fn save_profile<'a>(&'a self, profile: &'a StudentProfile) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.profiles
                .write()
                .await
                .insert(profile.user_id.clone(), profile.clone());
            Ok(())
        })
    }

    fn insert_quiz<'a>(&'a self, quiz: NewQuiz) -> StoreFuture<'a, QuizRecord> {
        Box::pin(async move {
            let record = QuizRecord {
                id: services::uuid::new_id(),
                user_id: quiz.user_id,
                topic: quiz.topic,
                level: quiz.level,
                questions: quiz.questions,
                created_at: Utc::now(),
            };
            self.quizzes.write().await.insert(record.id, record.clone());
            Ok(record)
        })
    }

    fn get_quiz<'a>(&'a self, quiz_id: Uuid) -> StoreFuture<'a, Option<QuizRecord>> {
        Box::pin(async move { Ok(self.quizzes.read().await.get(&quiz_id).cloned()) })
    }

    fn count_attempts<'a>(&'a self, user_id: &'a str, quiz_id: Uuid) -> StoreFuture<'a, u32> {
        Box::pin(async move {
            let attempts = self.attempts.read().await;
            let n = attempts
                .iter()
                .filter(|a| a.user_id == user_id && a.quiz_id == quiz_id)
                .count();
            Ok(u32::try_from(n).unwrap_or(u32::MAX))
        })
    }

    fn record_attempt<'a>(&'a self, attempt: QuizAttempt) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.attempts.write().await.push(attempt);
            Ok(())
        })
    }

    fn list_attempts<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, Vec<QuizAttempt>> {
        Box::pin(async move {
            Ok(self
                .attempts
                .read()
                .await
                .iter()
                .filter(|a| a.user_id == user_id)
                .cloned()
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuizLevel, QuizQuestion};

    fn attempt(user: &str, quiz_id: Uuid, n: u32) -> QuizAttempt {
        QuizAttempt {
            id: Uuid::new_v4(),
            user_id: user.into(),
            quiz_id,
            topic: "odds".into(),
            score: 0.5,
            attempt_number: n,
            xp_awarded: 10,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn profile_is_created_once() {
        let store = InMemoryStore::new();
        let mut p = store.get_or_create_profile("u1").await.unwrap();
        assert_eq!(p.total_xp, 0);

        p.total_xp = 120;
        store.save_profile(&p).await.unwrap();

        let again = store.get_or_create_profile("u1").await.unwrap();
        assert_eq!(again.total_xp, 120);
    }

    #[tokio::test]
    async fn quiz_roundtrip_and_attempt_counting() {
        let store = InMemoryStore::new();
        let quiz = store
            .insert_quiz(NewQuiz {
                user_id: "u1".into(),
                topic: "odds".into(),
                level: QuizLevel::Beginner,
                questions: vec![QuizQuestion {
                    question: "q".into(),
                    options: vec!["a".into(), "b".into()],
                    correct_answer: 0,
                    explanation: String::new(),
                }],
            })
            .await
            .unwrap();

        assert_eq!(store.get_quiz(quiz.id).await.unwrap(), Some(quiz.clone()));
        assert_eq!(store.get_quiz(Uuid::new_v4()).await.unwrap(), None);

        store.record_attempt(attempt("u1", quiz.id, 1)).await.unwrap();
        store.record_attempt(attempt("u1", quiz.id, 2)).await.unwrap();
        store.record_attempt(attempt("u2", quiz.id, 1)).await.unwrap();

        assert_eq!(store.count_attempts("u1", quiz.id).await.unwrap(), 2);
        assert_eq!(store.count_attempts("u2", quiz.id).await.unwrap(), 1);
        assert_eq!(store.list_attempts("u1").await.unwrap().len(), 2);
    }
}
