use std::{future::Future, pin::Pin};

use uuid::Uuid;

use crate::{
    errors::StoreError,
    models::{NewQuiz, QuizAttempt, QuizRecord, StudentProfile},
};

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Persistence for everything the learning flow writes.
///
/// Implementations own consistency; handlers perform plain
/// read-modify-write sequences within a single request.
pub trait ProfileStore: Send + Sync {
    /// Returns the profile, inserting a zeroed one on first access.
    fn get_or_create_profile<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, StudentProfile>;

    fn save_profile<'a>(&'a self, profile: &'a StudentProfile) -> StoreFuture<'a, ()>;

    fn insert_quiz<'a>(&'a self, quiz: NewQuiz) -> StoreFuture<'a, QuizRecord>;

    fn get_quiz<'a>(&'a self, quiz_id: Uuid) -> StoreFuture<'a, Option<QuizRecord>>;

    /// Number of attempts `user_id` already recorded for `quiz_id`.
    fn count_attempts<'a>(&'a self, user_id: &'a str, quiz_id: Uuid) -> StoreFuture<'a, u32>;

    fn record_attempt<'a>(&'a self, attempt: QuizAttempt) -> StoreFuture<'a, ()>;

    /// All attempts by `user_id`, oldest first.
    fn list_attempts<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, Vec<QuizAttempt>>;
}
