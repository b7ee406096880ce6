//! Row shapes for `student_profiles`, `quizzes` and `quiz_attempts`.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-student progress. `total_xp` only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub user_id: String,
    #[serde(default)]
    pub total_xp: u32,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
    #[serde(default)]
    pub quizzes_completed: u32,
    pub created_at: DateTime<Utc>,
}

impl StudentProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            total_xp: 0,
            streak_days: 0,
            last_active_date: None,
            quizzes_completed: 0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl QuizLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            QuizLevel::Beginner => "beginner",
            QuizLevel::Intermediate => "intermediate",
            QuizLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for QuizLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(QuizLevel::Beginner),
            "intermediate" => Ok(QuizLevel::Intermediate),
            "advanced" => Ok(QuizLevel::Advanced),
            other => Err(format!(
                "unknown level '{other}', expected beginner, intermediate or advanced"
            )),
        }
    }
}

/// One multiple-choice question. `correct_answer` indexes into `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

/// Insert payload for a generated quiz.
#[derive(Debug, Clone, Serialize)]
pub struct NewQuiz {
    pub user_id: String,
    pub topic: String,
    pub level: QuizLevel,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: Uuid,
    pub user_id: String,
    pub topic: String,
    pub level: QuizLevel,
    pub questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
}

/// A graded submission. `attempt_number` is 1 for the first try at a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: Uuid,
    pub user_id: String,
    pub quiz_id: Uuid,
    pub topic: String,
    pub score: f64,
    pub attempt_number: u32,
    pub xp_awarded: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("Beginner".parse::<QuizLevel>().unwrap(), QuizLevel::Beginner);
        assert_eq!(" ADVANCED".parse::<QuizLevel>().unwrap(), QuizLevel::Advanced);
        assert!("expert".parse::<QuizLevel>().is_err());
    }

    #[test]
    fn question_uses_camel_case_on_the_wire() {
        let q: QuizQuestion = serde_json::from_str(
            r#"{"question":"q","options":["a","b"],"correctAnswer":1}"#,
        )
        .unwrap();
        assert_eq!(q.correct_answer, 1);
        assert_eq!(q.explanation, "");
    }

    #[test]
    fn profile_row_tolerates_missing_counters() {
        let p: StudentProfile = serde_json::from_str(
            r#"{"user_id":"u1","created_at":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(p.total_xp, 0);
        assert_eq!(p.last_active_date, None);
    }
}
