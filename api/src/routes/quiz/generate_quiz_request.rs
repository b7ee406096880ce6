use profile_store::models::QuizLevel;
use rag_base::MIN_QUERY_CHARS;
use serde::Deserialize;

use crate::error_handler::{AppError, AppResult};

pub const MIN_QUESTIONS: u32 = 3;
pub const MAX_QUESTIONS: u32 = 10;
const MAX_TOPIC_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub topic: String,
    pub level: String,
    pub number_of_questions: u32,
}

/// Request after validation.
#[derive(Debug, PartialEq)]
pub struct QuizPlan {
    pub topic: String,
    pub level: QuizLevel,
    pub count: usize,
}

impl GenerateQuizRequest {
    pub fn validate(self) -> AppResult<QuizPlan> {
        let topic = self.topic.trim();
        let chars = topic.chars().count();
        if chars < MIN_QUERY_CHARS || chars > MAX_TOPIC_CHARS {
            return Err(AppError::invalid_field(
                "topic",
                format!("topic must be {MIN_QUERY_CHARS}-{MAX_TOPIC_CHARS} characters"),
            ));
        }
        let level: QuizLevel = self
            .level
            .parse()
            .map_err(|msg: String| AppError::invalid_field("level", msg))?;
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.number_of_questions) {
            return Err(AppError::invalid_field(
                "numberOfQuestions",
                format!("numberOfQuestions must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}"),
            ));
        }
        Ok(QuizPlan {
            topic: topic.to_string(),
            level,
            count: self.number_of_questions as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(topic: &str, level: &str, n: u32) -> GenerateQuizRequest {
        GenerateQuizRequest {
            topic: topic.into(),
            level: level.into(),
            number_of_questions: n,
        }
    }

    #[test]
    fn accepts_valid_request() {
        let plan = req("  house edge ", "Intermediate", 5).validate().unwrap();
        assert_eq!(
            plan,
            QuizPlan {
                topic: "house edge".into(),
                level: QuizLevel::Intermediate,
                count: 5
            }
        );
    }

    #[test]
    fn rejects_each_bad_field() {
        assert!(req("", "beginner", 5).validate().is_err());
        assert!(req("odds", "expert", 5).validate().is_err());
        assert!(req("odds", "beginner", 2).validate().is_err());
        assert!(req("odds", "beginner", 11).validate().is_err());
        assert!(req("odds", "beginner", 10).validate().is_ok());
    }
}
