use profile_store::models::QuizQuestion;
use serde::Deserialize;
use uuid::Uuid;

use crate::error_handler::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub quiz_id: Uuid,
    /// Selected option index per question, in question order.
    pub answers: Vec<usize>,
}

impl SubmitQuizRequest {
    /// One answer per question, each pointing at an existing option.
    pub fn check_against(&self, questions: &[QuizQuestion]) -> AppResult<()> {
        if self.answers.len() != questions.len() {
            return Err(AppError::invalid_field(
                "answers",
                format!(
                    "expected {} answers, got {}",
                    questions.len(),
                    self.answers.len()
                ),
            ));
        }
        for (i, (answer, q)) in self.answers.iter().zip(questions).enumerate() {
            if *answer >= q.options.len() {
                return Err(AppError::invalid_field(
                    &format!("answers[{i}]"),
                    format!("option {answer} does not exist"),
                ));
            }
        }
        Ok(())
    }
}
