use profile_store::models::{QuizLevel, QuizQuestion};
use serde::Serialize;
use uuid::Uuid;

/// A question as shown to the student: no answer, no explanation.
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
}

impl PublicQuestion {
    pub fn from_question(index: usize, q: &QuizQuestion) -> Self {
        Self {
            index,
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    pub quiz_id: Uuid,
    pub topic: String,
    pub level: QuizLevel,
    pub question_count: usize,
    /// Number of retrieved course chunks the quiz was grounded on.
    pub source_count: usize,
    pub questions: Vec<PublicQuestion>,
}
