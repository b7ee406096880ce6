use gamification::LevelView;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpBreakdown {
    /// Tier reward before the streak multiplier.
    pub base: u32,
    /// Streak still alive at submit time; 0 once it has lapsed.
    pub streak_days: u32,
    pub streak_multiplier: f64,
    pub streak_bonus: u32,
    pub total: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFeedback {
    pub index: usize,
    pub selected: usize,
    pub correct_answer: usize,
    pub correct: bool,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub quiz_id: Uuid,
    /// Fraction correct, `0.0..=1.0`.
    pub score: f64,
    pub correct_count: usize,
    pub total_questions: usize,
    pub passed: bool,
    pub attempt_number: u32,
    pub xp: XpBreakdown,
    pub level: LevelView,
    pub leveled_up: bool,
    pub feedback: Vec<QuestionFeedback>,
}
