use chrono::NaiveDate;
use gamification::{LevelView, get_streak_multiplier};
use profile_store::models::StudentProfile;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    pub streak_days: u32,
    pub streak_multiplier: f64,
    pub last_active_date: Option<NaiveDate>,
    pub quizzes_completed: u32,
    pub level: LevelView,
}

impl From<&StudentProfile> for ProfileResponse {
    fn from(p: &StudentProfile) -> Self {
        Self {
            user_id: p.user_id.clone(),
            streak_days: p.streak_days,
            streak_multiplier: get_streak_multiplier(p.streak_days),
            last_active_date: p.last_active_date,
            quizzes_completed: p.quizzes_completed,
            level: LevelView::from_total_xp(p.total_xp),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    pub streak_days: u32,
    pub streak_multiplier: f64,
    /// False when the student already checked in today.
    pub is_new_day: bool,
    pub xp_awarded: u32,
    pub level: LevelView,
    pub leveled_up: bool,
}
