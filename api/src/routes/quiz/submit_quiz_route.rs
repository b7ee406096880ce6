use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use chrono::Utc;
use gamification::{
    LevelView, PASS_THRESHOLD, active_streak, apply_streak_bonus, calculate_quiz_xp,
    get_streak_multiplier, leveled_up,
};
use profile_store::models::{QuizAttempt, QuizQuestion};
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, auth::AuthUser, http::response_envelope},
    error_handler::{AppError, AppResult},
    routes::quiz::{
        submit_quiz_request::SubmitQuizRequest,
        submit_quiz_response::{QuestionFeedback, SubmitQuizResponse, XpBreakdown},
    },
};

/// Grades a submission, awards XP and records the attempt.
///
/// The streak multiplier only applies while the stored streak is still
/// alive (last activity today or yesterday). Profile XP is a
/// read-modify-write within this request; concurrent submissions by the
/// same student may lose an update.
#[instrument(name = "submit_quiz_route", skip_all)]
pub async fn submit_quiz_route(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(body): Json<SubmitQuizRequest>,
) -> AppResult<Response> {
    debug!(user = %user.id, quiz_id = %body.quiz_id, "submit_quiz_route: start");

    let quiz = state
        .store
        .get_quiz(body.quiz_id)
        .await?
        .filter(|q| q.user_id == user.id)
        .ok_or_else(|| AppError::NotFound(format!("quiz {}", body.quiz_id)))?;
    body.check_against(&quiz.questions)?;

    let feedback = grade(&quiz.questions, &body.answers);
    let correct_count = feedback.iter().filter(|f| f.correct).count();
    let total_questions = feedback.len();
    let score = if total_questions == 0 {
        0.0
    } else {
        correct_count as f64 / total_questions as f64
    };

    let attempt_number = state
        .store
        .count_attempts(&user.id, quiz.id)
        .await?
        .saturating_add(1);
    let mut profile = state.store.get_or_create_profile(&user.id).await?;

    let now = Utc::now();
    let streak_days = active_streak(profile.last_active_date, now.date_naive(), profile.streak_days);
    let base = calculate_quiz_xp(score, attempt_number);
    let total = apply_streak_bonus(base, streak_days);
    let xp = XpBreakdown {
        base,
        streak_days,
        streak_multiplier: get_streak_multiplier(streak_days),
        streak_bonus: total - base,
        total,
    };

    state
        .store
        .record_attempt(QuizAttempt {
            id: services::uuid::new_id(),
            user_id: user.id.clone(),
            quiz_id: quiz.id,
            topic: quiz.topic.clone(),
            score,
            attempt_number,
            xp_awarded: total,
            created_at: now,
        })
        .await?;

    let before = profile.total_xp;
    profile.total_xp = before.saturating_add(total);
    profile.quizzes_completed = profile.quizzes_completed.saturating_add(1);
    state.store.save_profile(&profile).await?;

    info!(
        quiz_id = %quiz.id,
        score,
        attempt_number,
        xp = total,
        total_xp = profile.total_xp,
        "submit_quiz_route: graded"
    );

    let response = SubmitQuizResponse {
        quiz_id: quiz.id,
        score,
        correct_count,
        total_questions,
        passed: score >= PASS_THRESHOLD,
        attempt_number,
        xp,
        level: LevelView::from_total_xp(profile.total_xp),
        leveled_up: leveled_up(before, profile.total_xp),
        feedback,
    };
    Ok(response_envelope::ok(response))
}

fn grade(questions: &[QuizQuestion], answers: &[usize]) -> Vec<QuestionFeedback> {
    questions
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(index, (q, &selected))| QuestionFeedback {
            index,
            selected,
            correct_answer: q.correct_answer,
            correct: selected == q.correct_answer,
            explanation: q.explanation.clone(),
        })
        .collect()
}
