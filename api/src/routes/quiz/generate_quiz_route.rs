use std::sync::Arc;

use axum::{Json, extract::State, response::Response};
use profile_store::models::NewQuiz;
use rag_base::{SearchOptions, format_search_results_as_context, search_documents};
use tracing::{debug, info, instrument, warn};

use crate::{
    core::{app_state::AppState, auth::AuthUser, http::response_envelope},
    error_handler::{AppError, AppResult},
    routes::quiz::{
        generate_quiz_request::GenerateQuizRequest,
        generate_quiz_response::{GenerateQuizResponse, PublicQuestion},
        quiz_prompt::{SYSTEM_PROMPT, build_prompt, parse_questions},
    },
};

/// Generates a quiz grounded on retrieved course material and stores it.
///
/// Retrieval → prompt → LLM → parse/validate → persist. The response hides
/// correct answers; grading happens on submit against the stored copy.
#[instrument(name = "generate_quiz_route", skip_all)]
pub async fn generate_quiz_route(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(body): Json<GenerateQuizRequest>,
) -> AppResult<Response> {
    let plan = body.validate()?;
    debug!(user = %user.id, topic = %plan.topic, level = %plan.level, count = plan.count, "generate_quiz_route: start");

    let hits = search_documents(state.search.as_ref(), &plan.topic, SearchOptions::default()).await?;
    let context = format_search_results_as_context(&hits);
    if context.is_empty() {
        debug!(topic = %plan.topic, "no course material found, generating without context");
    }

    let prompt = build_prompt(&plan.topic, plan.level, plan.count, &context);
    let raw = state.generator.generate(&prompt, Some(SYSTEM_PROMPT)).await?;

    let questions = parse_questions(&raw, plan.count).map_err(|e| {
        warn!(error = %e, output_chars = raw.chars().count(), "unusable quiz output");
        AppError::QuizGeneration(e.to_string())
    })?;

    let record = state
        .store
        .insert_quiz(NewQuiz {
            user_id: user.id,
            topic: plan.topic,
            level: plan.level,
            questions,
        })
        .await?;

    info!(quiz_id = %record.id, questions = record.questions.len(), "generate_quiz_route: stored");

    let response = GenerateQuizResponse {
        quiz_id: record.id,
        question_count: record.questions.len(),
        source_count: hits.len(),
        questions: record
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| PublicQuestion::from_question(i, q))
            .collect(),
        topic: record.topic,
        level: record.level,
    };
    Ok(response_envelope::created(response))
}
