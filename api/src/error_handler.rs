use ai_llm_service::error_handler::AiLlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use profile_store::{AuthError, StoreError};
use rag_base::RagBaseError;
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::{ErrorBody, ErrorCode, FieldIssue};

/// Public application error type.
///
/// Collaborator failures are logged where they are converted and leave the
/// process as a generic `UPSTREAM_ERROR`, so internals never reach clients.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldIssue>,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0} not found")]
    NotFound(String),

    // --- Collaborators ---
    #[error("an upstream service failed, please try again later")]
    Upstream,

    #[error("the generated quiz was unusable: {0}")]
    QuizGeneration(String),
}

impl AppError {
    /// Validation error pointing at one request field.
    pub fn invalid_field(path: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        AppError::Validation {
            details: vec![FieldIssue::new(path, message.clone())],
            message,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream | AppError::QuizGeneration(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::Bind(_) => ErrorCode::BindError,
            AppError::Server(_) => ErrorCode::ServerError,
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Upstream => ErrorCode::UpstreamError,
            AppError::QuizGeneration(_) => ErrorCode::QuizGenerationFailed,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();
        let details = match self {
            AppError::Validation { details, .. } => details,
            _ => Vec::new(),
        };
        ErrorBody::new(code, message).with_details(details).respond(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<RagBaseError> for AppError {
    fn from(err: RagBaseError) -> Self {
        match err {
            RagBaseError::InvalidQuery(msg) => AppError::invalid_field("query", msg),
            other => {
                error!(error = %other, "vector search failed");
                AppError::Upstream
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(what),
            other => {
                error!(error = %other, "database request failed");
                AppError::Upstream
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::MissingToken | AuthError::InvalidToken => AppError::Unauthorized(message),
            AuthError::Upstream(_) => {
                error!(error = %message, "token verification failed");
                AppError::Upstream
            }
        }
    }
}

impl From<AiLlmError> for AppError {
    fn from(err: AiLlmError) -> Self {
        error!(error = %err, "llm request failed");
        AppError::Upstream
    }
}
