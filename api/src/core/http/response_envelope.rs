//! JSON body shared by every endpoint.
//!
//! Success is `{"success": true, "data": ...}`; failure is
//! `{"success": false, "error": {"code", "message", "details"?}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Stable failure codes clients switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ConfigError,
    BindError,
    ServerError,
    ValidationError,
    InvalidJson,
    UnsupportedMediaType,
    Unauthorized,
    NotFound,
    UpstreamError,
    QuizGenerationFailed,
}

/// One offending request field. `field` is absent when the body could not
/// be tied to a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub reason: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            reason: reason.into(),
        }
    }

    pub fn unnamed(reason: impl Into<String>) -> Self {
        Self {
            field: None,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldIssue>,
}

#[derive(Serialize)]
struct Success<T> {
    success: bool,
    data: T,
}

#[derive(Serialize)]
struct Failure<'a> {
    success: bool,
    error: &'a ErrorBody,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<FieldIssue>) -> Self {
        self.details = details;
        self
    }

    /// Failure envelope as raw JSON, for middleware that rebuilds bodies.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.envelope())
    }

    pub fn respond(self, status: StatusCode) -> Response {
        (status, Json(self.envelope())).into_response()
    }

    fn envelope(&self) -> Failure<'_> {
        Failure {
            success: false,
            error: self,
        }
    }
}

/// `200 OK` with `data`.
pub fn ok<T: Serialize>(data: T) -> Response {
    reply(StatusCode::OK, data)
}

/// `201 Created` with `data`.
pub fn created<T: Serialize>(data: T) -> Response {
    reply(StatusCode::CREATED, data)
}

fn reply<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(Success {
            success: true,
            data,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::test_support::body_json;

    #[tokio::test]
    async fn success_carries_data_only() {
        let resp = created(json!({"id": 7}));
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(body_json(resp).await, json!({"success": true, "data": {"id": 7}}));
    }

    #[tokio::test]
    async fn failure_omits_empty_details() {
        let resp = ErrorBody::new(ErrorCode::NotFound, "quiz 1 not found").respond(StatusCode::NOT_FOUND);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(resp).await,
            json!({"success": false, "error": {"code": "NOT_FOUND", "message": "quiz 1 not found"}})
        );
    }

    #[test]
    fn codes_serialize_screaming_snake() {
        let body = ErrorBody::new(ErrorCode::QuizGenerationFailed, "bad output")
            .with_details(vec![FieldIssue::new("topic", "too short"), FieldIssue::unnamed("Expected an array")]);
        let value: serde_json::Value = serde_json::from_slice(&body.to_bytes().unwrap()).unwrap();
        assert_eq!(value["error"]["code"], "QUIZ_GENERATION_FAILED");
        assert_eq!(value["error"]["details"][0], json!({"field": "topic", "reason": "too short"}));
        assert!(value["error"]["details"][1].get("field").is_none());
        assert!(value.get("data").is_none());
    }
}
