use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ErrorBody, ErrorCode, FieldIssue};

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

/// Best-effort field name from a serde message like
/// "unknown variant `expert`, expected ... at line 1 column 30" or
/// "missing field `quizId`".
fn guess_field_from_serde_msg(msg: &str) -> Option<String> {
    let start = msg.find("field `")? + "field `".len();
    let len = msg[start..].find('`')?;
    Some(msg[start..start + len].to_string())
}

fn rejection_hint(msg: &str, status: StatusCode) -> Option<&'static str> {
    if msg.contains("expected a sequence") {
        Some("Expected an array for this field (e.g. [0, 2, 1]).")
    } else if msg.contains("expected a map") || msg.contains("expected struct") {
        Some("Expected a JSON object here (e.g. { \"field\": \"value\" }).")
    } else if status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
        Some("Send the body with `Content-Type: application/json`.")
    } else {
        None
    }
}

/// Detail entry for a rejection, if the message names a field or matches
/// a known shape mistake.
fn rejection_issue(msg: &str, status: StatusCode) -> Option<FieldIssue> {
    let hint = rejection_hint(msg, status);
    match (guess_field_from_serde_msg(msg), hint) {
        (None, None) => None,
        (Some(field), hint) => Some(FieldIssue::new(field, hint.unwrap_or("missing or invalid value"))),
        (None, Some(hint)) => Some(FieldIssue::unnamed(hint)),
    }
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts
        .headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        return v.to_string();
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert("X-Request-Id", value);
    }
    id
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Rewrites plain-text body rejections (bad JSON, wrong content type,
/// wrong field types) into the standard envelope. Responses that are
/// already JSON pass through untouched.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    let code = match status {
        StatusCode::BAD_REQUEST => ErrorCode::InvalidJson,
        StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::ValidationError,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ErrorCode::UnsupportedMediaType,
        _ => return res,
    };

    let (mut parts, bytes) = take_body(res).await;
    if is_json(&parts) {
        return Response::from_parts(parts, bytes.into());
    }

    let original = String::from_utf8_lossy(&bytes);
    let request_id = ensure_request_id(&mut parts);
    debug!(%request_id, %status, body = %original.trim(), "rewriting body rejection");

    let details = rejection_issue(&original, status).into_iter().collect();
    let body = match ErrorBody::new(code, original.trim()).with_details(details).to_bytes() {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, body.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_field_name_in_serde_message() {
        assert_eq!(
            guess_field_from_serde_msg("Failed to deserialize: missing field `quizId` at line 1"),
            Some("quizId".into())
        );
        assert_eq!(guess_field_from_serde_msg("EOF while parsing"), None);
    }

    #[test]
    fn rejection_issue_prefers_named_field() {
        let issue = rejection_issue(
            "Failed to deserialize: answers: invalid type: string, expected a sequence; field `answers`",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .unwrap();
        assert_eq!(issue.field.as_deref(), Some("answers"));
        assert!(issue.reason.starts_with("Expected an array"));

        let media = rejection_issue("Expected request with `Content-Type: application/json`", StatusCode::UNSUPPORTED_MEDIA_TYPE).unwrap();
        assert_eq!(media.field, None);

        assert_eq!(rejection_issue("EOF while parsing a value", StatusCode::BAD_REQUEST), None);
    }
}
