//! Error handler for converting AppError to HTTP responses.
//!
//! Server-side failures are logged with their full source chain and then
//! reduced to a generic body; nothing below the service layer reaches the
//! client.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, warn};

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Upper bound when re-reading an error body to attach a request id.
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } | AppError::ValidationErrors { .. } | AppError::BadRequest { .. } => {
            StatusCode::BAD_REQUEST
        }
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::Database { .. } | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Builds the client-facing body for an error.
pub fn error_to_response_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound { entity, field, value } => ErrorResponse::not_found_error(entity, field, value),
        AppError::Duplicate { entity, field, value } => ErrorResponse::duplicate_error(entity, field, value),
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => ErrorResponse::validation_errors(errors),
        AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
        AppError::Unauthorized { message } => ErrorResponse::new("UNAUTHORIZED", message),
        AppError::Forbidden { message } => ErrorResponse::new("FORBIDDEN", message),
        AppError::Database { .. } => ErrorResponse::new("DATABASE_ERROR", "A database error occurred"),
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
        }
        AppError::Internal { .. } => ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            error!(error = %source_chain(&self), status = status.as_u16(), "Request failed");
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), reason = %self, "Request rejected");
        }

        (status, Json(error_to_response_body(&self))).into_response()
    }
}

/// Display text of an error followed by each of its sources.
fn source_chain(error: &dyn std::error::Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

/// Global error handling middleware.
///
/// Rewrites any 4xx/5xx response without a JSON body (unknown route,
/// method not allowed, timeout) into an `ErrorResponse`, and stamps the
/// request id onto every error body.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|id| id.0.clone());
    let response = next.run(request).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));

    let (mut parts, body) = response.into_parts();
    let body_bytes = to_bytes(body, MAX_ERROR_BODY_BYTES).await.unwrap_or_default();

    let mut payload = if is_json {
        match serde_json::from_slice::<Value>(&body_bytes) {
            Ok(value) => value,
            Err(_) => return Response::from_parts(parts, Body::from(body_bytes)),
        }
    } else {
        let original = String::from_utf8_lossy(&body_bytes).trim().to_string();
        json!(fallback_error(status, original))
    };

    if let (Some(id), Some(object)) = (request_id, payload.as_object_mut()) {
        object.entry("request_id").or_insert(Value::String(id));
    }

    let bytes = serde_json::to_vec(&payload).unwrap_or_default();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Response::from_parts(parts, Body::from(bytes))
}

fn fallback_error(status: StatusCode, original: String) -> ErrorResponse {
    let (code, default_message) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request - invalid or malformed request"),
        StatusCode::UNAUTHORIZED => ("UNAUTHORIZED", "Authentication required"),
        StatusCode::FORBIDDEN => ("FORBIDDEN", "Access denied"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::UNPROCESSABLE_ENTITY => ("UNPROCESSABLE_ENTITY", "Request body could not be processed"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        StatusCode::SERVICE_UNAVAILABLE => ("SERVICE_UNAVAILABLE", "Service temporarily unavailable"),
        s if s.is_server_error() => ("INTERNAL_SERVER_ERROR", "An internal server error occurred"),
        _ => ("UNKNOWN_ERROR", "An unknown error occurred"),
    };

    // Server-side bodies may carry internals; only client errors keep theirs.
    let message = if original.is_empty() || status.is_server_error() {
        default_message.to_string()
    } else {
        original
    };
    ErrorResponse::new(code, &message)
}
