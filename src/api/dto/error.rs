//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ValidationFieldError;

/// Standard error response format: `{code, message, details?, request_id?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        let message = if field == "id" {
            format!("{} with id {} was not found.", capitalize(entity), value)
        } else {
            format!("No {entity} found for {field} {value}.")
        };
        Self::new("NOT_FOUND", &message).with_details(json!({
            "entity": entity,
            "field": field,
            "value": value,
        }))
    }

    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("A {entity} with {field} '{value}' already exists."),
        )
        .with_details(json!({
            "entity": entity,
            "field": field,
        }))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", reason).with_details(json!({ "field": field }))
    }

    /// Several field failures; the first one becomes the headline message.
    pub fn validation_errors(errors: &[ValidationFieldError]) -> Self {
        let message = errors
            .first()
            .map(|error| error.message.as_str())
            .unwrap_or("Validation failed.");
        Self::new("VALIDATION_ERROR", message).with_details(json!({ "errors": errors }))
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
