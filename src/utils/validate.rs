use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// JSON body extractor that runs `validator` rules before the handler sees the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// JSON body extractor for request types without `validator` rules.
///
/// Rejections become `AppError::BadRequest` so malformed bodies share the
/// API error shape instead of axum's plain 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// `validator` custom rule: rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Keeps a partially-updated text field only when it has content.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(custom(function = "not_blank", message = "Login is required."))]
        login: String,
        #[validate(range(min = 1, max = 5, message = "Stars must be between 1 and 5."))]
        stars: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request = json_request(r#"{"login":"alice","stars":4}"#);
        let ValidatedJson(body) = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(body.login, "alice");
        assert_eq!(body.stars, 4);
    }

    #[tokio::test]
    async fn test_blank_and_out_of_range_fields_reported() {
        let request = json_request(r#"{"login":"   ","stars":6}"#);
        match ValidatedJson::<TestBody>::from_request(request, &()).await {
            Err(AppError::ValidationErrors { errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "login");
                assert_eq!(errors[0].message, "Login is required.");
                assert_eq!(errors[1].field, "stars");
                assert_eq!(errors[1].message, "Stars must be between 1 and 5.");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other.map(|v| v.0)),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request(r#"{"login":"alice""#);
        assert!(matches!(
            ValidatedJson::<TestBody>::from_request(request, &()).await,
            Err(AppError::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"login":"alice","stars":4}"#))
            .unwrap();
        assert!(matches!(
            ValidatedJson::<TestBody>::from_request(request, &()).await,
            Err(AppError::BadRequest { .. })
        ));
    }

    #[derive(Debug, Deserialize)]
    struct PlainBody {
        id: i32,
        flag: Option<bool>,
    }

    #[tokio::test]
    async fn test_app_json_accepts_well_formed_body() {
        let request = json_request(r#"{"id":7}"#);
        let AppJson(body) = AppJson::<PlainBody>::from_request(request, &()).await.unwrap();
        assert_eq!(body.id, 7);
        assert_eq!(body.flag, None);
    }

    #[tokio::test]
    async fn test_app_json_type_errors_are_bad_request() {
        for body in [r#"{}"#, r#"{"id":"seven"}"#, r#"{"id":7,"flag":"yes"}"#, "not json"] {
            let result = AppJson::<PlainBody>::from_request(json_request(body), &()).await;
            assert!(
                matches!(result, Err(AppError::BadRequest { .. })),
                "{body} should be a bad request"
            );
        }
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
