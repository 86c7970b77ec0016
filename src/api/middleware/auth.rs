//! JWT authentication extractors.
//!
//! Handlers take a [`Principal`] (UserPolicy) or an [`AdminPrincipal`]
//! (AdminPolicy) argument; extraction fails with 401 or 403 before the
//! handler body runs.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::error::{AppError, AppResult};
use crate::models::Principal;
use crate::state::AppState;

/// A caller that passed AdminPolicy.
#[derive(Debug, Clone)]
pub struct AdminPrincipal(pub Principal);

/// Pulls the token out of `Authorization: Bearer <token>`.
///
/// # Errors
/// Returns 401 Unauthorized if:
/// - Authorization header is missing or not valid ASCII
/// - The scheme is not `Bearer`
/// - The token part is empty
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let (scheme, token) = auth_header.split_once(' ').unwrap_or((auth_header, ""));
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return Err(AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        });
    }
    Ok(token)
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let principal = state.services.auth.principal_from_token(token)?;
        parts.extensions.insert(principal.clone());
        Ok(principal)
    }
}

impl FromRequestParts<AppState> for AdminPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        principal.require_admin()?;
        Ok(AdminPrincipal(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthorized() {
        for value in ["Basic dXNlcjpwdw==", "Bearer", "Bearer   ", "Token abc"] {
            let err = bearer_token(&headers_with(value)).unwrap_err();
            assert!(matches!(err, AppError::Unauthorized { .. }), "{value} should be rejected");
        }
    }
}
