//! Bearer token issuance and validation (HS256).

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Principal, Role, User};

/// JWT claims carried by every access token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Login
    pub name: String,
    /// "User" or "Admin"
    pub role: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user, valid for `config.expiration_minutes`
    pub fn for_user(user: &User, config: &JwtConfig) -> Self {
        Self::with_lifetime(
            user,
            config,
            SignedDuration::from_secs(config.expiration_minutes.saturating_mul(60)),
        )
    }

    fn with_lifetime(user: &User, config: &JwtConfig, lifetime: SignedDuration) -> Self {
        let now = Timestamp::now();
        let exp = now.as_second().saturating_add(lifetime.as_secs());

        Self {
            sub: user.id.to_string(),
            name: user.login.clone(),
            role: user.role().to_string(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now.as_second(),
            exp,
        }
    }

    /// Turns validated claims into the caller identity.
    ///
    /// A non-numeric subject or an unknown role is treated as a bad token.
    pub fn principal(&self) -> AppResult<Principal> {
        let user_id = self.sub.parse::<i32>().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })?;
        let role = self.role.parse::<Role>()?;

        Ok(Principal {
            user_id,
            login: self.name.clone(),
            role,
        })
    }
}

/// Signs a token for the given user
pub fn issue_token(user: &User, config: &JwtConfig) -> AppResult<String> {
    generate_token(&Claims::for_user(user, config), &config.secret)
}

pub fn generate_token(claims: &Claims, secret: &str) -> AppResult<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Validates signature, issuer, audience and expiry with no clock-skew leeway
pub fn validate_token(token: &str, config: &JwtConfig) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => AppError::Unauthorized {
            message: "Token was not issued for this service".to_string(),
        },
        _ => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_for_jwt_testing_0123".to_string(),
            ..JwtConfig::default()
        }
    }

    fn user(is_admin: bool) -> User {
        User {
            id: 42,
            login: "alice".to_string(),
            password_hash: "$argon2id$unused".to_string(),
            is_admin,
        }
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let config = config();
        let token = issue_token(&user(false), &config).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.role, "User");
        assert_eq!(claims.iss, "forkful-api");
        assert_eq!(claims.aud, "forkful-clients");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_role_claim_follows_admin_flag() {
        let config = config();
        let token = issue_token(&user(true), &config).unwrap();
        let principal = validate_token(&token, &config).unwrap().principal().unwrap();
        assert_eq!(principal.role, Role::Admin);
        assert_eq!(principal.user_id, 42);
        assert_eq!(principal.login, "alice");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(&user(false), &config()).unwrap();
        let other = JwtConfig {
            secret: "another_secret_key_for_jwt_tests_9876".to_string(),
            ..config()
        };
        match validate_token(&token, &other) {
            Err(AppError::Unauthorized { message }) => assert!(message.contains("signature")),
            other => panic!("Expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_issuer_or_audience_rejected() {
        let token = issue_token(&user(false), &config()).unwrap();

        let other_issuer = JwtConfig {
            issuer: "someone-else".to_string(),
            ..config()
        };
        assert!(matches!(
            validate_token(&token, &other_issuer),
            Err(AppError::Unauthorized { .. })
        ));

        let other_audience = JwtConfig {
            audience: "another-client".to_string(),
            ..config()
        };
        assert!(matches!(
            validate_token(&token, &other_audience),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_expired_token_rejected_without_leeway() {
        let config = config();
        let claims = Claims::with_lifetime(&user(false), &config, SignedDuration::from_secs(-1));
        let token = generate_token(&claims, &config.secret).unwrap();

        match validate_token(&token, &config) {
            Err(AppError::Unauthorized { message }) => assert_eq!(message, "Token has expired"),
            other => panic!("Expected expiry error, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_lifetime_saturates_instead_of_panicking() {
        let config = JwtConfig {
            expiration_minutes: i64::MAX,
            ..config()
        };
        let claims = Claims::for_user(&user(false), &config);
        assert_eq!(claims.exp, i64::MAX);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            validate_token("invalid.token.format", &config()),
            Err(AppError::Unauthorized { message }) if message == "Invalid token"
        ));
    }

    #[test]
    fn test_principal_rejects_bad_subject_and_role() {
        let mut claims = Claims::for_user(&user(false), &config());
        claims.sub = "not-a-number".to_string();
        assert!(matches!(claims.principal(), Err(AppError::Unauthorized { .. })));

        let mut claims = Claims::for_user(&user(false), &config());
        claims.role = "Root".to_string();
        assert!(matches!(claims.principal(), Err(AppError::Unauthorized { .. })));
    }
}
