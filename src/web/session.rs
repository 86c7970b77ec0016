//! Browser session held in an encrypted private cookie.

use std::fmt;

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::debug;

use crate::api::dto::LoginResponse;

pub const SESSION_COOKIE: &str = "forkful_session";

/// Cookie lifetime, equal to the API's default token lifetime.
pub const SESSION_MINUTES: i64 = 60;

/// Who is logged in and the bearer token used for API calls.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: i32,
    pub login: String,
    pub is_admin: bool,
}

// The token never appears in logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("login", &self.login)
            .field("is_admin", &self.is_admin)
            .finish_non_exhaustive()
    }
}

impl From<LoginResponse> for Session {
    fn from(login: LoginResponse) -> Self {
        Self {
            token: login.token,
            user_id: login.user_id,
            login: login.login,
            is_admin: login.is_admin,
        }
    }
}

impl Session {
    /// Reads the session; a missing or undecodable cookie means logged out.
    pub fn from_jar(jar: &PrivateCookieJar) -> Option<Self> {
        let cookie = jar.get(SESSION_COOKIE)?;
        match serde_json::from_str(cookie.value()) {
            Ok(session) => Some(session),
            Err(e) => {
                debug!(error = %e, "Discarding unreadable session cookie");
                None
            }
        }
    }

    pub fn store(&self, jar: PrivateCookieJar, secure: bool) -> PrivateCookieJar {
        // Serializing a struct of strings and integers cannot fail.
        let value = serde_json::to_string(self).unwrap_or_default();
        let cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .max_age(Duration::minutes(SESSION_MINUTES))
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax)
            .build();
        jar.add(cookie)
    }

    pub fn clear(jar: PrivateCookieJar) -> PrivateCookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    fn session() -> Session {
        Session {
            token: "secret-token".to_string(),
            user_id: 3,
            login: "dana".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn test_store_then_read_back() {
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = session().store(jar, false);

        assert_eq!(Session::from_jar(&jar), Some(session()));
        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::minutes(SESSION_MINUTES)));
    }

    #[test]
    fn test_secure_flag_follows_argument() {
        let jar = session().store(PrivateCookieJar::new(Key::generate()), true);
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().secure(), Some(true));
    }

    #[test]
    fn test_clear_logs_out() {
        let jar = session().store(PrivateCookieJar::new(Key::generate()), false);
        let jar = Session::clear(jar);
        assert_eq!(Session::from_jar(&jar), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", session());
        assert!(rendered.contains("dana"));
        assert!(!rendered.contains("secret-token"));
    }
}
