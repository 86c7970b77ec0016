use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppResult;

/// Hash a password using Argon2id with a fresh random salt
///
/// # Returns
/// The PHC string (`$argon2id$v=19$...`) to store in `users.password_hash`
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored PHC hash
///
/// A mismatch is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("s3cret-pass").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("s3cret-pass"));
    }

    #[test]
    fn test_verify_password_success_and_failure() {
        let hash = hash_password("s3cret-pass").expect("Failed to hash password");

        assert!(verify_password("s3cret-pass", &hash).unwrap());
        assert!(!verify_password("S3cret-pass", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_password("pw").unwrap();
        let hash2 = hash_password("pw").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("pw", &hash1).unwrap());
        assert!(verify_password("pw", &hash2).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(
            verify_password("pw", "not-a-phc-string"),
            Err(AppError::Internal { .. })
        ));
    }
}
