//! Salted one-way password hashing (argon2, PHC string format).

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use rand::rngs::OsRng;

use crate::errors::{Error, Result};

pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// [`hash_password`] on the blocking pool; argon2 is CPU bound.
pub async fn hash_password_blocking(plain: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| Error::Unexpected(format!("Password hashing task failed: {e}")))?
}

/// Returns `Ok(false)` on a mismatch; errors only for unusable stored hashes.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::PasswordHash(format!("Invalid stored password hash: {e}")))?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(other) => Err(Error::PasswordHash(format!(
            "Password verification failed: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let first = hash_password("p").unwrap();
        let second = hash_password("p").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
        assert!(!first.contains("\"p\""));

        assert!(verify_password("p", &first).unwrap());
        assert!(verify_password("p", &second).unwrap());
        assert!(!verify_password("wrong", &first).unwrap());
    }

    #[tokio::test]
    async fn test_hash_on_blocking_pool_is_verifiable() {
        let hash = hash_password_blocking("secret".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(verify_password("p", "not-a-phc-string").is_err());
    }
}
