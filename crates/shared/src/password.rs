//! Password hashing with Argon2id.
//!
//! Registry users authenticate with email and password; hashes are stored in
//! PHC string format so parameters travel with the hash and can be upgraded
//! later without a migration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// Argon2id parameters following the OWASP recommendation:
// 19 MiB memory, 2 iterations, 1 lane, 256-bit output.
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password, returning a PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = create_argon2()?;

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` for a mismatch; errors only signal a malformed hash
/// or an internal failure.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    // The stored hash carries its own parameters, so defaults suffice here.
    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_returns_phc_format() {
        let hash = hash_password("family-registry-pass").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=19456"));
        assert!(hash.contains("t=2"));
        assert!(hash.contains("p=1"));
    }

    #[test]
    fn test_verify_correct_password() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let h1 = hash_password("same password").unwrap();
        let h2 = hash_password("same password").unwrap();
        assert_ne!(h1, h2, "Each hash should use a fresh salt");
    }

    #[test]
    fn test_invalid_hash_format_rejected() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }
}
