//! Password hashing for account credentials.
//!
//! Uses Argon2id (memory-hard, resistant to GPU/ASIC attacks) and stores
//! hashes in PHC string format. The plain password never leaves the call
//! stack of `hash_password`/`verify_password`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Errors during credential hashing/verification.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Stored credential is not a valid hash")]
    InvalidStored,
}

fn argon2() -> Result<Argon2<'static>, CredentialError> {
    let params = Params::new(47104, 1, 1, None)
        .map_err(|e| CredentialError::Hashing(format!("Invalid Argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
/// Returns error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a candidate password against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch; errors are reserved for malformed
/// stored hashes or hashing failures.
///
/// # Errors
/// Returns `CredentialError::InvalidStored` if the stored hash cannot be
/// parsed.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(stored).map_err(|_| CredentialError::InvalidStored)?;
    match argon2()?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Hashing(e.to_string())),
    }
}
