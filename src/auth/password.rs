//! Password hashing using Argon2id
//!
//! Hashes are stored as PHC strings, which carry the algorithm, parameters
//! and salt alongside the hash itself.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{FinanceError, FinanceResult};

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> FinanceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FinanceError::Password(format!("Hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash
///
/// A wrong password is `Ok(false)`; a malformed hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> FinanceResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| FinanceError::Password(format!("Invalid stored hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(FinanceError::Password(format!("Verification failed: {}", e))),
    }
}
