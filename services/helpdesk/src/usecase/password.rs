use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::error::HelpdeskError;

/// Hash a password into a PHC-format argon2 string.
pub fn hash_password(password: &str) -> Result<String, HelpdeskError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HelpdeskError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Check a password against a stored PHC hash. An unparseable hash counts
/// as a failed check, not an error.
pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
