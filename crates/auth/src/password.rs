//! Password hashing (bcrypt).

use thiserror::Error;

pub use bcrypt::DEFAULT_COST;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(#[from] bcrypt::BcryptError);

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hash with an explicit work factor (bcrypt accepts 4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// `Ok(false)` on mismatch; `Err` only when `hash` is not a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password_with_cost("correct", 4).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("correct", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("correct", "plaintext").is_err());
    }
}
