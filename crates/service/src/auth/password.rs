use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// One-way password hashing capability.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> Result<String, AuthError>;
    /// False on mismatch and on a stored hash that cannot be parsed.
    fn matches(&self, raw: &str, encoded: &str) -> bool;
}

/// Argon2id with default parameters and a random salt, stored as a PHC string.
#[derive(Default, Clone)]
pub struct Argon2PasswordEncoder {
    argon: Argon2<'static>,
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        match PasswordHash::new(encoded) {
            Ok(parsed) => self.argon.verify_password(raw.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifiable() {
        let enc = Argon2PasswordEncoder::default();
        let a = enc.encode("abcdef").unwrap();
        let b = enc.encode("abcdef").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2"));
        assert!(enc.matches("abcdef", &a));
        assert!(!enc.matches("abcdeg", &a));
    }

    #[test]
    fn malformed_hash_never_matches() {
        let enc = Argon2PasswordEncoder::default();
        assert!(!enc.matches("abcdef", "plaintext"));
    }
}
