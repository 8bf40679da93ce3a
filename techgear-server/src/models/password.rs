//! Password hashing for customer credentials
//!
//! Plain-text passwords never reach the database: they are hashed with
//! Argon2id and a fresh random salt, and only the PHC string is stored.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash as PhcString, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};

/// Hashing failed inside argon2
#[derive(Debug, Clone, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(String);

/// Argon2id hash of a customer password, in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plain-text password with a random salt.
    ///
    /// # Example
    /// ```
    /// use techgear_server::models::PasswordHash;
    ///
    /// let hash = PasswordHash::new("Dale1234").unwrap();
    /// assert!(hash.verify("Dale1234"));
    /// assert!(!hash.as_str().contains("Dale1234"));
    /// ```
    pub fn new(password: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError(e.to_string()))?;

        Ok(Self(hash.to_string()))
    }

    /// Wrap a PHC string previously produced by [`PasswordHash::new`],
    /// e.g. one read back from storage by a caller that checks logins.
    pub fn from_phc(phc: String) -> Self {
        Self(phc)
    }

    /// Check a plain-text password against this hash.
    ///
    /// The HTTP API never verifies credentials itself; this is the entry
    /// point for callers that authenticate customers against stored hashes.
    /// A malformed PHC string never verifies.
    pub fn verify(&self, password: &str) -> bool {
        match PhcString::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the hash itself.
impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
