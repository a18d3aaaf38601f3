//! Argon2 password tool.
//!
//! Hashes are stored as PHC strings, so the parameters used for a given
//! hash travel with it and verification keeps working after the configured
//! costs change.

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::config::PasswordConfig;
use domain::{PasswordError, PasswordTool};

/// Argon2id hashing with configurable costs.
#[derive(Clone)]
pub struct Argon2PasswordTool {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Argon2PasswordTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2PasswordTool").finish_non_exhaustive()
    }
}

impl Argon2PasswordTool {
    /// Build a tool from cost parameters.
    ///
    /// # Errors
    /// Returns `PasswordError::Hashing` if the parameters are out of range.
    pub fn new(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::Hashing(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordTool for Argon2PasswordTool {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn is_valid(&self, hash: &str) -> bool {
        PasswordHash::new(hash).is_ok_and(|parsed| parsed.algorithm.as_str().starts_with("argon2"))
    }

    fn check(&self, hash: &str, plaintext: &str) -> Result<(), PasswordError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| PasswordError::Malformed(e.to_string()))?;

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .map_err(|e| match e {
                password_hash::Error::Password => PasswordError::Mismatch,
                other => PasswordError::Hashing(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_tool() -> Argon2PasswordTool {
        Argon2PasswordTool::new(&PasswordConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_check() {
        let tool = fast_tool();
        let hash = tool.hash("SecurePassword123!").unwrap();

        assert!(tool.is_valid(&hash));
        assert_eq!(tool.check(&hash, "SecurePassword123!"), Ok(()));
        assert_eq!(
            tool.check(&hash, "WrongPassword123"),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_same_password_different_salts() {
        let tool = fast_tool();
        let a = tool.hash("SamePassword123").unwrap();
        let b = tool.hash("SamePassword123").unwrap();

        assert_ne!(a, b);
        assert!(tool.check(&a, "SamePassword123").is_ok());
        assert!(tool.check(&b, "SamePassword123").is_ok());
    }

    #[test]
    fn test_is_valid_rejects_other_shapes() {
        let tool = fast_tool();
        assert!(!tool.is_valid(""));
        assert!(!tool.is_valid("plaintext"));
        assert!(!tool.is_valid(
            "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy"
        ));
    }

    #[test]
    fn test_check_malformed_hash() {
        let tool = fast_tool();
        assert!(matches!(
            tool.check("not a hash", "whatever"),
            Err(PasswordError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_params() {
        let result = Argon2PasswordTool::new(&PasswordConfig {
            memory_kib: 8,
            iterations: 0,
            parallelism: 1,
        });
        assert!(result.is_err());
    }
}
