use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Digests are Argon2id PHC strings with a fresh random salt, so hashing the
/// same plaintext twice yields two different digests.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    params: Params,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher configured with the Argon2id default cost parameters
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// Verification rejects digests whose memory or time cost is lower than
    /// the parameters given here.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone()),
            params,
        }
    }

    /// Build a hasher from raw cost values.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Time cost
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParams` - Values are outside the ranges Argon2 accepts
    pub fn from_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        Params::new(memory_kib, iterations, parallelism, None)
            .map(Self::with_params)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))
    }

    /// Hash a plaintext password securely.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or hashing failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Never fails: a malformed digest, a foreign algorithm or version, or
    /// cost parameters below this hasher's own all count as a mismatch.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        if !self.accepts(&parsed_hash) {
            return false;
        }

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn accepts(&self, hash: &PasswordHash<'_>) -> bool {
        if hash.algorithm != Algorithm::Argon2id.ident() {
            return false;
        }

        if hash.version != Some(Version::V0x13 as u32) {
            return false;
        }

        match Params::try_from(hash) {
            Ok(params) => {
                params.m_cost() >= self.params.m_cost() && params.t_cost() >= self.params.t_cost()
            }
            Err(_) => false,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("secret1").expect("Failed to hash password");
        let second = hasher.hash("secret1").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_verify_rejects_other_argon2_variant() {
        let hasher = PasswordHasher::new();
        let argon2i = Argon2::new(Algorithm::Argon2i, Version::V0x13, Params::default());
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2i
            .hash_password(b"password", &salt)
            .expect("Failed to hash password")
            .to_string();

        assert!(!hasher.verify("password", &hash));
    }

    #[test]
    fn test_verify_rejects_weaker_parameters() {
        let weak = PasswordHasher::from_costs(1024, 1, 1).expect("Failed to build hasher");
        let strong = PasswordHasher::new();

        let hash = weak.hash("password").expect("Failed to hash password");

        assert!(weak.verify("password", &hash));
        assert!(!strong.verify("password", &hash));
    }

    #[test]
    fn test_from_costs_rejects_invalid_values() {
        let result = PasswordHasher::from_costs(1, 0, 0);
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }
}
