use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Plaintext behind the decoy digest.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    decoy_digest: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

impl Authenticator {
    /// Create a new authenticator with the default password hasher.
    ///
    /// # Arguments
    /// * `token_codec` - Configured codec used to issue and validate tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    ///
    /// # Errors
    /// * `PasswordError` - Decoy digest could not be hashed
    pub fn new(token_codec: TokenCodec) -> Result<Self, AuthenticationError> {
        Self::with_hasher(PasswordHasher::new(), token_codec)
    }

    /// Create an authenticator with an explicit hasher.
    ///
    /// Hashes the decoy digest with the same parameters as real digests.
    ///
    /// # Errors
    /// * `PasswordError` - Decoy digest could not be hashed
    pub fn with_hasher(
        password_hasher: PasswordHasher,
        token_codec: TokenCodec,
    ) -> Result<Self, AuthenticationError> {
        let decoy_digest = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            token_codec,
            decoy_digest,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the token is issued to
    /// * `role` - Role recorded in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or the hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        role: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(subject, role)?)
    }

    /// Spend the same work as a real verification, for accounts that do not exist.
    ///
    /// Always ends in `InvalidCredentials`, so a missing account and a wrong
    /// password look the same from outside.
    pub fn verify_decoy(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, &self.decoy_digest);

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str, role: &str) -> Result<IssuedToken, JwtError> {
        self.token_codec.issue(subject, role)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.parse(token)
    }
}
