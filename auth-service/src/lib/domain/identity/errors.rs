use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat,
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters")]
    TooShort { min: usize },
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for credential store operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored identity is invalid: {0}")]
    InvalidRecord(String),
}

/// Top-level error for authentication operations.
///
/// `Display` never carries internal detail; the cause of `Internal` is kept
/// as its source for logging.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Email already exists")]
    EmailExists,

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    PasswordTooShort(#[from] PasswordPolicyError),

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AuthError {
    /// Wrap an infrastructure fault, keeping it as the error source.
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        AuthError::Internal(err.into())
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailAlreadyExists => AuthError::EmailExists,
            other => AuthError::internal(other),
        }
    }
}
