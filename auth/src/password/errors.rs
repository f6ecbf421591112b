use thiserror::Error;

/// Error type for password operations.
///
/// Only hashing can fail; verification always resolves to a boolean.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}
