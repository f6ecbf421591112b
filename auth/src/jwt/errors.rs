use std::fmt;

use thiserror::Error;

/// Error type for codec construction and token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Token lifetime must be between {min} and {max} hours, got {actual}")]
    TtlOutOfRange { min: i64, max: i64, actual: i64 },

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Rejection of a presented token.
///
/// Every failure displays the same way; the reason is kept for logs only.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid token")]
pub struct TokenError {
    reason: TokenErrorReason,
}

impl TokenError {
    pub(crate) fn new(reason: TokenErrorReason) -> Self {
        Self { reason }
    }

    /// Internal reason code. Not meant to reach the caller of an API.
    pub fn reason(&self) -> TokenErrorReason {
        self.reason
    }
}

/// Which check rejected a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenErrorReason {
    /// Not three base64url segments, bad JSON, missing claims, or inconsistent timestamps
    Malformed,
    /// Header names an algorithm other than the pinned one
    UnsupportedAlgorithm,
    /// Signature does not match header and claims
    BadSignature,
    /// Past `exp`
    Expired,
}

impl TokenErrorReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenErrorReason::Malformed => "malformed",
            TokenErrorReason::UnsupportedAlgorithm => "unsupported_algorithm",
            TokenErrorReason::BadSignature => "bad_signature",
            TokenErrorReason::Expired => "expired",
        }
    }
}

impl fmt::Display for TokenErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        let reason = match err.kind() {
            ErrorKind::InvalidAlgorithm => TokenErrorReason::UnsupportedAlgorithm,
            ErrorKind::InvalidSignature => TokenErrorReason::BadSignature,
            ErrorKind::ExpiredSignature => TokenErrorReason::Expired,
            _ => TokenErrorReason::Malformed,
        };

        TokenError::new(reason)
    }
}
