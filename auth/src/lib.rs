//! Authentication utilities library
//!
//! Provides the stateless building blocks of a session-credential service:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded session tokens (HS256 JWT)
//! - Authentication coordination
//!
//! Nothing here touches storage; services own identity lookup and adapt these
//! implementations behind their own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::from_hours(b"secret_key_at_least_32_bytes_long!", 24).unwrap();
//! let issued = codec.issue("user123", "standard").unwrap();
//! let claims = codec.parse(&issued.token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenCodec};
//!
//! let codec = TokenCodec::from_hours(b"secret_key_at_least_32_bytes_long!", 24).unwrap();
//! let auth = Authenticator::new(codec).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let issued = auth
//!     .authenticate("password123", &hash, "user123", "standard")
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(claims.role, "standard");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::Clock;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::ManualClock;
pub use jwt::SystemClock;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenErrorReason;
pub use password::PasswordError;
pub use password::PasswordHasher;
