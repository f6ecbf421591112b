use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::EmailError;
use crate::identity::errors::IdentityIdError;
use crate::identity::errors::PasswordPolicyError;
use crate::identity::errors::RoleError;

/// Identity aggregate entity.
///
/// Owned by the credential store. The password digest never leaves the
/// store/hasher boundary, so `Debug` leaves it out.
#[derive(Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Identity data handed to the store on registration.
///
/// Carries no identifier: the store assigns it.
#[derive(Clone)]
pub struct NewIdentity {
    pub email: EmailAddress,
    pub role: Role,
    pub password_hash: String,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    ///
    /// # Returns
    /// IdentityId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Stored trimmed and lower-cased, so uniqueness is case-insensitive.
/// Validates RFC 5322 syntax and requires a dotted domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Normalized EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email is not a valid address
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();

        let parsed = email_address::EmailAddress::from_str(&normalized)
            .map_err(|_| EmailError::InvalidFormat)?;

        if !Self::has_dotted_domain(parsed.domain()) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(normalized))
    }

    fn has_dotted_domain(domain: &str) -> bool {
        match domain.rsplit_once('.') {
            Some((labels, tld)) => {
                tld.len() >= 2
                    && tld.chars().all(|c| c.is_ascii_alphabetic())
                    && labels.split('.').all(|label| !label.is_empty())
            }
            None => false,
        }
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that passed the registration policy.
///
/// Transient: exists only for the duration of a call and is redacted in `Debug`.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;

    /// Check a plaintext against the length policy.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: &str) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(password.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Authorization role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Standard,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Role::Standard),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Identity resolved from a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: IdentityId,
    pub role: Role,
}

impl From<&Identity> for Principal {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            role: identity.role,
        }
    }
}
