use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::Principal;
use crate::identity::errors::AuthError;
use crate::identity::errors::StoreError;

/// Port for authentication service operations.
///
/// `InvalidCredentials` and `InvalidToken` never reveal whether an account
/// exists.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify a credential and issue a session token.
    ///
    /// # Arguments
    /// * `email` - Raw email as submitted
    /// * `password` - Plaintext password as submitted
    ///
    /// # Returns
    /// Signed token and its claims
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Store or token fault
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError>;

    /// Register a new identity with the default role.
    ///
    /// # Arguments
    /// * `email` - Raw email as submitted
    /// * `password` - Plaintext password as submitted
    ///
    /// # Returns
    /// Store-assigned identifier of the new identity
    ///
    /// # Errors
    /// * `InvalidEmail` - Email fails format validation
    /// * `PasswordTooShort` - Password below policy minimum
    /// * `EmailExists` - Email is already registered
    /// * `Internal` - Hashing or store fault
    async fn register(&self, email: &str, password: &str) -> Result<IdentityId, AuthError>;

    /// Verify a token and resolve the identity it was issued to.
    ///
    /// # Arguments
    /// * `token` - Bearer token as presented
    ///
    /// # Returns
    /// Current id and role of the identity
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged, expired, or its identity is gone
    /// * `Internal` - Store fault
    async fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Persistence operations for identities.
///
/// A revocation check (`is_revoked(token_id)`) would be added here; tokens
/// already carry a `jti` for it.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve identity by email address.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, StoreError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, StoreError>;

    /// Persist a new identity, assigning its identifier.
    ///
    /// Uniqueness check and insert are atomic: of concurrent creates with the
    /// same email exactly one succeeds.
    ///
    /// # Returns
    /// Stored identity with its assigned id and creation time
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Unavailable` - Store operation failed
    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError>;
}
