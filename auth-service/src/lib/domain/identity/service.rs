use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::Principal;
use crate::domain::identity::models::Role;
use crate::identity::errors::AuthError;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::CredentialStore;

/// Domain service implementation for authentication operations.
///
/// Stateless apart from its injected collaborators; every call is an
/// independent unit of work.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token handling
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let identity = match EmailAddress::new(email) {
            Ok(email) => self.store.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(identity) = identity else {
            self.authenticator.verify_decoy(password);
            tracing::info!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let subject = identity.id.to_string();

        self.authenticator
            .authenticate(
                password,
                &identity.password_hash,
                &subject,
                identity.role.as_str(),
            )
            .map(|issued| {
                tracing::info!(identity_id = %identity.id, "Login succeeded");
                issued
            })
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!("Login rejected: invalid credentials");
                    AuthError::InvalidCredentials
                }
                other => {
                    tracing::error!(identity_id = %identity.id, "Token issuance failed");
                    AuthError::internal(other)
                }
            })
    }

    async fn register(&self, email: &str, password: &str) -> Result<IdentityId, AuthError> {
        // Policy checks come before any crypto or store work.
        let email = EmailAddress::new(email)?;
        let password = Password::new(password)?;

        let password_hash = self
            .authenticator
            .hash_password(password.expose())
            .map_err(AuthError::internal)?;

        let identity = self
            .store
            .create(NewIdentity {
                email,
                role: Role::default(),
                password_hash,
            })
            .await?;

        tracing::info!(identity_id = %identity.id, role = %identity.role, "Identity registered");

        Ok(identity.id)
    }

    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(reason = %e.reason(), "Token rejected");
            AuthError::InvalidToken
        })?;

        let id = IdentityId::from_string(&claims.sub).map_err(|_| {
            tracing::warn!(jti = %claims.jti, "Signed token carries a malformed subject");
            AuthError::InvalidToken
        })?;

        // Resolve against the store so deleted accounts lose access immediately.
        let identity = self.store.find_by_id(&id).await?.ok_or_else(|| {
            tracing::debug!(identity_id = %id, "Token subject no longer exists");
            AuthError::InvalidToken
        })?;

        Ok(Principal::from(&identity))
    }
}
