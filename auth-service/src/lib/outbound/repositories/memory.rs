use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::ports::CredentialStore;
use crate::identity::errors::StoreError;

#[derive(Default)]
struct Identities {
    by_id: HashMap<IdentityId, Identity>,
    by_email: HashMap<EmailAddress, IdentityId>,
}

/// Process-local credential store.
///
/// Used when no database is configured and by the integration tests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    identities: RwLock<Identities>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete an identity. Tokens already issued to it stop validating.
    pub async fn remove(&self, id: &IdentityId) -> Option<Identity> {
        let mut identities = self.identities.write().await;

        let removed = identities.by_id.remove(id)?;
        identities.by_email.remove(&removed.email);

        Some(removed)
    }

    pub async fn len(&self) -> usize {
        self.identities.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read().await;

        Ok(identities
            .by_email
            .get(email)
            .and_then(|id| identities.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, StoreError> {
        Ok(self.identities.read().await.by_id.get(id).cloned())
    }

    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        // Check and insert under one guard
        let mut identities = self.identities.write().await;

        if identities.by_email.contains_key(&identity.email) {
            return Err(StoreError::EmailAlreadyExists);
        }

        let stored = Identity {
            id: IdentityId::new(),
            email: identity.email,
            role: identity.role,
            password_hash: identity.password_hash,
            created_at: Utc::now(),
        };

        identities
            .by_email
            .insert(stored.email.clone(), stored.id);
        identities.by_id.insert(stored.id, stored.clone());

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::identity::models::Role;

    fn new_identity(email: &str) -> NewIdentity {
        NewIdentity {
            email: EmailAddress::new(email).unwrap(),
            role: Role::Standard,
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_indexes_email() {
        let store = InMemoryCredentialStore::new();

        let created = store.create(new_identity("a@x.com")).await.unwrap();

        let by_email = store
            .find_by_email(&EmailAddress::new("A@X.COM").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, created.email);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let store = InMemoryCredentialStore::new();

        store.create(new_identity("a@x.com")).await.unwrap();
        let result = store.create(new_identity("a@x.com")).await;

        assert!(matches!(result, Err(StoreError::EmailAlreadyExists)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let store = InMemoryCredentialStore::new();

        assert!(store.is_empty().await);
        assert!(store
            .find_by_email(&EmailAddress::new("nobody@x.com").unwrap())
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_id(&IdentityId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_remove_frees_email() {
        let store = InMemoryCredentialStore::new();

        let created = store.create(new_identity("a@x.com")).await.unwrap();
        let removed = store.remove(&created.id).await.unwrap();
        assert_eq!(removed.id, created.id);

        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
        assert!(store.remove(&created.id).await.is_none());

        // Email can be registered again once the identity is gone
        store.create(new_identity("a@x.com")).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_same_email() {
        let store = Arc::new(InMemoryCredentialStore::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(new_identity("race@x.com")).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(StoreError::EmailAlreadyExists) => conflicts += 1,
                Err(e) => panic!("unexpected store error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(store.len().await, 1);
    }
}
