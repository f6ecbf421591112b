use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::Role;
use crate::domain::identity::ports::CredentialStore;
use crate::identity::errors::StoreError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "identities_email_key";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    email: String,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = StoreError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(&row.email)
            .map_err(|e| StoreError::InvalidRecord(format!("identity {}: {}", row.id, e)))?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| StoreError::InvalidRecord(format!("identity {}: {}", row.id, e)))?;

        Ok(Identity {
            id: IdentityId(row.id),
            email,
            role,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, StoreError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, email, role, password_hash, created_at
            FROM identities
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?
        .map(Identity::try_from)
        .transpose()
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, StoreError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, email, role, password_hash, created_at
            FROM identities
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?
        .map(Identity::try_from)
        .transpose()
    }

    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO identities (email, role, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, role, password_hash, created_at
            "#,
        )
        .bind(identity.email.as_str())
        .bind(identity.role.as_str())
        .bind(&identity.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return StoreError::EmailAlreadyExists;
                }
            }
            unavailable(e)
        })?;

        Identity::try_from(row)
    }
}
