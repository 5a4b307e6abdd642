//! PostgreSQL Repository Implementations

use kernel::email::Email;
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::credential::CredentialRecord;
use crate::domain::repository::UserLookup;
use crate::error::LookupError;

/// PostgreSQL-backed credential lookup over the `users` table
#[derive(Clone)]
pub struct PgUserLookup {
    pool: PgPool,
}

impl PgUserLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserLookup for PgUserLookup {
    async fn find_by_email(&self, email: &Email) -> Result<Option<CredentialRecord>, LookupError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                id,
                name,
                email,
                password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    name: String,
    email: String,
    password: String,
}

impl CredentialRow {
    fn into_record(self) -> Result<CredentialRecord, LookupError> {
        if self.password.is_empty() {
            return Err(LookupError::MalformedRecord(format!(
                "user {} has no password hash",
                self.id
            )));
        }

        Ok(CredentialRecord {
            id: UserId::from_uuid(self.id),
            display_name: self.name,
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_db(self.password),
        })
    }
}
