//! PostgreSQL Repository Implementations

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::{AlbumId, Id, UserId};
use platform::password::HashedPassword;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::domain::entity::{album::Album, user::User};
use crate::domain::repository::CrudRepository;
use crate::domain::resource::Resource;
use crate::error::{CatalogError, CatalogResult};

pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Table mapping for a resource stored in PostgreSQL
pub trait PgResource: Resource {
    type Row: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin;

    /// Binds `$1` = limit
    const SELECT_LATEST: &'static str;
    /// Binds `$1` = id
    const SELECT_BY_ID: &'static str;
    const INSERT: &'static str;
    const UPDATE: &'static str;
    /// Binds `$1` = id
    const DELETE: &'static str;

    fn from_row(row: Self::Row) -> Self;

    fn bind_insert<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;

    fn bind_update<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;
}

#[derive(Clone)]
pub struct PgCrudRepository<R> {
    pool: PgPool,
    _resource: PhantomData<fn() -> R>,
}

impl<R> PgCrudRepository<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _resource: PhantomData,
        }
    }
}

fn write_error<R: Resource>(err: sqlx::Error) -> CatalogError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => CatalogError::Conflict(R::CONFLICT_MESSAGE),
        _ => CatalogError::Storage(err),
    }
}

impl<R: PgResource> CrudRepository<R> for PgCrudRepository<R> {
    async fn find_latest(&self, limit: i64) -> CatalogResult<Vec<R>> {
        let rows = sqlx::query_as::<_, R::Row>(R::SELECT_LATEST)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(R::from_row).collect())
    }

    async fn find_by_id(&self, id: Id<R::Marker>) -> CatalogResult<Option<R>> {
        let row = sqlx::query_as::<_, R::Row>(R::SELECT_BY_ID)
            .bind(id.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(R::from_row))
    }

    async fn insert(&self, entity: &R) -> CatalogResult<()> {
        entity
            .bind_insert(sqlx::query(R::INSERT))
            .execute(&self.pool)
            .await
            .map_err(write_error::<R>)?;

        Ok(())
    }

    async fn update(&self, entity: &R) -> CatalogResult<bool> {
        let result = entity
            .bind_update(sqlx::query(R::UPDATE))
            .execute(&self.pool)
            .await
            .map_err(write_error::<R>)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Id<R::Marker>) -> CatalogResult<bool> {
        let result = sqlx::query(R::DELETE)
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Albums
// ============================================================================

#[derive(sqlx::FromRow)]
pub struct AlbumRow {
    id: Uuid,
    name: String,
    length: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgResource for Album {
    type Row = AlbumRow;

    const SELECT_LATEST: &'static str = r#"
        SELECT id, name, length, created_at, updated_at
        FROM albums
        ORDER BY updated_at DESC
        LIMIT $1
    "#;

    const SELECT_BY_ID: &'static str = r#"
        SELECT id, name, length, created_at, updated_at
        FROM albums
        WHERE id = $1
    "#;

    const INSERT: &'static str = r#"
        INSERT INTO albums (id, name, length, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
    "#;

    const UPDATE: &'static str = r#"
        UPDATE albums
        SET name = $2, length = $3, updated_at = $4
        WHERE id = $1
    "#;

    const DELETE: &'static str = "DELETE FROM albums WHERE id = $1";

    fn from_row(row: AlbumRow) -> Self {
        Self {
            id: AlbumId::from_uuid(row.id),
            name: row.name,
            length: row.length,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn bind_insert<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id.into_uuid())
            .bind(self.name.clone())
            .bind(self.length)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_update<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id.into_uuid())
            .bind(self.name.clone())
            .bind(self.length)
            .bind(self.updated_at)
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(sqlx::FromRow)]
pub struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgResource for User {
    type Row = UserRow;

    const SELECT_LATEST: &'static str = r#"
        SELECT id, name, email, password, created_at, updated_at
        FROM users
        ORDER BY updated_at DESC
        LIMIT $1
    "#;

    const SELECT_BY_ID: &'static str = r#"
        SELECT id, name, email, password, created_at, updated_at
        FROM users
        WHERE id = $1
    "#;

    const INSERT: &'static str = r#"
        INSERT INTO users (id, name, email, password, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
    "#;

    const UPDATE: &'static str = r#"
        UPDATE users
        SET name = $2, email = $3, updated_at = $4
        WHERE id = $1
    "#;

    const DELETE: &'static str = "DELETE FROM users WHERE id = $1";

    fn from_row(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: Email::from_db(row.email),
            password: HashedPassword::from_db(row.password),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn bind_insert<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id.into_uuid())
            .bind(self.name.clone())
            .bind(self.email.as_str().to_string())
            .bind(self.password.as_str().to_string())
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_update<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id.into_uuid())
            .bind(self.name.clone())
            .bind(self.email.as_str().to_string())
            .bind(self.updated_at)
    }
}
