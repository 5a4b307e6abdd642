//! In-memory repositories
//!
//! Process-local storage for `STORAGE_BACKEND=memory` and for tests. The
//! user store also answers credential lookups so `/user` and `POST /auth`
//! see the same accounts.

use std::collections::HashMap;

use auth::{CredentialRecord, LookupError, UserLookup};
use kernel::email::Email;
use kernel::id::Id;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::CrudRepository;
use crate::domain::resource::Resource;
use crate::error::{CatalogError, CatalogResult};

pub struct MemoryRepository<R: Resource> {
    rows: RwLock<HashMap<Id<R::Marker>, R>>,
}

impl<R: Resource> MemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<R: Resource> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn key_taken<R: Resource>(rows: &HashMap<Id<R::Marker>, R>, entity: &R) -> bool {
    let Some(key) = entity.unique_key() else {
        return false;
    };
    rows.values()
        .any(|other| other.id() != entity.id() && other.unique_key() == Some(key))
}

impl<R: Resource> CrudRepository<R> for MemoryRepository<R> {
    async fn find_latest(&self, limit: i64) -> CatalogResult<Vec<R>> {
        let rows = self.rows.read().await;

        let mut latest: Vec<R> = rows.values().cloned().collect();
        latest.sort_by_key(|entity| std::cmp::Reverse(entity.updated_at()));
        latest.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(latest)
    }

    async fn find_by_id(&self, id: Id<R::Marker>) -> CatalogResult<Option<R>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: &R) -> CatalogResult<()> {
        let mut rows = self.rows.write().await;

        if key_taken(&rows, entity) {
            return Err(CatalogError::Conflict(R::CONFLICT_MESSAGE));
        }
        rows.insert(entity.id(), entity.clone());

        Ok(())
    }

    async fn update(&self, entity: &R) -> CatalogResult<bool> {
        let mut rows = self.rows.write().await;

        if !rows.contains_key(&entity.id()) {
            return Ok(false);
        }
        if key_taken(&rows, entity) {
            return Err(CatalogError::Conflict(R::CONFLICT_MESSAGE));
        }
        rows.insert(entity.id(), entity.clone());

        Ok(true)
    }

    async fn delete(&self, id: Id<R::Marker>) -> CatalogResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}

impl UserLookup for MemoryRepository<User> {
    async fn find_by_email(&self, email: &Email) -> Result<Option<CredentialRecord>, LookupError> {
        let rows = self.rows.read().await;

        Ok(rows
            .values()
            .find(|user| user.email == *email)
            .map(|user| CredentialRecord {
                id: user.id,
                display_name: user.name.clone(),
                email: user.email.clone(),
                password_hash: user.password.clone(),
            }))
    }
}
