//! CRUD Use Case
//!
//! One use case serves every resource; the resource decides validation and
//! construction, the repository decides storage.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::Id;

use crate::domain::repository::CrudRepository;
use crate::domain::resource::{BuildContext, Resource};
use crate::error::{CatalogError, CatalogResult};

/// Size of the list returned by `GET /<resource>`
pub const LIST_LIMIT: i64 = 10;

pub struct CrudUseCase<R, Repo>
where
    R: Resource,
    Repo: CrudRepository<R>,
{
    repo: Arc<Repo>,
    ctx: BuildContext,
    _resource: PhantomData<fn() -> R>,
}

impl<R, Repo> CrudUseCase<R, Repo>
where
    R: Resource,
    Repo: CrudRepository<R> + Sync,
{
    pub fn new(repo: Arc<Repo>, ctx: BuildContext) -> Self {
        Self {
            repo,
            ctx,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self) -> CatalogResult<Vec<R>> {
        self.repo.find_latest(LIST_LIMIT).await
    }

    pub async fn get(&self, id: Id<R::Marker>) -> CatalogResult<R> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(R::NAME))
    }

    pub async fn create(&self, input: R::Create) -> CatalogResult<R> {
        let entity = R::build(input, &self.ctx, Utc::now())?;
        self.repo.insert(&entity).await?;

        tracing::info!(resource = R::NAME, id = %entity.id(), "Created");

        Ok(entity)
    }

    pub async fn update(&self, id: Id<R::Marker>, input: R::Update) -> CatalogResult<R> {
        let mut entity = self.get(id).await?;
        entity.apply(input, Utc::now());

        // The row may have been deleted since it was read
        if !self.repo.update(&entity).await? {
            return Err(CatalogError::NotFound(R::NAME));
        }

        tracing::info!(resource = R::NAME, id = %id, "Updated");

        Ok(entity)
    }

    pub async fn delete(&self, id: Id<R::Marker>) -> CatalogResult<()> {
        if !self.repo.delete(id).await? {
            return Err(CatalogError::NotFound(R::NAME));
        }

        tracing::info!(resource = R::NAME, id = %id, "Deleted");

        Ok(())
    }
}
