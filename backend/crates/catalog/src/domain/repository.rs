//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::Id;

use crate::domain::resource::Resource;
use crate::error::CatalogResult;

/// Storage for one resource type
#[trait_variant::make(CrudRepository: Send)]
pub trait LocalCrudRepository<R: Resource> {
    /// Most recently updated first
    async fn find_latest(&self, limit: i64) -> CatalogResult<Vec<R>>;

    async fn find_by_id(&self, id: Id<R::Marker>) -> CatalogResult<Option<R>>;

    /// Fails with `Conflict` when the unique key is taken
    async fn insert(&self, entity: &R) -> CatalogResult<()>;

    /// Returns false when no row matched
    async fn update(&self, entity: &R) -> CatalogResult<bool>;

    /// Returns false when no row matched
    async fn delete(&self, id: Id<R::Marker>) -> CatalogResult<bool>;
}
