//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::Id;

use crate::application::CrudUseCase;
use crate::domain::repository::CrudRepository;
use crate::domain::resource::Resource;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::MessageResponse;

/// Shared state for the handlers of one resource
pub struct CrudState<R, Repo>
where
    R: Resource,
    Repo: CrudRepository<R> + Send + Sync + 'static,
{
    pub use_case: Arc<CrudUseCase<R, Repo>>,
}

impl<R, Repo> Clone for CrudState<R, Repo>
where
    R: Resource,
    Repo: CrudRepository<R> + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            use_case: self.use_case.clone(),
        }
    }
}

fn parse_id<M>(raw: &str) -> CatalogResult<Id<M>> {
    raw.parse().map_err(|_| CatalogError::InvalidId)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> CatalogResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| CatalogError::InvalidRequest(vec![rejection.body_text()]))
}

/// GET /<resource>
pub async fn list<R, Repo>(
    State(state): State<CrudState<R, Repo>>,
) -> CatalogResult<Json<Vec<R::View>>>
where
    R: Resource,
    Repo: CrudRepository<R> + Send + Sync + 'static,
{
    let entities = state.use_case.list().await?;

    Ok(Json(entities.iter().map(R::view).collect()))
}

/// GET /<resource>/{id}
pub async fn get_one<R, Repo>(
    State(state): State<CrudState<R, Repo>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<R::View>>
where
    R: Resource,
    Repo: CrudRepository<R> + Send + Sync + 'static,
{
    let entity = state.use_case.get(parse_id(&id)?).await?;

    Ok(Json(entity.view()))
}

/// POST /<resource>
pub async fn create<R, Repo>(
    State(state): State<CrudState<R, Repo>>,
    payload: Result<Json<R::CreateBody>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<MessageResponse>)>
where
    R: Resource,
    Repo: CrudRepository<R> + Send + Sync + 'static,
{
    let input = R::validate_create(body(payload)?).map_err(CatalogError::InvalidRequest)?;

    state.use_case.create(input).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::CREATED)))
}

/// PUT /<resource>/{id}
pub async fn update<R, Repo>(
    State(state): State<CrudState<R, Repo>>,
    Path(id): Path<String>,
    payload: Result<Json<R::UpdateBody>, JsonRejection>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: Resource,
    Repo: CrudRepository<R> + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let input = R::validate_update(body(payload)?).map_err(CatalogError::InvalidRequest)?;

    state.use_case.update(id, input).await?;

    Ok(Json(MessageResponse::UPDATED))
}

/// DELETE /<resource>/{id}
pub async fn delete<R, Repo>(
    State(state): State<CrudState<R, Repo>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: Resource,
    Repo: CrudRepository<R> + Send + Sync + 'static,
{
    state.use_case.delete(parse_id(&id)?).await?;

    Ok(Json(MessageResponse::DELETED))
}
