//! Catalog Router

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::application::CrudUseCase;
use crate::domain::repository::CrudRepository;
use crate::domain::resource::Resource;
use crate::presentation::handlers::{self, CrudState};

/// Mount `R::PATH` and `R::PATH/{id}` over any repository implementation
pub fn crud_router<R, Repo>(use_case: Arc<CrudUseCase<R, Repo>>) -> Router
where
    R: Resource,
    Repo: CrudRepository<R> + Send + Sync + 'static,
{
    let state = CrudState { use_case };

    Router::new()
        .route(
            R::PATH,
            get(handlers::list::<R, Repo>).post(handlers::create::<R, Repo>),
        )
        .route(
            &format!("{}/{{id}}", R::PATH),
            get(handlers::get_one::<R, Repo>)
                .put(handlers::update::<R, Repo>)
                .delete(handlers::delete::<R, Repo>),
        )
        .with_state(state)
}
