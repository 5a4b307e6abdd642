//! Auth Router

use axum::{Router, routing::post};

use crate::domain::repository::UserLookup;
use crate::presentation::handlers::{self, AuthAppState};

/// `POST /auth` over any credential lookup backend
pub fn auth_router<L>(state: AuthAppState<L>) -> Router
where
    L: UserLookup + Sync + 'static,
{
    Router::new()
        .route("/auth", post(handlers::authenticate::<L>))
        .with_state(state)
}
