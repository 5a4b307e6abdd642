//! Router composition
//!
//! `POST /auth` is public; every catalog route sits behind the bearer
//! middleware. Tracing, CORS and the request timeout wrap the whole app.

use std::sync::Arc;
use std::time::Duration;

use auth::{AuthAppState, TokenIssuer, UserLookup, auth_router, require_bearer};
use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use catalog::{Album, CrudRepository, CrudUseCase, User, crud_router};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Transport settings applied around every route
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

pub fn build_router<L, U, A>(
    lookup: Arc<L>,
    users: Arc<CrudUseCase<User, U>>,
    albums: Arc<CrudUseCase<Album, A>>,
    issuer: Arc<TokenIssuer>,
    settings: &HttpSettings,
) -> Router
where
    L: UserLookup + Sync + 'static,
    U: CrudRepository<User> + Send + Sync + 'static,
    A: CrudRepository<Album> + Send + Sync + 'static,
{
    let protected = Router::new()
        .merge(crud_router(users))
        .merge(crud_router(albums))
        .route_layer(axum::middleware::from_fn_with_state(
            issuer.clone(),
            require_bearer,
        ));

    let app = Router::new()
        .merge(auth_router(AuthAppState::new(lookup, issuer)))
        .merge(protected);

    with_transport_layers(app, settings)
}

fn with_transport_layers(router: Router, settings: &HttpSettings) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&settings.cors_origins))
            .layer(axum::middleware::map_response(render_timeout))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                settings.request_timeout,
            )),
    )
}

/// The timeout layer answers with an empty 408; give it the usual error body.
async fn render_timeout(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!("Request timed out");
    AppError::new(ErrorKind::RequestTimeout, "request timed out").into_response()
}
