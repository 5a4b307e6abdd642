//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use std::sync::Arc;

use anyhow::Context;
use auth::{AuthConfig, PgUserLookup, TokenIssuer, UserLookup};
use catalog::{
    Album, BuildContext, CrudRepository, CrudUseCase, MemoryRepository, NewUser, PgCrudRepository,
    User, ensure_user,
};
use platform::password::Bcrypt;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{HttpSettings, build_router};
use crate::config::{ApiConfig, SeedUser, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ApiConfig::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    let auth_config = AuthConfig::new(config.jwt_secret.clone());
    if !auth_config.has_secret() {
        tracing::warn!("JWT_SECRET is empty, POST /auth will fail until it is set");
    }

    let issuer = Arc::new(TokenIssuer::new(&auth_config));
    let ctx = BuildContext::new(Arc::new(Bcrypt), config.bcrypt_cost);
    let settings = HttpSettings {
        cors_origins: config.cors_origins.clone(),
        request_timeout: config.request_timeout,
    };
    let seed = config.seed_user.take();

    let app = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .context("failed to connect to database")?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let lookup = Arc::new(PgUserLookup::new(pool.clone()));
            let users = Arc::new(CrudUseCase::new(
                Arc::new(PgCrudRepository::<User>::new(pool.clone())),
                ctx.clone(),
            ));
            let albums = Arc::new(CrudUseCase::new(
                Arc::new(PgCrudRepository::<Album>::new(pool)),
                ctx,
            ));

            seed_user(seed, lookup.as_ref(), &users).await?;
            build_router(lookup, users, albums, issuer, &settings)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");

            // One store answers both `/user` and credential lookups
            let user_repo = Arc::new(MemoryRepository::<User>::new());
            let users = Arc::new(CrudUseCase::new(user_repo.clone(), ctx.clone()));
            let albums = Arc::new(CrudUseCase::new(
                Arc::new(MemoryRepository::<Album>::new()),
                ctx,
            ));

            seed_user(seed, user_repo.as_ref(), &users).await?;
            build_router(user_repo, users, albums, issuer, &settings)
        }
    };

    // Start server
    let listener = TcpListener::bind(config.server_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    tracing::info!("Listening on {}", config.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn seed_user<L, Repo>(
    seed: Option<SeedUser>,
    lookup: &L,
    users: &CrudUseCase<User, Repo>,
) -> anyhow::Result<()>
where
    L: UserLookup + Sync,
    Repo: CrudRepository<User> + Sync,
{
    let Some(seed) = seed else {
        return Ok(());
    };

    let input = NewUser {
        name: seed.name,
        email: seed.email,
        password: seed.password,
    };
    ensure_user(lookup, users, input)
        .await
        .context("failed to create seed user")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}
