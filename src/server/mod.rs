use crate::catalog::{AngleService, CatalogSettings, SqliteAngleRepository};
use crate::config::Config;
use crate::images::LocalFileStore;
use angle_catalog_db::pool::DbPool;
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod auth;
pub mod error;
pub mod routes_angles;
pub mod upload;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub angles: Arc<AngleService>,
}

impl AppContext {
    /// Wire the SQLite repository and the local image store from `config`.
    pub fn new(config: Config, pool: DbPool) -> Self {
        let repo = SqliteAngleRepository::new(pool);
        let files = LocalFileStore::for_angles(&config.storage.uploads_dir);
        let angles = AngleService::new(
            Arc::new(repo),
            Arc::new(files),
            CatalogSettings::from(&config.catalog),
        );

        Self {
            config: Arc::new(config),
            angles: Arc::new(angles),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let uploads_dir = ctx.config.storage.uploads_dir.clone();
    let body_limit = ctx.config.storage.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes(&ctx))
        // Stored images, always public
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn api_routes(ctx: &AppContext) -> Router<AppContext> {
    let routes = routes_angles::angle_routes();

    if ctx.config.server.auth.enabled {
        routes.layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::api_auth_middleware,
        ))
    } else {
        routes
    }
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Start the HTTP server
pub async fn start_server(config: Config, pool: DbPool) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    std::fs::create_dir_all(&config.storage.uploads_dir).with_context(|| {
        format!(
            "Failed to create uploads directory {:?}",
            config.storage.uploads_dir
        )
    })?;

    let ctx = AppContext::new(config, pool);
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
