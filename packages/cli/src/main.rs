use std::net::SocketAddr;

use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use letterhead_api::{
    create_categories_router, create_documents_router, create_letter_types_router,
    create_users_router, create_verification_router,
};
use letterhead_documents::DbState;
use letterhead_storage::StorageConfig;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting Letterhead server on port {}", config.port);
    info!("Database: {}", config.database_path.display());

    let storage_config = StorageConfig {
        path: config.database_path.clone(),
        ..Default::default()
    };
    let pool = letterhead_storage::connect(&storage_config).await?;
    letterhead_storage::initialize(&pool).await?;

    let db_state = DbState::new(pool)?;

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/documents", create_documents_router())
        .nest("/api/categories", create_categories_router())
        .nest("/api/letter-types", create_letter_types_router())
        .nest("/api/verify", create_verification_router())
        .nest("/api/users", create_users_router())
        .route("/api/health", get(health))
        .with_state(db_state)
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
