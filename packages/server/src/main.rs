use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use common::storage::FilesystemBlobStore;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{Level, info};

use shop::config::{AppConfig, CorsConfig};
use shop::search::ProductIndex;
use shop::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = shop::database::init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    shop::seed::seed_categorizations(&db)
        .await
        .context("Failed to seed categorizations")?;

    let blob_store = FilesystemBlobStore::from_config(&config.storage)
        .await
        .context("Failed to initialize image storage")?;
    info!(upload_dir = %config.storage.upload_dir.display(), "Image storage ready");

    let product_index = Arc::new(ProductIndex::new());
    if config.search.enabled {
        product_index
            .rebuild(&db)
            .await
            .context("Failed to build product search index")?;
    }

    let cors = cors_layer(&config.server.cors)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        blob_store: Arc::new(blob_store),
        product_index,
    };

    let app = shop::build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);
    info!("Swagger UI on http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origin = if config.allow_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins = config
            .allow_origins
            .iter()
            .map(|o| HeaderValue::from_str(o))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid CORS origin")?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age)))
}
