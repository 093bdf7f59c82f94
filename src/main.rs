mod api;
mod config;
mod query;
mod store;

use crate::api::{health_handler, root_handler, AppState};
use crate::config::AppConfig;
use crate::store::{ArtworkStore, FavoriteStore};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Artify API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Database: {}", config.database.db_name);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Connect to the document store
    info!("💾 Connecting to MongoDB...");
    let db = store::connect(&config.database).await?;
    info!("✅ MongoDB connected successfully");

    // Create application state
    let state = AppState {
        artworks: ArtworkStore::new(&db, &config.database.artwork_collection),
        favorites: FavoriteStore::new(&db, &config.database.favorites_collection),
    };

    // Build router with modular routes
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(api::artworks::routes())
        .merge(api::favorites::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /health                  - Health check");
    info!("   GET    /artwork                 - List artworks (?email= filter)");
    info!("   POST   /artwork                 - Add artwork");
    info!("   GET    /artwork-details/{{id}}    - Artwork by id");
    info!("   GET    /artworks-recent         - Latest public artworks");
    info!("   GET    /explore-artworks        - Filtered + paginated listing");
    info!("   GET    /artworks-stats          - All artworks");
    info!("   PATCH  /artwork/{{id}}            - Merge-update artwork");
    info!("   PATCH  /artwork/like/{{id}}       - Toggle like");
    info!("   DELETE /artwork/{{id}}            - Delete artwork");
    info!("   GET    /favorites               - List favorites");
    info!("   POST   /favorites               - Add favorite (deduped)");
    info!("   DELETE /favorites/{{artworkId}}   - Remove favorite by artwork");
    info!("   DELETE /my-favorites/{{id}}       - Remove favorite by id");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
