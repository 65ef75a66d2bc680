//! NaviChat server
//!
//! Main application entry point

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use NaviChat::{
    config::Settings,
    flows::FlowRegistry,
    handlers::{create_router, AppState},
    middleware::LoggingMiddleware,
    state::ConversationEngine,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", NaviChat::info());

    // Build the flow registry; a bad pattern or empty flow stops startup here
    let registry = FlowRegistry::new(&settings.chat.tail_labels())?;
    info!(flows = ?registry.keywords(), "Flow registry loaded");

    let engine = ConversationEngine::new(Arc::new(registry));
    let state = AppState::new(engine, LoggingMiddleware::default());

    let mut app = create_router(state, &settings.server.path).layer(TraceLayer::new_for_http());
    if settings.server.cors_allow_any {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("NaviChat listening on {}{}", addr, settings.server.path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("NaviChat has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
