use analytics::AnalyticsEngine;
use axum::{Router, routing::get};
use configuration::settings::Settings;
use loader::{CsvFileSource, PriceSource};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod html;

/// The shared application state that all handlers can access.
///
/// Nothing in here is mutable: every request loads and analyses its own copy
/// of the price history.
pub struct AppState {
    pub source: Arc<dyn PriceSource>,
    pub engine: AnalyticsEngine,
    pub default_preview_rows: Option<usize>,
}

impl AppState {
    pub fn new(source: Arc<dyn PriceSource>, default_preview_rows: Option<usize>) -> Self {
        Self {
            source,
            engine: AnalyticsEngine::new(),
            default_preview_rows,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(CsvFileSource::new(settings.data.file_path.clone())),
            settings.preview.default_rows,
        )
    }
}

/// Builds the application router with all routes and middleware attached.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::index))
        .route("/data", get(handlers::data_table))
        .route("/health", get(handlers::health))
        .route("/api/analytics/:metric", get(handlers::get_analytics))
        .with_state(Arc::new(state))
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    // Tracing is initialised by the calling binary.
    let addr = settings.server.socket_addr()?;
    let state = AppState::from_settings(settings);
    tracing::info!(source = %state.source.describe(), "Serving price data.");

    let app = router(state);

    tracing::info!("Web server started and listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
