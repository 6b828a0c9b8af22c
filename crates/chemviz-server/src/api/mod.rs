pub mod response;

use crate::config::Config;
use crate::features;
use crate::middleware;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chemviz_core::DatasetService;
use serde_json::json;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: DatasetService,
}

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    let feature_routes = features::router(features::FeatureState {
        service: state.service.clone(),
    });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .nest("/api", feature_routes)
        // Applied from innermost to outermost
        .layer(axum::extract::DefaultBodyLimit::disable())
        .layer(middleware::body_limit_layer(config.server.max_upload_bytes))
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "ChemViz Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "latest": "GET /api/summary/latest",
            "history": "GET /api/history",
            "dataset": "GET /api/datasets/:id",
            "report": "GET /api/report[/:id]",
            "health": "GET /health"
        }
    }))
}

async fn health(State(state): State<AppState>) -> Response {
    match state.service.store().count().await {
        Ok(datasets) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "datasets": datasets
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "database": "unavailable" })),
            )
                .into_response()
        },
    }
}
