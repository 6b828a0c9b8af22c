//! Feature modules implementing the ChemViz API
//!
//! Each feature is a vertical slice with its own commands, queries, and
//! routes:
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions
//!
//! # Features
//!
//! - **datasets**: CSV upload, summaries, history, and PDF reports

pub mod datasets;

use axum::Router;
use chemviz_core::DatasetService;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Upload, query, and report pipeline over the dataset store
    pub service: DatasetService,
}

/// Creates the API router with all feature routes mounted
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().merge(datasets::datasets_routes().with_state(state.service))
}
