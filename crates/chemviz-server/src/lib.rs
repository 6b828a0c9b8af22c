//! ChemViz Server Library
//!
//! HTTP boundary for the equipment dataset pipeline.
//!
//! # Overview
//!
//! - **API Endpoints**: CSV upload, latest summary, history, dataset lookup,
//!   and PDF reports under `/api`
//! - **Storage**: SQLite records and filesystem source blobs via `chemviz-core`
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS, request tracing, and body limits
//! - **Shutdown**: Signal handling with a bounded connection drain
//!
//! # Architecture
//!
//! Handlers live in feature slices (`features/<name>/{commands,queries,routes.rs}`).
//! Commands are the write path (uploads); queries are read-only. Every
//! handler delegates to [`chemviz_core::DatasetService`] and converts
//! [`chemviz_core::CoreError`] into an HTTP response through [`ApiError`].
//!
//! # Example
//!
//! ```no_run
//! use chemviz_core::{DatasetService, DatasetStore};
//! use chemviz_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = DatasetStore::open(&config.store_config()).await?;
//!     let app = api::create_router(api::AppState { service: DatasetService::new(store) }, &config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod shutdown;

// Re-export commonly used types
pub use error::{ApiError, ServerResult};
