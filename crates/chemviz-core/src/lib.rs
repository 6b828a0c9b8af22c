//! ChemViz Core Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Aggregation, retention, and reporting for chemical-equipment datasets.
//!
//! # Pipeline
//!
//! - **Ingest** ([`ingest`]): CSV bytes to validated [`models::EquipmentRow`]s
//! - **Summary** ([`summary`]): rows to counts, means, and a type distribution
//! - **Store** ([`store`]): SQLite records plus source blobs, pruned to the
//!   five most recent datasets on every insert
//! - **Report** ([`report`]): one record to a paginated PDF
//!
//! [`service::DatasetService`] wires these together for the server and CLI.
//!
//! # Example
//!
//! ```no_run
//! use chemviz_core::service::{DatasetService, UploadRequest, UploadedFile};
//! use chemviz_core::store::{DatasetStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = DatasetStore::open(&StoreConfig::for_data_dir("./data")).await?;
//!     let service = DatasetService::new(store);
//!
//!     let dataset = service
//!         .upload(UploadRequest {
//!             file: Some(UploadedFile {
//!                 filename: "plant.csv".to_string(),
//!                 content: std::fs::read("plant.csv")?,
//!             }),
//!             name: None,
//!         })
//!         .await?;
//!     println!("{} rows, mean flowrate {:.2}", dataset.summary.total_count, dataset.summary.avg_flowrate);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
pub mod service;
pub mod store;
pub mod summary;

pub use error::{CoreError, CoreResult, ErrorKind};
pub use models::{DatasetSummary, EquipmentDataset, EquipmentRow, NewDataset};
pub use service::DatasetService;
pub use store::{DatasetStore, StoreConfig};
