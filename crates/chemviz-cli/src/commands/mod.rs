//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function. Commands
//! print their result and also return it, so callers can inspect what
//! was shown.

pub mod history;
pub mod latest;
pub mod report;
pub mod show;
pub mod upload;

use crate::error::{CliError, Result};
use chemviz_core::{DatasetService, DatasetStore, StoreConfig};
use std::path::Path;
use uuid::Uuid;

/// Open the dataset pipeline over a local data directory
pub async fn open_service(data_dir: &Path) -> Result<DatasetService> {
    let config = StoreConfig::for_data_dir(data_dir);
    let store = DatasetStore::open(&config).await?;
    tracing::debug!(data_dir = %data_dir.display(), "Opened dataset store");
    Ok(DatasetService::new(store))
}

/// Parse a user-supplied dataset id
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| CliError::InvalidId(raw.to_string()))
}
