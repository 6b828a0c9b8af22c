//! Dataset lookup queries

use chemviz_core::{CoreError, CoreResult, DatasetService, EquipmentDataset};
use serde::Deserialize;
use uuid::Uuid;

/// Look up one dataset by the id taken from the request path
#[derive(Debug, Clone, Deserialize)]
pub struct GetDatasetQuery {
    pub id: String,
}

/// Parse a path id. Malformed ids name no dataset, so they are not-found
/// rather than bad requests.
pub fn parse_dataset_id(raw: &str) -> CoreResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| CoreError::NotFound(format!("Dataset '{}' not found", raw)))
}

pub async fn handle(service: DatasetService, query: GetDatasetQuery) -> CoreResult<EquipmentDataset> {
    let id = parse_dataset_id(&query.id)?;
    service.get(id).await
}

/// Most recent dataset
pub async fn latest(service: DatasetService) -> CoreResult<EquipmentDataset> {
    service.latest().await
}
