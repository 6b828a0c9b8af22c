//! `chemviz show` command implementation

use crate::commands::parse_id;
use crate::error::Result;
use crate::output::{self, OutputFormat};
use chemviz_core::models::EquipmentDataset;
use chemviz_core::DatasetService;

/// Show one dataset by id
pub async fn run(service: &DatasetService, id: &str, format: OutputFormat) -> Result<EquipmentDataset> {
    let id = parse_id(id)?;
    let dataset = service.get(id).await?;
    output::print_dataset(&dataset, format)?;
    Ok(dataset)
}
