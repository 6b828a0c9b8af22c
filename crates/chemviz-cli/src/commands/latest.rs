//! `chemviz latest` command implementation

use crate::error::Result;
use crate::output::{self, OutputFormat};
use chemviz_core::models::EquipmentDataset;
use chemviz_core::DatasetService;

/// Show the most recent upload
pub async fn run(service: &DatasetService, format: OutputFormat) -> Result<EquipmentDataset> {
    let dataset = service.latest().await?;
    output::print_dataset(&dataset, format)?;
    Ok(dataset)
}
