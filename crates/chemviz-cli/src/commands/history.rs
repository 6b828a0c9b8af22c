//! `chemviz history` command implementation
//!
//! Lists retained uploads, newest first.

use crate::error::Result;
use crate::output::{self, OutputFormat};
use chemviz_common::types::HistoryLimit;
use chemviz_core::models::EquipmentDataset;
use chemviz_core::DatasetService;

/// List retained uploads. `limit` is clamped to the retention bound.
pub async fn run(
    service: &DatasetService,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<Vec<EquipmentDataset>> {
    let limit = limit.map(HistoryLimit::new).unwrap_or_default();
    let datasets = service.history(limit).await?;

    match format {
        OutputFormat::Json => output::print_json(&datasets)?,
        OutputFormat::Table if datasets.is_empty() => {
            println!("No datasets uploaded yet.");
            println!("Run 'chemviz upload <FILE>' to add one.");
        },
        OutputFormat::Table => {
            println!("{}", output::history_table(&datasets));
            println!("Showing {} of at most {} retained uploads", datasets.len(), limit.get());
        },
    }

    Ok(datasets)
}
