//! Terminal rendering for datasets

use crate::error::Result;
use chemviz_core::models::EquipmentDataset;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, Table};
use serde::Serialize;

/// Output mode selected by the global `--json` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    table
}

/// Key/value table describing a single dataset
pub fn summary_table(dataset: &EquipmentDataset) -> Table {
    let summary = &dataset.summary;
    let mut table = new_table();

    table.add_row(vec!["ID".to_string(), dataset.id.to_string()]);
    table.add_row(vec!["Name".to_string(), dataset.name.clone()]);
    table.add_row(vec!["File".to_string(), dataset.original_filename.clone()]);
    table.add_row(vec![
        "Uploaded".to_string(),
        dataset.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    ]);
    table.add_row(vec!["Total Equipment".to_string(), summary.total_count.to_string()]);
    table.add_row(vec!["Avg Flowrate".to_string(), format!("{:.2}", summary.avg_flowrate)]);
    table.add_row(vec!["Avg Pressure".to_string(), format!("{:.2}", summary.avg_pressure)]);
    table.add_row(vec![
        "Avg Temperature".to_string(),
        format!("{:.2}", summary.avg_temperature),
    ]);

    table
}

/// Type distribution, most common type first
pub fn distribution_table(dataset: &EquipmentDataset) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Type", "Count"]);

    for (label, count) in dataset.summary.ranked_types() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// One row per dataset, in the order given
pub fn history_table(datasets: &[EquipmentDataset]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "File", "Uploaded", "Count", "Avg Flow", "Avg Press", "Avg Temp"]);

    for dataset in datasets {
        let summary = &dataset.summary;
        table.add_row(vec![
            dataset.id.to_string(),
            dataset.name.clone(),
            dataset.original_filename.clone(),
            dataset.created_at.format("%Y-%m-%d %H:%M").to_string(),
            summary.total_count.to_string(),
            format!("{:.2}", summary.avg_flowrate),
            format!("{:.2}", summary.avg_pressure),
            format!("{:.2}", summary.avg_temperature),
        ]);
    }

    table
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a dataset in the selected format
pub fn print_dataset(dataset: &EquipmentDataset, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(dataset),
        OutputFormat::Table => {
            println!("{}", summary_table(dataset));
            println!();
            println!("{}", distribution_table(dataset));
            Ok(())
        },
    }
}
