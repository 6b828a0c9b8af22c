//! `chemviz report` command implementation
//!
//! Renders the PDF report for a dataset and writes it to disk.

use crate::commands::parse_id;
use crate::error::Result;
use crate::output::{self, OutputFormat};
use chemviz_core::DatasetService;
use colored::Colorize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Write the report for `id` (or the latest upload) and return the path written
pub async fn run(
    service: &DatasetService,
    id: Option<&str>,
    output_path: Option<&Path>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let id = id.map(parse_id).transpose()?;
    let report = service.report(id).await?;

    let path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&report.filename));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(&path, &report.bytes).await?;

    tracing::info!(dataset_id = %report.dataset_id, path = %path.display(), "Wrote report");

    match format {
        OutputFormat::Json => output::print_json(&json!({
            "dataset_id": report.dataset_id,
            "path": path,
            "bytes": report.bytes.len(),
        }))?,
        OutputFormat::Table => println!(
            "{} Report for {} written to {}",
            "✓".green(),
            report.dataset_id,
            path.display().to_string().cyan()
        ),
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{open_service, upload};
    use crate::error::CliError;

    #[tokio::test]
    async fn test_report_for_latest_and_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("plant.csv");
        std::fs::write(&csv, "Equipment Name,Type,Flowrate,Pressure,Temperature\nP,Pump,1,2,3\n")
            .unwrap();
        let service = open_service(&dir.path().join("data")).await.unwrap();
        let dataset = upload::run(&service, &csv, None, OutputFormat::Json).await.unwrap();

        let target = dir.path().join("out").join("latest.pdf");
        let written = run(&service, None, Some(&target), OutputFormat::Table).await.unwrap();
        assert_eq!(written, target);
        let bytes = std::fs::read(&target).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let target = dir.path().join("by-id.pdf");
        let id = dataset.id.to_string();
        run(&service, Some(&id), Some(&target), OutputFormat::Json).await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_report_without_datasets() {
        let dir = tempfile::tempdir().unwrap();
        let service = open_service(dir.path()).await.unwrap();

        let err = run(&service, None, Some(&dir.path().join("r.pdf")), OutputFormat::Table)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::NotFound(_)));
        assert!(!dir.path().join("r.pdf").exists());
    }
}
