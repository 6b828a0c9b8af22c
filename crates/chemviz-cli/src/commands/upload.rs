//! `chemviz upload` command implementation
//!
//! Reads a CSV from disk, stores its summary, and prints the new record.

use crate::error::{CliError, Result};
use crate::output::{self, OutputFormat};
use chemviz_core::models::EquipmentDataset;
use chemviz_core::service::{UploadRequest, UploadedFile};
use chemviz_core::DatasetService;
use colored::Colorize;
use std::path::Path;

/// Upload a CSV file
pub async fn run(
    service: &DatasetService,
    file: &Path,
    name: Option<String>,
    format: OutputFormat,
) -> Result<EquipmentDataset> {
    let content = tokio::fs::read(file).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound(file.to_path_buf()),
        _ => CliError::Io(e),
    })?;

    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let dataset = service
        .upload(UploadRequest {
            file: Some(UploadedFile { filename, content }),
            name,
        })
        .await?;

    if format == OutputFormat::Table {
        println!("{} {}", "✓".green(), format!("Uploaded {}", dataset.original_filename).bold());
        println!();
    }
    output::print_dataset(&dataset, format)?;

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open_service;

    const SAMPLE: &str = "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
Pump-1,Pump,10,5,20\n\
Pump-2,Pump,20,7,22\n\
Valve-1,Valve,5,3,18\n";

    #[tokio::test]
    async fn test_upload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("plant.csv");
        std::fs::write(&csv, SAMPLE).unwrap();
        let service = open_service(&dir.path().join("data")).await.unwrap();

        let dataset = run(&service, &csv, Some("Run A".to_string()), OutputFormat::Json)
            .await
            .unwrap();

        assert_eq!(dataset.name, "Run A");
        assert_eq!(dataset.original_filename, "plant.csv");
        assert_eq!(dataset.summary.total_count, 3);
        assert_eq!(dataset.summary.type_distribution["Pump"], 2);
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = open_service(dir.path()).await.unwrap();

        let err = run(&service, &dir.path().join("nope.csv"), None, OutputFormat::Table)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_upload_invalid_csv_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("bad.csv");
        std::fs::write(&csv, "Equipment Name,Type\nP,Pump\n").unwrap();
        let service = open_service(&dir.path().join("data")).await.unwrap();

        let err = run(&service, &csv, None, OutputFormat::Table).await.unwrap_err();

        assert!(matches!(err, CliError::Rejected(_)));
        assert!(err.to_string().contains("Missing columns: Flowrate, Pressure, Temperature"));
        assert_eq!(service.store().count().await.unwrap(), 0);
    }
}
