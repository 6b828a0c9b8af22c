//! Upload dataset command
//!
//! Collects the `file` and `name` fields of a multipart request and hands
//! them to the ingest pipeline. A request without a `file` field still
//! reaches the pipeline so the rejection is reported like any other
//! validation failure.

use axum::extract::{multipart::MultipartError, Multipart};
use chemviz_core::service::{UploadRequest, UploadedFile};
use chemviz_core::{CoreResult, DatasetService, EquipmentDataset};

/// Filename recorded when the client sends none
pub const DEFAULT_UPLOAD_FILENAME: &str = "upload.csv";

/// Multipart field carrying the CSV file
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the optional display name
pub const NAME_FIELD: &str = "name";

#[derive(Debug, Clone, Default)]
pub struct UploadDatasetCommand {
    /// Client-supplied filename, possibly with a path prefix
    pub filename: Option<String>,
    /// `None` when no `file` field was sent
    pub content: Option<Vec<u8>>,
    pub name: Option<String>,
}

impl UploadDatasetCommand {
    /// Read the command out of a multipart body. Unknown fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut command = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or("").to_string();
            match field_name.as_str() {
                FILE_FIELD => {
                    command.filename = field.file_name().map(str::to_string);
                    command.content = Some(field.bytes().await?.to_vec());
                },
                NAME_FIELD => {
                    command.name = Some(field.text().await?);
                },
                _ => {},
            }
        }

        Ok(command)
    }

    /// Final path component of the client filename, or the default
    pub fn original_filename(&self) -> String {
        self.filename
            .as_deref()
            .and_then(|name| name.rsplit(['/', '\\']).next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_FILENAME)
            .to_string()
    }
}

pub async fn handle(service: DatasetService, command: UploadDatasetCommand) -> CoreResult<EquipmentDataset> {
    let filename = command.original_filename();
    let request = UploadRequest {
        file: command.content.map(|content| UploadedFile { filename, content }),
        name: command.name,
    };

    service.upload(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_filename(filename: Option<&str>) -> UploadDatasetCommand {
        UploadDatasetCommand {
            filename: filename.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_original_filename_strips_client_paths() {
        assert_eq!(with_filename(Some("plant.csv")).original_filename(), "plant.csv");
        assert_eq!(with_filename(Some("C:\\data\\plant.csv")).original_filename(), "plant.csv");
        assert_eq!(with_filename(Some("/home/op/plant.csv")).original_filename(), "plant.csv");
    }

    #[test]
    fn test_original_filename_falls_back() {
        assert_eq!(with_filename(None).original_filename(), DEFAULT_UPLOAD_FILENAME);
        assert_eq!(with_filename(Some("  ")).original_filename(), DEFAULT_UPLOAD_FILENAME);
        assert_eq!(with_filename(Some("dir/")).original_filename(), DEFAULT_UPLOAD_FILENAME);
    }
}
