//! Upload, query, and report pipeline
//!
//! [`DatasetService`] is what the HTTP server and the CLI both drive: it
//! chains ingest, summary, and storage for uploads, and storage plus
//! rendering for reports.

use crate::error::{CoreError, CoreResult};
use crate::ingest::parse_csv;
use crate::models::{EquipmentDataset, NewDataset};
use crate::report::{render_report, report_filename};
use crate::store::DatasetStore;
use crate::summary::summarize;
use chemviz_common::types::HistoryLimit;
use tracing::{info, instrument};
use uuid::Uuid;

/// An uploaded source file
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// `None` when the client sent no file at all
    pub file: Option<UploadedFile>,
    pub name: Option<String>,
}

/// A rendered PDF report ready to hand to a client
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub dataset_id: Uuid,
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DatasetService {
    store: DatasetStore,
}

impl DatasetService {
    pub fn new(store: DatasetStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Ingest one CSV upload and persist its summary.
    ///
    /// Nothing is stored unless parsing and summarizing both succeed.
    #[instrument(skip(self, request), fields(filename = tracing::field::Empty))]
    pub async fn upload(&self, request: UploadRequest) -> CoreResult<EquipmentDataset> {
        let file = request.file.ok_or(CoreError::NoFile)?;
        tracing::Span::current().record("filename", file.filename.as_str());

        let rows = parse_csv(&file.content)?;
        let summary = summarize(&rows)?;

        let dataset = self
            .store
            .create(NewDataset {
                summary,
                name: request.name,
                original_filename: file.filename,
                source: file.content,
            })
            .await?;

        info!(
            dataset_id = %dataset.id,
            rows = dataset.summary.total_count,
            "Upload accepted"
        );
        Ok(dataset)
    }

    /// Most recent dataset; [`CoreError::NotFound`] when nothing is stored
    pub async fn latest(&self) -> CoreResult<EquipmentDataset> {
        self.store.get_latest().await?.ok_or_else(CoreError::no_datasets)
    }

    /// Newest-first history
    pub async fn history(&self, limit: HistoryLimit) -> CoreResult<Vec<EquipmentDataset>> {
        self.store.list_recent(limit.get()).await
    }

    pub async fn get(&self, id: Uuid) -> CoreResult<EquipmentDataset> {
        self.store.get(id).await
    }

    /// Render the report for `id`, or for the latest dataset when `id` is `None`.
    #[instrument(skip(self))]
    pub async fn report(&self, id: Option<Uuid>) -> CoreResult<RenderedReport> {
        let dataset = match id {
            Some(id) => self.store.get(id).await?,
            None => self.latest().await?,
        };

        let bytes = render_report(&dataset)?;
        info!(dataset_id = %dataset.id, bytes = bytes.len(), "Report rendered");

        Ok(RenderedReport {
            dataset_id: dataset.id,
            filename: report_filename(&dataset.id),
            bytes,
        })
    }
}
