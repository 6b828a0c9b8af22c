//! Dataset API routes
//!
//! # Route Structure
//!
//! - `POST /api/upload` - Upload a CSV (multipart `file`, optional `name`)
//! - `GET /api/summary/latest` - Most recent dataset summary
//! - `GET /api/history` - Up to five most recent datasets, newest first
//! - `GET /api/datasets/:id` - One dataset by id
//! - `GET /api/report` - PDF report of the latest dataset
//! - `GET /api/report/:id` - PDF report of one dataset

use crate::api::response::ApiResponse;
use crate::error::ServerResult;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chemviz_core::service::RenderedReport;
use chemviz_core::DatasetService;
use serde_json::json;

use super::{
    commands::UploadDatasetCommand,
    queries::{GetDatasetQuery, HistoryQuery, ReportQuery},
};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn datasets_routes() -> Router<DatasetService> {
    Router::new()
        .route("/upload", post(upload_dataset))
        .route("/summary/latest", get(latest_summary))
        .route("/history", get(history))
        .route("/datasets/:id", get(get_dataset))
        .route("/report", get(latest_report))
        .route("/report/:id", get(dataset_report))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Upload a CSV and store its summary
///
/// # Response
///
/// - `201 Created` - Dataset created
/// - `400 Bad Request` - No file, missing columns, malformed CSV, or no rows
/// - `413 Payload Too Large` - Body over the configured limit
#[tracing::instrument(skip(service, multipart))]
async fn upload_dataset(
    State(service): State<DatasetService>,
    multipart: Multipart,
) -> ServerResult<Response> {
    let command = UploadDatasetCommand::from_multipart(multipart).await?;
    let dataset = super::commands::upload::handle(service, command).await?;

    tracing::info!(
        dataset_id = %dataset.id,
        total_count = dataset.summary.total_count,
        "Dataset uploaded via API"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dataset))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

async fn latest_summary(State(service): State<DatasetService>) -> ServerResult<Response> {
    let dataset = super::queries::get::latest(service).await?;
    Ok(ApiResponse::success(dataset).into_response())
}

async fn history(
    State(service): State<DatasetService>,
    Query(query): Query<HistoryQuery>,
) -> ServerResult<Response> {
    let limit = query.limit();
    let datasets = super::queries::history::handle(service, query).await?;
    let meta = json!({ "limit": limit.get(), "count": datasets.len() });

    Ok(ApiResponse::success_with_meta(datasets, meta).into_response())
}

async fn get_dataset(
    State(service): State<DatasetService>,
    Path(id): Path<String>,
) -> ServerResult<Response> {
    let dataset = super::queries::get::handle(service, GetDatasetQuery { id }).await?;
    Ok(ApiResponse::success(dataset).into_response())
}

async fn latest_report(State(service): State<DatasetService>) -> ServerResult<Response> {
    let report = super::queries::report::handle(service, ReportQuery::default()).await?;
    Ok(pdf_response(report))
}

#[tracing::instrument(skip(service))]
async fn dataset_report(
    State(service): State<DatasetService>,
    Path(id): Path<String>,
) -> ServerResult<Response> {
    let report = super::queries::report::handle(service, ReportQuery { id: Some(id) }).await?;
    Ok(pdf_response(report))
}

/// PDF attachment response
fn pdf_response(report: RenderedReport) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response()
}
