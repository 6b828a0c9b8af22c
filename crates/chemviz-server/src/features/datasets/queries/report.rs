//! PDF report query

use super::get::parse_dataset_id;
use chemviz_core::service::RenderedReport;
use chemviz_core::{CoreResult, DatasetService};

/// Report for `id`, or for the latest dataset when absent
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    pub id: Option<String>,
}

pub async fn handle(service: DatasetService, query: ReportQuery) -> CoreResult<RenderedReport> {
    let id = query.id.as_deref().map(parse_dataset_id).transpose()?;
    service.report(id).await
}
