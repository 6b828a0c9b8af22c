//! Upload history query

use chemviz_common::types::HistoryLimit;
use chemviz_core::{CoreResult, DatasetService, EquipmentDataset};
use serde::Deserialize;

/// `?limit=` parameters; the limit is clamped to what the store retains
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn limit(&self) -> HistoryLimit {
        self.limit.map(HistoryLimit::new).unwrap_or_default()
    }
}

pub async fn handle(service: DatasetService, query: HistoryQuery) -> CoreResult<Vec<EquipmentDataset>> {
    service.history(query.limit()).await
}
