//! Row mapping between `equipment_datasets` and [`EquipmentDataset`]

use crate::error::{CoreError, CoreResult};
use crate::models::{DatasetSummary, EquipmentDataset};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Columns selected for a full record, in [`DatasetRow`] order
pub(super) const DATASET_COLUMNS: &str = "id, name, original_filename, total_count, \
     avg_flowrate, avg_pressure, avg_temperature, type_distribution, \
     source_size, source_checksum, created_at_us";

/// Newest first; `seq` breaks ties between identical timestamps
pub(super) const RECENCY_ORDER: &str = "ORDER BY created_at_us DESC, seq DESC";

#[derive(Debug, sqlx::FromRow)]
pub(super) struct DatasetRow {
    pub id: String,
    pub name: String,
    pub original_filename: String,
    pub total_count: i64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    pub type_distribution: String,
    pub source_size: i64,
    pub source_checksum: String,
    pub created_at_us: i64,
}

pub(super) fn timestamp_from_micros(micros: i64) -> CoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| CoreError::corrupt(format!("timestamp {} out of range", micros)))
}

impl TryFrom<DatasetRow> for EquipmentDataset {
    type Error = CoreError;

    fn try_from(row: DatasetRow) -> CoreResult<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| CoreError::corrupt(format!("invalid dataset id '{}': {}", row.id, e)))?;

        let type_distribution: BTreeMap<String, u64> = serde_json::from_str(&row.type_distribution)
            .map_err(|e| CoreError::corrupt(format!("type distribution of {}: {}", id, e)))?;

        let total_count = u64::try_from(row.total_count)
            .map_err(|_| CoreError::corrupt(format!("negative total_count for {}", id)))?;
        let source_size = u64::try_from(row.source_size)
            .map_err(|_| CoreError::corrupt(format!("negative source_size for {}", id)))?;

        Ok(EquipmentDataset {
            id,
            name: row.name,
            original_filename: row.original_filename,
            summary: DatasetSummary {
                total_count,
                avg_flowrate: row.avg_flowrate,
                avg_pressure: row.avg_pressure,
                avg_temperature: row.avg_temperature,
                type_distribution,
            },
            source_size,
            source_checksum: row.source_checksum,
            created_at: timestamp_from_micros(row.created_at_us)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn row() -> DatasetRow {
        DatasetRow {
            id: "6f1b2c4e-8d7a-4e3b-9f00-1a2b3c4d5e6f".to_string(),
            name: "Line 3".to_string(),
            original_filename: "line3.csv".to_string(),
            total_count: 3,
            avg_flowrate: 11.5,
            avg_pressure: 5.0,
            avg_temperature: 20.0,
            type_distribution: r#"{"Pump":2,"Valve":1}"#.to_string(),
            source_size: 120,
            source_checksum: "00".repeat(32),
            created_at_us: 1_700_000_000_123_456,
        }
    }

    #[test]
    fn test_row_converts() {
        let dataset = EquipmentDataset::try_from(row()).unwrap();
        assert_eq!(dataset.summary.type_distribution["Pump"], 2);
        assert_eq!(dataset.created_at.timestamp_micros(), 1_700_000_000_123_456);
        assert_eq!(dataset.source_size, 120);
    }

    #[test]
    fn test_corrupt_rows_are_rejected() {
        let mut bad_id = row();
        bad_id.id = "not-a-uuid".to_string();
        assert!(matches!(EquipmentDataset::try_from(bad_id), Err(CoreError::Corrupt(_))));

        let mut bad_json = row();
        bad_json.type_distribution = "[1,2]".to_string();
        assert!(matches!(EquipmentDataset::try_from(bad_json), Err(CoreError::Corrupt(_))));

        let mut bad_count = row();
        bad_count.total_count = -1;
        assert!(matches!(EquipmentDataset::try_from(bad_count), Err(CoreError::Corrupt(_))));
    }
}
