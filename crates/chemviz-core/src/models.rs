//! Domain records for equipment datasets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One validated data row from an uploaded CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentRow {
    pub equipment_name: String,
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// Aggregate statistics computed from a non-empty row set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of data rows summarized
    pub total_count: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    /// Raw occurrence count per distinct `Type` value
    pub type_distribution: BTreeMap<String, u64>,
}

impl DatasetSummary {
    /// Distribution entries ordered by count descending, then label ascending
    pub fn ranked_types(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .type_distribution
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// A stored, immutable dataset summary.
///
/// Serializes flat: the summary fields appear alongside the identity fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDataset {
    pub id: Uuid,
    pub name: String,
    pub original_filename: String,
    #[serde(flatten)]
    pub summary: DatasetSummary,
    /// Byte length of the stored source file
    pub source_size: u64,
    /// Lowercase hex SHA-256 of the stored source file
    pub source_checksum: String,
    pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::DatasetStore::create`].
#[derive(Debug, Clone)]
pub struct NewDataset {
    pub summary: DatasetSummary,
    /// Display label; blank or absent falls back to a timestamped default
    pub name: Option<String>,
    pub original_filename: String,
    /// Raw uploaded bytes, kept as the dataset's source file
    pub source: Vec<u8>,
}

/// Default display label for a dataset created at `created_at`
pub fn default_dataset_name(created_at: DateTime<Utc>) -> String {
    format!("Dataset {}", created_at.format("%Y-%m-%d %H:%M"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary() -> DatasetSummary {
        DatasetSummary {
            total_count: 6,
            avg_flowrate: 1.0,
            avg_pressure: 2.0,
            avg_temperature: 3.0,
            type_distribution: BTreeMap::from([
                ("Valve".to_string(), 2),
                ("Pump".to_string(), 2),
                ("Reactor".to_string(), 1),
                ("Condenser".to_string(), 1),
            ]),
        }
    }

    #[test]
    fn test_ranked_types_orders_by_count_then_label() {
        let summary = summary();
        assert_eq!(
            summary.ranked_types(),
            vec![("Pump", 2), ("Valve", 2), ("Condenser", 1), ("Reactor", 1)]
        );
    }

    #[test]
    fn test_default_dataset_name() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap();
        assert_eq!(default_dataset_name(at), "Dataset 2024-03-09 07:05");
    }

    #[test]
    fn test_dataset_serializes_flat() {
        let dataset = EquipmentDataset {
            id: Uuid::nil(),
            name: "Plant A".to_string(),
            original_filename: "plant_a.csv".to_string(),
            summary: summary(),
            source_size: 42,
            source_checksum: "ab".repeat(32),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap(),
        };

        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(json["total_count"], 6);
        assert_eq!(json["type_distribution"]["Pump"], 2);
        assert_eq!(json["original_filename"], "plant_a.csv");
        assert!(json.get("summary").is_none());
    }
}
