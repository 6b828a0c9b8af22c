//! Summary statistics over parsed equipment rows

use crate::error::{CoreError, CoreResult};
use crate::models::{DatasetSummary, EquipmentRow};
use std::collections::BTreeMap;

/// Reduce rows to counts, column means, and the type distribution.
///
/// Single pass, no side effects. Fails with [`CoreError::EmptyDataset`]
/// instead of producing undefined means when `rows` is empty.
pub fn summarize(rows: &[EquipmentRow]) -> CoreResult<DatasetSummary> {
    if rows.is_empty() {
        return Err(CoreError::EmptyDataset);
    }

    let mut flowrate = 0.0;
    let mut pressure = 0.0;
    let mut temperature = 0.0;
    let mut type_distribution: BTreeMap<String, u64> = BTreeMap::new();

    for row in rows {
        flowrate += row.flowrate;
        pressure += row.pressure;
        temperature += row.temperature;
        *type_distribution.entry(row.equipment_type.clone()).or_default() += 1;
    }

    let n = rows.len() as f64;

    Ok(DatasetSummary {
        total_count: rows.len() as u64,
        avg_flowrate: flowrate / n,
        avg_pressure: pressure / n,
        avg_temperature: temperature / n,
        type_distribution,
    })
}
