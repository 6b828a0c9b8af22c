//! CSV ingestion for equipment readings
//!
//! Parses an uploaded byte buffer against the fixed five-column schema and
//! returns typed rows. Extra columns are ignored; every numeric cell must be a
//! finite number or the whole upload is rejected.

use crate::error::{CoreError, CoreResult};
use crate::models::EquipmentRow;
use csv::{ReaderBuilder, StringRecord, Trim};

pub const COL_EQUIPMENT_NAME: &str = "Equipment Name";
pub const COL_TYPE: &str = "Type";
pub const COL_FLOWRATE: &str = "Flowrate";
pub const COL_PRESSURE: &str = "Pressure";
pub const COL_TEMPERATURE: &str = "Temperature";

/// Required header names, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: [&str; 5] =
    [COL_EQUIPMENT_NAME, COL_TYPE, COL_FLOWRATE, COL_PRESSURE, COL_TEMPERATURE];

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    name: usize,
    kind: usize,
    flowrate: usize,
    pressure: usize,
    temperature: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> CoreResult<Self> {
        let positions = REQUIRED_COLUMNS.map(|column| headers.iter().position(|h| h == column));

        match positions {
            [Some(name), Some(kind), Some(flowrate), Some(pressure), Some(temperature)] => Ok(Self {
                name,
                kind,
                flowrate,
                pressure,
                temperature,
            }),
            _ => Err(CoreError::MissingColumns(
                REQUIRED_COLUMNS
                    .iter()
                    .zip(positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(column, _)| column.to_string())
                    .collect(),
            )),
        }
    }

    fn extract(&self, record: &StringRecord, row: usize) -> CoreResult<EquipmentRow> {
        let equipment_type = cell(record, self.kind);
        if equipment_type.is_empty() {
            return Err(CoreError::MissingValue { row, column: COL_TYPE });
        }

        Ok(EquipmentRow {
            equipment_name: cell(record, self.name).to_string(),
            equipment_type: equipment_type.to_string(),
            flowrate: number(record, self.flowrate, row, COL_FLOWRATE)?,
            pressure: number(record, self.pressure, row, COL_PRESSURE)?,
            temperature: number(record, self.temperature, row, COL_TEMPERATURE)?,
        })
    }
}

fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn number(record: &StringRecord, index: usize, row: usize, column: &'static str) -> CoreResult<f64> {
    let raw = cell(record, index);
    if raw.is_empty() {
        return Err(CoreError::MissingValue { row, column });
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::InvalidNumber {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}

/// Parse uploaded CSV bytes into equipment rows.
///
/// Header and data cells are trimmed of surrounding whitespace. Rows are
/// numbered from 1, counting data rows only. A header-only file yields an
/// empty vector; rejecting that is the summary step's job.
pub fn parse_csv(input: &[u8]) -> CoreResult<Vec<EquipmentRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut rows = Vec::new();
    for (offset, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(columns.extract(&record, offset + 1)?);
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "Parsed equipment CSV");

    Ok(rows)
}
