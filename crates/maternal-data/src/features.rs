use maternal_core::RiskLevel;
use maternal_core::risk::normalize_label;
use maternal_core::schema::{self, FEATURE_COLUMNS, N_FEATURES, column};

use crate::error::DataError;
use crate::table::{Cell, Column, Table};

/// Add the engineered `pulse_pressure` column.
///
/// Returns a copy; the input table is left untouched. Rows where either
/// pressure is not numeric get a null.
pub fn add_features(table: &Table) -> Result<Table, DataError> {
    let systolic = table.require_column(column::SYSTOLIC_BP)?;
    let diastolic = table.require_column(column::DIASTOLIC_BP)?;

    let cells = systolic
        .cells
        .iter()
        .zip(&diastolic.cells)
        .map(|(s, d)| match (s.as_number(), d.as_number()) {
            (Some(s), Some(d)) => Cell::Number(schema::pulse_pressure(s, d)),
            _ => Cell::Null,
        })
        .collect();

    table.with_column(Column::new(column::PULSE_PRESSURE, cells))
}

/// Copy of the table with every `RiskLevel` value trimmed and lowercased.
pub fn normalize_risk_levels(table: &Table) -> Result<Table, DataError> {
    let risk = table.require_column(column::RISK_LEVEL)?;
    let cells = risk
        .cells
        .iter()
        .map(|cell| match cell.as_text() {
            Some(raw) => Cell::Text(normalize_label(&raw)),
            None => Cell::Null,
        })
        .collect();
    table.with_column(Column::new(column::RISK_LEVEL, cells))
}

/// Feature rows and their targets, ready for a model.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRows {
    pub features: Vec<[f64; N_FEATURES]>,
    pub labels: Vec<RiskLevel>,
}

impl LabeledRows {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Extract [`FEATURE_COLUMNS`] (in order) and the parsed target from an
/// engineered table.
pub fn labeled_rows(table: &Table) -> Result<LabeledRows, DataError> {
    let feature_columns = FEATURE_COLUMNS
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<Vec<_>, _>>()?;
    let risk = table.require_column(column::RISK_LEVEL)?;

    let mut features = Vec::with_capacity(table.n_rows());
    let mut labels = Vec::with_capacity(table.n_rows());

    for row in 0..table.n_rows() {
        let mut values = [0.0; N_FEATURES];
        for (slot, col) in values.iter_mut().zip(&feature_columns) {
            *slot = col.cells[row]
                .as_number()
                .ok_or_else(|| DataError::NonNumeric {
                    row,
                    column: col.name.clone(),
                })?;
        }
        let raw = risk.cells[row].as_text().unwrap_or_default();
        let label =
            RiskLevel::parse_label(&raw).map_err(|source| DataError::Label { row, source })?;

        features.push(values);
        labels.push(label);
    }

    Ok(LabeledRows { features, labels })
}
