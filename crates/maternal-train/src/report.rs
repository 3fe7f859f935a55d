//! Model comparison table.

use std::fs;
use std::path::Path;

use maternal_eval::Metrics;
use maternal_eval::plots::save_bar_chart;
use serde::{Deserialize, Serialize};

use crate::error::TrainError;

const CHART_TITLE: &str = "Model Comparison (Macro F1)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub model_key: String,
    pub model_name: String,
    pub accuracy: f64,
    pub f1_macro: f64,
    pub f1_weighted: f64,
}

impl ComparisonRow {
    pub fn new(model_key: &str, model_name: &str, metrics: &Metrics) -> Self {
        ComparisonRow {
            model_key: model_key.to_string(),
            model_name: model_name.to_string(),
            accuracy: metrics.accuracy,
            f1_macro: metrics.f1_macro,
            f1_weighted: metrics.f1_weighted,
        }
    }
}

/// Rows ranked best first by macro-F1.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    rows: Vec<ComparisonRow>,
}

impl ComparisonReport {
    /// Sort by descending macro-F1; ties keep their input order.
    pub fn ranked(mut rows: Vec<ComparisonRow>) -> Self {
        rows.sort_by(|a, b| b.f1_macro.total_cmp(&a.f1_macro));
        ComparisonReport { rows }
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn best(&self) -> Option<&ComparisonRow> {
        self.rows.first()
    }

    pub fn top(&self, n: usize) -> &[ComparisonRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), TrainError> {
        ensure_parent(path)?;
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|e| TrainError::io(path, e))?;
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<(), TrainError> {
        ensure_parent(path)?;
        let json = serde_json::to_string_pretty(&self.rows)?;
        fs::write(path, json).map_err(|e| TrainError::io(path, e))
    }

    /// Macro-F1 bar chart, in ranked order.
    pub fn write_chart(&self, path: &Path) -> Result<(), TrainError> {
        let bars: Vec<(String, f64)> = self
            .rows
            .iter()
            .map(|r| (r.model_key.clone(), r.f1_macro))
            .collect();
        save_bar_chart(&bars, CHART_TITLE, "f1_macro", path)?;
        Ok(())
    }
}

pub(crate) fn ensure_parent(path: &Path) -> Result<(), TrainError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| TrainError::io(parent, e))
        }
        _ => Ok(()),
    }
}
