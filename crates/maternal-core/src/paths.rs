//! Artifact path conventions.
//!
//! Pure path functions, no filesystem access. These define the canonical
//! layout of the model and report directories.

use std::path::{Path, PathBuf};

pub const FIGURES_DIR: &str = "figures";

pub const COMPARISON_CSV: &str = "model_comparison.csv";

pub const COMPARISON_JSON: &str = "model_comparison.json";

pub fn model(model_dir: &Path, model_key: &str) -> PathBuf {
    model_dir.join(format!("{model_key}.json"))
}

pub fn figures(report_dir: &Path) -> PathBuf {
    report_dir.join(FIGURES_DIR)
}

pub fn metrics(report_dir: &Path, model_key: &str) -> PathBuf {
    report_dir.join(format!("metrics_{model_key}.json"))
}

pub fn classification_report(report_dir: &Path, model_key: &str) -> PathBuf {
    report_dir.join(format!("classification_report_{model_key}.txt"))
}

pub fn confusion_matrix(report_dir: &Path, model_key: &str) -> PathBuf {
    figures(report_dir).join(format!("confusion_matrix_{model_key}.svg"))
}

pub fn comparison_csv(report_dir: &Path) -> PathBuf {
    report_dir.join(COMPARISON_CSV)
}

pub fn comparison_json(report_dir: &Path) -> PathBuf {
    report_dir.join(COMPARISON_JSON)
}

pub fn comparison_chart(report_dir: &Path) -> PathBuf {
    figures(report_dir).join("model_f1_macro.svg")
}
