use std::path::Path;

use maternal_core::risk;
use maternal_core::schema::N_FEATURES;
use maternal_data::features::{add_features, labeled_rows, normalize_risk_levels};
use maternal_data::load::load_data;
use maternal_data::validate::validate_schema;
use ndarray::{Array1, Array2, Axis};
use tracing::info;

use crate::error::TrainError;
use crate::split::stratified_split;

/// One split of the encoded dataset, shared by every model in a run.
#[derive(Debug, Clone)]
pub struct SplitData {
    pub x_train: Array2<f64>,
    pub y_train: Array1<usize>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<usize>,
}

/// Load, validate, engineer, encode and split the dataset.
pub fn prepare(raw_path: &Path, test_size: f64, seed: u64) -> Result<SplitData, TrainError> {
    let table = load_data(raw_path)?;

    let validation = validate_schema(&table);
    if !validation.ok() {
        return Err(TrainError::Validation(validation.into_errors()));
    }

    let table = normalize_risk_levels(&add_features(&table)?)?;
    let rows = labeled_rows(&table)?;
    let codes = risk::encode(&rows.labels);

    let flat: Vec<f64> = rows.features.iter().flatten().copied().collect();
    let x = Array2::from_shape_vec((rows.len(), N_FEATURES), flat)
        .map_err(|e| TrainError::Split(e.to_string()))?;
    let split = stratified_split(&codes, test_size, seed)?;
    let y = Array1::from(codes);
    info!(
        train_rows = split.train.len(),
        test_rows = split.test.len(),
        test_size,
        seed,
        "dataset split"
    );

    Ok(SplitData {
        x_train: x.select(Axis(0), &split.train),
        y_train: y.select(Axis(0), &split.train),
        x_test: x.select(Axis(0), &split.test),
        y_test: y.select(Axis(0), &split.test),
    })
}
