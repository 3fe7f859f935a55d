//! maternal-models
//!
//! The model catalog and everything needed to train, persist and reload a
//! classifier: the estimator traits, one implementation per algorithm
//! family, a standard scaler, and the scaler+estimator pipeline artifact.
//!
//! All estimators work on class codes (`usize`); label text lives in
//! `maternal-core`.

pub mod error;
pub mod estimators;
pub mod pipeline;
pub mod registry;
pub mod scaler;

use ndarray::{Array1, ArrayView1, ArrayView2};

use error::ModelError;
use estimators::FittedEstimator;

pub use pipeline::Pipeline;
pub use registry::{ModelKey, ModelSpec, get_model_spec, model_specs};

/// A configured learning algorithm that has not seen data yet.
pub trait Estimator {
    /// Fit on a feature matrix (one row per sample) and its class codes.
    fn fit(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, usize>)
    -> Result<FittedEstimator, ModelError>;
}

/// A trained model mapping feature rows to class codes.
pub trait Predictor {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>, ModelError>;
}

/// Shared precondition for every `fit`: non-empty and aligned.
pub(crate) fn check_training_set(
    x: &ArrayView2<'_, f64>,
    y: &ArrayView1<'_, usize>,
) -> Result<(), ModelError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(ModelError::EmptyTrainingSet);
    }
    if x.nrows() != y.len() {
        return Err(ModelError::ShapeMismatch {
            what: "target rows",
            expected: x.nrows(),
            actual: y.len(),
        });
    }
    Ok(())
}

/// Shared precondition for every `predict`: same width as at fit time.
pub(crate) fn check_features(x: &ArrayView2<'_, f64>, expected: usize) -> Result<(), ModelError> {
    if x.ncols() != expected {
        return Err(ModelError::ShapeMismatch {
            what: "feature columns",
            expected,
            actual: x.ncols(),
        });
    }
    Ok(())
}
