//! The trained artifact: optional scaler plus fitted estimator.

use std::fs;
use std::path::Path;

use maternal_core::schema::{FEATURE_COLUMNS, N_FEATURES};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::estimators::FittedEstimator;
use crate::registry::{ModelKey, ModelSpec};
use crate::scaler::StandardScaler;
use crate::{Estimator, Predictor};

/// Everything needed to turn a raw feature row into a class code.
///
/// Serialized as JSON. `feature_names` records the column order used at fit
/// time so a loader can refuse an artifact built for a different layout.
#[derive(Debug, Serialize, Deserialize)]
pub struct Pipeline {
    model_key: ModelKey,
    feature_names: Vec<String>,
    scaler: Option<StandardScaler>,
    estimator: FittedEstimator,
}

impl Pipeline {
    /// Fit the scaler (for models that need scaled inputs) and then the estimator.
    pub fn fit(
        spec: &ModelSpec,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
    ) -> Result<Self, ModelError> {
        if x.ncols() != N_FEATURES {
            return Err(ModelError::ShapeMismatch {
                what: "feature columns",
                expected: N_FEATURES,
                actual: x.ncols(),
            });
        }

        let (scaler, estimator) = if spec.needs_scaling {
            let scaler = StandardScaler::fit(x)?;
            let scaled = scaler.transform(x)?;
            let estimator = spec.estimator.fit(scaled.view(), y)?;
            (Some(scaler), estimator)
        } else {
            (None, spec.estimator.fit(x, y)?)
        };

        tracing::debug!(model_key = %spec.key, scaled = spec.needs_scaling, "pipeline fitted");

        Ok(Pipeline {
            model_key: spec.key,
            feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            scaler,
            estimator,
        })
    }

    pub fn model_key(&self) -> ModelKey {
        self.model_key
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn is_scaled(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn estimator(&self) -> &FittedEstimator {
        &self.estimator
    }

    /// Predict a single feature row.
    pub fn predict_row(&self, row: &[f64; N_FEATURES]) -> Result<usize, ModelError> {
        let x = Array2::from_shape_vec((1, N_FEATURES), row.to_vec()).map_err(|_| {
            ModelError::ShapeMismatch {
                what: "feature columns",
                expected: N_FEATURES,
                actual: row.len(),
            }
        })?;
        let predicted = self.predict(x.view())?;
        predicted.first().copied().ok_or(ModelError::ShapeMismatch {
            what: "prediction rows",
            expected: 1,
            actual: 0,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| io_error(path, e))?;
        }
        let json = serde_json::to_vec(self)?;
        fs::write(path, json).map_err(|e| io_error(path, e))?;
        tracing::info!(path = %path.display(), model_key = %self.model_key, "model saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        let pipeline: Pipeline = serde_json::from_slice(&bytes)?;

        if pipeline.feature_names.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
            return Err(ModelError::FeatureMismatch {
                expected: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: pipeline.feature_names,
            });
        }

        tracing::info!(path = %path.display(), model_key = %pipeline.model_key, "model loaded");
        Ok(pipeline)
    }
}

impl Predictor for Pipeline {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>, ModelError> {
        match &self.scaler {
            Some(scaler) => {
                let scaled = scaler.transform(x)?;
                self.estimator.predict(scaled.view())
            }
            None => self.estimator.predict(x),
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ModelError {
    ModelError::Io {
        path: path.display().to_string(),
        source,
    }
}
