use linfa::Dataset;
use linfa::prelude::*;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::FittedEstimator;
use crate::error::ModelError;
use crate::{Estimator, Predictor, check_features, check_training_set};

/// Multinomial logistic regression with L2 regularization (linfa-logistic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    /// L2 penalty strength.
    pub alpha: f64,
    pub max_iterations: u64,
    pub gradient_tolerance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FittedLogistic {
    n_features: usize,
    model: MultiFittedLogisticRegression<f64, usize>,
}

impl Estimator for LogisticParams {
    fn fit(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
    ) -> Result<FittedEstimator, ModelError> {
        check_training_set(&x, &y)?;
        let dataset = Dataset::new(x.to_owned(), y.to_owned());

        let model = MultiLogisticRegression::default()
            .alpha(self.alpha)
            .max_iterations(self.max_iterations)
            .gradient_tolerance(self.gradient_tolerance)
            .fit(&dataset)
            .map_err(|e| ModelError::fit("logistic regression", e))?;

        Ok(FittedEstimator::LogisticRegression(FittedLogistic {
            n_features: x.ncols(),
            model,
        }))
    }
}

impl Predictor for FittedLogistic {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>, ModelError> {
        check_features(&x, self.n_features)?;
        let predicted: Array1<usize> = self.model.predict(&x);
        Ok(predicted)
    }
}
