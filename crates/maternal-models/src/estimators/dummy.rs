use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{FittedEstimator, class_counts, n_classes};
use crate::error::ModelError;
use crate::{Estimator, Predictor, check_features, check_training_set};

/// Baseline that always predicts the most frequent training class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DummyParams {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedDummy {
    class: usize,
    n_features: usize,
}

impl FittedDummy {
    pub fn class(&self) -> usize {
        self.class
    }
}

impl Estimator for DummyParams {
    fn fit(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
    ) -> Result<FittedEstimator, ModelError> {
        check_training_set(&x, &y)?;
        let counts = class_counts(&y, n_classes(&y));
        // Lowest code wins a tie.
        let class = counts
            .iter()
            .enumerate()
            .fold(0, |best, (idx, &count)| if count > counts[best] { idx } else { best });

        Ok(FittedEstimator::MostFrequent(FittedDummy {
            class,
            n_features: x.ncols(),
        }))
    }
}

impl Predictor for FittedDummy {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>, ModelError> {
        check_features(&x, self.n_features)?;
        Ok(Array1::from_elem(x.nrows(), self.class))
    }
}
