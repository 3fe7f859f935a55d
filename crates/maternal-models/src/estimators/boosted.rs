use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{FittedEstimator, argmax_rows, n_classes};
use crate::error::ModelError;
use crate::{Estimator, Predictor, check_features, check_training_set};

/// Gradient-boosted regression trees, one booster per class (one-vs-rest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostingParams {
    pub n_estimators: usize,
    pub max_depth: u32,
    pub learning_rate: f32,
}

#[derive(Serialize, Deserialize)]
pub struct FittedBoosting {
    n_features: usize,
    boosters: Vec<GBDT>,
}

impl std::fmt::Debug for FittedBoosting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittedBoosting")
            .field("n_features", &self.n_features)
            .field("boosters", &self.boosters.len())
            .finish()
    }
}

impl BoostingParams {
    fn config(&self, n_features: usize) -> Config {
        let mut cfg = Config::new();
        cfg.set_feature_size(n_features);
        cfg.set_max_depth(self.max_depth);
        cfg.set_iterations(self.n_estimators);
        cfg.set_shrinkage(self.learning_rate);
        cfg.set_loss("SquaredError");
        cfg.set_data_sample_ratio(1.0);
        cfg.set_feature_sample_ratio(1.0);
        cfg
    }
}

impl Estimator for BoostingParams {
    fn fit(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
    ) -> Result<FittedEstimator, ModelError> {
        check_training_set(&x, &y)?;
        let n_features = x.ncols();
        let cfg = self.config(n_features);

        let boosters = (0..n_classes(&y))
            .map(|class| {
                let mut data: DataVec = x
                    .rows()
                    .into_iter()
                    .zip(y.iter())
                    .map(|(row, &target)| {
                        let label = if target == class { 1.0 } else { 0.0 };
                        Data::new_training_data(to_f32(row), 1.0, label, None)
                    })
                    .collect();
                let mut booster = GBDT::new(&cfg);
                booster.fit(&mut data);
                booster
            })
            .collect();

        Ok(FittedEstimator::GradientBoosting(FittedBoosting {
            n_features,
            boosters,
        }))
    }
}

impl Predictor for FittedBoosting {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>, ModelError> {
        check_features(&x, self.n_features)?;
        let data: DataVec = x
            .rows()
            .into_iter()
            .map(|row| Data::new_test_data(to_f32(row), None))
            .collect();

        let mut scores = Array2::<f32>::zeros((x.nrows(), self.boosters.len().max(1)));
        for (class, booster) in self.boosters.iter().enumerate() {
            for (row, score) in booster.predict(&data).into_iter().enumerate() {
                scores[[row, class]] = score;
            }
        }
        Ok(argmax_rows(&scores))
    }
}

fn to_f32(row: ArrayView1<'_, f64>) -> Vec<f32> {
    row.iter().map(|&v| v as f32).collect()
}
