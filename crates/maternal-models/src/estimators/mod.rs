//! Algorithm families behind the [`Estimator`] / [`Predictor`] contract.
//!
//! [`EstimatorConfig`] is the hyperparameter half (what the registry hands
//! out), [`FittedEstimator`] the trained half (what gets persisted). Both are
//! closed enums so a saved pipeline always names its algorithm.

#[cfg(feature = "gbdt")]
pub mod boosted;
pub mod dummy;
pub mod forest;
pub mod logistic;
pub mod mlp;

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::{Estimator, Predictor};

#[cfg(feature = "gbdt")]
use boosted::{BoostingParams, FittedBoosting};
use dummy::{DummyParams, FittedDummy};
use forest::{FittedForest, ForestParams};
use logistic::{FittedLogistic, LogisticParams};
use mlp::{FittedMlp, MlpParams};

/// Algorithm identity plus hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "params", rename_all = "snake_case")]
pub enum EstimatorConfig {
    MostFrequent(DummyParams),
    LogisticRegression(LogisticParams),
    TreeEnsemble(ForestParams),
    Mlp(MlpParams),
    #[cfg(feature = "gbdt")]
    GradientBoosting(BoostingParams),
}

impl EstimatorConfig {
    /// Flat `name -> value` view of the hyperparameters, for run tracking.
    pub fn hyperparameters(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        let Ok(serde_json::Value::Object(tagged)) = serde_json::to_value(self) else {
            return params;
        };
        if let Some(serde_json::Value::String(algorithm)) = tagged.get("algorithm") {
            params.insert("algorithm".to_string(), algorithm.clone());
        }
        if let Some(serde_json::Value::Object(fields)) = tagged.get("params") {
            for (name, value) in fields {
                let rendered = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Null => "None".to_string(),
                    other => other.to_string(),
                };
                params.insert(name.clone(), rendered);
            }
        }
        params
    }
}

impl Estimator for EstimatorConfig {
    fn fit(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
    ) -> Result<FittedEstimator, ModelError> {
        match self {
            EstimatorConfig::MostFrequent(p) => p.fit(x, y),
            EstimatorConfig::LogisticRegression(p) => p.fit(x, y),
            EstimatorConfig::TreeEnsemble(p) => p.fit(x, y),
            EstimatorConfig::Mlp(p) => p.fit(x, y),
            #[cfg(feature = "gbdt")]
            EstimatorConfig::GradientBoosting(p) => p.fit(x, y),
        }
    }
}

/// A trained model of any supported family.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "model", rename_all = "snake_case")]
pub enum FittedEstimator {
    MostFrequent(FittedDummy),
    LogisticRegression(FittedLogistic),
    TreeEnsemble(FittedForest),
    Mlp(FittedMlp),
    #[cfg(feature = "gbdt")]
    GradientBoosting(FittedBoosting),
}

impl Predictor for FittedEstimator {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>, ModelError> {
        match self {
            FittedEstimator::MostFrequent(m) => m.predict(x),
            FittedEstimator::LogisticRegression(m) => m.predict(x),
            FittedEstimator::TreeEnsemble(m) => m.predict(x),
            FittedEstimator::Mlp(m) => m.predict(x),
            #[cfg(feature = "gbdt")]
            FittedEstimator::GradientBoosting(m) => m.predict(x),
        }
    }
}

/// Class count implied by the largest code present.
pub(crate) fn n_classes(y: &ArrayView1<'_, usize>) -> usize {
    y.iter().max().map_or(0, |&m| m + 1)
}

/// Occurrences of each class code.
pub(crate) fn class_counts(y: &ArrayView1<'_, usize>, n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &class in y {
        counts[class] += 1;
    }
    counts
}

/// Column index of each row's maximum; the first index wins ties.
pub(crate) fn argmax_rows<T: PartialOrd + Copy>(scores: &Array2<T>) -> Array1<usize> {
    scores
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            for (idx, &value) in row.iter().enumerate() {
                if value > row[best] {
                    best = idx;
                }
            }
            best
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn argmax_prefers_first_on_ties() {
        let scores = array![[1, 3, 3], [5, 0, 5], [0, 0, 1]];
        assert_eq!(argmax_rows(&scores).to_vec(), vec![1, 0, 2]);
    }

    #[test]
    fn hyperparameters_flatten_params() {
        let config = EstimatorConfig::LogisticRegression(LogisticParams {
            alpha: 1.0,
            max_iterations: 2000,
            gradient_tolerance: 1e-4,
        });
        let params = config.hyperparameters();
        assert_eq!(params["algorithm"], "logistic_regression");
        assert_eq!(params["max_iterations"], "2000");
    }
}
