//! Tree ensembles built from linfa CART trees.
//!
//! Random Forest and Extra Trees share this family: each member sees a
//! random subset of the features and, for the forest, a bootstrap sample of
//! the rows. Members vote; the majority class wins.

use linfa::Dataset;
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{FittedEstimator, argmax_rows, class_counts, n_classes};
use crate::error::ModelError;
use crate::{Estimator, Predictor, check_features, check_training_set};

/// How many features each member tree may split on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    Sqrt,
    All,
}

impl MaxFeatures {
    fn resolve(self, n_features: usize) -> usize {
        match self {
            MaxFeatures::Sqrt => ((n_features as f64).sqrt() as usize).max(1),
            MaxFeatures::All => n_features,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    /// Resample rows with replacement for each member.
    pub bootstrap: bool,
    pub max_features: MaxFeatures,
    pub max_depth: Option<usize>,
    /// Weight samples inversely to their class frequency.
    pub balanced_class_weight: bool,
    pub seed: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Member {
    features: Vec<usize>,
    tree: DecisionTree<f64, usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FittedForest {
    n_features: usize,
    n_classes: usize,
    members: Vec<Member>,
}

impl FittedForest {
    pub fn n_members(&self) -> usize {
        self.members.len()
    }
}

impl Estimator for ForestParams {
    fn fit(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
    ) -> Result<FittedEstimator, ModelError> {
        check_training_set(&x, &y)?;
        if self.n_estimators == 0 {
            return Err(ModelError::fit("tree ensemble", "n_estimators must be positive"));
        }

        let n_samples = x.nrows();
        let n_features = x.ncols();
        let n_classes = n_classes(&y);
        let sample_weights = if self.balanced_class_weight {
            balanced_weights(&y, n_classes)
        } else {
            vec![1.0; n_samples]
        };
        let subset_size = self.max_features.resolve(n_features);

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut members = Vec::with_capacity(self.n_estimators);

        for _ in 0..self.n_estimators {
            let rows: Vec<usize> = if self.bootstrap {
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
            } else {
                (0..n_samples).collect()
            };
            let mut features =
                rand::seq::index::sample(&mut rng, n_features, subset_size).into_vec();
            features.sort_unstable();

            let records = x.select(Axis(0), &rows).select(Axis(1), &features);
            let targets = y.select(Axis(0), &rows);
            let weights: Array1<f32> = rows.iter().map(|&r| sample_weights[r]).collect();
            let dataset = Dataset::new(records, targets).with_weights(weights);

            let tree = DecisionTree::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(self.max_depth)
                .fit(&dataset)
                .map_err(|e| ModelError::fit("decision tree", e))?;

            members.push(Member { features, tree });
        }

        tracing::debug!(
            members = members.len(),
            features_per_tree = subset_size,
            "tree ensemble fitted"
        );

        Ok(FittedEstimator::TreeEnsemble(FittedForest {
            n_features,
            n_classes,
            members,
        }))
    }
}

impl Predictor for FittedForest {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<usize>, ModelError> {
        check_features(&x, self.n_features)?;

        let mut votes = Array2::<usize>::zeros((x.nrows(), self.n_classes.max(1)));
        for member in &self.members {
            let records = x.select(Axis(1), &member.features);
            let predicted: Array1<usize> = member.tree.predict(&records);
            for (row, &class) in predicted.iter().enumerate() {
                if class < self.n_classes {
                    votes[[row, class]] += 1;
                }
            }
        }
        Ok(argmax_rows(&votes))
    }
}

/// `n_samples / (n_classes * count[class])` per sample.
fn balanced_weights(y: &ArrayView1<'_, usize>, n_classes: usize) -> Vec<f32> {
    let counts = class_counts(y, n_classes);
    let present = counts.iter().filter(|&&c| c > 0).count().max(1);
    let n_samples = y.len() as f32;
    y.iter()
        .map(|&class| n_samples / (present as f32 * counts[class] as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn balanced_weights_equalize_class_mass() {
        let y = array![0, 0, 0, 1];
        let weights = balanced_weights(&y.view(), 2);
        let class0: f32 = weights[..3].iter().sum();
        let class1: f32 = weights[3];
        assert!((class0 - class1).abs() < 1e-6);
    }

    #[test]
    fn sqrt_features_is_at_least_one() {
        assert_eq!(MaxFeatures::Sqrt.resolve(7), 2);
        assert_eq!(MaxFeatures::Sqrt.resolve(1), 1);
        assert_eq!(MaxFeatures::All.resolve(7), 7);
    }
}
