//! The fixed catalog of candidate models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "gbdt")]
use crate::estimators::boosted::BoostingParams;
use crate::estimators::EstimatorConfig;
use crate::estimators::dummy::DummyParams;
use crate::estimators::forest::{ForestParams, MaxFeatures};
use crate::estimators::logistic::LogisticParams;
use crate::estimators::mlp::MlpParams;
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKey {
    Dummy,
    Logreg,
    Rf,
    Extratrees,
    Mlp,
    #[cfg(feature = "gbdt")]
    Gbdt,
}

impl ModelKey {
    /// Every key compiled into this build, in registry order.
    pub const ALL: &'static [ModelKey] = &[
        ModelKey::Dummy,
        ModelKey::Logreg,
        ModelKey::Rf,
        ModelKey::Extratrees,
        ModelKey::Mlp,
        #[cfg(feature = "gbdt")]
        ModelKey::Gbdt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKey::Dummy => "dummy",
            ModelKey::Logreg => "logreg",
            ModelKey::Rf => "rf",
            ModelKey::Extratrees => "extratrees",
            ModelKey::Mlp => "mlp",
            #[cfg(feature = "gbdt")]
            ModelKey::Gbdt => "gbdt",
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ModelError::UnknownModel {
                key: s.to_string(),
                available: available_keys().join(", "),
            })
    }
}

/// One candidate: identity, display name, preprocessing flag and estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub key: ModelKey,
    pub name: String,
    /// Standardize features before fitting.
    pub needs_scaling: bool,
    pub estimator: EstimatorConfig,
}

/// All candidate models, in the order they are compared.
pub fn model_specs(seed: u64) -> Vec<ModelSpec> {
    #[cfg_attr(not(feature = "gbdt"), allow(unused_mut))]
    let mut specs = vec![
        ModelSpec {
            key: ModelKey::Dummy,
            name: "Dummy (most_frequent)".into(),
            needs_scaling: false,
            estimator: EstimatorConfig::MostFrequent(DummyParams::default()),
        },
        ModelSpec {
            key: ModelKey::Logreg,
            name: "Logistic Regression".into(),
            needs_scaling: true,
            estimator: EstimatorConfig::LogisticRegression(LogisticParams {
                alpha: 1.0,
                max_iterations: 2000,
                gradient_tolerance: 1e-4,
            }),
        },
        ModelSpec {
            key: ModelKey::Rf,
            name: "Random Forest".into(),
            needs_scaling: false,
            estimator: EstimatorConfig::TreeEnsemble(ForestParams {
                n_estimators: 300,
                bootstrap: true,
                max_features: MaxFeatures::Sqrt,
                max_depth: None,
                balanced_class_weight: true,
                seed,
            }),
        },
        ModelSpec {
            key: ModelKey::Extratrees,
            name: "Extra Trees".into(),
            needs_scaling: false,
            estimator: EstimatorConfig::TreeEnsemble(ForestParams {
                n_estimators: 500,
                bootstrap: false,
                max_features: MaxFeatures::Sqrt,
                max_depth: None,
                balanced_class_weight: true,
                seed,
            }),
        },
        ModelSpec {
            key: ModelKey::Mlp,
            name: "MLP (Neural Network)".into(),
            needs_scaling: true,
            estimator: EstimatorConfig::Mlp(MlpParams {
                hidden_layers: vec![64, 32],
                alpha: 0.0005,
                learning_rate: 0.001,
                max_epochs: 500,
                batch_size: 200,
                tolerance: 1e-4,
                n_iter_no_change: 10,
                seed,
            }),
        },
    ];

    #[cfg(feature = "gbdt")]
    specs.push(ModelSpec {
        key: ModelKey::Gbdt,
        name: "Gradient Boosted Trees".into(),
        needs_scaling: false,
        estimator: EstimatorConfig::GradientBoosting(BoostingParams {
            n_estimators: 500,
            max_depth: 4,
            learning_rate: 0.05,
        }),
    });

    specs
}

/// Look up a single model by its key string.
pub fn get_model_spec(key: &str, seed: u64) -> Result<ModelSpec, ModelError> {
    let key: ModelKey = key.parse()?;
    model_specs(seed)
        .into_iter()
        .find(|spec| spec.key == key)
        .ok_or_else(|| ModelError::UnknownModel {
            key: key.to_string(),
            available: available_keys().join(", "),
        })
}

pub fn available_keys() -> Vec<&'static str> {
    ModelKey::ALL.iter().map(|k| k.as_str()).collect()
}
