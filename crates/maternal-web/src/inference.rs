//! Lazily loaded model behind the prediction routes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use maternal_core::schema::N_FEATURES;
use maternal_core::{Observation, RiskLevel};
use maternal_models::Pipeline;
use maternal_models::error::ModelError;
use tokio::sync::OnceCell;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("failed to load model from {}: {source}", path.display())]
    Load { path: PathBuf, source: ModelError },

    #[error("no model is configured")]
    NoModel,

    #[error("prediction failed: {0}")]
    Predict(#[from] ModelError),
}

/// What a model hands back for one row, before it is turned into a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPrediction {
    Code(usize),
    Label(String),
}

pub trait RiskPredictor: Send + Sync {
    fn predict_raw(&self, features: &[f64; N_FEATURES]) -> Result<RawPrediction, InferenceError>;
}

impl RiskPredictor for Pipeline {
    fn predict_raw(&self, features: &[f64; N_FEATURES]) -> Result<RawPrediction, InferenceError> {
        Ok(RawPrediction::Code(self.predict_row(features)?))
    }
}

/// Holds at most one model per process.
///
/// The first successful load is kept for the life of the service. A failed
/// load is reported to its caller and the next request tries again.
pub struct InferenceService {
    model_path: Option<PathBuf>,
    model: OnceCell<Arc<dyn RiskPredictor>>,
}

impl InferenceService {
    pub fn from_path(model_path: impl AsRef<Path>) -> Self {
        InferenceService {
            model_path: Some(model_path.as_ref().to_path_buf()),
            model: OnceCell::new(),
        }
    }

    pub fn with_predictor(predictor: Arc<dyn RiskPredictor>) -> Self {
        InferenceService {
            model_path: None,
            model: OnceCell::new_with(Some(predictor)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    async fn model(&self) -> Result<&Arc<dyn RiskPredictor>, InferenceError> {
        self.model
            .get_or_try_init(|| async {
                let path = self.model_path.as_deref().ok_or(InferenceError::NoModel)?;
                let pipeline = Pipeline::load(path).map_err(|source| InferenceError::Load {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok::<_, InferenceError>(Arc::new(pipeline) as Arc<dyn RiskPredictor>)
            })
            .await
    }

    /// Predict the display label ("Low", "Mid", "High") for one observation.
    pub async fn predict(&self, observation: &Observation) -> Result<String, InferenceError> {
        let model = self.model().await?;
        let raw = model.predict_raw(&observation.feature_vector())?;
        let label = risk_label(&raw);
        tracing::debug!(risk_level = %label, "prediction served");
        Ok(label)
    }
}

pub fn risk_label(raw: &RawPrediction) -> String {
    match raw {
        RawPrediction::Code(code) => match RiskLevel::from_code(*code) {
            Ok(level) => level.display_name().to_string(),
            Err(_) => code.to_string(),
        },
        RawPrediction::Label(label) => title_case(label),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
