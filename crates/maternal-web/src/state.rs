use std::sync::Arc;

use tera::Tera;

use crate::inference::InferenceService;
use crate::templates;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub inference: Arc<InferenceService>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(inference: InferenceService) -> Result<Self, tera::Error> {
        Ok(AppState {
            inference: Arc::new(inference),
            templates: Arc::new(templates::load()?),
        })
    }
}
