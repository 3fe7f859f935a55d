use axum::extract::State;
use axum::response::Html;
use axum::{Form, Json};

use maternal_core::Observation;

use crate::error::ApiError;
use crate::routes::pages::{IndexPage, render_index};
use crate::schemas::{PredictForm, PredictResponse, validate, validation_message};
use crate::state::AppState;

/// Form submission. Bad input re-renders the page with the reasons instead
/// of failing the request.
pub async fn predict_form(
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> Result<Html<String>, ApiError> {
    let page = match form.to_observation() {
        Ok(observation) => IndexPage {
            result: Some(state.inference.predict(&observation).await?),
            error: None,
            form,
        },
        Err(errors) => {
            tracing::info!(errors = errors.len(), "form validation failed");
            IndexPage {
                result: None,
                error: Some(validation_message(&errors)),
                form,
            }
        }
    };
    render_index(&state, &page)
}

pub async fn predict_api(
    State(state): State<AppState>,
    Json(observation): Json<Observation>,
) -> Result<Json<PredictResponse>, ApiError> {
    validate(&observation).map_err(ApiError::Validation)?;
    let risk_level = state.inference.predict(&observation).await?;
    Ok(Json(PredictResponse { risk_level }))
}
