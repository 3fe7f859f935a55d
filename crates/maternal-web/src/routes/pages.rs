use axum::extract::State;
use axum::response::Html;
use serde::Serialize;
use tera::Context;

use crate::error::ApiError;
use crate::schemas::{FIELD_BOUNDS, FieldBound, PredictForm};
use crate::state::AppState;
use crate::templates;

#[derive(Serialize)]
struct FormField {
    #[serde(flatten)]
    bound: FieldBound,
    value: String,
}

/// Everything `index.html` needs: the form (refilled after a submission)
/// and at most one of a result or an error message.
#[derive(Default)]
pub struct IndexPage {
    pub result: Option<String>,
    pub error: Option<String>,
    pub form: PredictForm,
}

impl IndexPage {
    fn fields(&self) -> Vec<FormField> {
        let f = &self.form;
        let values = [
            &f.age,
            &f.systolic_bp,
            &f.diastolic_bp,
            &f.bs,
            &f.body_temp,
            &f.heart_rate,
        ];
        FIELD_BOUNDS
            .iter()
            .zip(values)
            .map(|(bound, value)| FormField {
                bound: *bound,
                value: value.clone(),
            })
            .collect()
    }
}

pub fn render_index(state: &AppState, page: &IndexPage) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    context.insert("result", &page.result);
    context.insert("error", &page.error);
    context.insert("fields", &page.fields());
    Ok(Html(state.templates.render(templates::INDEX, &context)?))
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render_index(&state, &IndexPage::default())
}

pub async fn about(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    context.insert("fields", &FIELD_BOUNDS);
    Ok(Html(state.templates.render(templates::ABOUT, &context)?))
}
