//! HTTP front-end for the maternal risk classifier.
//!
//! The [`app`] router serves an HTML form, a JSON prediction endpoint, an
//! about page and static assets. Predictions go through
//! [`inference::InferenceService`], which loads the trained pipeline on first
//! use.

use std::path::Path;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub mod error;
pub mod inference;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod state;
pub mod templates;

pub use state::AppState;

pub fn app(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/about", get(routes::pages::about))
        .route("/health", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict_form))
        .route("/api/predict", post(routes::predict::predict_api))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum_mw::from_fn(middleware::request_log::log_request))
        .layer(cors)
        .with_state(state)
}
