use std::env;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use maternal_web::AppState;
use maternal_web::inference::InferenceService;

const DEFAULT_MODEL_PATH: &str = "models/rf.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_STATIC_DIR: &str = "crates/maternal-web/static";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let model_path =
        PathBuf::from(env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string()));
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());

    // The model is loaded lazily by the first prediction.
    let state = AppState::new(InferenceService::from_path(&model_path))?;
    let app = maternal_web::app(state, Path::new(&static_dir));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        addr = %bind_addr,
        model_path = %model_path.display(),
        static_dir = %static_dir,
        "maternal risk predictor listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
