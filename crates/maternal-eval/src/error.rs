use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("y_true has {expected} entries but y_pred has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("cannot evaluate an empty prediction set")]
    Empty,

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
