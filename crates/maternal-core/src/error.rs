use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown risk level: {0:?}")]
    UnknownRiskLevel(String),

    #[error("unknown class code: {0}")]
    UnknownClassCode(usize),
}
