use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("model could not be loaded: {0}")]
    ModelLoad(String),
    #[error("{0}")]
    Preprocess(String),
    #[error("{0}")]
    Prediction(String),
    #[error("label set does not match model output: {0}")]
    ConfigMismatch(String),
    #[error("Model not loaded")]
    ModelUnavailable,
    #[error("{0}")]
    InvalidInput(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
