use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};

use crate::adapters::http::upload::UploadError;
use crate::application::dto::ErrorResponse;
use crate::domain::errors::DomainError;

pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload JPEG or PNG images only.";

/// Error de la API: código HTTP más el mensaje que ve el cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Preprocess(msg) => Self::bad_request(format!("Error processing image: {msg}")),
            DomainError::InvalidInput(msg) => Self::bad_request(msg),
            DomainError::ModelUnavailable => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: DomainError::ModelUnavailable.to_string(),
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: format!("Prediction failed: {other}"),
            },
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        Self { status: err.status, detail: err.message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}
