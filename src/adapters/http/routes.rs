use axum::extract::{multipart::MultipartRejection, Multipart, State};
use axum::Json;

use crate::adapters::http::error::{ApiError, INVALID_FILE_TYPE};
use crate::adapters::http::state::HttpState;
use crate::adapters::http::upload::read_upload;
use crate::application::dto::{HealthResponse, RootResponse};
use crate::application::services::log_failure;
use crate::domain::errors::DomainError;
use crate::domain::model::is_allowed_content_type;
use crate::domain::prediction::PredictionResult;

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}

pub async fn health(State(st): State<HttpState>) -> Json<HealthResponse> {
    Json(st.classifier.health())
}

pub async fn predict(
    State(st): State<HttpState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    if !st.classifier.is_loaded() {
        return Err(DomainError::ModelUnavailable.into());
    }

    let mut multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let upload = read_upload(&mut multipart).await?;

    // El tipo se valida antes de intentar decodificar nada.
    let content_type = upload.content_type.as_deref().unwrap_or_default();
    if !is_allowed_content_type(content_type) {
        tracing::warn!("Tipo de fichero rechazado: {:?}", upload.content_type);
        return Err(ApiError::bad_request(INVALID_FILE_TYPE));
    }

    match st.classifier.classify(upload.bytes).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            log_failure(&e);
            Err(e.into())
        }
    }
}
