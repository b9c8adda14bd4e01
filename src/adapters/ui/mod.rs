pub mod page;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::adapters::http::{state::HttpState, upload::read_upload};
use crate::application::services::log_failure;
use crate::config::ServerOptions;
use crate::domain::errors::DomainError;
use crate::domain::model::{is_allowed_content_type, is_supported_extension};
use page::Outcome;

/// Página interactiva: un formulario de subida y el resultado debajo.
pub fn router(state: HttpState, opts: &ServerOptions) -> Router {
    Router::new()
        .route("/", get(index).post(upload))
        .layer(DefaultBodyLimit::max(opts.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn page_response(status: StatusCode, model_path: &str, outcome: Outcome<'_>) -> Response {
    match page::render(model_path, outcome) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("❌ Error al renderizar la página: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Page rendering failed").into_response()
        }
    }
}

async fn index(State(st): State<HttpState>) -> Response {
    page_response(StatusCode::OK, &st.classifier.model().onnx_path, Outcome::Empty)
}

async fn upload(State(st): State<HttpState>, multipart: Result<Multipart, MultipartRejection>) -> Response {
    let model_path = st.classifier.model().onnx_path.clone();
    let failed =
        |status: StatusCode, message: &str| page_response(status, &model_path, Outcome::Failed { message });

    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => return failed(StatusCode::BAD_REQUEST, &e.body_text()),
    };
    let upload = match read_upload(&mut multipart).await {
        Ok(u) => u,
        Err(e) => return failed(e.status, &e.message),
    };

    // Igual que el selector de ficheros: vale la extensión o el tipo MIME.
    let accepted = upload.filename.as_deref().is_some_and(is_supported_extension)
        || upload.content_type.as_deref().is_some_and(is_allowed_content_type);
    if !accepted {
        return failed(StatusCode::BAD_REQUEST, "Please upload a JPG or PNG image.");
    }

    match st.classifier.classify(upload.bytes.clone()).await {
        Ok(result) => page_response(
            StatusCode::OK,
            &model_path,
            Outcome::Classified { image: &upload.bytes, result: &result },
        ),
        Err(e) => {
            log_failure(&e);
            let status = match e {
                DomainError::Preprocess(_) | DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            failed(status, &e.to_string())
        }
    }
}
