use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

/// Fichero recibido en el campo `file` de un formulario multipart.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadError {
    pub status: StatusCode,
    pub message: String,
}

impl From<MultipartError> for UploadError {
    fn from(e: MultipartError) -> Self {
        Self { status: e.status(), message: e.body_text() }
    }
}

pub const FILE_FIELD: &str = "file";

/// Lee el primer campo `file`; el resto de campos se ignora.
pub async fn read_upload(multipart: &mut Multipart) -> Result<Upload, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();
        return Ok(Upload { filename, content_type, bytes });
    }
    Err(UploadError {
        status: StatusCode::BAD_REQUEST,
        message: "No file uploaded".to_string(),
    })
}
