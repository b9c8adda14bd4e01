use serde::Serialize;

pub const API_MESSAGE: &str = "Brain Tumor MRI Classifier API is running";

#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self { message: API_MESSAGE.to_string(), status: "healthy".to_string() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub supported_formats: Vec<String>,
    pub classes: Vec<String>,
}

/// Cuerpo de error: solo el mensaje, nunca una traza.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
