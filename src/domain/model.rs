use serde::Serialize;

use super::errors::{DomainError, DomainResult};

/// Lado del cuadrado de entrada que espera la red (224x224).
pub const INPUT_SIZE: u32 = 224;
/// Canales de color de la entrada (RGB).
pub const INPUT_CHANNELS: usize = 3;

/// Formatos de subida aceptados, tal y como se anuncian en `/health`.
pub const SUPPORTED_FORMATS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Tipos MIME admitidos en `/predict`.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Compara sin mayúsculas y sin parámetros (`image/png; charset=...`).
pub fn is_allowed_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES.contains(&essence.as_str())
}

pub fn is_supported_extension(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_FORMATS.contains(&ext.as_str()))
}

#[derive(Debug, Clone)]
pub struct ModelSource {
    pub name: String,       // nombre lógico, p. ej. "tumour_cnn_model"
    pub onnx_path: String,  // ruta en disco
}

impl ModelSource {
    pub fn from_path(path: impl Into<String>) -> Self {
        let onnx_path = path.into();
        let name = std::path::Path::new(&onnx_path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "model".to_string());
        Self { name, onnx_path }
    }
}

/// Parámetros del runtime de inferencia.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub intra_threads: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self { intra_threads: 4 }
    }
}

/// Conjunto ordenado de etiquetas: la posición i nombra la salida i del modelo.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassLabels(Vec<String>);

impl ClassLabels {
    pub fn new<I, S>(labels: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(DomainError::InvalidInput("label set is empty".into()));
        }
        if labels.iter().any(|l| l.trim().is_empty()) {
            return Err(DomainError::InvalidInput("label set contains a blank label".into()));
        }
        Ok(Self(labels))
    }

    /// Las cuatro clases del clasificador de tumores cerebrales.
    pub fn brain_tumor() -> Self {
        Self(
            ["Glioma", "Meningioma", "No Tumor", "Pituitary"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comprueba que el número de etiquetas coincide con la anchura de salida del modelo.
    /// Una anchura desconocida (eje dinámico) no se puede validar aquí.
    pub fn check_output_width(&self, width: Option<usize>) -> DomainResult<()> {
        match width {
            Some(w) if w != self.len() => Err(DomainError::ConfigMismatch(format!(
                "model produces {} classes but {} labels are configured",
                w,
                self.len()
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brain_tumor_labels_keep_model_order() {
        let labels = ClassLabels::brain_tumor();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels.get(0), Some("Glioma"));
        assert_eq!(labels.get(2), Some("No Tumor"));
        assert_eq!(labels.get(4), None);
    }

    #[test]
    fn empty_or_blank_labels_are_rejected() {
        assert!(ClassLabels::new(Vec::<String>::new()).is_err());
        assert!(ClassLabels::new(["a", " "]).is_err());
        assert!(ClassLabels::new(["a", "b"]).is_ok());
    }

    #[test]
    fn output_width_must_match_label_count() {
        let labels = ClassLabels::brain_tumor();
        assert!(labels.check_output_width(Some(4)).is_ok());
        assert!(labels.check_output_width(None).is_ok());
        assert!(matches!(
            labels.check_output_width(Some(3)),
            Err(DomainError::ConfigMismatch(_))
        ));
    }

    #[test]
    fn content_types_are_matched_on_essence() {
        assert!(is_allowed_content_type("image/png"));
        assert!(is_allowed_content_type("IMAGE/JPEG"));
        assert!(is_allowed_content_type("image/jpg; q=1"));
        assert!(!is_allowed_content_type("text/plain"));
        assert!(!is_allowed_content_type("image/gif"));
        assert!(!is_allowed_content_type(""));
    }

    #[test]
    fn extensions_follow_supported_formats() {
        assert!(is_supported_extension("scan.PNG"));
        assert!(is_supported_extension("dir/scan.jpeg"));
        assert!(!is_supported_extension("scan.bmp"));
        assert!(!is_supported_extension("scan"));
    }

    #[test]
    fn model_name_comes_from_file_stem() {
        let src = ModelSource::from_path("models/tumour_cnn_model.onnx");
        assert_eq!(src.name, "tumour_cnn_model");
        assert_eq!(src.onnx_path, "models/tumour_cnn_model.onnx");
    }
}
