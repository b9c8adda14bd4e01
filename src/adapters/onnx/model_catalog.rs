use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::ModelCatalogPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::ModelSource;

/// Comprobaciones baratas sobre el artefacto antes de crear la sesión ONNX.
pub struct OnnxModelCatalog;

impl OnnxModelCatalog {
    pub fn new() -> Self { Self }
}

#[async_trait]
impl ModelCatalogPort for OnnxModelCatalog {
    async fn validate_model(&self, model: &ModelSource) -> DomainResult<()> {
        if model.onnx_path.trim().is_empty() {
            return Err(DomainError::ModelLoad("onnx_path empty".into()));
        }
        let path = Path::new(&model.onnx_path);
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(DomainError::ModelLoad(format!("not a file: {}", model.onnx_path))),
            Err(_) => Err(DomainError::ModelLoad(format!("model file not found: {}", model.onnx_path))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_empty_missing_and_directory_paths() {
        let catalog = OnnxModelCatalog::new();
        for path in ["", "   ", "definitely/not/here.onnx"] {
            let err = catalog.validate_model(&ModelSource::from_path(path)).await;
            assert!(matches!(err, Err(DomainError::ModelLoad(_))), "path {path:?}");
        }

        let dir = std::env::temp_dir();
        let err = catalog
            .validate_model(&ModelSource::from_path(dir.to_string_lossy().to_string()))
            .await;
        assert!(matches!(err, Err(DomainError::ModelLoad(_))));
    }

    #[tokio::test]
    async fn accepts_existing_file() {
        let path = std::env::temp_dir().join(format!("model_catalog_accepts_existing_file_{}.onnx", std::process::id()));
        std::fs::write(&path, b"placeholder").unwrap();

        let catalog = OnnxModelCatalog::new();
        let res = catalog
            .validate_model(&ModelSource::from_path(path.to_string_lossy().to_string()))
            .await;
        assert!(res.is_ok());
        let _ = std::fs::remove_file(path);
    }
}
