use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    application::{dto::HealthResponse, ports::ClassifierPort},
    domain::{
        errors::{DomainError, DomainResult},
        model::{ClassLabels, ModelSource, SUPPORTED_FORMATS},
        prediction::{format_prediction, PredictionResult},
        preprocess::preprocess_image,
    },
};

/// Pipeline compartido por las dos interfaces: subida -> preprocesado -> inferencia -> formato.
#[derive(Clone)]
pub struct ClassificationService {
    classifier: Arc<dyn ClassifierPort>,
    labels: ClassLabels,
    model: ModelSource,
}

impl ClassificationService {
    /// Falla si el modelo declara una salida de distinta anchura que las etiquetas.
    pub fn new(
        classifier: Arc<dyn ClassifierPort>,
        labels: ClassLabels,
        model: ModelSource,
    ) -> DomainResult<Self> {
        labels.check_output_width(classifier.output_width())?;
        Ok(Self { classifier, labels, model })
    }

    pub fn model(&self) -> &ModelSource {
        &self.model
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.is_loaded()
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "healthy".to_string(),
            model_loaded: self.is_loaded(),
            supported_formats: SUPPORTED_FORMATS.iter().map(|s| s.to_string()).collect(),
            classes: self.labels.as_slice().to_vec(),
        }
    }

    pub async fn classify(&self, image_bytes: Vec<u8>) -> DomainResult<PredictionResult> {
        if !self.is_loaded() {
            return Err(DomainError::ModelUnavailable);
        }

        // Decodificar y redimensionar es trabajo de CPU: fuera del runtime async.
        let tensor = tokio::task::spawn_blocking(move || preprocess_image(&image_bytes))
            .await
            .map_err(|e| DomainError::Prediction(format!("preprocessing task failed: {e}")))??;

        let vector = self.classifier.predict(tensor).await?;
        let result = format_prediction(&vector, &self.labels)?;

        info!(
            "Prediction made: {} with {}% confidence",
            result.predicted_class, result.confidence
        );
        Ok(result)
    }
}

/// Registra un fallo de clasificación con el nivel que corresponde a su causa.
pub fn log_failure(err: &DomainError) {
    match err {
        DomainError::Preprocess(msg) => warn!("Imagen rechazada: {}", msg),
        other => tracing::error!("Prediction error: {}", other),
    }
}
