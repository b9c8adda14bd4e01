use async_trait::async_trait;
use crate::domain::{errors::DomainResult, model::ModelSource, preprocess::NormalizedTensor};

/// Acceso al clasificador ya cargado. Las implementaciones son de solo lectura
/// tras el arranque y se comparten entre peticiones.
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    /// Un tensor de entrada, un vector de probabilidades por clase.
    async fn predict(&self, input: NormalizedTensor) -> DomainResult<Vec<f32>>;

    fn is_loaded(&self) -> bool;

    /// Anchura de la salida si el modelo la declara de forma estática.
    fn output_width(&self) -> Option<usize>;
}

#[async_trait]
pub trait ModelCatalogPort: Send + Sync {
    async fn validate_model(&self, model: &ModelSource) -> DomainResult<()>;
}
