use std::sync::Arc;
use crate::application::services::ClassificationService;

/// Estado compartido para los manejadores HTTP de Axum.
/// Se construye una sola vez en el arranque, con el modelo ya cargado.
#[derive(Clone)]
pub struct HttpState {
    pub classifier: Arc<ClassificationService>,
}
