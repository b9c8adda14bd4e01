mod adapters;
mod application;
mod config;
mod domain;

use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::adapters::{
    http::{self, state::HttpState},
    onnx::{classifier::OnnxClassifier, model_catalog::OnnxModelCatalog},
    ui,
};
use crate::application::{ports::ModelCatalogPort, services::ClassificationService};
use crate::config::{AppConfig, Frontend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logs (RUST_LOG=info por defecto)
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    // 2. Configuración desde el entorno
    let cfg = AppConfig::from_env()?;
    tracing::info!("🔧 Interfaz {:?}, modelo {} ({})", cfg.frontend, cfg.model.name, cfg.model.onnx_path);

    // 3. Cargar el modelo. Cualquier fallo aquí detiene el proceso antes de aceptar peticiones.
    OnnxModelCatalog::new().validate_model(&cfg.model).await.inspect_err(|e| {
        tracing::error!("❌ Failed to load model: {}", e);
    })?;
    let classifier = Arc::new(OnnxClassifier::load(&cfg.model, &cfg.runtime)?);

    // 4. Servicio compartido; valida etiquetas contra la salida del modelo.
    let service = ClassificationService::new(classifier, cfg.labels.clone(), cfg.model.clone())
        .inspect_err(|e| tracing::error!("❌ {}", e))?;
    let state = HttpState { classifier: Arc::new(service) };

    // 5. Una sola interfaz por proceso
    let app = match cfg.frontend {
        Frontend::Api => http::router(state, &cfg.server),
        Frontend::Ui => ui::router(state, &cfg.server),
    };

    let listener = tokio::net::TcpListener::bind(cfg.bind).await?;
    tracing::info!("🚀 Clasificador escuchando en http://{}", cfg.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
