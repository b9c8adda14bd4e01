use std::collections::HashMap;
use std::net::SocketAddr;

use anyhow::{anyhow, bail, Context, Result};
use axum::http::HeaderValue;

use crate::domain::model::{ClassLabels, ModelSource, RuntimeOptions};

pub const DEFAULT_MODEL_PATH: &str = "models/tumour_cnn_model.onnx";
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Interfaz que sirve el proceso. Nunca se sirven las dos a la vez.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    Api,
    Ui,
}

impl Frontend {
    fn default_bind(&self) -> &'static str {
        match self {
            Frontend::Api => "0.0.0.0:8000",
            Frontend::Ui => "0.0.0.0:8501",
        }
    }
}

impl std::str::FromStr for Frontend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(Frontend::Api),
            "ui" => Ok(Frontend::Ui),
            other => Err(anyhow!("unknown frontend '{other}', expected 'api' or 'ui'")),
        }
    }
}

/// Ajustes de la capa HTTP comunes a ambas interfaces.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub cors_origins: Vec<HeaderValue>,
    pub max_upload_bytes: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            cors_origins: DEFAULT_CORS_ORIGINS.into_iter().map(HeaderValue::from_static).collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub frontend: Frontend,
    pub bind: SocketAddr,
    pub model: ModelSource,
    pub runtime: RuntimeOptions,
    pub labels: ClassLabels,
    pub server: ServerOptions,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let frontend: Frontend = get("CLASSIFIER_FRONTEND").unwrap_or("api").parse()?;

        let bind = get("CLASSIFIER_BIND")
            .unwrap_or(frontend.default_bind())
            .parse::<SocketAddr>()
            .context("CLASSIFIER_BIND must be host:port")?;

        let model = ModelSource::from_path(get("CLASSIFIER_MODEL_PATH").unwrap_or(DEFAULT_MODEL_PATH));

        let runtime = match get("CLASSIFIER_INTRA_THREADS") {
            Some(v) => RuntimeOptions {
                intra_threads: v.parse().context("CLASSIFIER_INTRA_THREADS must be a positive integer")?,
            },
            None => RuntimeOptions::default(),
        };
        if runtime.intra_threads == 0 {
            bail!("CLASSIFIER_INTRA_THREADS must be a positive integer");
        }

        let labels = match get("CLASSIFIER_LABELS") {
            Some(v) => ClassLabels::new(v.split(',').map(str::trim))?,
            None => ClassLabels::brain_tumor(),
        };

        let mut server = ServerOptions::default();
        if let Some(v) = get("CLASSIFIER_CORS_ORIGINS") {
            server.cors_origins = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{o}'")))
                .collect::<Result<_>>()?;
        }
        if let Some(v) = get("CLASSIFIER_MAX_UPLOAD_BYTES") {
            server.max_upload_bytes = v.parse().context("CLASSIFIER_MAX_UPLOAD_BYTES must be an integer")?;
        }

        Ok(Self { frontend, bind, model, runtime, labels, server })
    }
}
