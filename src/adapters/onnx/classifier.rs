use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ndarray::{ArrayViewD, Axis, IxDyn};
use ort::execution_providers::CUDAExecutionProvider;
use ort::session::Session;
use ort::value::{Tensor, ValueType};
use std::fs;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use crate::application::ports::ClassifierPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::{ModelSource, RuntimeOptions};
use crate::domain::preprocess::NormalizedTensor;

/// Clasificador de imágenes respaldado por una sesión de ONNX Runtime.
pub struct OnnxClassifier {
    // `Session::run` necesita acceso exclusivo.
    session: Arc<Mutex<Session>>,
    output_width: Option<usize>,
}

impl OnnxClassifier {
    pub fn load(model: &ModelSource, opts: &RuntimeOptions) -> DomainResult<Self> {
        match Self::build(&model.onnx_path, opts) {
            Ok(classifier) => {
                info!("✅ Model loaded successfully: {}", model.onnx_path);
                Ok(classifier)
            }
            Err(e) => {
                error!("❌ Failed to load model {}: {:?}", model.onnx_path, e);
                Err(DomainError::ModelLoad(e.to_string()))
            }
        }
    }

    fn build(path: &str, opts: &RuntimeOptions) -> Result<Self> {
        let mut builder = Session::builder()?.with_intra_threads(opts.intra_threads.max(1))?;

        // CUDA es opcional: si está disponible se registra, si no continuamos en CPU.
        let cuda = CUDAExecutionProvider::default().build();
        if let Ok(builder_with_cuda) = builder.clone().with_execution_providers([cuda]) {
            builder = builder_with_cuda;
        }

        let model_bytes = fs::read(path)?;
        let session = builder.commit_from_memory(&model_bytes)?;

        let output = session
            .outputs
            .first()
            .ok_or_else(|| anyhow!("model declares no outputs"))?;
        let output_width = match &output.output_type {
            ValueType::Tensor { shape, .. } => shape.iter().last().copied().filter(|&d| d > 0).map(|d| d as usize),
            other => return Err(anyhow!("unexpected output type: {other:?}")),
        };

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            output_width,
        })
    }

    fn run(session: &Mutex<Session>, input: NormalizedTensor) -> Result<Vec<f32>> {
        let (shape, data) = input.into_shape_and_data();
        let input_tensor = Tensor::from_array((shape, data))?;

        let mut session = session.lock().map_err(|_| anyhow!("session lock poisoned"))?;
        let outputs = session.run(ort::inputs![input_tensor])?;
        let (shape_out, data_out) = outputs[0].try_extract_tensor::<f32>()?;

        let dims: Vec<usize> = shape_out.iter().map(|&x| x as usize).collect();
        if dims.first() != Some(&1) {
            return Err(anyhow!("expected a single-item batch, got output shape {dims:?}"));
        }
        let array_view = ArrayViewD::from_shape(IxDyn(&dims), data_out)?;
        let vector = array_view.index_axis(Axis(0), 0).iter().copied().collect();
        Ok(vector)
    }
}

#[async_trait]
impl ClassifierPort for OnnxClassifier {
    async fn predict(&self, input: NormalizedTensor) -> DomainResult<Vec<f32>> {
        let session = self.session.clone();
        tokio::task::spawn_blocking(move || Self::run(&session, input))
            .await
            .map_err(|e| DomainError::Prediction(format!("inference task failed: {e}")))?
            .map_err(|e| DomainError::Prediction(e.to_string()))
    }

    fn is_loaded(&self) -> bool {
        true
    }

    fn output_width(&self) -> Option<usize> {
        self.output_width
    }
}
