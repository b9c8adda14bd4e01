use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};

use crate::application::ports::ClassifierPort;
use crate::domain::{
    errors::{DomainError, DomainResult},
    preprocess::NormalizedTensor,
};

/// Clasificador falso para pruebas: devuelve un vector fijo y cuenta las llamadas.
pub struct StubClassifier {
    output: Result<Vec<f32>, String>,
    loaded: bool,
    width: Option<usize>,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn returning(output: Vec<f32>) -> Self {
        Self { output: Ok(output), loaded: true, width: None, calls: AtomicUsize::new(0) }
    }

    pub fn failing(msg: &str) -> Self {
        Self { output: Err(msg.to_string()), loaded: true, width: None, calls: AtomicUsize::new(0) }
    }

    pub fn unloaded() -> Self {
        Self { output: Ok(vec![0.25; 4]), loaded: false, width: None, calls: AtomicUsize::new(0) }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassifierPort for StubClassifier {
    async fn predict(&self, input: NormalizedTensor) -> DomainResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(input.view().shape(), &NormalizedTensor::shape());
        self.output.clone().map_err(DomainError::Prediction)
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn output_width(&self) -> Option<usize> {
        self.width
    }
}

/// PNG en escala de grises codificado en memoria.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = GrayImage::from_pixel(width, height, Luma([128]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

/// Cuerpo multipart/form-data con un único campo de fichero.
pub fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "----classifier-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}
