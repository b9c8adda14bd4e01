use image::{imageops::FilterType, DynamicImage};
use ndarray::Array4;

use super::errors::{DomainError, DomainResult};
use super::model::{INPUT_CHANNELS, INPUT_SIZE};

/// Tensor de entrada del clasificador: NHWC `(1, 224, 224, 3)` con valores en `[0, 1]`.
#[derive(Debug, Clone)]
pub struct NormalizedTensor(Array4<f32>);

impl NormalizedTensor {
    pub fn shape() -> [usize; 4] {
        let side = INPUT_SIZE as usize;
        [1, side, side, INPUT_CHANNELS]
    }

    pub fn from_array(array: Array4<f32>) -> DomainResult<Self> {
        if array.shape() != Self::shape() {
            return Err(DomainError::InvalidInput(format!(
                "tensor shape {:?} does not match {:?}",
                array.shape(),
                Self::shape()
            )));
        }
        Ok(Self(array))
    }

    pub fn view(&self) -> &Array4<f32> {
        &self.0
    }

    /// Forma y datos contiguos, listos para construir el tensor del runtime.
    pub fn into_shape_and_data(self) -> (Vec<i64>, Vec<f32>) {
        let shape = self.0.shape().iter().map(|&d| d as i64).collect();
        let (data, _) = self.0.into_raw_vec_and_offset();
        (shape, data)
    }
}

/// Decodifica una imagen subida y la deja tal y como la espera el modelo.
///
/// Cualquier modo de color se pasa a RGB de 8 bits (gris y paleta se promueven,
/// el canal alfa se descarta). El redimensionado es directo a 224x224, sin
/// conservar la proporción, con filtro bicúbico.
pub fn preprocess_image(bytes: &[u8]) -> DomainResult<NormalizedTensor> {
    if bytes.is_empty() {
        return Err(DomainError::Preprocess("empty upload".into()));
    }
    let img = image::load_from_memory(bytes).map_err(|e| DomainError::Preprocess(e.to_string()))?;
    preprocess_decoded(&img)
}

pub fn preprocess_decoded(img: &DynamicImage) -> DomainResult<NormalizedTensor> {
    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom);

    let side = INPUT_SIZE as usize;
    let mut input = Array4::<f32>::zeros((1, side, side, INPUT_CHANNELS));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..INPUT_CHANNELS {
            input[[0, y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
        }
    }

    NormalizedTensor::from_array(input)
}
