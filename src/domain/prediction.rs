use serde::{ser::Serializer, Serialize};

use super::errors::{DomainError, DomainResult};
use super::model::ClassLabels;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub confidence: f64,
    /// Porcentaje por clase, en el orden del conjunto de etiquetas.
    #[serde(serialize_with = "as_ordered_map")]
    pub all_predictions: Vec<(String, f64)>,
}

fn as_ordered_map<S: Serializer>(pairs: &[(String, f64)], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(pairs.iter().map(|(k, v)| (k, v)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_percent(confidence: f64) -> Self {
        if confidence >= 80.0 {
            Self::High
        } else if confidence >= 60.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Índice del máximo; en empate gana el primero.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Probabilidad en [0, 1] a porcentaje con dos decimales.
pub fn to_percent(p: f32) -> f64 {
    (p as f64 * 100.0 * 100.0).round() / 100.0
}

pub fn format_prediction(vector: &[f32], labels: &ClassLabels) -> DomainResult<PredictionResult> {
    if vector.len() != labels.len() {
        return Err(DomainError::ConfigMismatch(format!(
            "prediction has {} values for {} labels",
            vector.len(),
            labels.len()
        )));
    }
    if let Some(i) = vector.iter().position(|p| !p.is_finite()) {
        return Err(DomainError::Prediction(format!(
            "model returned a non-finite value at index {i}"
        )));
    }
    let index = argmax(vector)
        .ok_or_else(|| DomainError::Prediction("prediction vector has no comparable values".into()))?;
    let predicted_class = labels
        .get(index)
        .ok_or_else(|| DomainError::ConfigMismatch(format!("no label at index {index}")))?
        .to_string();

    let all_predictions = labels
        .as_slice()
        .iter()
        .zip(vector)
        .map(|(label, &p)| (label.clone(), to_percent(p)))
        .collect();

    Ok(PredictionResult {
        predicted_class,
        confidence: to_percent(vector[index]),
        all_predictions,
    })
}
