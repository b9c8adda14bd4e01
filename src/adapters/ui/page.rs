use base64::{prelude::BASE64_STANDARD, Engine};
use minijinja::{context, Environment};
use serde::Serialize;

use crate::domain::prediction::{ConfidenceLevel, PredictionResult};

/// Lo que se pinta bajo el formulario tras una subida.
pub enum Outcome<'a> {
    Empty,
    Classified { image: &'a [u8], result: &'a PredictionResult },
    Failed { message: &'a str },
}

#[derive(Serialize)]
struct ResultView {
    image_src: String,
    label: String,
    confidence: String,
    level: &'static str,
}

// La extensión .html activa el autoescape de minijinja.
const PAGE_NAME: &str = "page.html";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Brain Tumor MRI Classifier</title>
<style>
body { font-family: sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
.banner { background: #e3f9e5; border-left: 4px solid #31b237; padding: .5rem 1rem; }
.error { background: #ffe3e3; border-left: 4px solid #e12d39; padding: .5rem 1rem; }
.upload img { width: 100%; max-width: 448px; image-rendering: auto; }
.confidence-high { color: #2f8132; }
.confidence-medium { color: #b88c02; }
.confidence-low { color: #ab091e; }
</style>
</head>
<body>
<div class="banner">✅ Loaded model: {{ model }}</div>
<h1>🧠 Brain Tumor MRI Classifier</h1>
<p>Upload an MRI image and let the model predict the tumor type.</p>
<form method="post" action="/" enctype="multipart/form-data">
<label for="file">Choose an MRI image...</label>
<input id="file" type="file" name="file" accept=".jpg,.jpeg,.png" required onchange="this.form.submit()">
<noscript><button type="submit">Classify</button></noscript>
</form>
{% if error %}<div class="error">❌ {{ error }}</div>{% endif %}
{% if result %}<figure class="upload"><img src="{{ result.image_src|safe }}" alt="Uploaded Image"><figcaption>Uploaded Image</figcaption></figure>
<h3>✅ Prediction:</h3>
<p><strong>Predicted Tumor Type:</strong> <span id="predicted-class">{{ result.label }}</span></p>
<p><strong>Confidence:</strong> <span id="confidence" class="confidence-{{ result.level }}">{{ result.confidence }}%</span></p>
{% endif %}
</body>
</html>
"#;

/// URI `data:` para mostrar la imagen subida sin guardarla en ningún sitio.
/// Solo contiene el tipo MIME y el alfabeto base64, así que no necesita escape.
pub fn data_uri(bytes: &[u8]) -> String {
    let mime = image::guess_format(bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or("application/octet-stream");
    format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes))
}

pub fn render(model_path: &str, outcome: Outcome<'_>) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(PAGE_NAME, PAGE_TEMPLATE)?;

    let (error, result) = match outcome {
        Outcome::Empty => (None, None),
        Outcome::Failed { message } => (Some(message), None),
        Outcome::Classified { image, result } => (
            None,
            Some(ResultView {
                image_src: data_uri(image),
                label: result.predicted_class.clone(),
                confidence: format!("{:.2}", result.confidence),
                level: ConfidenceLevel::from_percent(result.confidence).as_str(),
            }),
        ),
    };

    env.get_template(PAGE_NAME)?
        .render(context! { model => model_path, error => error, result => result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_has_upload_form() {
        let html = render("tumour_cnn_model.onnx", Outcome::Empty).unwrap();
        assert!(html.contains("✅ Loaded model: tumour_cnn_model.onnx"));
        assert!(html.contains(r#"type="file" name="file""#));
        assert!(!html.contains("Prediction:"));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn result_renders_image_then_label_then_confidence() {
        let result = PredictionResult {
            predicted_class: "Pituitary".into(),
            confidence: 91.5,
            all_predictions: vec![],
        };
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let html = render("m.onnx", Outcome::Classified { image: &png, result: &result }).unwrap();

        let img = html.find("data:image/png;base64,").unwrap();
        let label = html.find("Pituitary").unwrap();
        let confidence = html.find("91.50%").unwrap();
        assert!(img < label && label < confidence);
        assert!(html.contains("confidence-high"));
    }

    #[test]
    fn user_visible_text_is_escaped() {
        let html = render("<m>.onnx", Outcome::Failed { message: "Error processing image: <bad>" }).unwrap();
        assert!(html.contains("Error processing image: &lt;bad&gt;"));
        assert!(html.contains("&lt;m&gt;.onnx"));
        assert!(!html.contains("<bad>"));

        let result = PredictionResult {
            predicted_class: "<script>x</script>".into(),
            confidence: 10.0,
            all_predictions: vec![],
        };
        let html = render("m.onnx", Outcome::Classified { image: b"raw", result: &result }).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("confidence-low"));
    }
}
