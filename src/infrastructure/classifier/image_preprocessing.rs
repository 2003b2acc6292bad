use candle_core::{DType, Device, Tensor};
use image::imageops::FilterType;

use crate::application::ports::ClassifierError;
use crate::domain::Classification;

/// Square input edge of the ViT-base/16 classifier.
pub const INPUT_SIZE: u32 = 224;

/// Decodes an upload into a `(1, 3, 224, 224)` tensor normalized to `[-1, 1]`.
pub fn image_to_tensor(data: &[u8], device: &Device) -> Result<Tensor, ClassifierError> {
    let image = image::load_from_memory(data)
        .map_err(|e| ClassifierError::InvalidImage(e.to_string()))?;

    let rgb = image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_rgb8();
    let pixels = rgb.into_raw();

    let side = INPUT_SIZE as usize;
    // mean 0.5, std 0.5 after scaling to [0, 1]
    Tensor::from_vec(pixels, (side, side, 3), device)
        .and_then(|t| t.permute((2, 0, 1)))
        .and_then(|t| t.to_dtype(DType::F32))
        .and_then(|t| t.affine(2.0 / 255.0, -1.0))
        .and_then(|t| t.unsqueeze(0))
        .map_err(|e| ClassifierError::InferenceFailed(format!("preprocess: {e}")))
}

/// Maps softmax output, in `ClassLabel::ALL` order, to a classification.
pub fn classification_from_probabilities(
    probabilities: &[f32],
) -> Result<Classification, ClassifierError> {
    match probabilities {
        [normal, pneumonia] => Ok(Classification::from_probabilities(
            f64::from(*normal),
            f64::from(*pneumonia),
        )),
        other => Err(ClassifierError::InferenceFailed(format!(
            "expected 2 class probabilities, got {}",
            other.len()
        ))),
    }
}
