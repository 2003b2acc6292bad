mod candle_vit_classifier;
mod image_preprocessing;
mod lazy_classifier;

pub use candle_vit_classifier::CandleVitClassifier;
pub use image_preprocessing::{INPUT_SIZE, classification_from_probabilities, image_to_tensor};
pub use lazy_classifier::{ClassifierLoader, LazyClassifier};
