use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{D, DType, Device, Module};
use candle_nn::VarBuilder;
use candle_transformers::models::vit;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};

use crate::application::ports::{ClassifierError, ImageClassifier};
use crate::domain::{ClassLabel, Classification};

use super::image_preprocessing::{classification_from_probabilities, image_to_tensor};

const WEIGHTS_FILE: &str = "model.safetensors";
const CONFIG_FILE: &str = "config.json";

/// ViT-base/16 chest X-ray classifier with a two-way head.
pub struct CandleVitClassifier {
    model: Arc<vit::Model>,
    device: Device,
}

impl CandleVitClassifier {
    /// Loads from a local directory when it exists, otherwise from a Hugging Face repo id.
    pub fn load(model_path: &str) -> Result<Self, ClassifierError> {
        let device = Self::select_device();

        tracing::info!(
            device = ?device,
            model = model_path,
            "Initializing local chest X-ray classifier"
        );

        let (weights_path, config_path) = Self::resolve_files(model_path)?;

        let config = match config_path {
            Some(path) => {
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    ClassifierError::ModelLoadFailed(format!("read config: {e}"))
                })?;
                serde_json::from_str::<vit::Config>(&contents).map_err(|e| {
                    ClassifierError::ModelLoadFailed(format!("parse config: {e}"))
                })?
            }
            None => vit::Config::vit_base_patch16_224(),
        };

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| ClassifierError::ModelLoadFailed(format!("weights: {e}")))?
        };

        let model = vit::Model::new(&config, ClassLabel::ALL.len(), vb)
            .map_err(|e| ClassifierError::ModelLoadFailed(format!("model: {e}")))?;

        tracing::info!("Local chest X-ray classifier loaded successfully");

        Ok(Self {
            model: Arc::new(model),
            device,
        })
    }

    fn select_device() -> Device {
        Device::new_metal(0).unwrap_or(Device::Cpu)
    }

    fn resolve_files(model_path: &str) -> Result<(PathBuf, Option<PathBuf>), ClassifierError> {
        let local = Path::new(model_path);
        if local.is_dir() {
            let weights = local.join(WEIGHTS_FILE);
            if !weights.is_file() {
                return Err(ClassifierError::ModelLoadFailed(format!(
                    "{} not found in {}",
                    WEIGHTS_FILE,
                    local.display()
                )));
            }
            let config = Some(local.join(CONFIG_FILE)).filter(|p| p.is_file());
            return Ok((weights, config));
        }

        let api = Api::new().map_err(|e| ClassifierError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_path.to_string(), RepoType::Model));

        let weights = repo
            .get(WEIGHTS_FILE)
            .map_err(|e| ClassifierError::ModelLoadFailed(format!("{WEIGHTS_FILE}: {e}")))?;
        let config = repo.get(CONFIG_FILE).ok();

        Ok((weights, config))
    }
}

fn run_inference(
    model: &vit::Model,
    device: &Device,
    image: &[u8],
) -> Result<Classification, ClassifierError> {
    let input = image_to_tensor(image, device)?;

    let probabilities: Vec<f32> = model
        .forward(&input)
        .and_then(|logits| candle_nn::ops::softmax(&logits, D::Minus1))
        .and_then(|p| p.squeeze(0))
        .and_then(|p| p.to_dtype(DType::F32))
        .and_then(|p| p.to_vec1())
        .map_err(|e| ClassifierError::InferenceFailed(e.to_string()))?;

    classification_from_probabilities(&probabilities)
}

#[async_trait]
impl ImageClassifier for CandleVitClassifier {
    async fn classify(&self, image: &[u8]) -> Result<Classification, ClassifierError> {
        let model = Arc::clone(&self.model);
        let device = self.device.clone();
        let data = image.to_vec();

        tokio::task::spawn_blocking(move || run_inference(&model, &device, &data))
            .await
            .map_err(|e| ClassifierError::InferenceFailed(format!("task join error: {e}")))?
    }
}
