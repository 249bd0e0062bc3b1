//! Loading the artifacts each service needs
//!
//! Loading happens once, in a single step that ends in a definite
//! [`ModelStatus`]. Nothing is reloaded for the life of the process.

use std::{fs, path::Path, sync::Arc};

use serde::de::DeserializeOwned;
use shared::{CROP_FEATURE_COUNT, FERTILIZER_FEATURE_COUNT};

use super::{ArtifactError, Classifier, ClassifierArtifact, LabelEncoder, Scaler};
use crate::config::ModelsConfig;

/// Read and parse one JSON artifact
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ArtifactError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: display,
        source,
    })
}

fn load_classifier(
    path: &str,
    expected: usize,
) -> Result<Arc<dyn Classifier>, ArtifactError> {
    let classifier: ClassifierArtifact = load_json(path)?;
    classifier.validate(expected)?;
    Ok(Arc::new(classifier))
}

fn load_scaler(path: &str, expected: usize) -> Result<Scaler, ArtifactError> {
    let scaler: Scaler = load_json(path)?;
    scaler.validate(expected)?;
    Ok(scaler)
}

fn load_encoder(path: &str) -> Result<LabelEncoder, ArtifactError> {
    let encoder: LabelEncoder = load_json(path)?;
    encoder.validate()?;
    Ok(encoder)
}

/// Scaler and classifier for crop recommendations
pub struct CropModels {
    pub scaler: Scaler,
    pub classifier: Arc<dyn Classifier>,
}

impl CropModels {
    pub fn load(config: &ModelsConfig) -> Result<Self, ArtifactError> {
        let models = Self {
            scaler: load_scaler(&config.crop_scaler, CROP_FEATURE_COUNT)?,
            classifier: load_classifier(&config.crop_model, CROP_FEATURE_COUNT)?,
        };
        tracing::info!("Crop model and scaler loaded successfully");
        Ok(models)
    }
}

/// Scaler, classifier and categorical encoders for fertilizer recommendations
pub struct FertilizerModels {
    pub scaler: Scaler,
    pub classifier: Arc<dyn Classifier>,
    pub soil_encoder: LabelEncoder,
    pub crop_encoder: LabelEncoder,
}

impl FertilizerModels {
    pub fn load(config: &ModelsConfig) -> Result<Self, ArtifactError> {
        let models = Self {
            scaler: load_scaler(&config.fertilizer_scaler, FERTILIZER_FEATURE_COUNT)?,
            classifier: load_classifier(&config.fertilizer_model, FERTILIZER_FEATURE_COUNT)?,
            soil_encoder: load_encoder(&config.soil_encoder)?,
            crop_encoder: load_encoder(&config.crop_encoder)?,
        };
        tracing::info!("Fertilizer models and encoders loaded successfully");
        tracing::debug!("Expected soil types: {:?}", models.soil_encoder.classes());
        tracing::debug!("Expected crop types: {:?}", models.crop_encoder.classes());
        Ok(models)
    }
}

/// Outcome of the startup load
pub enum ModelStatus<T> {
    Ready(Arc<T>),
    Unavailable { reason: String },
}

impl<T> Clone for ModelStatus<T> {
    fn clone(&self) -> Self {
        match self {
            ModelStatus::Ready(models) => ModelStatus::Ready(Arc::clone(models)),
            ModelStatus::Unavailable { reason } => ModelStatus::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

impl<T> ModelStatus<T> {
    pub fn ready(models: T) -> Self {
        ModelStatus::Ready(Arc::new(models))
    }

    /// Turn a load result into a status, logging the failure
    pub fn from_load(result: Result<T, ArtifactError>) -> Self {
        match result {
            Ok(models) => Self::ready(models),
            Err(e) => {
                tracing::error!("Model artifacts failed to load: {}", e);
                ModelStatus::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready(_))
    }
}
