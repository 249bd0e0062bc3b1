//! Crop recommendation service

use serde_json::{Map, Value};
use shared::{crop_name_or_unknown, CropFeatures, CropRecommendation, UNKNOWN_CROP};

use crate::error::{AppError, AppResult};
use crate::ml::{CropModels, ModelStatus};

const CONTEXT: &str = "crop recommendation";

/// Maps soil and climate measurements to a crop
#[derive(Clone)]
pub struct CropService {
    models: ModelStatus<CropModels>,
}

impl CropService {
    pub fn new(models: ModelStatus<CropModels>) -> Self {
        Self { models }
    }

    /// Recommend a crop for a JSON request body.
    ///
    /// Codes outside the crop table come back as `"Unknown"` rather than
    /// failing the request.
    pub fn recommend(&self, body: &Map<String, Value>) -> AppResult<CropRecommendation> {
        let models = match &self.models {
            ModelStatus::Ready(models) => models,
            ModelStatus::Unavailable { reason } => {
                return Err(AppError::ModelsUnavailable(reason.clone()))
            }
        };

        let features = CropFeatures::from_json(body)?;
        tracing::debug!("Crop features: {:?}", features);

        let scaled = models
            .scaler
            .transform(&features.to_vector())
            .map_err(|source| AppError::Inference {
                context: CONTEXT,
                source,
            })?;

        let code = models
            .classifier
            .predict(&scaled)
            .map_err(|source| AppError::Inference {
                context: CONTEXT,
                source,
            })?;

        let crop = crop_name_or_unknown(code);
        if crop == UNKNOWN_CROP {
            tracing::warn!("Prediction code {} is not in the crop table", code);
        } else {
            tracing::info!("Recommended crop: {}", crop);
        }

        Ok(CropRecommendation {
            recommended_crop: crop.to_string(),
        })
    }
}
