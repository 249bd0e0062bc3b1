//! Fertilizer recommendation service

use serde_json::{Map, Value};
use shared::{fertilizer_name, FertilizerInput, FertilizerRecommendation};

use crate::error::{AppError, AppResult};
use crate::ml::{FertilizerModels, LabelEncoder, ModelStatus};

const CONTEXT: &str = "fertilizer recommendation";

/// Maps soil, crop and nutrient measurements to a fertilizer
#[derive(Clone)]
pub struct FertilizerService {
    models: ModelStatus<FertilizerModels>,
}

fn encode(encoder: &LabelEncoder, kind: &'static str, value: &str) -> AppResult<usize> {
    encoder
        .transform(value)
        .ok_or_else(|| AppError::UnknownCategory {
            kind,
            value: value.to_string(),
            valid: encoder.classes().to_vec(),
        })
}

impl FertilizerService {
    pub fn new(models: ModelStatus<FertilizerModels>) -> Self {
        Self { models }
    }

    /// Recommend a fertilizer for a JSON request body.
    ///
    /// Categorical values are checked against the encoders before the
    /// classifier runs; a code outside the fertilizer table is an internal
    /// error.
    pub fn recommend(&self, body: &Map<String, Value>) -> AppResult<FertilizerRecommendation> {
        let models = match &self.models {
            ModelStatus::Ready(models) => models,
            ModelStatus::Unavailable { reason } => {
                return Err(AppError::ModelsUnavailable(reason.clone()))
            }
        };

        let input = FertilizerInput::from_json(body)?;

        let soil_code = encode(&models.soil_encoder, "soil type", &input.soil_type)?;
        let crop_code = encode(&models.crop_encoder, "crop type", &input.crop_type)?;

        let features = input.to_vector(soil_code, crop_code);
        tracing::debug!("Features before scaling: {:?}", features);

        let scaled = models
            .scaler
            .transform(&features)
            .map_err(|source| AppError::Inference {
                context: CONTEXT,
                source,
            })?;
        tracing::debug!("Scaled features: {:?}", scaled);

        let code = models
            .classifier
            .predict(&scaled)
            .map_err(|source| AppError::Inference {
                context: CONTEXT,
                source,
            })?;
        tracing::info!("Raw prediction index: {}", code);

        let fertilizer = fertilizer_name(code).ok_or(AppError::InvalidPrediction(code))?;
        tracing::info!("Predicted fertilizer: {}", fertilizer);

        Ok(FertilizerRecommendation {
            fertilizer: fertilizer.to_string(),
        })
    }
}
