//! HTTP handler for crop recommendations

use axum::{extract::State, Json};
use shared::CropRecommendation;

use crate::error::AppResult;
use crate::handlers::extract::JsonObject;
use crate::CropState;

/// Recommend a crop
/// POST /recommend-crop
pub async fn recommend_crop(
    State(state): State<CropState>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<CropRecommendation>> {
    tracing::debug!("Received data: {:?}", body);
    let recommendation = state.crop.recommend(&body)?;
    Ok(Json(recommendation))
}
