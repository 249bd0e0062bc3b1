//! HTTP handler for fertilizer recommendations

use axum::{extract::State, Json};
use shared::FertilizerRecommendation;

use crate::error::AppResult;
use crate::handlers::extract::JsonObject;
use crate::FertilizerState;

/// Recommend a fertilizer
/// POST /predict
pub async fn predict_fertilizer(
    State(state): State<FertilizerState>,
    JsonObject(body): JsonObject,
) -> AppResult<Json<FertilizerRecommendation>> {
    tracing::debug!("Received data for /predict: {:?}", body);
    let recommendation = state.fertilizer.recommend(&body)?;
    Ok(Json(recommendation))
}
