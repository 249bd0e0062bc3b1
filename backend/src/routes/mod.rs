//! Route definitions for the Agri Advisor services

use std::path::Path;

use axum::{routing::post, Router};
use tower_http::services::ServeFile;

use crate::{handlers, ChatState, CropState, FertilizerState};

/// Chat service routes; `GET /` serves the chat page from `static_dir`
pub fn chat_routes(static_dir: &str) -> Router<ChatState> {
    Router::new()
        .route_service("/", ServeFile::new(Path::new(static_dir).join("index.html")))
        .route("/chat", post(handlers::chat))
}

/// Crop service routes
pub fn crop_routes() -> Router<CropState> {
    Router::new().route("/recommend-crop", post(handlers::recommend_crop))
}

/// Fertilizer service routes
pub fn fertilizer_routes() -> Router<FertilizerState> {
    Router::new().route("/predict", post(handlers::predict_fertilizer))
}
