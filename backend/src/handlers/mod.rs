//! HTTP handlers for the Agri Advisor services

pub mod chat;
pub mod crop;
pub mod extract;
pub mod fertilizer;
pub mod health;

pub use chat::chat;
pub use crop::recommend_crop;
pub use fertilizer::predict_fertilizer;
pub use health::health_check;
