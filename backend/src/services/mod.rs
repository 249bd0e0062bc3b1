//! Business logic services for the Agri Advisor backends

pub mod chat;
pub mod crop;
pub mod fertilizer;
pub mod persona;

pub use chat::{ChatRequest, ChatService, ChatSession};
pub use crop::CropService;
pub use fertilizer::FertilizerService;
