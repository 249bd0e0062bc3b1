//! Domain models for the Agri Advisor services

mod chat;
mod crop;
mod fertilizer;

pub use chat::*;
pub use crop::*;
pub use fertilizer::*;
