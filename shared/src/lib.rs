//! Shared types and models for the Agri Advisor backends
//!
//! This crate contains the feature vectors, label tables and input
//! coercion rules shared by the chat, crop and fertilizer services.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
