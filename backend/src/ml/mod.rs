//! Runtime for exported model artifacts
//!
//! Fitted scalers, label encoders and classifiers are exported from the
//! training notebooks as JSON documents and loaded once at startup.

pub mod artifacts;
pub mod classifier;
pub mod encoder;
pub mod scaler;

use thiserror::Error;

pub use artifacts::{CropModels, FertilizerModels, ModelStatus};
pub use classifier::{Classifier, ClassifierArtifact};
pub use encoder::LabelEncoder;
pub use scaler::Scaler;

/// Errors raised while loading or evaluating artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(String),

    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
}
