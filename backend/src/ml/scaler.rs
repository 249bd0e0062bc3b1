//! Fitted feature scalers

use serde::Deserialize;

use super::ArtifactError;

/// A fitted feature scaler
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { min, .. } => min.len(),
        }
    }

    /// Check internal consistency and the expected vector width
    pub fn validate(&self, expected: usize) -> Result<(), ArtifactError> {
        let (offsets, scale) = match self {
            Scaler::Standard { mean, scale } => (mean, scale),
            Scaler::MinMax { min, scale } => (min, scale),
        };

        if offsets.len() != scale.len() {
            return Err(ArtifactError::Invalid(format!(
                "scaler has {} offsets but {} scale factors",
                offsets.len(),
                scale.len()
            )));
        }
        if offsets.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(ArtifactError::Invalid(
                "scaler parameters must be finite".to_string(),
            ));
        }
        if offsets.len() != expected {
            return Err(ArtifactError::FeatureCount {
                expected,
                actual: offsets.len(),
            });
        }
        Ok(())
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        if features.len() != self.n_features() {
            return Err(ArtifactError::FeatureCount {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let scaled = match self {
            Scaler::Standard { mean, scale } => features
                .iter()
                .zip(mean)
                .zip(scale)
                .map(|((x, m), s)| {
                    // zero-variance columns are left centred but unscaled
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            Scaler::MinMax { min, scale } => features
                .iter()
                .zip(min)
                .zip(scale)
                .map(|((x, m), s)| x * s + m)
                .collect(),
        };

        Ok(scaled)
    }
}
