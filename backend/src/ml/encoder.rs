//! Fitted label encoders for categorical fields

use std::collections::HashSet;

use serde::Deserialize;

use super::ArtifactError;

/// Maps a fixed set of category names to integer codes.
///
/// The code of a class is its position in `classes`, matching the order the
/// encoder was fitted with.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ArtifactError> {
        let encoder = Self { classes };
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Invalid(
                "label encoder has no classes".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ArtifactError::Invalid(format!(
                "label encoder class '{}' is duplicated",
                dup
            )));
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Code for `value`, or `None` for an unseen category
    pub fn transform(&self, value: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == value)
    }
}
