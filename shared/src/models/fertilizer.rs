//! Fertilizer recommendation models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::{ensure_fields, require_f64, require_text, FieldError};

/// Required request fields, in the order missing ones are reported
pub const FERTILIZER_FIELDS: [&str; 8] = [
    "temperature",
    "humidity",
    "moisture",
    "soil_type",
    "crop_type",
    "nitrogen",
    "potassium",
    "phosphorous",
];

/// Width of the fertilizer feature vector
pub const FERTILIZER_FEATURE_COUNT: usize = FERTILIZER_FIELDS.len();

/// Classifier output codes and the fertilizers they stand for
pub const FERTILIZER_LABELS: [(i64, &str); 7] = [
    (1, "Urea"),
    (2, "DAP"),
    (3, "14-35-14"),
    (4, "28-28"),
    (5, "17-17-17"),
    (6, "20-20"),
    (7, "10-26-26"),
];

/// Validated fertilizer request, categorical fields not yet encoded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FertilizerInput {
    pub temperature: f64,
    pub humidity: f64,
    pub moisture: f64,
    pub soil_type: String,
    pub crop_type: String,
    pub nitrogen: f64,
    pub potassium: f64,
    pub phosphorous: f64,
}

impl FertilizerInput {
    /// Build from a loosely typed JSON object.
    ///
    /// All missing keys are reported before any value is coerced.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, FieldError> {
        ensure_fields(body, &FERTILIZER_FIELDS)?;

        Ok(Self {
            temperature: require_f64(body, "temperature")?,
            humidity: require_f64(body, "humidity")?,
            moisture: require_f64(body, "moisture")?,
            nitrogen: require_f64(body, "nitrogen")?,
            potassium: require_f64(body, "potassium")?,
            phosphorous: require_f64(body, "phosphorous")?,
            soil_type: require_text(body, "soil_type")?,
            crop_type: require_text(body, "crop_type")?,
        })
    }

    /// Assemble the feature vector once the categorical fields are encoded
    pub fn to_vector(&self, soil_code: usize, crop_code: usize) -> [f64; FERTILIZER_FEATURE_COUNT] {
        [
            self.temperature,
            self.humidity,
            self.moisture,
            soil_code as f64,
            crop_code as f64,
            self.nitrogen,
            self.potassium,
            self.phosphorous,
        ]
    }
}

/// Fertilizer name for a classifier code
pub fn fertilizer_name(code: i64) -> Option<&'static str> {
    FERTILIZER_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Successful fertilizer recommendation body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FertilizerRecommendation {
    pub fertilizer: String,
}
