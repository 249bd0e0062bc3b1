//! Crop recommendation models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::{ensure_fields, require_f64, FieldError};

/// Request fields in feature-vector order
pub const CROP_FIELDS: [&str; 7] = [
    "nitrogen",
    "phosphorus",
    "potassium",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

/// Width of the crop feature vector
pub const CROP_FEATURE_COUNT: usize = CROP_FIELDS.len();

/// Name returned for prediction codes outside [`CROP_LABELS`]
pub const UNKNOWN_CROP: &str = "Unknown";

/// Classifier output codes and the crops they stand for
pub const CROP_LABELS: [(i64, &str); 22] = [
    (1, "rice"),
    (2, "maize"),
    (3, "jute"),
    (4, "cotton"),
    (5, "coconut"),
    (6, "papaya"),
    (7, "orange"),
    (8, "apple"),
    (9, "muskmelon"),
    (10, "watermelon"),
    (11, "grapes"),
    (12, "mango"),
    (13, "banana"),
    (14, "pomegranate"),
    (15, "lentil"),
    (16, "blackgram"),
    (17, "mungbean"),
    (18, "mothbeans"),
    (19, "pigeonpeas"),
    (20, "kidneybeans"),
    (21, "chickpea"),
    (22, "coffee"),
];

/// Soil and climate measurements for a crop recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CropFeatures {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl CropFeatures {
    /// Build from a loosely typed JSON object, coercing every field to `f64`
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, FieldError> {
        ensure_fields(body, &CROP_FIELDS)?;

        Ok(Self {
            nitrogen: require_f64(body, "nitrogen")?,
            phosphorus: require_f64(body, "phosphorus")?,
            potassium: require_f64(body, "potassium")?,
            temperature: require_f64(body, "temperature")?,
            humidity: require_f64(body, "humidity")?,
            ph: require_f64(body, "ph")?,
            rainfall: require_f64(body, "rainfall")?,
        })
    }

    pub fn to_vector(&self) -> [f64; CROP_FEATURE_COUNT] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}

/// Crop name for a classifier code
pub fn crop_name(code: i64) -> Option<&'static str> {
    CROP_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Crop name for a classifier code, or [`UNKNOWN_CROP`]
pub fn crop_name_or_unknown(code: i64) -> &'static str {
    crop_name(code).unwrap_or(UNKNOWN_CROP)
}

/// Successful crop recommendation body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRecommendation {
    pub recommended_crop: String,
}
