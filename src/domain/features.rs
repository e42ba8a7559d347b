// ============================================================
// Layer 3 — Feature Schema
// ============================================================
// The classifier is order sensitive: column 0 is always temp,
// column 1 rainfall, column 2 soil_ph. FEATURE_COLUMNS is the
// single definition of that layout. The trainer embeds it in
// the model artifact and the model store checks it on load.
//
// CropFeatures is also the body of POST /predict_crop. Each
// field accepts a JSON number or a numeric string ("6.5");
// anything else (bool, null, words, missing) fails
// deserialisation before a handler ever runs.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Feature column names, in the order the model consumes them.
pub const FEATURE_COLUMNS: [&str; 3] = ["temp", "rainfall", "soil_ph"];

/// Number of input features.
pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

/// A single feature row: the conditions to recommend a crop for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropFeatures {
    /// Temperature in °C
    #[serde(deserialize_with = "numeric")]
    pub temp: f64,

    /// Rainfall in mm
    #[serde(deserialize_with = "numeric")]
    pub rainfall: f64,

    /// Soil pH
    #[serde(deserialize_with = "numeric")]
    pub soil_ph: f64,
}

impl CropFeatures {
    pub fn new(temp: f64, rainfall: f64, soil_ph: f64) -> Self {
        Self { temp, rainfall, soil_ph }
    }

    /// Lay the features out in FEATURE_COLUMNS order.
    pub fn to_row(&self) -> [f64; N_FEATURES] {
        [self.temp, self.rainfall, self.soil_ph]
    }
}

/// The schema as owned strings, for embedding in the artifact.
pub fn feature_names() -> Vec<String> {
    FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

// ─── Lenient numeric field ────────────────────────────────────────────────────
// Numbers pass through; strings are parsed. The result must be finite.
fn numeric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(NumericVisitor)
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a finite number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        if v.is_finite() {
            Ok(v)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}
