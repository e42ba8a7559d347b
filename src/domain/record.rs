// ============================================================
// Layer 3 — TrainingRecord Domain Type
// ============================================================
// One row of the crop dataset: three environmental readings and
// the crop that was grown under them.
//
// The struct derives Deserialize so the CSV loader can map a
// header row straight onto these fields. Columns in the file that
// are not named here are ignored.

use serde::{Deserialize, Serialize};

use crate::domain::features::CropFeatures;

/// A labelled example: features plus the crop label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Temperature in °C
    pub temp: f64,

    /// Rainfall in mm
    pub rainfall: f64,

    /// Soil pH
    pub soil_ph: f64,

    /// The crop grown under these conditions
    pub crop: String,
}

impl TrainingRecord {
    pub fn new(temp: f64, rainfall: f64, soil_ph: f64, crop: impl Into<String>) -> Self {
        Self { temp, rainfall, soil_ph, crop: crop.into() }
    }

    /// The feature part of this row, without the label.
    pub fn features(&self) -> CropFeatures {
        CropFeatures::new(self.temp, self.rainfall, self.soil_ph)
    }
}
