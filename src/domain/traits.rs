// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits rather
// than concrete types:
//   - CsvLoader implements RecordSource
//   - PredictUseCase implements CropRecommender
//
// The HTTP server only ever sees a CropRecommender, so tests
// can hand it a stub without a trained model on disk.

use anyhow::Result;

use crate::domain::{features::CropFeatures, record::TrainingRecord};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled training rows.
pub trait RecordSource {
    /// Load every available record from this source.
    fn load_all(&self) -> Result<Vec<TrainingRecord>>;
}

// ─── CropRecommender ──────────────────────────────────────────────────────────
/// Any component that maps one feature row to a crop label.
///
/// Implementations must be safe to share across request handlers:
/// `recommend` takes `&self` and never mutates.
pub trait CropRecommender: Send + Sync {
    /// Return the recommended crop for the given conditions.
    fn recommend(&self, features: &CropFeatures) -> Result<String>;
}
