// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Loads the artifact once and answers single-row predictions.
//
// Startup is fail-fast: a missing artifact is reported as a
// configuration error before anything is served. After that the
// use case is immutable and shared by every caller.

use anyhow::Result;
use std::path::Path;

use crate::domain::features::CropFeatures;
use crate::domain::traits::CropRecommender;
use crate::infra::model_store::ModelStore;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    inferencer: Inferencer,
}

impl PredictUseCase {
    /// Load the artifact at `model_path`.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self> {
        let store      = ModelStore::new(model_path);
        let inferencer = Inferencer::from_store(&store)?;
        Ok(Self { inferencer })
    }

    pub fn from_inferencer(inferencer: Inferencer) -> Self {
        Self { inferencer }
    }

    /// Labels this model can return.
    pub fn classes(&self) -> &[String] {
        self.inferencer.classes()
    }

    pub fn inferencer(&self) -> &Inferencer {
        &self.inferencer
    }
}

impl CropRecommender for PredictUseCase {
    fn recommend(&self, features: &CropFeatures) -> Result<String> {
        Ok(self.inferencer.predict(features)?.to_string())
    }
}
