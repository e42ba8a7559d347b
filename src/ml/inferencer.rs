// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Holds a loaded artifact and turns one feature row into a label.
// Read-only after construction, so one instance can be shared
// by every request handler.

use crate::domain::features::CropFeatures;
use crate::infra::model_store::{ModelArtifact, ModelStore, ModelStoreError};
use crate::ml::forest::ForestError;

pub struct Inferencer {
    artifact: ModelArtifact,
}

impl Inferencer {
    pub fn from_store(store: &ModelStore) -> Result<Self, ModelStoreError> {
        Ok(Self::from_artifact(store.load()?))
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    pub fn predict(&self, features: &CropFeatures) -> Result<&str, ForestError> {
        let label = self.artifact.forest.predict(&features.to_row())?;
        tracing::debug!(
            "temp={} rainfall={} soil_ph={} -> {}",
            features.temp, features.rainfall, features.soil_ph, label
        );
        Ok(label)
    }

    pub fn classes(&self) -> &[String] {
        self.artifact.forest.classes()
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}
