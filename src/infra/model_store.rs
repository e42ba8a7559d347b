// ============================================================
// Layer 6 — Model Store
// ============================================================
// Saves and restores the trained forest as a single artifact file.
//
// What gets saved:
//   ModelArtifact {
//     format_version  — bumped whenever the layout changes
//     feature_names   — the FEATURE_COLUMNS the forest was fit on
//     forest          — trees + class labels
//     trained_rows    — number of rows the forest saw
//   }
//
// The artifact is written with bincode. Loading checks the file
// exists, decodes it, then verifies the version and that the
// embedded feature layout equals FEATURE_COLUMNS. A mismatch is
// refused at load time rather than producing silent garbage at
// prediction time.
//
// Alongside the artifact, a human-readable JSON summary of the
// training run (settings + row counts + holdout accuracy) is
// written next to it. Nothing reads it back; it is for people.
//
// File layout:
//   models/
//     crop_model.bin   ← the artifact (path is configurable)
//     crop_model.json  ← training summary

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::features::{feature_names, FEATURE_COLUMNS};
use crate::ml::forest::RandomForest;

/// Default artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/crop_model.bin";

/// Current on-disk layout version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ModelStoreError {
    #[error("model file '{0}' not found. Run 'train' first.")]
    NotFound(PathBuf),

    #[error("cannot access model file '{path}': {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode model file '{path}': {message}")]
    Decode { path: PathBuf, message: String },

    #[error("cannot encode model: {0}")]
    Encode(String),

    #[error("model file format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("model was trained on features {found:?}, but this build expects {expected:?}")]
    SchemaMismatch { found: Vec<String>, expected: Vec<String> },
}

/// Everything the service needs to answer predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_names:  Vec<String>,
    pub forest:         RandomForest,
    pub trained_rows:   usize,
}

impl ModelArtifact {
    pub fn new(forest: RandomForest, trained_rows: usize) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            feature_names:  feature_names(),
            forest,
            trained_rows,
        }
    }

    fn validate(&self) -> Result<(), ModelStoreError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelStoreError::UnsupportedVersion {
                found:    self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        if self.feature_names != FEATURE_COLUMNS {
            return Err(ModelStoreError::SchemaMismatch {
                found:    self.feature_names.clone(),
                expected: feature_names(),
            });
        }
        Ok(())
    }
}

/// Reads and writes the artifact at one fixed path.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Where the JSON training summary lives: the artifact path
    /// with a `.json` extension.
    pub fn summary_path(&self) -> PathBuf {
        self.path.with_extension("json")
    }

    /// Write the artifact, creating parent directories and
    /// overwriting any previous file.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<(), ModelStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ModelStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let bytes = bincode::serialize(artifact)
            .map_err(|e| ModelStoreError::Encode(e.to_string()))?;

        fs::write(&self.path, bytes).map_err(|source| ModelStoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Saved model artifact to '{}'", self.path.display());
        Ok(())
    }

    /// Write a pretty-printed JSON summary next to the artifact.
    pub fn save_summary<T: Serialize>(&self, summary: &T) -> Result<(), ModelStoreError> {
        let path = self.summary_path();
        let json = serde_json::to_string_pretty(summary)
            .map_err(|e| ModelStoreError::Encode(e.to_string()))?;

        fs::write(&path, json).map_err(|source| ModelStoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved training summary to '{}'", path.display());
        Ok(())
    }

    /// Load and validate the artifact.
    pub fn load(&self) -> Result<ModelArtifact, ModelStoreError> {
        if !self.exists() {
            return Err(ModelStoreError::NotFound(self.path.clone()));
        }

        let bytes = fs::read(&self.path).map_err(|source| ModelStoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        let artifact: ModelArtifact =
            bincode::deserialize(&bytes).map_err(|e| ModelStoreError::Decode {
                path:    self.path.clone(),
                message: e.to_string(),
            })?;
        artifact.validate()?;

        let cfg = artifact.forest.config();
        tracing::info!(
            "Loaded model from '{}' ({} trees, {} classes, seed={}, max_depth={:?})",
            self.path.display(),
            artifact.forest.n_estimators(),
            artifact.forest.classes().len(),
            cfg.seed,
            cfg.max_depth
        );
        Ok(artifact)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::LabeledDataset;
    use crate::domain::record::TrainingRecord;
    use crate::ml::forest::ForestConfig;

    fn tiny_artifact() -> ModelArtifact {
        let records = vec![
            TrainingRecord::new(25.0, 100.0, 6.5, "rice"),
            TrainingRecord::new(15.0, 30.0, 7.5, "wheat"),
        ];
        let ds     = LabeledDataset::from_records(&records);
        let cfg    = ForestConfig { n_estimators: 3, ..ForestConfig::default() };
        let forest = RandomForest::fit(&ds, &cfg).unwrap();
        ModelArtifact::new(forest, records.len())
    }

    #[test]
    fn test_save_then_load_returns_same_artifact() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("nested/models/crop_model.bin"));
        let art   = tiny_artifact();

        store.save(&art).unwrap();
        assert!(store.exists());
        let loaded = store.load().unwrap();
        assert_eq!(loaded.forest.config().n_estimators, 3);
        assert_eq!(loaded, art);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("crop_model.bin"));
        let err   = store.load().unwrap_err();
        assert!(matches!(err, ModelStoreError::NotFound(_)));
        assert!(err.to_string().contains("Run 'train' first"));
    }

    #[test]
    fn test_garbage_file_fails_to_decode() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("crop_model.bin");
        fs::write(&path, b"not a model").unwrap();

        let err = ModelStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ModelStoreError::Decode { .. }));
    }

    #[test]
    fn test_feature_layout_mismatch_is_refused() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("crop_model.bin"));
        let mut art = tiny_artifact();
        art.feature_names = vec!["rainfall".into(), "temp".into(), "soil_ph".into()];
        store.save(&art).unwrap();

        assert!(matches!(store.load().unwrap_err(), ModelStoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_unknown_version_is_refused() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("crop_model.bin"));
        let mut art = tiny_artifact();
        art.format_version = 99;
        store.save(&art).unwrap();

        assert!(matches!(
            store.load().unwrap_err(),
            ModelStoreError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_summary_written_next_to_artifact() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("crop_model.bin"));
        store.save_summary(&serde_json::json!({"trained_rows": 2})).unwrap();

        assert_eq!(store.summary_path(), dir.path().join("crop_model.json"));
        let text = fs::read_to_string(store.summary_path()).unwrap();
        assert!(text.contains("\"trained_rows\": 2"));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = dir.path().join("crop_model.bin");
        fs::write(&path, b"old").unwrap();

        let store = ModelStore::new(&path);
        store.save(&tiny_artifact()).unwrap();
        assert!(store.load().is_ok());
    }
}
