// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the offline training job, in order:
//
//   Step 1: Load the CSV dataset        (Layer 4 - data)
//   Step 2: Optional train/holdout split (Layer 4 - data)
//   Step 3: Fit the random forest        (Layer 5 - ml)
//   Step 4: Persist the model artifact   (Layer 6 - infra)
//           and a JSON summary of the run
//
// Any failure aborts the run; there is nothing to recover.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{loader::CsvLoader, splitter::split_train_val};
use crate::domain::traits::RecordSource;
use crate::infra::config::TrainingSection;
use crate::infra::model_store::{ModelArtifact, ModelStore};
use crate::ml::forest::ForestConfig;
use crate::ml::trainer::{run_training, TrainReport};

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:        PathBuf,
    pub model_path:       PathBuf,
    pub forest:           ForestConfig,
    pub holdout_fraction: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainingSection::default().into()
    }
}

impl From<TrainingSection> for TrainConfig {
    fn from(s: TrainingSection) -> Self {
        TrainConfig {
            data_path:  s.data_path,
            model_path: s.model_path,
            forest: ForestConfig {
                n_estimators:      s.n_estimators,
                seed:              s.seed,
                max_depth:         s.max_depth,
                min_samples_split: s.min_samples_split,
            },
            holdout_fraction: s.holdout_fraction,
        }
    }
}

/// Written next to the artifact for later inspection.
#[derive(Debug, Serialize)]
struct TrainSummary<'a> {
    config: &'a TrainConfig,
    report: &'a TrainReport,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1: Load the dataset ──────────────────────────────────────────
        let records = CsvLoader::new(&cfg.data_path).load_all()?;
        if records.is_empty() {
            bail!("dataset '{}' contains no rows", cfg.data_path.display());
        }

        // ── Step 2: Optional holdout split ────────────────────────────────────
        // With no holdout every row trains, in file order.
        let (train, holdout) = if cfg.holdout_fraction > 0.0 {
            split_train_val(records, 1.0 - cfg.holdout_fraction, cfg.forest.seed)
        } else {
            (records, Vec::new())
        };

        // ── Step 3: Fit ───────────────────────────────────────────────────────
        let (forest, report) = run_training(&cfg.forest, &train, &holdout)?;

        // ── Step 4: Persist ───────────────────────────────────────────────────
        let store = ModelStore::new(&cfg.model_path);
        store.save(&ModelArtifact::new(forest, train.len()))?;
        store.save_summary(&TrainSummary { config: cfg, report: &report })?;
        tracing::info!("Model artifact written to '{}'", cfg.model_path.display());

        Ok(report)
    }
}
