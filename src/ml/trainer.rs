// ============================================================
// Layer 5 — Training Run
// ============================================================
// Fits a forest on the training rows and, when a holdout set is
// given, scores it on rows the forest never saw.
//
// Accuracy is measured on label strings rather than class ids,
// so a holdout crop that never appears in the training rows
// simply counts as a miss.

use anyhow::Result;
use serde::Serialize;

use crate::data::dataset::LabeledDataset;
use crate::domain::record::TrainingRecord;
use crate::ml::forest::{ForestConfig, ForestError, RandomForest};

/// What a training run produced, for logging and the CLI summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainReport {
    pub trained_rows:     usize,
    pub holdout_rows:     usize,
    pub n_classes:        usize,
    pub n_estimators:     usize,
    pub holdout_accuracy: Option<f64>,
}

pub fn run_training(
    config:  &ForestConfig,
    train:   &[TrainingRecord],
    holdout: &[TrainingRecord],
) -> Result<(RandomForest, TrainReport)> {
    let dataset = LabeledDataset::from_records(train);
    tracing::info!(
        "Fitting {} trees (seed={}) on {} rows, {} classes",
        config.n_estimators,
        config.seed,
        dataset.len(),
        dataset.n_classes()
    );

    let forest = RandomForest::fit(&dataset, config)?;

    let holdout_accuracy = if holdout.is_empty() {
        None
    } else {
        let acc = accuracy(&forest, holdout)?;
        tracing::info!("Holdout accuracy: {:.1}% on {} rows", acc * 100.0, holdout.len());
        Some(acc)
    };

    let report = TrainReport {
        trained_rows: dataset.len(),
        holdout_rows: holdout.len(),
        n_classes: dataset.n_classes(),
        n_estimators: forest.n_estimators(),
        holdout_accuracy,
    };
    Ok((forest, report))
}

/// Fraction of `records` whose crop the forest predicts exactly.
pub fn accuracy(forest: &RandomForest, records: &[TrainingRecord]) -> Result<f64, ForestError> {
    if records.is_empty() {
        return Ok(0.0);
    }
    let mut correct = 0usize;
    for record in records {
        if forest.predict(&record.features().to_row())? == record.crop {
            correct += 1;
        }
    }
    Ok(correct as f64 / records.len() as f64)
}
