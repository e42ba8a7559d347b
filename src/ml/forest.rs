// ============================================================
// Layer 5 — Random Forest Classifier
// ============================================================
// A bagged ensemble of CART trees:
//
//   fit:
//     for each of n_estimators trees
//       - derive a per-tree RNG from the master seed
//       - draw n row indices with replacement (bootstrap)
//       - grow a tree, trying sqrt(n_features) features per split
//
//   predict:
//     average the leaf class distributions of every tree and
//     return the class with the highest mean probability
//     (ties go to the lowest class id, i.e. the label that
//     sorts first)
//
// The same seed and dataset always produce the same forest.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::dataset::LabeledDataset;
use crate::domain::features::N_FEATURES;
use crate::ml::tree::{DecisionTree, TreeParams};

/// Default ensemble size.
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Default master seed.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Error, PartialEq)]
pub enum ForestError {
    #[error("cannot fit a forest on an empty dataset")]
    EmptyDataset,

    #[error("n_estimators must be at least 1")]
    NoEstimators,

    #[error("X has {got} features, but the model expects {expected} features as input")]
    FeatureCount { expected: usize, got: usize },

    #[error("model has no classes")]
    NoClasses,

    #[error("tree {0} is malformed")]
    MalformedTree(usize),
}

/// Hyperparameters for fitting a forest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators:      usize,
    pub seed:              u64,
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators:      DEFAULT_N_ESTIMATORS,
            seed:              DEFAULT_SEED,
            max_depth:         None,
            min_samples_split: 2,
        }
    }
}

/// Features tried per split: floor(sqrt(n)), at least 1.
pub fn max_features_for(n_features: usize) -> usize {
    ((n_features as f64).sqrt().floor() as usize).max(1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees:      Vec<DecisionTree>,
    classes:    Vec<String>,
    n_features: usize,
    config:     ForestConfig,
}

impl RandomForest {
    pub fn fit(dataset: &LabeledDataset, config: &ForestConfig) -> Result<Self, ForestError> {
        if dataset.is_empty() {
            return Err(ForestError::EmptyDataset);
        }
        if config.n_estimators == 0 {
            return Err(ForestError::NoEstimators);
        }

        let params = TreeParams {
            max_depth:         config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
            max_features:      max_features_for(N_FEATURES),
        };
        let n         = dataset.len();
        let n_classes = dataset.n_classes();

        let mut master = StdRng::seed_from_u64(config.seed);
        let trees: Vec<DecisionTree> = (0..config.n_estimators)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.gen());
                let mut samples: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(&dataset.rows, &dataset.labels, &mut samples, n_classes, params, &mut rng)
            })
            .collect();

        tracing::debug!(
            "Grew {} trees, {} nodes in total",
            trees.len(),
            trees.iter().map(DecisionTree::node_count).sum::<usize>()
        );

        Ok(Self {
            trees,
            classes: dataset.classes.clone(),
            n_features: N_FEATURES,
            config: *config,
        })
    }

    /// Mean class probabilities over all trees, indexed like `classes()`.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ForestError> {
        if row.len() != self.n_features {
            return Err(ForestError::FeatureCount { expected: self.n_features, got: row.len() });
        }
        if self.classes.is_empty() {
            return Err(ForestError::NoClasses);
        }
        if self.trees.is_empty() {
            return Err(ForestError::NoEstimators);
        }

        let mut mean = vec![0.0f64; self.classes.len()];
        for (i, tree) in self.trees.iter().enumerate() {
            let proba = tree.predict_proba(row).ok_or(ForestError::MalformedTree(i))?;
            if proba.len() != mean.len() {
                return Err(ForestError::MalformedTree(i));
            }
            for (m, p) in mean.iter_mut().zip(proba) {
                *m += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        mean.iter_mut().for_each(|m| *m /= n_trees);
        Ok(mean)
    }

    /// The most probable label for `row`.
    pub fn predict(&self, row: &[f64]) -> Result<&str, ForestError> {
        let proba = self.predict_proba(row)?;
        let best = proba
            .iter()
            .enumerate()
            .fold(0, |best, (i, &p)| if p > proba[best] { i } else { best });
        Ok(&self.classes[best])
    }

    /// Labels the forest can predict, sorted.
    pub fn classes(&self) -> &[String] { &self.classes }

    pub fn n_estimators(&self) -> usize { self.trees.len() }

    pub fn config(&self) -> &ForestConfig { &self.config }
}
