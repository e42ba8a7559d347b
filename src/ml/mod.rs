// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Everything that knows how a crop is predicted lives here.
//
//   tree.rs       — CART decision tree (Gini impurity, arena of nodes)
//   forest.rs     — bagged ensemble of trees, seeded and reproducible
//   trainer.rs    — one training run plus holdout accuracy
//   inferencer.rs — wraps a loaded artifact for single-row prediction

/// CART decision tree
pub mod tree;

/// Random forest ensemble
pub mod forest;

/// Training run and accuracy reporting
pub mod trainer;

/// Prediction over a loaded artifact
pub mod inferencer;
