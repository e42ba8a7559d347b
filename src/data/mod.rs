// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Takes the dataset file all the way to model-ready arrays:
//
//   crop_data.csv
//       │
//       ▼
//   CsvLoader         → parses rows into TrainingRecords
//       │
//       ▼
//   split_train_val   → optional seeded train/holdout split
//       │
//       ▼
//   LabeledDataset    → feature rows + label-encoded targets
//
// Each module is responsible for exactly one step.

/// Reads TrainingRecords from a CSV file
pub mod loader;

/// Feature matrix and label encoding
pub mod dataset;

/// Seeded shuffle and train/holdout split
pub mod splitter;
