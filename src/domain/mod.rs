// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that both the trainer and the service agree on:
//
//   features.rs — the feature schema (column names + order) and
//                 the single-row input the service accepts
//   record.rs   — one labelled row of the training dataset
//   traits.rs   — the seams other layers implement
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO model code
//   - Only plain Rust structs, enums, and traits

/// Feature schema shared by training and serving
pub mod features;

/// One labelled training row
pub mod record;

/// Core abstractions (traits) that other layers implement
pub mod traits;
