// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// training a model, or answering predictions with one.
//
// Rules for this layer:
//   - No model math here (that's Layer 5)
//   - No printing or HTTP here (that's Layers 1 and 7)
//   - Only workflow coordination

// The offline training workflow
pub mod train_use_case;

// The load-once, predict-many workflow
pub mod predict_use_case;
