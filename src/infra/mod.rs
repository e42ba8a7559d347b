// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to a business layer:
//
//   model_store.rs — writes and reads the model artifact
//                    (bincode), and checks its feature layout
//                    and format version on load, plus a JSON
//                    summary of each training run
//
//   config.rs      — optional YAML/TOML file supplying defaults
//                    for the trainer and the service

/// Model artifact persistence
pub mod model_store;

/// Configuration file loading
pub mod config;
