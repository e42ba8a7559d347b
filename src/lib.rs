//! Crop recommendation from temperature, rainfall and soil pH.
//!
//! Two halves share only the model artifact on disk:
//! - `train` fits a random forest on a labelled CSV and saves it
//! - `serve` loads it once and answers `POST /predict_crop`
//!
//! Layers, outermost first: `cli` → `application` → `domain` / `data`
//! / `ml` / `infra`, with `server` exposing the predictor over HTTP.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
pub mod server;
