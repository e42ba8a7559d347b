// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `serve` and `predict`
// and all their configurable flags.
//
// Flags are optional wherever a config file or built-in default
// can supply the value. Precedence, highest first:
//   command-line flag  >  --config file  >  built-in default

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::infra::config::{ServerSection, TrainingSection};

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit a random forest on the crop dataset and save the model
    Train(TrainArgs),

    /// Load the saved model and serve predictions over HTTP
    Serve(ServeArgs),

    /// Load the saved model and predict a single crop
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug, Default)]
pub struct TrainArgs {
    /// CSV dataset with temp, rainfall, soil_ph and crop columns
    /// [default: data/crop_data.csv]
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Where to write the trained model [default: models/crop_model.bin]
    #[arg(long)]
    pub model_out: Option<PathBuf>,

    /// Number of trees in the forest [default: 100]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub n_estimators: Option<u64>,

    /// Seed for bootstrap sampling and feature selection [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum depth of each tree [default: unlimited]
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Minimum samples a node needs before it may split [default: 2]
    #[arg(long, value_parser = clap::value_parser!(u64).range(2..))]
    pub min_samples_split: Option<u64>,

    /// Share of rows held out to report accuracy, in [0, 1) [default: 0]
    #[arg(long, value_parser = parse_fraction)]
    pub holdout_fraction: Option<f64>,

    /// YAML or TOML file supplying defaults for the flags above
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl TrainArgs {
    /// Overlay the flags that were given onto `section`.
    pub fn apply(self, mut section: TrainingSection) -> TrainingSection {
        if let Some(v) = self.data              { section.data_path = v; }
        if let Some(v) = self.model_out         { section.model_path = v; }
        if let Some(v) = self.n_estimators      { section.n_estimators = v as usize; }
        if let Some(v) = self.seed              { section.seed = v; }
        if let Some(v) = self.max_depth         { section.max_depth = Some(v); }
        if let Some(v) = self.min_samples_split { section.min_samples_split = v as usize; }
        if let Some(v) = self.holdout_fraction  { section.holdout_fraction = v; }
        section
    }
}

/// All arguments for the `serve` command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Trained model to load at startup [default: models/crop_model.bin]
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Address to bind [default: 127.0.0.1]
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on [default: 5001]
    #[arg(long)]
    pub port: Option<u16>,

    /// YAML or TOML file supplying defaults for the flags above
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ServeArgs {
    /// Overlay the flags that were given onto `section`.
    pub fn apply(self, mut section: ServerSection) -> ServerSection {
        if let Some(v) = self.model { section.model_path = v; }
        if let Some(v) = self.bind  { section.bind = v; }
        if let Some(v) = self.port  { section.port = v; }
        section
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    pub temp: f64,

    /// Rainfall in mm
    #[arg(long, allow_negative_numbers = true)]
    pub rainfall: f64,

    /// Soil pH
    #[arg(long, allow_negative_numbers = true)]
    pub soil_ph: f64,

    /// Trained model to load [default: models/crop_model.bin]
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// YAML or TOML file; its [server] model_path is used when --model is absent
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is not in [0, 1)"))
    }
}
