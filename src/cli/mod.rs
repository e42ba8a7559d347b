// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and delegates to Layer 2 (application); the only output
// printed here is the one-line result of each command.
//
// Three commands are supported:
//   1. `train`   — fit the forest and save the model artifact
//   2. `serve`   — load the artifact and serve HTTP predictions
//   3. `predict` — load the artifact and print one prediction

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::application::predict_use_case::PredictUseCase;
use crate::application::train_use_case::TrainUseCase;
use crate::domain::features::CropFeatures;
use crate::domain::traits::CropRecommender;
use crate::infra::config::Config;
use commands::{Commands, PredictArgs, ServeArgs, TrainArgs};

/// The main CLI struct
#[derive(Parser, Debug)]
#[command(
    name = "crop-recommender",
    version,
    about = "Train a random-forest crop recommender, then serve its predictions."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Serve(args)   => run_serve(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

/// Handles the `train` subcommand.
fn run_train(args: TrainArgs) -> Result<()> {
    let config  = Config::load_or_default(args.config.as_deref())?;
    let section = args.apply(config.training);
    let model_path = section.model_path.clone();

    tracing::info!("Starting training on dataset: {}", section.data_path.display());
    TrainUseCase::new(section.into()).execute()?;

    println!("Model trained and saved to '{}'", model_path.display());
    Ok(())
}

/// Handles the `serve` subcommand.
///
/// The model is loaded before the runtime starts, so a missing
/// artifact stops the process without ever binding the port.
fn run_serve(args: ServeArgs) -> Result<()> {
    let config  = Config::load_or_default(args.config.as_deref())?;
    let section = args.apply(config.server);

    let ip: IpAddr = section
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", section.bind))?;
    let addr = SocketAddr::new(ip, section.port);

    let use_case = PredictUseCase::load(&section.model_path)?;
    tracing::info!("Model ready, labels: {}", use_case.classes().join(", "));

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(crate::server::serve(Arc::new(use_case), addr))
}

/// Handles the `predict` subcommand.
fn run_predict(args: PredictArgs) -> Result<()> {
    let model_path = match args.model {
        Some(path) => path,
        None => Config::load_or_default(args.config.as_deref())?.server.model_path,
    };

    let use_case = PredictUseCase::load(&model_path)?;
    let crop = use_case.recommend(&CropFeatures::new(args.temp, args.rainfall, args.soil_ph))?;

    println!("Recommended crop: {}", crop);
    Ok(())
}
