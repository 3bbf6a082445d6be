use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hitcast_model::{
    ForestParams, Trainer, TrainerConfig, TrainingReport, DEFAULT_ARTIFACT_PATH,
    DEFAULT_DATASET_PATH,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Train the hit classifier and write the model artifact"
)]
struct Args {
    /// CSV with the audio feature columns and `track_popularity`
    #[arg(default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,
    /// Where to write the trained model
    #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
    output: PathBuf,
    /// Score a separate fit on this fraction of rows before training on all of them
    #[arg(long, value_parser = parse_fraction)]
    holdout: Option<f64>,
    /// Print the training report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_fraction(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!("holdout must be between 0 and 1, got {value}"))
    }
}

impl Args {
    fn config(&self) -> TrainerConfig {
        TrainerConfig {
            dataset_path: self.dataset.clone(),
            artifact_path: self.output.clone(),
            holdout: self.holdout,
            forest: ForestParams::default(),
        }
    }
}

fn summary(report: &TrainingReport) -> String {
    let mut line = format!(
        "Trained {} trees on {} rows ({} hits, {} misses) -> {}",
        report.trees,
        report.rows,
        report.hits,
        report.misses,
        report.artifact_path.display()
    );
    if let Some(evaluation) = &report.evaluation {
        line.push_str(&format!(
            "; held-out accuracy {:.1}% over {} rows",
            evaluation.accuracy() * 100.0,
            evaluation.samples()
        ));
    }
    line
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let trainer = Trainer::new(args.config());
    let report = trainer
        .run()
        .with_context(|| format!("training from {}", args.dataset.display()))?;
    info!(rows = report.rows, trees = report.trees, "artifact written");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary(&report));
    }
    Ok(())
}
