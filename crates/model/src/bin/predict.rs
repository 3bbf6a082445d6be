use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hitcast_domain::{DomainError, Feature, FeatureVector};
use hitcast_model::{Predictor, DEFAULT_ARTIFACT_PATH};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score one track against a trained hit model", long_about = None)]
struct Cli {
    /// Path to the trained model artifact
    #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
    model: PathBuf,
    #[arg(long)]
    acousticness: Option<f64>,
    #[arg(long)]
    danceability: Option<f64>,
    /// Track length in milliseconds
    #[arg(long)]
    duration_ms: Option<u32>,
    #[arg(long)]
    energy: Option<f64>,
    #[arg(long)]
    instrumentalness: Option<f64>,
    #[arg(long)]
    liveness: Option<f64>,
    /// Loudness in dB
    #[arg(long, allow_hyphen_values = true)]
    loudness: Option<f64>,
    #[arg(long)]
    speechiness: Option<f64>,
    /// Tempo in BPM
    #[arg(long)]
    tempo: Option<f64>,
    #[arg(long)]
    valence: Option<f64>,
    /// Print the features and prediction as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Default slider profile with any given flags applied.
    fn features(&self) -> Result<FeatureVector, DomainError> {
        let overrides = [
            (Feature::Acousticness, self.acousticness),
            (Feature::Danceability, self.danceability),
            (Feature::DurationMs, self.duration_ms.map(f64::from)),
            (Feature::Energy, self.energy),
            (Feature::Instrumentalness, self.instrumentalness),
            (Feature::Liveness, self.liveness),
            (Feature::Loudness, self.loudness),
            (Feature::Speechiness, self.speechiness),
            (Feature::Tempo, self.tempo),
            (Feature::Valence, self.valence),
        ];
        let mut features = FeatureVector::default_profile();
        for (feature, value) in overrides {
            if let Some(value) = value {
                features.set(feature, value)?;
            }
        }
        Ok(features)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let features = cli.features()?;
    features.check_bounds()?;

    let predictor = Predictor::load(&cli.model)
        .with_context(|| format!("load model {:?}", cli.model))?;
    let prediction = predictor.predict(&features)?;

    if cli.json {
        let output = serde_json::json!({
            "features": features,
            "prediction": prediction,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let verdict = if prediction.is_hit() { "HIT" } else { "MISS" };
        println!("{verdict} ({:.1}% hit probability)", prediction.percent());
    }
    Ok(())
}
