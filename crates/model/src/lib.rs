pub mod artifact;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod forest;
pub mod predictor;
pub mod trainer;

#[cfg(test)]
pub(crate) mod testing;

pub use artifact::{ModelArtifact, DEFAULT_ARTIFACT_PATH};
pub use dataset::{ClassBalance, TrainingSet, DEFAULT_DATASET_PATH, POPULARITY_COLUMN};
pub use error::ModelError;
pub use evaluation::Evaluation;
pub use forest::{ForestParams, HitForest, VoteTally};
pub use predictor::{ModelStatus, Predictor};
pub use trainer::{Trainer, TrainerConfig, TrainingReport};
