use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, instrument};

use crate::artifact::{ModelArtifact, DEFAULT_ARTIFACT_PATH};
use crate::dataset::{TrainingSet, DEFAULT_DATASET_PATH};
use crate::error::ModelError;
use crate::evaluation::Evaluation;
use crate::forest::{ForestParams, HitForest};

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub dataset_path: PathBuf,
    pub artifact_path: PathBuf,
    /// Fraction of rows scored by a separate evaluation fit. The saved model
    /// is always fitted on every row.
    pub holdout: Option<f64>,
    pub forest: ForestParams,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            holdout: None,
            forest: ForestParams::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub hits: usize,
    pub misses: usize,
    pub trees: usize,
    pub evaluation: Option<Evaluation>,
    pub artifact_path: PathBuf,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Load, optionally evaluate, fit and persist. Nothing is written unless
    /// the dataset loads and the fit succeeds.
    #[instrument(skip(self), fields(dataset = %self.config.dataset_path.display()))]
    pub fn run(&self) -> Result<TrainingReport, ModelError> {
        let set = TrainingSet::from_csv_path(&self.config.dataset_path)?;
        let balance = set.class_balance();
        info!(rows = set.len(), hits = balance.hits, misses = balance.misses, "dataset labeled");

        let evaluation = match self.config.holdout {
            Some(fraction) => Some(self.evaluate_holdout(&set, fraction)?),
            None => None,
        };

        let artifact = self.fit(&set)?;
        artifact.save(&self.config.artifact_path)?;

        Ok(TrainingReport {
            rows: set.len(),
            hits: balance.hits,
            misses: balance.misses,
            trees: artifact.forest.tree_count(),
            evaluation,
            artifact_path: self.config.artifact_path.clone(),
        })
    }

    pub fn fit(&self, set: &TrainingSet) -> Result<ModelArtifact, ModelError> {
        let started = Instant::now();
        info!(trees = self.config.forest.n_trees, seed = self.config.forest.seed, "training ensemble");
        let forest = HitForest::fit(set.records(), set.labels(), &self.config.forest)?;
        info!(elapsed_ms = started.elapsed().as_millis() as u64, "training complete");
        Ok(ModelArtifact::new(forest, set.len()))
    }

    pub fn evaluate_holdout(
        &self,
        set: &TrainingSet,
        fraction: f64,
    ) -> Result<Evaluation, ModelError> {
        let (train, holdout) = set.split_holdout(fraction, self.config.forest.seed)?;
        let forest = HitForest::fit(train.records(), train.labels(), &self.config.forest)?;
        let evaluation = Evaluation::score(&forest, &holdout);
        info!(
            holdout_rows = holdout.len(),
            accuracy = evaluation.accuracy(),
            "held-out evaluation"
        );
        Ok(evaluation)
    }
}
